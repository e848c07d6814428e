//! Terminal input lines and how they act on the game state.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use game::{ActionError, ClientEvent, GameState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Guess(String),
    Start { question: String, answer: String },
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("usage: /start <question> | <answer>")]
    StartUsage,
    #[error("unknown command `{0}`, try /help")]
    Unknown(String),
}

/// Parse one line. Blank lines yield `Ok(None)`; plain text is a guess.
pub fn parse(line: &str) -> Result<Option<Input>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Some(command) = line.strip_prefix('/') else {
        return Ok(Some(Input::Guess(line.to_owned())));
    };
    let (name, rest) = command.split_once(char::is_whitespace).unwrap_or((command, ""));
    let rest = rest.trim();
    let input = match name {
        "guess" | "g" => Input::Guess(rest.to_owned()),
        "start" | "s" => {
            let (question, answer) = rest.split_once('|').ok_or(InputError::StartUsage)?;
            Input::Start {
                question: question.trim().to_owned(),
                answer: answer.trim().to_owned(),
            }
        }
        "help" | "h" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        other => return Err(InputError::Unknown(other.to_owned())),
    };
    Ok(Some(input))
}

/// Apply an input to the state. Returns the event to emit, or `None` after
/// pushing a notice for a local rejection.
pub fn apply(state: &mut GameState, input: Input) -> Option<ClientEvent> {
    let result = match input {
        Input::Guess(text) => {
            state.guess_input = text;
            state.submit_guess()
        }
        Input::Start { question, answer } => start_round(state, question, answer),
        Input::Help | Input::Quit => return None,
    };
    result.map_err(|err| state.push_notice(err)).ok()
}

/// The terminal has no dialog, so authoring opens and submits in one step.
fn start_round(state: &mut GameState, question: String, answer: String) -> Result<ClientEvent, ActionError> {
    state.open_authoring()?;
    if let Some(draft) = state.draft_mut() {
        draft.question = question;
        draft.answer = answer;
    }
    let result = state.start_round();
    if result.is_err() {
        state.cancel_authoring();
    }
    result
}
