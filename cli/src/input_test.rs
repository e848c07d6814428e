use super::*;
use game::{Phase, ServerEvent};

fn master() -> GameState {
    let mut state = GameState {
        username: "host".to_owned(),
        ..GameState::default()
    };
    state.begin_create().expect("create");
    state.create_succeeded("XYZ987".to_owned());
    state.dismiss_notice();
    state
}

fn player_in_round() -> GameState {
    let mut state = GameState {
        username: "alice".to_owned(),
        code_input: "ABC123".to_owned(),
        ..GameState::default()
    };
    state.join().expect("join");
    state.apply(ServerEvent::RoundStarted {
        question: "2+2?".to_owned(),
    });
    state
}

#[test]
fn blank_lines_are_ignored() {
    assert_eq!(parse("   "), Ok(None));
}

#[test]
fn plain_text_is_a_guess() {
    assert_eq!(parse("  four \n"), Ok(Some(Input::Guess("four".to_owned()))));
    assert_eq!(parse("/guess 4"), Ok(Some(Input::Guess("4".to_owned()))));
}

#[test]
fn start_splits_question_and_answer() {
    assert_eq!(
        parse("/start 2+2? | 4"),
        Ok(Some(Input::Start {
            question: "2+2?".to_owned(),
            answer: "4".to_owned(),
        }))
    );
    assert_eq!(parse("/start 2+2?"), Err(InputError::StartUsage));
}

#[test]
fn control_commands_parse() {
    assert_eq!(parse("/help"), Ok(Some(Input::Help)));
    assert_eq!(parse("/quit"), Ok(Some(Input::Quit)));
    assert_eq!(parse("/dance"), Err(InputError::Unknown("dance".to_owned())));
}

#[test]
fn start_emits_with_session_code_and_leaves_no_draft() {
    let mut state = master();
    let event = apply(
        &mut state,
        Input::Start {
            question: "2+2?".to_owned(),
            answer: "4".to_owned(),
        },
    )
    .expect("emit");
    assert_eq!(
        event,
        ClientEvent::StartGame {
            session_code: "XYZ987".to_owned(),
            question: "2+2?".to_owned(),
            answer: "4".to_owned(),
        }
    );
    assert!(state.draft().is_none());
}

#[test]
fn start_with_empty_answer_notices_and_closes_draft() {
    let mut state = master();
    let event = apply(
        &mut state,
        Input::Start {
            question: "2+2?".to_owned(),
            answer: String::new(),
        },
    );
    assert!(event.is_none());
    assert!(state.draft().is_none());
    assert_eq!(
        state.current_notice().map(|n| n.message.as_str()),
        Some("Please fill both fields!")
    );
}

#[test]
fn player_start_is_rejected() {
    let mut state = player_in_round();
    let event = apply(
        &mut state,
        Input::Start {
            question: "q".to_owned(),
            answer: "a".to_owned(),
        },
    );
    assert!(event.is_none());
    assert!(matches!(state.phase, Phase::Joined(_)));
    assert_eq!(
        state.current_notice().map(|n| n.message.as_str()),
        Some("Only the game master can set the question.")
    );
}

#[test]
fn guess_spends_attempt() {
    let mut state = player_in_round();
    let event = apply(&mut state, Input::Guess("5".to_owned())).expect("emit");
    assert_eq!(event, ClientEvent::Guess { guess: "5".to_owned() });
    assert_eq!(state.session().map(game::Session::attempts_remaining), Some(2));
}
