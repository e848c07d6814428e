//! Session state machine and the actions that drive it.
//!
//! STATE MACHINE
//! =============
//! ```text
//! Lobby ──begin_create──▶ Creating ──create_succeeded──▶ Joined(Master)
//!   │                        └──────create_failed──────▶ Lobby
//!   └──join──▶ Joined(Player) ──error before roster──▶ Lobby
//! ```
//! Inside `Joined`, an active [`Round`] and an authoring [`QuestionDraft`]
//! are independent overlays. A draft only exists for a master while no round
//! is running; a round starting discards it.
//!
//! Actions validate first and mutate second: an `Err` leaves the state
//! exactly as it was.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::collections::VecDeque;

use serde::Serialize;
use wire::{ClientEvent, Player, ServerEvent};

use crate::chat::ChatEntry;
use crate::notice::{ActionError, Notice};
use crate::pending::{PendingKind, PendingQueue};

/// Guesses allowed per round.
pub const MAX_ATTEMPTS: u8 = 3;

/// Whether this client created the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Role {
    Master,
    #[default]
    Player,
}

/// A question currently open for guesses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub question: String,
    pub attempts_remaining: u8,
}

impl Round {
    fn new(question: String) -> Self {
        Self {
            question,
            attempts_remaining: MAX_ATTEMPTS,
        }
    }
}

/// The master's in-progress question/answer entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub answer: String,
}

/// A joined or created session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub code: String,
    pub username: String,
    pub role: Role,
    pub round: Option<Round>,
    /// Last countdown value pushed by the service, in seconds.
    pub timer: i64,
    pub authoring: Option<QuestionDraft>,
}

impl Session {
    fn new(code: String, username: String, role: Role) -> Self {
        Self {
            code,
            username,
            role,
            round: None,
            timer: 0,
            authoring: None,
        }
    }

    #[must_use]
    pub fn is_master(&self) -> bool {
        self.role == Role::Master
    }

    /// Attempts left in the current round; a full set when no round runs.
    #[must_use]
    pub fn attempts_remaining(&self) -> u8 {
        self.round.as_ref().map_or(MAX_ATTEMPTS, |round| round.attempts_remaining)
    }

    #[must_use]
    pub fn question(&self) -> Option<&str> {
        self.round.as_ref().map(|round| round.question.as_str())
    }

    /// The start-round control is offered only to a master between rounds.
    #[must_use]
    pub fn can_start_round(&self) -> bool {
        self.is_master() && self.round.is_none()
    }
}

/// Coarse lifecycle of the client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Lobby,
    /// A create-session request is in flight for this username.
    Creating { username: String },
    Joined(Session),
}

/// Body of the create-session HTTP request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateRequest {
    pub username: String,
}

/// Everything the client knows, owned by one view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameState {
    /// Identity input.
    pub username: String,
    /// Session code input; holds the generated code after a create.
    pub code_input: String,
    /// Guess input.
    pub guess_input: String,
    pub phase: Phase,
    pub roster: Vec<Player>,
    pub chat: Vec<ChatEntry>,
    pub notices: VecDeque<Notice>,
    pub pending: PendingQueue,
}

impl GameState {
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            Phase::Joined(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_joined(&self) -> bool {
        matches!(self.phase, Phase::Joined(_))
    }

    #[must_use]
    pub fn is_creating(&self) -> bool {
        matches!(self.phase, Phase::Creating { .. })
    }

    #[must_use]
    pub fn is_master(&self) -> bool {
        self.session().is_some_and(Session::is_master)
    }

    fn ensure_lobby(&self) -> Result<(), ActionError> {
        match self.phase {
            Phase::Lobby => Ok(()),
            Phase::Creating { .. } => Err(ActionError::CreateInFlight),
            Phase::Joined(_) => Err(ActionError::AlreadyJoined),
        }
    }

    /// Validate the identity and mark a create-session request in flight.
    ///
    /// # Errors
    ///
    /// [`ActionError::MissingUsername`] for an empty name; a second submission
    /// while one is in flight is [`ActionError::CreateInFlight`].
    pub fn begin_create(&mut self) -> Result<CreateRequest, ActionError> {
        self.ensure_lobby()?;
        if self.username.is_empty() {
            return Err(ActionError::MissingUsername);
        }
        let username = self.username.clone();
        self.phase = Phase::Creating {
            username: username.clone(),
        };
        Ok(CreateRequest { username })
    }

    /// Apply a successful create-session response. Returns `false` when no
    /// request was in flight.
    pub fn create_succeeded(&mut self, session_code: String) -> bool {
        let Phase::Creating { username } = &self.phase else {
            return false;
        };
        let username = username.clone();
        self.code_input.clone_from(&session_code);
        self.notices
            .push_back(Notice::info(format!("Game created! Your code is {session_code}")));
        self.phase = Phase::Joined(Session::new(session_code, username, Role::Master));
        true
    }

    /// Apply a failed create-session attempt. Returns `false` when no request
    /// was in flight.
    pub fn create_failed(&mut self) -> bool {
        if !self.is_creating() {
            return false;
        }
        self.phase = Phase::Lobby;
        self.notices.push_back(Notice::error("Error creating session"));
        true
    }

    /// Join the session named by `code_input`.
    ///
    /// The session is entered immediately; a later service `error` before
    /// any roster update sends the client back to the lobby.
    ///
    /// # Errors
    ///
    /// [`ActionError::MissingJoinFields`] when the name or code is empty.
    pub fn join(&mut self) -> Result<ClientEvent, ActionError> {
        self.ensure_lobby()?;
        if self.username.is_empty() || self.code_input.is_empty() {
            return Err(ActionError::MissingJoinFields);
        }
        let username = self.username.clone();
        let session_code = self.code_input.clone();
        self.pending.push(PendingKind::Join {
            session_code: session_code.clone(),
        });
        self.phase = Phase::Joined(Session::new(session_code.clone(), username.clone(), Role::Player));
        Ok(ClientEvent::JoinSession {
            username,
            session_code,
        })
    }

    /// Open the question/answer authoring overlay.
    ///
    /// # Errors
    ///
    /// Only a joined master with no round running may author.
    pub fn open_authoring(&mut self) -> Result<(), ActionError> {
        let Phase::Joined(session) = &mut self.phase else {
            return Err(ActionError::NotJoined);
        };
        if !session.is_master() {
            return Err(ActionError::NotMaster);
        }
        if session.round.is_some() {
            return Err(ActionError::RoundInProgress);
        }
        if session.authoring.is_none() {
            session.authoring = Some(QuestionDraft::default());
        }
        Ok(())
    }

    #[must_use]
    pub fn draft(&self) -> Option<&QuestionDraft> {
        self.session().and_then(|session| session.authoring.as_ref())
    }

    pub fn draft_mut(&mut self) -> Option<&mut QuestionDraft> {
        match &mut self.phase {
            Phase::Joined(session) => session.authoring.as_mut(),
            _ => None,
        }
    }

    /// Close the authoring overlay, discarding the draft.
    pub fn cancel_authoring(&mut self) -> bool {
        match &mut self.phase {
            Phase::Joined(session) => session.authoring.take().is_some(),
            _ => false,
        }
    }

    /// Submit the draft as a new round.
    ///
    /// # Errors
    ///
    /// [`ActionError::MissingQuestionFields`] keeps the overlay open with the
    /// draft untouched.
    pub fn start_round(&mut self) -> Result<ClientEvent, ActionError> {
        let Phase::Joined(session) = &mut self.phase else {
            return Err(ActionError::NotJoined);
        };
        match &session.authoring {
            None => return Err(ActionError::NotAuthoring),
            Some(draft) if draft.question.is_empty() || draft.answer.is_empty() => {
                return Err(ActionError::MissingQuestionFields);
            }
            Some(_) => {}
        }
        let QuestionDraft { question, answer } = session.authoring.take().unwrap_or_default();
        self.pending.push(PendingKind::StartGame {
            question: question.clone(),
            answer: answer.clone(),
        });
        Ok(ClientEvent::StartGame {
            session_code: session.code.clone(),
            question,
            answer,
        })
    }

    /// Spend one attempt on the current guess input.
    ///
    /// The guess text itself is not validated.
    ///
    /// # Errors
    ///
    /// [`ActionError::NoAttemptsLeft`] once the round's attempts are spent.
    pub fn submit_guess(&mut self) -> Result<ClientEvent, ActionError> {
        let Phase::Joined(session) = &mut self.phase else {
            return Err(ActionError::NotJoined);
        };
        let round = session.round.as_mut().ok_or(ActionError::NoActiveRound)?;
        if round.attempts_remaining == 0 {
            return Err(ActionError::NoAttemptsLeft);
        }
        round.attempts_remaining -= 1;
        let guess = std::mem::take(&mut self.guess_input);
        self.pending.push(PendingKind::Guess);
        Ok(ClientEvent::Guess { guess })
    }

    pub fn push_notice(&mut self, notice: impl Into<Notice>) {
        self.notices.push_back(notice.into());
    }

    #[must_use]
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    /// Apply one service event. Returns `false` when the event does not apply
    /// to the current phase (round events before joining).
    pub fn apply(&mut self, event: ServerEvent) -> bool {
        match event {
            ServerEvent::RosterUpdate(players) => {
                self.roster = players;
                self.pending
                    .acknowledge(|kind| matches!(kind, PendingKind::Join { .. }));
                true
            }
            ServerEvent::RoundStarted { question } => {
                let Phase::Joined(session) = &mut self.phase else {
                    return false;
                };
                // An empty question carries no round.
                session.round = (!question.is_empty()).then(|| Round::new(question));
                session.authoring = None;
                self.chat.push(ChatEntry::RoundStarted);
                self.pending
                    .acknowledge(|kind| matches!(kind, PendingKind::StartGame { .. }));
                true
            }
            ServerEvent::TimerTick(seconds) => {
                let Phase::Joined(session) = &mut self.phase else {
                    return false;
                };
                session.timer = seconds;
                true
            }
            ServerEvent::ChatMessage(text) => {
                self.chat.push(ChatEntry::Message(text));
                self.pending.acknowledge(|kind| matches!(kind, PendingKind::Guess));
                true
            }
            ServerEvent::RoundEnded { message, answer } => {
                let Phase::Joined(session) = &mut self.phase else {
                    return false;
                };
                session.round = None;
                session.timer = 0;
                self.chat.push(ChatEntry::RoundEnded { message, answer });
                self.pending.settle_all(|kind| matches!(kind, PendingKind::Guess));
                true
            }
            ServerEvent::Error(message) => {
                self.notices.push_back(Notice::error(message));
                if let Some(command) = self.pending.reject_oldest() {
                    self.roll_back(command.kind);
                }
                true
            }
        }
    }

    /// Undo the most recent command after the channel refused to send it.
    pub fn emit_failed(&mut self, message: impl Into<String>) {
        self.notices.push_back(Notice::error(message));
        if let Some(command) = self.pending.reject_newest() {
            self.roll_back(command.kind);
        }
    }

    fn roll_back(&mut self, kind: PendingKind) {
        match kind {
            PendingKind::Join { session_code } => {
                let still_joining = matches!(
                    &self.phase,
                    Phase::Joined(session) if session.role == Role::Player && session.code == session_code
                );
                if still_joining {
                    self.phase = Phase::Lobby;
                    self.roster.clear();
                    self.pending.clear();
                }
            }
            PendingKind::StartGame { question, answer } => {
                if let Phase::Joined(session) = &mut self.phase
                    && session.can_start_round()
                    && session.authoring.is_none()
                {
                    session.authoring = Some(QuestionDraft { question, answer });
                }
            }
            PendingKind::Guess => {
                if let Phase::Joined(session) = &mut self.phase
                    && let Some(round) = session.round.as_mut()
                {
                    round.attempts_remaining = (round.attempts_remaining + 1).min(MAX_ATTEMPTS);
                }
            }
        }
    }
}
