//! Blocking notices and local action errors.
//!
//! DESIGN
//! ======
//! Every user-facing failure ends up as a [`Notice`] the front-end shows until
//! dismissed. Local validation failures are [`ActionError`]s whose display
//! text is exactly what the user sees; they are raised before any state
//! change or network call.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

/// Severity of a notice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoticeKind {
    #[default]
    Info,
    Warning,
    Error,
}

/// A message the user must acknowledge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// A user action rejected locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("Enter your username first!")]
    MissingUsername,
    #[error("Enter both fields!")]
    MissingJoinFields,
    #[error("A game is already being created, please wait.")]
    CreateInFlight,
    #[error("You are already in a session.")]
    AlreadyJoined,
    #[error("You are not in a session.")]
    NotJoined,
    #[error("Only the game master can set the question.")]
    NotMaster,
    #[error("A round is already in progress.")]
    RoundInProgress,
    #[error("No question is being written.")]
    NotAuthoring,
    #[error("Please fill both fields!")]
    MissingQuestionFields,
    #[error("No round is in progress.")]
    NoActiveRound,
    #[error("No attempts left!")]
    NoAttemptsLeft,
}

impl From<ActionError> for Notice {
    fn from(err: ActionError) -> Self {
        Self::warning(err.to_string())
    }
}
