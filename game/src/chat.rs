//! Chat log entries.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::fmt;

/// One line of the append-only session feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatEntry {
    /// A round began.
    RoundStarted,
    /// Text relayed by the service.
    Message(String),
    /// A round finished and its answer was revealed.
    RoundEnded { message: String, answer: String },
}

impl fmt::Display for ChatEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundStarted => f.write_str("🎮 Game started! Guess now!"),
            Self::Message(text) => write!(f, "🗨️ {text}"),
            Self::RoundEnded { message, answer } => write!(f, "🏁 {message} (Answer: {answer})"),
        }
    }
}
