//! Render projection of [`GameState`].
//!
//! Front-ends switch on [`ScreenKind`] for layout and read the text helpers
//! for content, so the browser and terminal show the same words.

#[cfg(test)]
#[path = "screen_test.rs"]
mod screen_test;

use crate::state::GameState;

/// Which main view is showing. Overlays (authoring, notices) are separate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScreenKind {
    /// Identity and session-code inputs with create/join actions.
    #[default]
    Lobby,
    /// Joined, no question active.
    WaitingRoom,
    /// Joined, question active.
    RoundActive,
}

/// Text for the active-round panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundView {
    pub question_line: String,
    pub timer_line: String,
    pub attempts_line: String,
    pub can_guess: bool,
}

impl GameState {
    #[must_use]
    pub fn screen_kind(&self) -> ScreenKind {
        match self.session() {
            None => ScreenKind::Lobby,
            Some(session) if session.round.is_some() => ScreenKind::RoundActive,
            Some(_) => ScreenKind::WaitingRoom,
        }
    }

    /// Session code banner; the master sees the code as theirs to share.
    #[must_use]
    pub fn session_banner(&self) -> Option<String> {
        let session = self.session()?;
        if session.is_master() {
            Some(format!("🔑 Your Game Code: {}", session.code))
        } else {
            Some(format!("🏷️ Session Code: {}", session.code))
        }
    }

    #[must_use]
    pub fn roster_line(&self) -> String {
        if self.roster.is_empty() {
            return "Players: Waiting...".to_owned();
        }
        let names = self
            .roster
            .iter()
            .map(|player| player.username.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Players: {names}")
    }

    #[must_use]
    pub fn can_start_round(&self) -> bool {
        self.session().is_some_and(crate::state::Session::can_start_round)
    }

    #[must_use]
    pub fn is_authoring(&self) -> bool {
        self.draft().is_some()
    }

    #[must_use]
    pub fn round_view(&self) -> Option<RoundView> {
        let session = self.session()?;
        let round = session.round.as_ref()?;
        Some(RoundView {
            question_line: format!("Question: {}", round.question),
            timer_line: format!("⏰ Time left: {}s", session.timer),
            attempts_line: format!("💭 Attempts left: {}", round.attempts_remaining),
            can_guess: round.attempts_remaining > 0,
        })
    }

    #[must_use]
    pub fn chat_lines(&self) -> Vec<String> {
        self.chat.iter().map(ToString::to_string).collect()
    }
}
