//! Client-side model of one guessing-game session.
//!
//! This crate is UI-framework agnostic: the browser and terminal front-ends
//! both keep a single [`GameState`], feed it user actions and
//! [`wire::ServerEvent`]s, and render from it. All game logic (codes, turn
//! order, judging, the countdown) belongs to the external service; this
//! model only tracks what the client has seen and what it has asked for.

pub mod chat;
pub mod notice;
pub mod pending;
pub mod screen;
pub mod state;

pub use chat::ChatEntry;
pub use notice::{ActionError, Notice, NoticeKind};
pub use pending::{PendingCommand, PendingKind, PendingQueue};
pub use screen::{RoundView, ScreenKind};
pub use state::{CreateRequest, GameState, MAX_ATTEMPTS, Phase, QuestionDraft, Role, Round, Session};
pub use wire::{ClientEvent, Player, ServerEvent};
