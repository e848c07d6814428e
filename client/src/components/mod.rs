//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the shared `RwSignal<GameState>` from context and route
//! user input through `util::action`, so every rule lives in the `game` crate.

pub mod chat_log;
pub mod lobby_form;
pub mod notice_dialog;
pub mod question_dialog;
pub mod round_panel;
pub mod session_header;
