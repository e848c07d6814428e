//! Networking modules for session creation and the realtime channel.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles the one REST call (create session) and `channel` manages the
//! Socket.IO websocket whose events drive the shared `GameState`.

pub mod api;
pub mod channel;
