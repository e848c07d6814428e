//! User actions: validate against the game state, then emit.
//!
//! The pure helpers take `&mut GameState` and turn a local validation failure
//! into a notice; the signal wrappers used by components add the channel and
//! HTTP side effects.

#[cfg(test)]
#[path = "action_test.rs"]
mod action_test;

use game::{ClientEvent, CreateRequest, GameState};
use leptos::prelude::*;

use crate::net::channel::ChannelHandle;

/// Shown when an emit finds no live channel.
pub const NOT_CONNECTED: &str = "Not connected to the game server.";

/// An action that ends in a channel emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameAction {
    Join,
    StartRound,
    SubmitGuess,
}

/// Apply `action` to `state`. Returns the event to emit, or `None` after
/// pushing a notice for a local rejection.
pub fn dispatch(state: &mut GameState, action: GameAction) -> Option<ClientEvent> {
    let result = match action {
        GameAction::Join => state.join(),
        GameAction::StartRound => state.start_round(),
        GameAction::SubmitGuess => state.submit_guess(),
    };
    result.map_err(|err| state.push_notice(err)).ok()
}

/// Open the authoring overlay, or explain why not.
pub fn open_authoring(state: &mut GameState) -> bool {
    state.open_authoring().map_err(|err| state.push_notice(err)).is_ok()
}

/// Mark a create-session request in flight, or explain why not.
pub fn begin_create(state: &mut GameState) -> Option<CreateRequest> {
    state.begin_create().map_err(|err| state.push_notice(err)).ok()
}

/// Dispatch `action` and emit its event on the channel.
///
/// An emit with no live channel undoes the action's optimistic effect.
pub fn run_action(game: RwSignal<GameState>, channel: RwSignal<ChannelHandle>, action: GameAction) {
    let Some(event) = game.try_update(|state| dispatch(state, action)).flatten() else {
        return;
    };
    if !channel.with_untracked(|handle| handle.emit(&event)) {
        leptos::logging::warn!("channel closed; `{}` not sent", event.name());
        game.update(|state| state.emit_failed(NOT_CONNECTED));
    }
}

/// Start the create-session request for the current username.
pub fn create_session(game: RwSignal<GameState>, api_url: String) {
    let Some(request) = game.try_update(begin_create).flatten() else {
        return;
    };

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        match crate::net::api::create_session(&api_url, &request).await {
            Ok(code) => {
                leptos::logging::log!("session created: {code}");
                game.update(|state| {
                    state.create_succeeded(code);
                });
            }
            Err(e) => {
                leptos::logging::warn!("create session failed: {e}");
                game.update(|state| {
                    state.create_failed();
                });
            }
        }
    });
    #[cfg(not(feature = "csr"))]
    {
        let _ = (api_url, request);
        game.update(|state| {
            state.create_failed();
        });
    }
}
