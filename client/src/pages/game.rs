//! The single game page: lobby or session view plus overlays.
//!
//! The page owns the channel lifecycle. It connects when mounted and
//! disconnects in `on_cleanup`, so no event handler outlives the view and a
//! remount never registers twice.

use game::{GameState, ScreenKind};
use leptos::prelude::*;

use crate::components::chat_log::ChatLog;
use crate::components::lobby_form::LobbyForm;
use crate::components::notice_dialog::NoticeDialog;
use crate::components::question_dialog::QuestionDialog;
use crate::components::round_panel::RoundPanel;
use crate::components::session_header::SessionHeader;
use crate::config::ClientConfig;
use crate::net::channel::ChannelHandle;
use crate::util::action::{self, GameAction};

#[component]
pub fn GamePage() -> impl IntoView {
    let game = expect_context::<RwSignal<GameState>>();
    let channel = expect_context::<RwSignal<ChannelHandle>>();
    let config = expect_context::<ClientConfig>();

    #[cfg(feature = "csr")]
    match crate::net::channel::connect(&config.socket_url, game) {
        Ok(handle) => channel.set(handle),
        Err(e) => {
            leptos::logging::warn!("channel connect failed: {e}");
            game.update(|s| s.push_notice(game::Notice::error(format!("Cannot reach the game server: {e}"))));
        }
    }
    #[cfg(not(feature = "csr"))]
    let _ = &config;

    on_cleanup(move || {
        channel.try_update(ChannelHandle::disconnect);
    });

    let screen = Memo::new(move |_| game.with(GameState::screen_kind));
    let in_session = Memo::new(move |_| screen.get() != ScreenKind::Lobby);
    let round_active = Memo::new(move |_| screen.get() == ScreenKind::RoundActive);
    let authoring = Memo::new(move |_| game.with(GameState::is_authoring));

    let on_cancel = Callback::new(move |()| {
        game.update(|s| {
            s.cancel_authoring();
        });
    });
    let on_start = Callback::new(move |()| action::run_action(game, channel, GameAction::StartRound));

    view! {
        <div class="game">
            <h1 class="game__title">"🎯 Guessing Game"</h1>
            <Show when=move || in_session.get() fallback=|| view! { <LobbyForm/> }>
                <SessionHeader/>
                <Show when=move || round_active.get()>
                    <RoundPanel/>
                </Show>
                <ChatLog/>
            </Show>
            <Show when=move || authoring.get()>
                <QuestionDialog on_cancel=on_cancel on_start=on_start/>
            </Show>
            <NoticeDialog/>
        </div>
    }
}
