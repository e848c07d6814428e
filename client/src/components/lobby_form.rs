//! Identity and session-code entry with create/join actions.

use game::GameState;
use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::net::channel::ChannelHandle;
use crate::util::action::{self, GameAction};

#[component]
pub fn LobbyForm() -> impl IntoView {
    let game = expect_context::<RwSignal<GameState>>();
    let channel = expect_context::<RwSignal<ChannelHandle>>();
    let config = expect_context::<ClientConfig>();

    let creating = Memo::new(move |_| game.with(GameState::is_creating));

    let on_create = move |_: leptos::ev::MouseEvent| action::create_session(game, config.api_url.clone());
    let on_join = move |_: leptos::ev::MouseEvent| action::run_action(game, channel, GameAction::Join);

    view! {
        <div class="lobby">
            <input
                class="lobby__input"
                placeholder="Enter your username"
                prop:value=move || game.with(|s| s.username.clone())
                prop:disabled=move || creating.get()
                on:input=move |ev| game.update(|s| s.username = event_target_value(&ev))
            />
            <div class="lobby__actions">
                <button class="btn btn--create" on:click=on_create disabled=move || creating.get()>
                    {move || if creating.get() { "Creating..." } else { "Create Game" }}
                </button>
                <button class="btn btn--join" on:click=on_join disabled=move || creating.get()>
                    "Join Game"
                </button>
            </div>
            <input
                class="lobby__input"
                placeholder="Enter session code to join"
                prop:value=move || game.with(|s| s.code_input.clone())
                prop:disabled=move || creating.get()
                on:input=move |ev| game.update(|s| s.code_input = event_target_value(&ev))
            />
        </div>
    }
}
