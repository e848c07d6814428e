//! Session banner, roster line, and the master's start control.

use game::GameState;
use leptos::prelude::*;

use crate::util::action;

#[component]
pub fn SessionHeader() -> impl IntoView {
    let game = expect_context::<RwSignal<GameState>>();

    let is_master = Memo::new(move |_| game.with(GameState::is_master));
    let can_start = Memo::new(move |_| game.with(GameState::can_start_round));

    let on_start = move |_: leptos::ev::MouseEvent| {
        game.update(|s| {
            action::open_authoring(s);
        });
    };

    view! {
        <div class="session-header">
            <p class="session-header__code">
                <strong>{move || game.with(GameState::session_banner).unwrap_or_default()}</strong>
            </p>
            <Show when=move || is_master.get()>
                <p class="session-header__hint">"Share this code with friends so they can join!"</p>
            </Show>
            <h3 class="session-header__roster">{move || game.with(GameState::roster_line)}</h3>
            <Show when=move || can_start.get()>
                <button class="btn btn--start" on:click=on_start>
                    "Start Game"
                </button>
            </Show>
        </div>
    }
}
