//! Append-only chat log shown while in a session.

use game::GameState;
use leptos::prelude::*;

#[component]
pub fn ChatLog() -> impl IntoView {
    let game = expect_context::<RwSignal<GameState>>();

    let lines = move || {
        game.with(|s| s.chat_lines().into_iter().enumerate().collect::<Vec<_>>())
    };

    view! {
        <div class="chat-log">
            <For
                each=lines
                key=|(idx, _)| *idx
                children=|(_, line)| view! { <p class="chat-log__line">{line}</p> }
            />
        </div>
    }
}
