//! Active round: question, countdown, attempts, and the guess box.

use game::{GameState, RoundView};
use leptos::prelude::*;

use crate::net::channel::ChannelHandle;
use crate::util::action::{self, GameAction};

#[component]
pub fn RoundPanel() -> impl IntoView {
    let game = expect_context::<RwSignal<GameState>>();
    let channel = expect_context::<RwSignal<ChannelHandle>>();

    let view_model = Memo::new(move |_| game.with(GameState::round_view));
    let line = move |pick: fn(&RoundView) -> String| {
        move || view_model.with(|v| v.as_ref().map(pick).unwrap_or_default())
    };
    let can_guess = move || view_model.with(|v| v.as_ref().is_some_and(|v| v.can_guess));

    let submit = move || action::run_action(game, channel, GameAction::SubmitGuess);

    view! {
        <div class="round-panel">
            <h4 class="round-panel__question">{line(|v| v.question_line.clone())}</h4>
            <p class="round-panel__timer">{line(|v| v.timer_line.clone())}</p>
            <p class="round-panel__attempts">{line(|v| v.attempts_line.clone())}</p>
            <div class="round-panel__guess">
                <input
                    class=move || {
                        if can_guess() { "round-panel__input" } else { "round-panel__input round-panel__input--spent" }
                    }
                    prop:value=move || game.with(|s| s.guess_input.clone())
                    on:input=move |ev| game.update(|s| s.guess_input = event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            submit();
                        }
                    }
                />
                <button class="btn btn--guess" on:click=move |_| submit()>
                    "Guess"
                </button>
            </div>
        </div>
    }
}
