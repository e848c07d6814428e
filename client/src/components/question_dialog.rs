//! Modal dialog where the master writes the next question and answer.

use game::{GameState, QuestionDraft};
use leptos::prelude::*;

/// Dialog shown while the master is authoring.
#[component]
pub fn QuestionDialog(on_cancel: Callback<()>, on_start: Callback<()>) -> impl IntoView {
    let game = expect_context::<RwSignal<GameState>>();

    let field = move |pick: fn(&QuestionDraft) -> String| {
        move || game.with(|s| s.draft().map(pick).unwrap_or_default())
    };
    let edit = move |apply: fn(&mut QuestionDraft, String), value: String| {
        game.update(|s| {
            if let Some(draft) = s.draft_mut() {
                apply(draft, value);
            }
        });
    };
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| match ev.key().as_str() {
        "Escape" => on_cancel.run(()),
        "Enter" => {
            ev.prevent_default();
            on_start.run(());
        }
        _ => {}
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog dialog--question" on:click=move |ev| ev.stop_propagation() on:keydown=on_keydown>
                <h3 class="dialog__title">"Set Question"</h3>
                <input
                    class="dialog__input"
                    placeholder="Enter question"
                    prop:value=field(|d| d.question.clone())
                    on:input=move |ev| edit(|d, v| d.question = v, event_target_value(&ev))
                    autofocus=true
                />
                <input
                    class="dialog__input"
                    placeholder="Enter answer"
                    prop:value=field(|d| d.answer.clone())
                    on:input=move |ev| edit(|d, v| d.answer = v, event_target_value(&ev))
                />
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| on_start.run(())>
                        "Start"
                    </button>
                </div>
            </div>
        </div>
    }
}
