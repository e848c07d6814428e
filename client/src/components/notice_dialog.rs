//! Blocking notice dialog. Shows the oldest notice until dismissed.

use game::{GameState, Notice, NoticeKind};
use leptos::prelude::*;

fn notice_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Info => "dialog dialog--notice dialog--info",
        NoticeKind::Warning => "dialog dialog--notice dialog--warning",
        NoticeKind::Error => "dialog dialog--notice dialog--error",
    }
}

#[component]
pub fn NoticeDialog() -> impl IntoView {
    let game = expect_context::<RwSignal<GameState>>();

    let current = Memo::new(move |_| game.with(|s| s.current_notice().cloned()));
    let dismiss = move || {
        game.update(|s| {
            s.dismiss_notice();
        });
    };

    move || {
        current.get().map(|Notice { kind, message }| {
            view! {
                <div class="dialog-backdrop">
                    <div
                        class=notice_class(kind)
                        role="alertdialog"
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if matches!(ev.key().as_str(), "Enter" | "Escape") {
                                dismiss();
                            }
                        }
                    >
                        <p class="dialog__message">{message}</p>
                        <div class="dialog__actions">
                            <button class="btn btn--primary" on:click=move |_| dismiss() autofocus=true>
                                "OK"
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
