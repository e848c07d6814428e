//! Line-oriented rendering of the game state.
//!
//! The terminal cannot redraw, so [`Renderer`] remembers what it printed and
//! emits only what changed: new notices, banner and roster changes, new chat
//! lines, and round details. Countdown ticks are thinned out to every ten
//! seconds and the final five.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use game::{GameState, Notice, NoticeKind, ScreenKind};

const START_HINT: &str = "Start a round with /start <question> | <answer>";

#[derive(Debug, Default)]
pub struct Renderer {
    screen: Option<ScreenKind>,
    banner: Option<String>,
    roster: Option<String>,
    chat_seen: usize,
    attempts: Option<String>,
    timer: Option<i64>,
}

impl Renderer {
    /// Lines to print for everything that changed since the last call.
    /// Notices are drained from the state as they are printed.
    pub fn render(&mut self, state: &mut GameState) -> Vec<String> {
        let mut out: Vec<String> = std::iter::from_fn(|| state.dismiss_notice())
            .map(|notice| notice_line(&notice))
            .collect();

        let screen = state.screen_kind();
        let entered = self.screen != Some(screen);
        self.screen = Some(screen);
        if screen == ScreenKind::Lobby {
            self.banner = None;
            self.roster = None;
            return out;
        }

        if let Some(banner) = state.session_banner()
            && self.banner.as_ref() != Some(&banner)
        {
            out.push(banner.clone());
            if state.is_master() {
                out.push("Share this code with friends so they can join!".to_owned());
            }
            self.banner = Some(banner);
        }

        let roster = state.roster_line();
        if self.roster.as_ref() != Some(&roster) {
            out.push(roster.clone());
            self.roster = Some(roster);
        }

        let chat = state.chat_lines();
        out.extend(chat.iter().skip(self.chat_seen).cloned());
        self.chat_seen = chat.len();

        match state.round_view() {
            Some(view) => {
                if entered {
                    out.push(view.question_line);
                }
                if self.attempts.as_ref() != Some(&view.attempts_line) {
                    out.push(view.attempts_line.clone());
                    self.attempts = Some(view.attempts_line);
                }
                let seconds = state.session().map_or(0, |session| session.timer);
                if self.timer != Some(seconds) {
                    self.timer = Some(seconds);
                    if announce(seconds) {
                        out.push(view.timer_line);
                    }
                }
            }
            None => {
                self.attempts = None;
                self.timer = None;
                if entered && state.can_start_round() {
                    out.push(START_HINT.to_owned());
                }
            }
        }
        out
    }
}

fn announce(seconds: i64) -> bool {
    seconds > 0 && (seconds % 10 == 0 || seconds <= 5)
}

fn notice_line(notice: &Notice) -> String {
    let tag = match notice.kind {
        NoticeKind::Info => "info",
        NoticeKind::Warning => "warning",
        NoticeKind::Error => "error",
    };
    format!("[{tag}] {}", notice.message)
}
