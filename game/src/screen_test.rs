use super::*;
use crate::chat::ChatEntry;
use crate::state::{Phase, QuestionDraft, Role, Round, Session};
use wire::Player;

fn joined(role: Role, round: Option<Round>) -> GameState {
    GameState {
        phase: Phase::Joined(Session {
            code: "XYZ987".to_owned(),
            username: "host".to_owned(),
            role,
            round,
            timer: 0,
            authoring: None,
        }),
        ..GameState::default()
    }
}

fn round(question: &str, attempts_remaining: u8) -> Option<Round> {
    Some(Round {
        question: question.to_owned(),
        attempts_remaining,
    })
}

#[test]
fn screen_follows_phase_and_round() {
    assert_eq!(GameState::default().screen_kind(), ScreenKind::Lobby);
    let creating = GameState {
        phase: Phase::Creating {
            username: "host".to_owned(),
        },
        ..GameState::default()
    };
    assert_eq!(creating.screen_kind(), ScreenKind::Lobby);
    assert_eq!(joined(Role::Player, None).screen_kind(), ScreenKind::WaitingRoom);
    assert_eq!(
        joined(Role::Player, round("2+2?", 3)).screen_kind(),
        ScreenKind::RoundActive
    );
}

#[test]
fn master_banner_shows_shareable_code() {
    let banner = joined(Role::Master, None).session_banner().expect("banner");
    assert!(banner.contains("Your Game Code: XYZ987"));
    let banner = joined(Role::Player, None).session_banner().expect("banner");
    assert!(banner.contains("Session Code: XYZ987"));
    assert!(!banner.contains("Your Game Code"));
    assert!(GameState::default().session_banner().is_none());
}

#[test]
fn roster_line_lists_names_or_waits() {
    let mut state = joined(Role::Player, None);
    assert_eq!(state.roster_line(), "Players: Waiting...");
    state.roster = vec![
        Player { username: "alice".to_owned() },
        Player { username: "bob".to_owned() },
    ];
    assert_eq!(state.roster_line(), "Players: alice, bob");
}

#[test]
fn start_control_only_for_master_between_rounds() {
    assert!(joined(Role::Master, None).can_start_round());
    assert!(!joined(Role::Master, round("q", 3)).can_start_round());
    assert!(!joined(Role::Player, None).can_start_round());
    assert!(!GameState::default().can_start_round());
}

#[test]
fn authoring_tracks_draft_presence() {
    let mut state = joined(Role::Master, None);
    assert!(!state.is_authoring());
    if let Phase::Joined(session) = &mut state.phase {
        session.authoring = Some(QuestionDraft::default());
    }
    assert!(state.is_authoring());
}

#[test]
fn round_view_formats_question_timer_and_attempts() {
    let mut state = joined(Role::Player, round("2+2?", 2));
    if let Phase::Joined(session) = &mut state.phase {
        session.timer = 14;
    }
    let view = state.round_view().expect("round view");
    assert_eq!(view.question_line, "Question: 2+2?");
    assert_eq!(view.timer_line, "⏰ Time left: 14s");
    assert_eq!(view.attempts_line, "💭 Attempts left: 2");
    assert!(view.can_guess);

    let spent = joined(Role::Player, round("2+2?", 0)).round_view().expect("round view");
    assert!(!spent.can_guess);
    assert!(joined(Role::Player, None).round_view().is_none());
}

#[test]
fn chat_lines_render_in_arrival_order() {
    let mut state = GameState::default();
    state.chat = vec![
        ChatEntry::RoundStarted,
        ChatEntry::Message("hello".to_owned()),
        ChatEntry::RoundEnded {
            message: "Time's up".to_owned(),
            answer: "4".to_owned(),
        },
    ];
    assert_eq!(
        state.chat_lines(),
        vec![
            "🎮 Game started! Guess now!".to_owned(),
            "🗨️ hello".to_owned(),
            "🏁 Time's up (Answer: 4)".to_owned(),
        ]
    );
}
