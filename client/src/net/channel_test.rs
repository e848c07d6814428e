use super::*;
use futures::StreamExt;
use futures::channel::mpsc;
use game::GameState;

fn apply_all(state: &mut GameState, frames: &[&str]) -> Vec<Inbound> {
    frames
        .iter()
        .map(|text| {
            handle_text(text, |event| {
                state.apply(event);
            })
            .expect("valid frame")
        })
        .collect()
}

#[test]
fn open_packet_is_answered_with_namespace_connect() {
    let inbound = handle_text(r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000}"#, |_| {
        panic!("no event expected");
    })
    .expect("open");
    assert_eq!(inbound, Inbound::Reply("40".to_owned()));
}

#[test]
fn ping_is_answered_with_pong() {
    let inbound = handle_text("2", |_| panic!("no event expected")).expect("ping");
    assert_eq!(inbound, Inbound::Reply("3".to_owned()));
}

#[test]
fn namespace_connect_marks_connected() {
    assert_eq!(handle_text(r#"40{"sid":"xyz"}"#, |_| {}).expect("connect"), Inbound::Connected);
}

#[test]
fn events_reach_state_in_order() {
    let mut state = GameState::default();
    state.username = "alice".to_owned();
    state.code_input = "ABC123".to_owned();
    state.join().expect("join");

    let inbound = apply_all(
        &mut state,
        &[
            r#"42["player-list",[{"username":"alice"},{"username":"bob"}]]"#,
            r#"42["game-started",{"question":"2+2?"}]"#,
            r#"42["timer",30]"#,
            r#"42["timer",29]"#,
            r#"42["message","hello"]"#,
        ],
    );
    assert!(inbound.iter().all(|step| *step == Inbound::Delivered));
    assert_eq!(state.roster_line(), "Players: alice, bob");
    let session = state.session().expect("joined");
    assert_eq!(session.timer, 29);
    assert_eq!(session.question(), Some("2+2?"));
    assert_eq!(
        state.chat_lines(),
        vec!["🎮 Game started! Guess now!".to_owned(), "🗨️ hello".to_owned()]
    );
}

#[test]
fn unknown_event_is_ignored() {
    let inbound = handle_text(r#"42["emoji",{"x":1}]"#, |_| panic!("no event expected")).expect("event");
    assert_eq!(inbound, Inbound::Ignored);
}

#[test]
fn server_disconnect_closes() {
    assert_eq!(handle_text("41", |_| {}).expect("disconnect"), Inbound::Close);
    assert_eq!(handle_text("1", |_| {}).expect("close"), Inbound::Close);
}

#[test]
fn malformed_frame_is_an_error() {
    assert!(handle_text("9", |_| {}).is_err());
    assert!(handle_text(r#"42["timer","soon"]"#, |_| {}).is_err());
}

#[test]
fn default_handle_cannot_emit() {
    let handle = ChannelHandle::default();
    assert!(!handle.is_connected());
    assert!(!handle.emit(&ClientEvent::Guess { guess: "4".to_owned() }));
}

#[test]
fn emit_queues_encoded_event() {
    let (tx, mut rx) = mpsc::unbounded::<String>();
    let (abort, _registration) = AbortHandle::new_pair();
    let handle = ChannelHandle::new(tx, abort);

    assert!(handle.emit(&ClientEvent::Guess { guess: "4".to_owned() }));
    let text = futures::executor::block_on(rx.next()).expect("queued");
    assert_eq!(text, r#"42["guess",{"guess":"4"}]"#);
}

#[test]
fn disconnect_aborts_and_closes_queue() {
    let (tx, _rx) = mpsc::unbounded::<String>();
    let (abort, _registration) = AbortHandle::new_pair();
    let probe = abort.clone();
    let mut handle = ChannelHandle::new(tx, abort);
    assert!(handle.is_connected());

    handle.disconnect();
    assert!(!handle.is_connected());
    assert!(probe.is_aborted());
    assert!(!handle.emit(&ClientEvent::Guess { guess: "4".to_owned() }));
}
