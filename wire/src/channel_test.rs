use super::*;
use crate::{Handshake, decode_packet};
use serde_json::json;

#[test]
fn open_packet_is_answered_with_namespace_connect() {
    let open = Packet::Open(Handshake {
        sid: "abc".to_owned(),
        upgrades: Vec::new(),
        ping_interval: 25_000,
        ping_timeout: 20_000,
        max_payload: None,
    });
    assert_eq!(route_packet(open).expect("route"), Step::Reply(Packet::Connect(None)));
}

#[test]
fn ping_is_answered_with_pong() {
    assert_eq!(route_packet(Packet::Ping).expect("route"), Step::Reply(Packet::Pong));
}

#[test]
fn namespace_confirmation_marks_connected() {
    let packet = decode_packet(r#"40{"sid":"s1"}"#).expect("decode");
    assert_eq!(route_packet(packet).expect("route"), Step::Connected);
}

#[test]
fn known_event_is_delivered() {
    let packet = decode_packet(r#"42["message","hello"]"#).expect("decode");
    assert_eq!(
        route_packet(packet).expect("route"),
        Step::Deliver(ServerEvent::ChatMessage("hello".to_owned()))
    );
}

#[test]
fn unknown_event_is_reported_by_name() {
    let packet = Packet::event("confetti", json!({}));
    assert_eq!(route_packet(packet).expect("route"), Step::Unhandled("confetti".to_owned()));
}

#[test]
fn connect_error_becomes_error_event() {
    let step = route_packet(Packet::ConnectError(json!({"message": "forbidden"}))).expect("route");
    assert_eq!(step, Step::Deliver(ServerEvent::Error("forbidden".to_owned())));
    let step = route_packet(Packet::ConnectError(json!("bad namespace"))).expect("route");
    assert_eq!(step, Step::Deliver(ServerEvent::Error("bad namespace".to_owned())));
}

#[test]
fn close_and_disconnect_stop_the_driver() {
    assert_eq!(route_packet(Packet::Close).expect("route"), Step::Close);
    assert_eq!(route_packet(Packet::Disconnect).expect("route"), Step::Close);
}

#[test]
fn malformed_known_event_is_an_error() {
    assert!(route_packet(Packet::event("game-started", json!(3))).is_err());
}
