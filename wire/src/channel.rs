//! Packet routing shared by every channel driver.
//!
//! A driver reads text frames, decodes them, and asks [`route_packet`] what
//! to do next: answer the transport, hand a game event to the state machine,
//! or stop.

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

use serde_json::Value;

use crate::events::ServerEvent;
use crate::{CodecError, Packet};

/// What a driver must do with one inbound packet.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// Write this packet back to the server.
    Reply(Packet),
    /// The namespace connection is confirmed; queued emits may flow.
    Connected,
    /// Apply this event to the client state.
    Deliver(ServerEvent),
    /// An event this client does not handle.
    Unhandled(String),
    /// The server closed the transport or the namespace.
    Close,
    /// Nothing to do.
    Skip,
}

/// Decide how to react to one decoded packet.
///
/// The Engine.IO open packet is answered with a namespace connect, pings
/// with pongs. A refused namespace connection surfaces as an error event.
///
/// # Errors
///
/// Returns [`CodecError::Payload`] when a known event has a malformed payload.
pub fn route_packet(packet: Packet) -> Result<Step, CodecError> {
    let step = match packet {
        Packet::Open(_) => Step::Reply(Packet::Connect(None)),
        Packet::Ping => Step::Reply(Packet::Pong),
        Packet::Connect(_) => Step::Connected,
        Packet::Event { name, data } => match ServerEvent::from_event(&name, data)? {
            Some(event) => Step::Deliver(event),
            None => Step::Unhandled(name),
        },
        Packet::ConnectError(detail) => {
            let message = match &detail {
                Value::String(text) => text.clone(),
                other => other
                    .get("message")
                    .and_then(Value::as_str)
                    .map_or_else(|| other.to_string(), str::to_owned),
            };
            Step::Deliver(ServerEvent::Error(message))
        }
        Packet::Close | Packet::Disconnect => Step::Close,
        Packet::Pong | Packet::Noop | Packet::Ack(_) => Step::Skip,
    };
    Ok(step)
}
