//! Realtime channel wire format shared by the browser and terminal clients.
//!
//! The game service speaks Socket.IO v4 over a websocket, so every message is
//! a text frame holding one Engine.IO packet, optionally wrapping one
//! Socket.IO packet (`42["timer",12]`). This crate owns that text encoding and
//! the typed game events carried inside it. It is UI-framework agnostic.

pub mod channel;
pub mod events;

pub use channel::{Step, route_packet};
pub use events::{ClientEvent, Player, ServerEvent};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Path and query appended to the configured channel URL.
pub const SOCKET_PATH: &str = "/socket.io/?EIO=4&transport=websocket";

/// Error returned by [`decode_packet`] and the event parsers.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text frame was empty.
    #[error("empty packet")]
    Empty,
    /// The Engine.IO packet type is not one of `0`..=`6`.
    #[error("unknown engine packet type `{0}`")]
    UnknownEngineType(char),
    /// A message packet ended before the Socket.IO packet type.
    #[error("truncated socket packet")]
    Truncated,
    /// The Socket.IO packet type is unknown or uses binary attachments.
    #[error("unsupported socket packet type `{0}`")]
    UnsupportedSocketType(char),
    /// An event packet did not start with a string event name.
    #[error("event packet is missing its name")]
    MissingEventName,
    /// A JSON body could not be parsed.
    #[error("invalid packet json: {0}")]
    Json(#[from] serde_json::Error),
    /// A known event carried a payload of the wrong shape.
    #[error("invalid payload for `{event}`: {source}")]
    Payload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
    /// The channel URL does not use an http(s) or ws(s) scheme.
    #[error("invalid channel url: {0}")]
    InvalidUrl(String),
}

/// Engine.IO open handshake sent by the server right after the upgrade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_payload: Option<u64>,
}

/// One decoded text frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Packet {
    /// Engine.IO `0`: session handshake.
    Open(Handshake),
    /// Engine.IO `1`: transport close.
    Close,
    /// Engine.IO `2`: heartbeat probe from the server.
    Ping,
    /// Engine.IO `3`: heartbeat reply.
    Pong,
    /// Engine.IO `6` (or `5`): no-op / upgrade marker.
    Noop,
    /// Socket.IO `0`: namespace connect request or confirmation.
    Connect(Option<Value>),
    /// Socket.IO `1`: namespace disconnect.
    Disconnect,
    /// Socket.IO `2`: named event with its first argument.
    Event { name: String, data: Value },
    /// Socket.IO `3`: acknowledgement of an emitted event.
    Ack(Value),
    /// Socket.IO `4`: namespace connection refused.
    ConnectError(Value),
}

impl Packet {
    /// Build an event packet.
    #[must_use]
    pub fn event(name: impl Into<String>, data: Value) -> Self {
        Self::Event {
            name: name.into(),
            data,
        }
    }
}

/// Encode a packet into its text frame.
#[must_use]
pub fn encode_packet(packet: &Packet) -> String {
    match packet {
        Packet::Open(handshake) => {
            // Serializing a plain struct of strings and integers cannot fail.
            let body = serde_json::to_string(handshake).unwrap_or_default();
            format!("0{body}")
        }
        Packet::Close => "1".to_owned(),
        Packet::Ping => "2".to_owned(),
        Packet::Pong => "3".to_owned(),
        Packet::Noop => "6".to_owned(),
        Packet::Connect(None) => "40".to_owned(),
        Packet::Connect(Some(body)) => format!("40{body}"),
        Packet::Disconnect => "41".to_owned(),
        Packet::Event { name, data } => {
            let args = Value::Array(vec![Value::String(name.clone()), data.clone()]);
            format!("42{args}")
        }
        Packet::Ack(body) => format!("43{body}"),
        Packet::ConnectError(body) => format!("44{body}"),
    }
}

/// Decode one text frame.
///
/// Namespaces other than the default are accepted and ignored, as are ack ids
/// on events. Only the first event argument is kept.
///
/// # Errors
///
/// Returns a [`CodecError`] for empty, unknown, binary, or malformed packets.
pub fn decode_packet(text: &str) -> Result<Packet, CodecError> {
    let mut chars = text.chars();
    let engine = chars.next().ok_or(CodecError::Empty)?;
    let rest = chars.as_str();
    match engine {
        '0' => Ok(Packet::Open(serde_json::from_str(rest)?)),
        '1' => Ok(Packet::Close),
        '2' => Ok(Packet::Ping),
        '3' => Ok(Packet::Pong),
        '4' => decode_socket_packet(rest),
        '5' | '6' => Ok(Packet::Noop),
        other => Err(CodecError::UnknownEngineType(other)),
    }
}

fn decode_socket_packet(text: &str) -> Result<Packet, CodecError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(CodecError::Truncated)?;
    let body = skip_ack_id(skip_namespace(chars.as_str()));
    match kind {
        '0' => {
            if body.is_empty() {
                Ok(Packet::Connect(None))
            } else {
                Ok(Packet::Connect(Some(serde_json::from_str(body)?)))
            }
        }
        '1' => Ok(Packet::Disconnect),
        '2' => {
            let args: Vec<Value> = serde_json::from_str(body)?;
            let mut args = args.into_iter();
            let Some(Value::String(name)) = args.next() else {
                return Err(CodecError::MissingEventName);
            };
            let data = args.next().unwrap_or(Value::Null);
            Ok(Packet::Event { name, data })
        }
        '3' => Ok(Packet::Ack(serde_json::from_str(body)?)),
        '4' => {
            let detail = serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_owned()));
            Ok(Packet::ConnectError(detail))
        }
        other => Err(CodecError::UnsupportedSocketType(other)),
    }
}

fn skip_namespace(body: &str) -> &str {
    if !body.starts_with('/') {
        return body;
    }
    match body.find(',') {
        Some(idx) => &body[idx + 1..],
        None => "",
    }
}

fn skip_ack_id(body: &str) -> &str {
    body.trim_start_matches(|c: char| c.is_ascii_digit())
}

/// Turn a configured channel URL (`http://host:5000`) into the websocket
/// endpoint the Socket.IO server listens on.
///
/// # Errors
///
/// Returns [`CodecError::InvalidUrl`] when the scheme is not http(s)/ws(s).
pub fn socket_endpoint(base_url: &str) -> Result<String, CodecError> {
    let base = base_url.trim().trim_end_matches('/');
    let ws_base = if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if base.starts_with("ws://") || base.starts_with("wss://") {
        base.to_owned()
    } else {
        return Err(CodecError::InvalidUrl(base_url.to_owned()));
    };
    Ok(format!("{ws_base}{SOCKET_PATH}"))
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
