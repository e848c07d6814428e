//! Typed game events carried inside Socket.IO event packets.
//!
//! Inbound names follow the game service (`player-list`, `game-started`,
//! `timer`, `message`, `game-ended`, `error`); outbound names are
//! `join-session`, `start-game`, and `guess`.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{CodecError, Packet};

pub const PLAYER_LIST: &str = "player-list";
pub const GAME_STARTED: &str = "game-started";
pub const TIMER: &str = "timer";
pub const MESSAGE: &str = "message";
pub const GAME_ENDED: &str = "game-ended";
pub const ERROR: &str = "error";

pub const JOIN_SESSION: &str = "join-session";
pub const START_GAME: &str = "start-game";
pub const GUESS: &str = "guess";

/// One roster entry. Extra fields sent by the service are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub username: String,
}

/// Event pushed by the game service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerEvent {
    /// Full replacement of the session roster.
    RosterUpdate(Vec<Player>),
    /// A round began with the given question.
    RoundStarted { question: String },
    /// Seconds left in the current round.
    TimerTick(i64),
    /// Free-form chat line from the service or another player.
    ChatMessage(String),
    /// The round is over; the answer is revealed.
    RoundEnded { message: String, answer: String },
    /// Service-reported failure.
    Error(String),
}

#[derive(Deserialize)]
struct RoundStartedPayload {
    question: Value,
}

#[derive(Deserialize)]
struct RoundEndedPayload {
    #[serde(default)]
    message: Value,
    #[serde(default)]
    answer: Value,
}

impl ServerEvent {
    /// Parse a named event. Unknown names yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Payload`] when a known event has a malformed payload.
    pub fn from_event(name: &str, data: Value) -> Result<Option<Self>, CodecError> {
        let payload_error = |source| CodecError::Payload {
            event: name.to_owned(),
            source,
        };
        let event = match name {
            PLAYER_LIST => {
                let players = if data.is_null() {
                    Vec::new()
                } else {
                    serde_json::from_value(data).map_err(payload_error)?
                };
                Self::RosterUpdate(players)
            }
            GAME_STARTED => {
                let payload: RoundStartedPayload = serde_json::from_value(data).map_err(payload_error)?;
                Self::RoundStarted {
                    question: value_text(&payload.question),
                }
            }
            TIMER => {
                let seconds = match &data {
                    Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
                    Value::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                };
                let seconds = seconds.ok_or_else(|| {
                    payload_error(serde::de::Error::custom(format!("expected seconds, got {data}")))
                })?;
                Self::TimerTick(seconds)
            }
            MESSAGE => Self::ChatMessage(value_text(&data)),
            GAME_ENDED => {
                let payload: RoundEndedPayload = serde_json::from_value(data).map_err(payload_error)?;
                Self::RoundEnded {
                    message: value_text(&payload.message),
                    answer: value_text(&payload.answer),
                }
            }
            ERROR => Self::Error(error_text(&data)),
            _ => return Ok(None),
        };
        Ok(Some(event))
    }

    /// Wire name of this event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::RosterUpdate(_) => PLAYER_LIST,
            Self::RoundStarted { .. } => GAME_STARTED,
            Self::TimerTick(_) => TIMER,
            Self::ChatMessage(_) => MESSAGE,
            Self::RoundEnded { .. } => GAME_ENDED,
            Self::Error(_) => ERROR,
        }
    }

    /// Wire payload of this event, in the shape the service sends it.
    #[cfg(test)]
    pub(crate) fn payload(&self) -> Value {
        match self {
            Self::RosterUpdate(players) => json!(players),
            Self::RoundStarted { question } => json!({ "question": question }),
            Self::TimerTick(seconds) => json!(seconds),
            Self::ChatMessage(text) | Self::Error(text) => json!(text),
            Self::RoundEnded { message, answer } => json!({ "message": message, "answer": answer }),
        }
    }

    #[cfg(test)]
    pub(crate) fn to_packet(&self) -> Packet {
        Packet::event(self.name(), self.payload())
    }
}

/// Event emitted by the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientEvent {
    JoinSession { username: String, session_code: String },
    StartGame { session_code: String, question: String, answer: String },
    Guess { guess: String },
}

impl ClientEvent {
    /// Wire name of this event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::JoinSession { .. } => JOIN_SESSION,
            Self::StartGame { .. } => START_GAME,
            Self::Guess { .. } => GUESS,
        }
    }

    /// Wire payload of this event.
    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            Self::JoinSession {
                username,
                session_code,
            } => json!({ "username": username, "sessionCode": session_code }),
            Self::StartGame {
                session_code,
                question,
                answer,
            } => json!({ "sessionCode": session_code, "question": question, "answer": answer }),
            Self::Guess { guess } => json!({ "guess": guess }),
        }
    }

    /// Wrap this event in a Socket.IO event packet.
    #[must_use]
    pub fn to_packet(&self) -> Packet {
        Packet::event(self.name(), self.payload())
    }

    /// Encode straight to the text frame.
    #[must_use]
    pub fn encode(&self) -> String {
        crate::encode_packet(&self.to_packet())
    }

    /// Parse an outbound event back from its name and payload.
    #[cfg(test)]
    pub(crate) fn from_event(name: &str, data: Value) -> Result<Option<Self>, CodecError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Join {
            username: String,
            session_code: String,
        }
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Start {
            session_code: String,
            question: String,
            answer: String,
        }
        #[derive(Deserialize)]
        struct Guess {
            guess: String,
        }

        let payload_error = |source| CodecError::Payload {
            event: name.to_owned(),
            source,
        };
        let event = match name {
            JOIN_SESSION => {
                let join: Join = serde_json::from_value(data).map_err(payload_error)?;
                Self::JoinSession {
                    username: join.username,
                    session_code: join.session_code,
                }
            }
            START_GAME => {
                let start: Start = serde_json::from_value(data).map_err(payload_error)?;
                Self::StartGame {
                    session_code: start.session_code,
                    question: start.question,
                    answer: start.answer,
                }
            }
            GUESS => {
                let guess: Guess = serde_json::from_value(data).map_err(payload_error)?;
                Self::Guess { guess: guess.guess }
            }
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}

/// Render a loosely-typed payload field as display text.
///
/// Strings pass through; numbers and other scalars use their JSON form;
/// `null` becomes empty.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn error_text(value: &Value) -> String {
    match value {
        Value::Object(map) => map
            .get("message")
            .or_else(|| map.get("error"))
            .map_or_else(|| value.to_string(), value_text),
        other => value_text(other),
    }
}
