//! Socket.IO channel over tokio-tungstenite.
//!
//! [`Channel::connect`] completes the Engine.IO open and namespace connect
//! before returning. A background task then owns the socket: it answers
//! heartbeats, forwards decoded game events, and writes queued emits.

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use game::{ClientEvent, ServerEvent};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use wire::Step;

use crate::CliError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Channel {
    outbound: mpsc::UnboundedSender<String>,
    events: mpsc::UnboundedReceiver<ServerEvent>,
    task: JoinHandle<()>,
}

impl Channel {
    pub async fn connect(socket_url: &str) -> Result<Self, CliError> {
        let endpoint = wire::socket_endpoint(socket_url)?;
        tracing::debug!(%endpoint, "opening channel");
        let (mut stream, _) = connect_async(endpoint.as_str())
            .await
            .map_err(|error| CliError::WsConnect(Box::new(error)))?;

        let (events_tx, events) = mpsc::unbounded_channel();
        handshake(&mut stream, &events_tx).await?;

        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(pump(stream, outbound_rx, events_tx));
        Ok(Self {
            outbound,
            events,
            task,
        })
    }

    /// Queue an event for the service. Returns `false` once the socket task
    /// has stopped.
    pub fn emit(&self, event: &ClientEvent) -> bool {
        self.outbound.send(event.encode()).is_ok()
    }

    /// Next game event, or `None` when the channel is gone.
    pub async fn next_event(&mut self) -> Option<ServerEvent> {
        self.events.recv().await
    }

    pub fn close(self) {
        self.task.abort();
    }
}

/// Answer the open packet and wait for the namespace connect. Game events
/// that arrive first are buffered for the session loop.
async fn handshake(stream: &mut WsStream, events: &mpsc::UnboundedSender<ServerEvent>) -> Result<(), CliError> {
    loop {
        let text = recv_text(stream, HANDSHAKE_TIMEOUT).await?;
        match wire::route_packet(wire::decode_packet(&text)?)? {
            Step::Reply(packet) => send_text(stream, wire::encode_packet(&packet)).await?,
            Step::Connected => return Ok(()),
            Step::Deliver(ServerEvent::Error(message)) => return Err(CliError::Refused(message)),
            Step::Deliver(event) => {
                let _ = events.send(event);
            }
            Step::Close => return Err(CliError::WsClosed),
            Step::Unhandled(_) | Step::Skip => {}
        }
    }
}

async fn recv_text(stream: &mut WsStream, timeout: Duration) -> Result<String, CliError> {
    let fut = async {
        loop {
            let Some(message) = stream.next().await else {
                return Err(CliError::WsClosed);
            };
            match message.map_err(|error| CliError::WsIo(Box::new(error)))? {
                Message::Text(text) => return Ok(text.to_string()),
                Message::Close(_) => return Err(CliError::WsClosed),
                _ => {}
            }
        }
    };

    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| CliError::Timeout)?
}

async fn send_text(stream: &mut WsStream, text: String) -> Result<(), CliError> {
    stream
        .send(Message::Text(text.into()))
        .await
        .map_err(|error| CliError::WsIo(Box::new(error)))
}

async fn pump(
    mut stream: WsStream,
    mut outbound: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<ServerEvent>,
) {
    loop {
        tokio::select! {
            message = stream.next() => {
                let text = match message {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("channel closed by server");
                        break;
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "channel recv failed");
                        break;
                    }
                };
                let step = wire::decode_packet(&text).and_then(wire::route_packet);
                match step {
                    Ok(Step::Reply(packet)) => {
                        if let Err(e) = send_text(&mut stream, wire::encode_packet(&packet)).await {
                            tracing::warn!(error = %e, "channel reply failed");
                            break;
                        }
                    }
                    Ok(Step::Deliver(event)) => {
                        if events.send(event).is_err() {
                            break;
                        }
                    }
                    Ok(Step::Close) => {
                        tracing::info!("namespace disconnected by server");
                        break;
                    }
                    Ok(Step::Unhandled(name)) => tracing::debug!(event = %name, "ignoring channel event"),
                    Ok(Step::Connected | Step::Skip) => {}
                    Err(e) => tracing::warn!(error = %e, "dropping channel frame"),
                }
            }
            text = outbound.recv() => {
                let Some(text) = text else {
                    let _ = stream.close(None).await;
                    break;
                };
                if let Err(e) = send_text(&mut stream, text).await {
                    tracing::warn!(error = %e, "channel send failed");
                    break;
                }
            }
        }
    }
}
