//! Realtime channel manager for the game service.
//!
//! [`connect`] opens the Socket.IO websocket, answers the transport
//! handshake and heartbeats, and applies every game event to the shared
//! `RwSignal<GameState>` in delivery order. It reconnects with exponential
//! backoff until the returned [`ChannelHandle`] is disconnected.
//!
//! Outbound events are queued on an unbounded channel and only written once
//! the namespace connect is confirmed, so an emit made while the socket is
//! still opening is delayed rather than lost.
//!
//! All websocket logic is gated behind `#[cfg(feature = "csr")]` since it
//! requires a browser environment.

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

use futures::channel::mpsc::UnboundedSender;
use futures::future::AbortHandle;
use game::ClientEvent;
#[cfg(any(test, feature = "csr"))]
use game::ServerEvent;
use wire::CodecError;
#[cfg(any(test, feature = "csr"))]
use wire::Step;

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("websocket open failed: {0}")]
    Open(String),
    #[error("websocket error: {0}")]
    Socket(String),
}

/// Handle to the live channel, provided through context.
///
/// The default handle is disconnected: every emit fails.
#[derive(Clone, Debug, Default)]
pub struct ChannelHandle {
    tx: Option<UnboundedSender<String>>,
    abort: Option<AbortHandle>,
}

impl ChannelHandle {
    #[must_use]
    pub fn new(tx: UnboundedSender<String>, abort: AbortHandle) -> Self {
        Self {
            tx: Some(tx),
            abort: Some(abort),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_connected(&self) -> bool {
        self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Queue an event for the service. Returns `false` if the channel is gone.
    pub fn emit(&self, event: &ClientEvent) -> bool {
        self.tx
            .as_ref()
            .is_some_and(|tx| tx.unbounded_send(event.encode()).is_ok())
    }

    /// Stop the connection task and drop the outbound queue.
    pub fn disconnect(&mut self) {
        if let Some(abort) = self.abort.take() {
            abort.abort();
        }
        if let Some(tx) = self.tx.take() {
            tx.close_channel();
        }
    }
}

/// What the connection loop does after one inbound text frame.
#[cfg(any(test, feature = "csr"))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Inbound {
    /// Write this text frame back.
    Reply(String),
    /// Namespace connect confirmed.
    Connected,
    /// A game event was applied (or ignored by the state for its phase).
    Delivered,
    /// Server ended the transport or namespace.
    Close,
    /// Nothing to do.
    Ignored,
}

/// Decode and route one text frame, handing game events to `deliver`.
#[cfg(any(test, feature = "csr"))]
pub(crate) fn handle_text(text: &str, deliver: impl FnOnce(ServerEvent)) -> Result<Inbound, CodecError> {
    let step = wire::route_packet(wire::decode_packet(text)?)?;
    let inbound = match step {
        Step::Reply(packet) => Inbound::Reply(wire::encode_packet(&packet)),
        Step::Connected => Inbound::Connected,
        Step::Deliver(event) => {
            deliver(event);
            Inbound::Delivered
        }
        Step::Unhandled(name) => {
            leptos::logging::log!("ignoring channel event `{name}`");
            Inbound::Ignored
        }
        Step::Close => Inbound::Close,
        Step::Skip => Inbound::Ignored,
    };
    Ok(inbound)
}

/// Open the channel to `socket_url` and feed its events into `game`.
///
/// # Errors
///
/// Returns [`ChannelError::Codec`] when the URL cannot be turned into a
/// websocket endpoint. Transport failures are logged and retried.
#[cfg(feature = "csr")]
pub fn connect(
    socket_url: &str,
    game: leptos::prelude::RwSignal<game::GameState>,
) -> Result<ChannelHandle, ChannelError> {
    use futures::channel::mpsc;
    use futures::future::Abortable;

    let url = wire::socket_endpoint(socket_url)?;
    let (tx, rx) = mpsc::unbounded::<String>();
    let (abort, registration) = AbortHandle::new_pair();

    leptos::task::spawn_local(async move {
        if Abortable::new(channel_loop(url, game, rx), registration).await.is_err() {
            leptos::logging::log!("channel disconnected");
        }
    });

    Ok(ChannelHandle::new(tx, abort))
}

/// Main connection loop with reconnect logic.
#[cfg(feature = "csr")]
async fn channel_loop(
    url: String,
    game: leptos::prelude::RwSignal<game::GameState>,
    mut outbound: futures::channel::mpsc::UnboundedReceiver<String>,
) {
    let mut backoff_ms: u32 = 1000;
    let max_backoff_ms: u32 = 10_000;

    loop {
        match connect_and_run(&url, game, &mut outbound).await {
            Ok(()) => leptos::logging::log!("channel closed by server"),
            Err(e) => leptos::logging::warn!("channel error: {e}"),
        }

        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(backoff_ms))).await;
        backoff_ms = (backoff_ms * 2).min(max_backoff_ms);
    }
}

#[cfg(feature = "csr")]
fn deliver_to(game: leptos::prelude::RwSignal<game::GameState>) -> impl FnOnce(ServerEvent) {
    use leptos::prelude::Update;

    move |event| {
        let name = event.name();
        if game.try_update(|state| state.apply(event)) != Some(true) {
            leptos::logging::log!("`{name}` does not apply to the current phase");
        }
    }
}

/// Connect to the websocket and process frames until disconnect.
#[cfg(feature = "csr")]
async fn connect_and_run(
    url: &str,
    game: leptos::prelude::RwSignal<game::GameState>,
    outbound: &mut futures::channel::mpsc::UnboundedReceiver<String>,
) -> Result<(), ChannelError> {
    use futures::channel::mpsc;
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| ChannelError::Open(e.to_string()))?;
    let (mut ws_write, mut ws_read) = ws.split();

    // Handshake: answer the open packet and wait for the namespace connect.
    loop {
        let text = match ws_read.next().await {
            None => return Ok(()),
            Some(Ok(Message::Text(text))) => text,
            Some(Ok(Message::Bytes(_))) => continue,
            Some(Err(e)) => return Err(ChannelError::Socket(e.to_string())),
        };
        match handle_text(&text, deliver_to(game)) {
            Ok(Inbound::Reply(reply)) => ws_write
                .send(Message::Text(reply))
                .await
                .map_err(|e| ChannelError::Socket(e.to_string()))?,
            Ok(Inbound::Connected) => break,
            Ok(Inbound::Close) => return Ok(()),
            Ok(Inbound::Delivered | Inbound::Ignored) => {}
            Err(e) => leptos::logging::warn!("dropping channel frame: {e}"),
        }
    }
    leptos::logging::log!("channel connected to {url}");

    // Heartbeat replies and queued emits share the single writer.
    let (reply_tx, reply_rx) = mpsc::unbounded::<String>();

    let send_task = async {
        let mut merged = futures::stream::select(reply_rx, outbound.by_ref());
        while let Some(text) = merged.next().await {
            if ws_write.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    };

    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => match handle_text(&text, deliver_to(game)) {
                    Ok(Inbound::Reply(reply)) => {
                        if reply_tx.unbounded_send(reply).is_err() {
                            break;
                        }
                    }
                    Ok(Inbound::Close) => break,
                    Ok(_) => {}
                    Err(e) => leptos::logging::warn!("dropping channel frame: {e}"),
                },
                Ok(Message::Bytes(_)) => {}
                Err(e) => {
                    leptos::logging::warn!("channel recv error: {e}");
                    break;
                }
            }
        }
    };

    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;

    Ok(())
}
