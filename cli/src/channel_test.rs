use super::*;
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;

const OPEN: &str = r#"0{"sid":"s1","upgrades":[],"pingInterval":25000,"pingTimeout":20000}"#;

type ServerWs = WebSocketStream<TcpStream>;

async fn listen() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    (listener, format!("http://{addr}"))
}

async fn accept(listener: &TcpListener) -> ServerWs {
    let (tcp, _) = listener.accept().await.expect("accept");
    accept_async(tcp).await.expect("upgrade")
}

async fn send(ws: &mut ServerWs, text: &str) {
    ws.send(Message::Text(text.into())).await.expect("server send");
}

async fn next_text(ws: &mut ServerWs) -> String {
    let fut = async {
        loop {
            if let Message::Text(text) = ws.next().await.expect("client frame").expect("frame ok") {
                return text.to_string();
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(5), fut).await.expect("frame in time")
}

#[tokio::test]
async fn handshake_heartbeat_and_events_flow_both_ways() {
    let (listener, base) = listen().await;
    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        send(&mut ws, OPEN).await;
        assert_eq!(next_text(&mut ws).await, "40");
        send(&mut ws, r#"40{"sid":"n1"}"#).await;
        send(&mut ws, r#"42["timer",12]"#).await;
        send(&mut ws, "2").await;

        // The pong and the guess may arrive in either order.
        let mut received = vec![next_text(&mut ws).await, next_text(&mut ws).await];
        received.sort();
        send(&mut ws, r#"42["message","bob guessed wrong"]"#).await;
        received
    });

    let mut channel = Channel::connect(&base).await.expect("connect");
    assert_eq!(channel.next_event().await, Some(ServerEvent::TimerTick(12)));
    assert!(channel.emit(&ClientEvent::Guess { guess: "4".to_owned() }));
    assert_eq!(
        channel.next_event().await,
        Some(ServerEvent::ChatMessage("bob guessed wrong".to_owned()))
    );

    let received = server.await.expect("server");
    assert_eq!(received, vec!["3".to_owned(), r#"42["guess",{"guess":"4"}]"#.to_owned()]);

    // Server task dropped its socket; the event stream ends.
    assert_eq!(channel.next_event().await, None);
}

#[tokio::test]
async fn events_before_namespace_connect_are_kept() {
    let (listener, base) = listen().await;
    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        send(&mut ws, OPEN).await;
        assert_eq!(next_text(&mut ws).await, "40");
        send(&mut ws, r#"42["player-list",[{"username":"alice"}]]"#).await;
        send(&mut ws, "40").await;
        ws
    });

    let mut channel = Channel::connect(&base).await.expect("connect");
    assert_eq!(
        channel.next_event().await,
        Some(ServerEvent::RosterUpdate(vec![game::Player {
            username: "alice".to_owned(),
        }]))
    );
    let _ws = server.await.expect("server");
    channel.close();
}

#[tokio::test]
async fn refused_namespace_is_an_error() {
    let (listener, base) = listen().await;
    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        send(&mut ws, OPEN).await;
        assert_eq!(next_text(&mut ws).await, "40");
        send(&mut ws, r#"44{"message":"Not authorized"}"#).await;
        ws
    });

    let err = Channel::connect(&base).await.err().expect("refused");
    assert!(matches!(err, CliError::Refused(ref message) if message == "Not authorized"));
    let _ws = server.await.expect("server");
}

#[tokio::test]
async fn closed_before_connect_is_an_error() {
    let (listener, base) = listen().await;
    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        send(&mut ws, OPEN).await;
        assert_eq!(next_text(&mut ws).await, "40");
        send(&mut ws, "1").await;
        ws
    });

    let err = Channel::connect(&base).await.err().expect("closed");
    assert!(matches!(err, CliError::WsClosed));
    let _ws = server.await.expect("server");
}

#[tokio::test]
async fn broken_frame_after_upgrade_is_an_io_error() {
    use tokio::io::AsyncWriteExt;

    let (listener, base) = listen().await;
    let server = tokio::spawn(async move {
        let mut ws = accept(&listener).await;
        // Unmasked frame with a reserved opcode.
        ws.get_mut().write_all(&[0x83, 0x00]).await.expect("raw write");
        ws
    });

    let err = Channel::connect(&base).await.err().expect("broken frame");
    assert!(matches!(err, CliError::WsIo(_)), "unexpected error: {err}");
    assert!(err.to_string().starts_with("websocket io failed"));
    let _ws = server.await.expect("server");
}

#[tokio::test]
async fn invalid_url_is_rejected_before_connecting() {
    let err = Channel::connect("ftp://nowhere").await.err().expect("invalid");
    assert!(matches!(err, CliError::Codec(wire::CodecError::InvalidUrl(_))));
}
