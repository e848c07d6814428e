mod api;
mod channel;
mod input;
mod render;

use clap::{Parser, Subcommand};
use game::{ActionError, GameState};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::channel::Channel;
use crate::input::Input;
use crate::render::Renderer;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const NOT_CONNECTED: &str = "Not connected to the game server.";

const HELP: &str = "\
commands:
  <text>                      guess <text> while a round is running
  /guess <text>               same, explicit
  /start <question> | <answer> start a round (game master only)
  /help                       show this help
  /quit                       leave";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Action(#[from] ActionError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("create session failed: HTTP {0}")]
    Status(u16),
    #[error("missing expected field `{0}`")]
    MissingField(&'static str),
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket io failed: {0}")]
    WsIo(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("timed out waiting for websocket frame")]
    Timeout,
    #[error("channel refused: {0}")]
    Refused(String),
    #[error("packet decode failed: {0}")]
    Codec(#[from] wire::CodecError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("left the session: {0}")]
    SessionLost(String),
}

#[derive(Parser, Debug)]
#[command(name = "guess-cli", about = "Play the guessing game from a terminal")]
struct Cli {
    #[arg(long, env = "GUESS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Realtime channel base; defaults to the API URL.
    #[arg(long, env = "GUESS_SOCKET_URL")]
    socket_url: Option<String>,

    #[arg(long, short, env = "GUESS_USERNAME")]
    username: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new session and act as its game master.
    Create,
    /// Join an existing session by code.
    Join { code: String },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    init_tracing();
    let cli = Cli::parse();
    let socket_url = cli.socket_url.clone().unwrap_or_else(|| cli.api_url.clone());

    let mut state = GameState {
        username: cli.username.trim().to_owned(),
        ..GameState::default()
    };
    let mut renderer = Renderer::default();

    let channel = Channel::connect(&socket_url).await?;
    tracing::info!(%socket_url, "channel connected");

    match cli.command {
        Command::Create => {
            let request = state.begin_create()?;
            let client = reqwest::Client::new();
            match api::create_session(&client, &cli.api_url, &request).await {
                Ok(code) => {
                    tracing::info!(%code, "session created");
                    state.create_succeeded(code);
                }
                Err(e) => {
                    tracing::error!(error = %e, "create session failed");
                    state.create_failed();
                    print_lines(renderer.render(&mut state));
                    channel.close();
                    return Err(e);
                }
            }
        }
        Command::Join { code } => {
            state.code_input = code.trim().to_owned();
            let event = state.join()?;
            if !channel.emit(&event) {
                return Err(CliError::WsClosed);
            }
        }
    }

    run_session(state, channel, renderer).await
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,guess_cli=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Drive one joined session: stdin lines and channel events feed the same
/// state, and every change is rendered before the next input.
async fn run_session(mut state: GameState, mut channel: Channel, mut renderer: Renderer) -> Result<(), CliError> {
    print_lines(renderer.render(&mut state));
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match input::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(Input::Quit)) => break,
                    Ok(Some(Input::Help)) => println!("{HELP}"),
                    Ok(Some(cmd)) => {
                        if let Some(event) = input::apply(&mut state, cmd) {
                            tracing::debug!(event = event.name(), "emit");
                            if !channel.emit(&event) {
                                state.emit_failed(NOT_CONNECTED);
                            }
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
            event = channel.next_event() => {
                let Some(event) = event else {
                    print_lines(renderer.render(&mut state));
                    return Err(CliError::WsClosed);
                };
                let name = event.name();
                if !state.apply(event) {
                    tracing::debug!(event = name, "event ignored outside a session");
                }
            }
        }

        print_lines(renderer.render(&mut state));
        if !state.is_joined() {
            channel.close();
            return Err(CliError::SessionLost("join was rejected".to_owned()));
        }
    }

    channel.close();
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
