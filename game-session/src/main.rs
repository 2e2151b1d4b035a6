use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use game_session::{
    build_dictionary,
    config::Config,
    input::{TerminalInput, parse_line},
    render::render_screen,
    session::{GameSession, SessionEvent},
};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[tokio::main]
async fn main() {
    // Logs go to stderr so they don't tear up the game screen
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Shiritori...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let dictionary = match build_dictionary(&config) {
        Ok(dictionary) => dictionary,
        Err(e) => {
            tracing::error!("{:#}", e);
            tracing::error!("Set WORD_LIST_FILE to a word list or DICTIONARY_URL to a lookup service.");
            std::process::exit(1);
        }
    };

    let session = match GameSession::spawn(config.session_options(), dictionary) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to start game session: {}", e);
            std::process::exit(1);
        }
    };

    // Redraw on every state change
    let mut snapshots = session.subscribe();
    tokio::spawn(async move {
        loop {
            let screen = render_screen(&snapshots.borrow_and_update());
            print!("{}{}\n> ", CLEAR_SCREEN, screen);
            let _ = std::io::stdout().flush();

            if snapshots.changed().await.is_err() {
                break;
            }
        }
    });

    // Definitions of accepted words go to the log, game events at debug
    let mut events = session.events();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::WordDefined { word, definition }) => {
                    info!("{}: {}", word, definition);
                }
                Ok(SessionEvent::Game(event)) => match serde_json::to_string(&event) {
                    Ok(json) => debug!(event = %json, "Game event"),
                    Err(e) => tracing::warn!("Failed to serialize game event: {}", e),
                },
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "Event log fell behind"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!("Failed to read input: {}", e);
                        break;
                    }
                };

                match parse_line(&line) {
                    TerminalInput::Message(message) => {
                        if let Err(e) = session.dispatch(message).await {
                            tracing::warn!("{}", e);
                        }
                    }
                    TerminalInput::Quit => break,
                    TerminalInput::Blank => {}
                    TerminalInput::Unknown(command) => {
                        tracing::warn!("Unknown command {}; try /start, /reset or /quit", command);
                    }
                }
            }
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    info!("Goodbye.");
}
