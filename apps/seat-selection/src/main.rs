//! Seat selection binary
//!
//! Reads booking form commands from stdin and draws the seat map to stdout.
//! Logs go to stderr.

use anyhow::Result;
use seat_selection::terminal::{self, Command, TerminalPresenter};
use seat_selection::{Config, SeatCatalog, SessionAction, SessionEnvironment, SessionReducer, SessionState};
use seating_core::environment::SystemClock;
use seating_runtime::{Store, StoreError};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(200);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(
        coach = %config.session.default_coach,
        party_size = %config.session.default_party_size,
        "Starting seat selection"
    );

    let presenter = Arc::new(TerminalPresenter::new(std::io::stdout()));
    let catalog = Arc::new(SeatCatalog::standard());
    let state = SessionState::new(
        &catalog,
        config.session.default_coach,
        config.session.default_party_size,
    );
    let env = SessionEnvironment::new(Arc::new(SystemClock), presenter, catalog)
        .with_notification_ttl(config.session.notification_ttl());
    let store = Store::new(state, SessionReducer::new(), env);

    println!("{}\n", terminal::HELP);
    store.send(SessionAction::Initialize).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match terminal::parse_command(&line, &config.session) {
            Ok(None) => {},
            Ok(Some(Command::Intent(action))) => {
                store.send(action).await?;
            },
            Ok(Some(Command::Help)) => println!("{}", terminal::HELP),
            Ok(Some(Command::Quit)) => break,
            Err(error) => {
                tracing::debug!(%error, line = %line, "Rejected input");
                println!("{error}");
            },
        }
    }

    // Pending notification timers are abandoned on exit.
    match store.shutdown(SHUTDOWN_TIMEOUT).await {
        Ok(()) | Err(StoreError::ShutdownTimeout(_)) => {},
        Err(error) => return Err(error.into()),
    }
    tracing::info!("Seat selection finished");
    Ok(())
}
