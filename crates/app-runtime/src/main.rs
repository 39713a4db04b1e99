//! # App Runtime
//!
//! Demonstration entry point: composes the standard modules, drives the
//! session through a short login flow, and prints the status report.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (from env)
//! 2. Install the tracing subscriber
//! 3. Run the composition startup phases
//! 4. Drive the session: login → main → login
//! 5. Log the status report as JSON

use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use app_runtime::container::RuntimeConfig;
use app_runtime::modules::{PlayerRoster, SessionMachine};

fn main() -> Result<()> {
    // Load configuration
    let config = RuntimeConfig::from_env();
    config.validate()?;

    // Initialize logging
    let level = Level::from_str(&config.logging.level)
        .with_context(|| format!("Unsupported log level {}", config.logging.level))?;
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(config.logging.with_target)
        .with_thread_ids(config.logging.with_thread_ids)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("===========================================");
    info!("  App Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let root = app_runtime::compose(config);
    let context = root.initialize()?;

    let session = context.get_state_machine::<dyn SessionMachine>()?;
    session.enter_login()?;
    session.enter_main()?;

    if let Ok(players) = context.get_entity_service::<dyn PlayerRoster>() {
        let player = players.spawn("player-one");
        info!("Spawned {} (#{}), roster size {}", player.name, player.id, players.count());
    }

    session.enter_login()?;
    info!("Session is now {:?}", session.state());

    let report = serde_json::to_string_pretty(&root.status_report())?;
    info!("Status report:\n{}", report);

    Ok(())
}
