//! Headless engine binary for the Holdout simulation.
//!
//! Plays a game unattended with the autopilot steward, writing JSON
//! snapshots as it goes so a front end (or a later run) can pick it up.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `holdout-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Resume from the save file if it is compatible, else start a game
//! 4. Create run control and hook Ctrl-C to a clean stop
//! 5. Run the game loop
//! 6. Log the result and write a final snapshot

mod error;
mod snapshot;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use holdout_core::config::{GameConfig, LoggingConfig};
use holdout_core::operator::RunControl;
use holdout_core::save::{self, SaveError};
use holdout_core::steward::Autopilot;
use holdout_core::{Simulation, runner};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::snapshot::{SnapshotCallback, write_snapshot};

const CONFIG_PATH: &str = "holdout-config.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Configuration. Logged once tracing is up.
    let (config, from_file) = load_config().context("loading configuration")?;

    // 2. Logging.
    init_tracing(&config.logging);
    info!(
        from_file,
        seed = config.world.seed,
        difficulty = ?config.simulation.difficulty,
        tick_interval_ms = config.simulation.tick_interval_ms,
        max_ticks = config.simulation.max_ticks,
        "Configuration loaded"
    );

    // 3. Game.
    let persistence = config.persistence.clone();
    let control = Arc::new(RunControl::from_config(&config.simulation));
    let mut sim = open_game(config)?;

    // 4. Ctrl-C.
    {
        let control = Arc::clone(&control);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl-C received, stopping");
                    control.request_stop();
                }
                Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
            }
        });
    }

    // 5. Run.
    let mut callback = SnapshotCallback::new(
        persistence.save_path.clone(),
        persistence.snapshot_interval_ticks,
    );
    let result = runner::run_game(&mut sim, &mut Autopilot::default(), &control, &mut callback)
        .await
        .map_err(EngineError::from)?;

    // 6. Wrap up.
    runner::log_game_end(&result);
    write_snapshot(&persistence.save_path, &sim.snapshot())?;
    info!(
        path = %persistence.save_path.display(),
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "holdout-engine shutdown complete"
    );
    Ok(())
}

/// Load `holdout-config.yaml` from the working directory, or defaults.
///
/// The flag reports whether the file was found.
fn load_config() -> Result<(GameConfig, bool), EngineError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        Ok((GameConfig::from_file(path)?, true))
    } else {
        let mut config = GameConfig::default();
        config.apply_env_overrides();
        Ok((config, false))
    }
}

/// Install the subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Resume the saved game when there is a compatible one still running,
/// otherwise start fresh at the configured difficulty.
fn open_game(config: GameConfig) -> Result<Simulation, EngineError> {
    let path = config.persistence.save_path.clone();
    if config.persistence.resume && path.exists() {
        let json = std::fs::read_to_string(&path).map_err(|source| EngineError::Io {
            path: path.clone(),
            source,
        })?;
        match save::load(&json) {
            Ok(saved) if saved.state.is_running() => return Ok(Simulation::resume(config, saved)),
            Ok(_) => info!(path = %path.display(), "Saved game is finished, starting a new one"),
            Err(SaveError::IncompatibleSave { reason }) => {
                warn!(path = %path.display(), %reason, "Incompatible save, starting a new game");
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Unreadable save, starting a new game"),
        }
    }

    let difficulty = config.simulation.difficulty;
    let mut sim = Simulation::new(config);
    sim.start_game(difficulty)?;
    Ok(sim)
}
