//! Real-time game loop with run controls.
//!
//! [`run_game`] drives a [`Simulation`] unattended:
//!
//! - **Pacing**: one in-game hour per `tick_interval_ms`, adjustable at
//!   runtime through [`RunControl`]
//! - **Hunting clock**: stepped every `hunting.move_interval_ms` on its own
//!   interval
//! - **Steward**: after every tick the steward's commands are applied;
//!   refusals are logged and the loop carries on
//! - **Bounds**: stops on game over, on `max_ticks`, or when asked to
//!
//! Pausing freezes everything, including play time and the hunting clock.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::operator::RunControl;
use crate::simulation::Simulation;
use crate::state::GameState;
use crate::steward::Steward;
use crate::tick::TickSummary;

/// Errors that can occur when starting the loop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunnerError {
    /// The game has not been started or is already over.
    #[error("game is not running")]
    NotRunning,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEndReason {
    /// The last survivor died.
    GameOver,
    /// A stop was requested.
    OperatorStop,
    /// Reached the configured `max_ticks`.
    MaxTicksReached,
}

/// Outcome of a run.
#[derive(Debug)]
pub struct GameResult {
    /// Why the loop stopped.
    pub end_reason: GameEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Ticks executed by this run.
    pub total_ticks: u64,
}

/// Invoked after each tick and the steward's commands.
pub trait TickCallback: Send {
    /// Called with the tick that just ran and the resulting state.
    fn on_tick(&mut self, summary: &TickSummary, state: &GameState);
}

/// A callback that ignores every tick.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &GameState) {}
}

fn end(end_reason: GameEndReason, final_summary: Option<TickSummary>, total_ticks: u64) -> GameResult {
    GameResult {
        end_reason,
        final_summary,
        total_ticks,
    }
}

/// An interval whose first tick is one full period away.
fn paced(ms: u64) -> Interval {
    let mut interval = tokio::time::interval(Duration::from_millis(ms.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.reset();
    interval
}

/// Run `sim` until it ends, hits its tick bound, or is stopped.
///
/// The hour tick and the hunting clock run on separate intervals polled by
/// one `select!`, so the two never overlap and missed ticks are skipped
/// instead of replayed. Pausing abandons whichever timer is pending; both
/// restart a full period after resume.
///
/// # Errors
///
/// Returns [`RunnerError::NotRunning`] if the game is not running when the
/// loop starts.
pub async fn run_game(
    sim: &mut Simulation,
    steward: &mut dyn Steward,
    control: &Arc<RunControl>,
    callback: &mut dyn TickCallback,
) -> Result<GameResult, RunnerError> {
    if !sim.state().is_running() {
        return Err(RunnerError::NotRunning);
    }

    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    let mut interval_ms = control.tick_interval_ms();
    let hunt_ms = sim.config().hunting.move_interval_ms.max(1);
    let mut hours = paced(interval_ms);
    let mut hunt = paced(hunt_ms);

    info!(
        day = sim.state().clock.day(),
        hour = sim.state().clock.hour(),
        max_ticks = control.max_ticks(),
        tick_interval_ms = interval_ms,
        hunt_interval_ms = hunt_ms,
        "Game loop starting"
    );

    loop {
        // --- Pause ---
        if control.is_paused() {
            info!("Game paused, waiting for resume...");
            control.wait_if_paused().await;
            hours.reset();
            hunt.reset();
            info!("Game resumed");
        }

        // --- Stop request ---
        if control.is_stop_requested() {
            info!("Stop requested");
            return Ok(end(GameEndReason::OperatorStop, last_summary, total_ticks));
        }

        // --- Speed change ---
        let requested = control.tick_interval_ms();
        if requested != interval_ms {
            debug!(from = interval_ms, to = requested, "Tick interval changed");
            interval_ms = requested;
            hours = paced(interval_ms);
        }

        // --- Wait for the next hour or hunting step ---
        // Stop and pause win over a timer that is due at the same instant.
        tokio::select! {
            biased;
            () = control.stopped() => continue,
            () = control.paused() => continue,
            _ = hours.tick() => {}
            _ = hunt.tick() => {
                for event in sim.advance_hunting(hunt_ms) {
                    debug!(?event, "Hunting");
                }
                continue;
            }
        }

        // --- Tick ---
        let Some(summary) = sim.tick() else {
            // A steward command reset the game.
            return Ok(end(GameEndReason::GameOver, last_summary, total_ticks));
        };
        total_ticks = total_ticks.saturating_add(1);
        sim.add_play_time(interval_ms);

        // --- Steward ---
        if !summary.game_over {
            let commands = steward.plan(sim.state(), sim.config());
            for command in commands {
                if let Err(err) = sim.apply(command.clone()) {
                    warn!(?command, %err, "Steward command rejected");
                }
            }
        }

        callback.on_tick(&summary, sim.state());

        // --- Game over ---
        if summary.game_over {
            info!(day = summary.day, hour = summary.hour, "Party lost -- game over");
            return Ok(end(GameEndReason::GameOver, Some(summary), total_ticks));
        }

        // --- Tick limit ---
        if control.tick_limit_reached(total_ticks) {
            info!(total_ticks, max_ticks = control.max_ticks(), "Tick limit reached");
            return Ok(end(GameEndReason::MaxTicksReached, Some(summary), total_ticks));
        }

        last_summary = Some(summary);
    }
}

/// Log how the run ended.
pub fn log_game_end(result: &GameResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_day = result.final_summary.as_ref().map(|s| s.day),
        final_party = result.final_summary.as_ref().map(|s| s.party_alive),
        "Game loop ended"
    );

    if result.final_summary.is_none() {
        warn!("Game loop ended with no ticks executed");
    }
}
