//! Clock, tick cycle, random events, and game orchestration for Holdout.
//!
//! This crate owns the hour tick that drives a survival camp, the daily
//! random-event window, and the [`Simulation`] surface that rendering
//! layers call into. A real-time [`runner`] plays the game unattended.
//!
//! # Modules
//!
//! - [`achievements`] -- Milestone catalog and unlock checks.
//! - [`actions`] -- Member actions against the game state.
//! - [`clock`] -- Day and hour counter.
//! - [`command`] -- Serializable commands and their dispatch.
//! - [`config`] -- Configuration loading from `holdout-config.yaml`.
//! - [`error`] -- Rejections returned by game operations.
//! - [`events`] -- Random event table and the daily event window.
//! - [`journal`] -- Game events and the bounded game log.
//! - [`operator`] -- Pause, speed, and stop switches for the runner.
//! - [`rescue`] -- Rescue missions.
//! - [`runner`] -- Real-time loop with a steward and run controls.
//! - [`save`] -- Versioned snapshots and compatibility checks.
//! - [`simulation`] -- The operation surface.
//! - [`state`] -- The complete game state.
//! - [`steward`] -- Automated decision making between ticks.
//! - [`tick`] -- The hour tick.
//!
//! [`Simulation`]: simulation::Simulation

pub mod achievements;
pub mod actions;
pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod journal;
pub mod operator;
pub mod rescue;
pub mod runner;
pub mod save;
pub mod simulation;
pub mod state;
pub mod steward;
pub mod tick;

pub use command::Command;
pub use config::GameConfig;
pub use error::GameError;
pub use journal::GameEvent;
pub use simulation::Simulation;
pub use state::GameState;
