//! Survivors of the Holdout simulation: vitals, activity states, actions.
//!
//! This crate owns everything that happens to a single party member:
//! per-tick drift of hunger, thirst and energy, the health penalty and
//! death, the busy/resting state machine, and the effects of the six
//! actions on the member performing them. Stockpile costs and yields are
//! settled by the caller against the resource ledger.
//!
//! # Modules
//!
//! - [`actions`] -- Action classes, durations, exertion, gathering yields
//! - [`config`] -- Tunable vitals and action parameters
//! - [`death`] -- Death detection and cause attribution
//! - [`error`] -- Member-level rejections
//! - [`member`] -- Trait sampling and name assignment
//! - [`roster`] -- Living members, activity entries, the fallen
//! - [`vitals`] -- Per-tick drift and action effects

pub mod actions;
pub mod config;
pub mod death;
pub mod error;
pub mod member;
pub mod roster;
pub mod vitals;

pub use config::{ActionConfig, VitalsConfig};
pub use error::PartyError;
pub use roster::{PartyRoster, VitalsReport};
