//! The Holdout world: stockpiles, production modules, and upgrades.
//!
//! Everything here is owned by the game state and advanced once per hour
//! tick, except the hunting ground which runs on its own millisecond
//! clock. Every operation that spends resources goes through the
//! [`ResourceLedger`], which refuses to let a stockpile go negative.
//!
//! # Modules
//!
//! - [`error`] -- World-level rejections
//! - [`farming`] -- 5x5 crop grid with growth-freeze while dry
//! - [`hunting`] -- Roaming target, escape timer, shooting
//! - [`ledger`] -- Food, water and wood balances plus lifetime totals
//! - [`lumber_mill`] -- Tree pool and passive wood
//! - [`upgrades`] -- Upgrade catalog and purchases
//! - [`well`] -- Passive water fill and collection

pub mod error;
pub mod farming;
pub mod hunting;
pub mod ledger;
pub mod lumber_mill;
pub mod upgrades;
pub mod well;

pub use error::WorldError;
pub use farming::FarmingGrid;
pub use hunting::{HuntEvent, HuntOutcome, HuntingConfig, HuntingGround};
pub use ledger::{ResourceLedger, Stockpile};
pub use lumber_mill::{LumberMill, LumberMillConfig};
pub use upgrades::{UpgradeBook, UpgradeSpec, upgrade_spec};
pub use well::Well;
