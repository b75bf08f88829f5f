//! Error types for the `holdout-world` crate.
//!
//! Every variant is a rejection raised before any state was touched: a
//! failed operation leaves the ledger and the module exactly as they were.

use holdout_types::{Resource, UpgradeId};
use rust_decimal::Decimal;

/// Errors raised by the ledger, production modules, and upgrade book.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// Spending would drive a stockpile negative.
    #[error("insufficient {resource:?}: need {requested}, have {available}")]
    InsufficientResource {
        /// The short resource.
        resource: Resource,
        /// The amount required.
        requested: Decimal,
        /// The amount on hand.
        available: Decimal,
    },

    /// The coordinates are outside the farming grid.
    #[error("plot ({row}, {col}) is outside the field")]
    PlotOutOfBounds {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },

    /// Something is already growing on the plot.
    #[error("plot ({row}, {col}) is already planted")]
    PlotOccupied {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },

    /// Nothing is planted on the plot.
    #[error("plot ({row}, {col}) is empty")]
    PlotEmpty {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },

    /// The crop is not ready, or it is dry.
    #[error("crop at ({row}, {col}) is not ready to harvest")]
    CropImmature {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },

    /// No tree exists at that slot.
    #[error("no tree at slot {0}")]
    TreeNotFound(usize),

    /// The tree has not finished growing.
    #[error("tree {0} is not fully grown")]
    TreeImmature(usize),

    /// Nothing is roaming the hunting ground.
    #[error("no animal in sight")]
    NoTarget,

    /// The module needs an upgrade that has not been bought.
    #[error("{0:?} has not been built")]
    ModuleLocked(UpgradeId),

    /// The upgrade was bought earlier in the run.
    #[error("{0:?} is already unlocked")]
    UpgradeAlreadyUnlocked(UpgradeId),

    /// The upgrade depends on another that has not been bought.
    #[error("{upgrade:?} requires {prerequisite:?}")]
    PrerequisiteMissing {
        /// The upgrade being bought.
        upgrade: UpgradeId,
        /// The missing prerequisite.
        prerequisite: UpgradeId,
    },
}
