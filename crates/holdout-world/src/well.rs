//! The well: a passive water source that fills each hour once unlocked.

use holdout_types::Resource;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::ResourceLedger;

/// Default well capacity.
pub const WELL_CAPACITY: u32 = 100;

/// Default water added per tick.
pub const WELL_FILL_RATE: u32 = 1;

/// Fill state of the well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Well {
    capacity: Decimal,
    current: Decimal,
    fill_rate: Decimal,
    active: bool,
    total_collected: Decimal,
}

impl Default for Well {
    fn default() -> Self {
        Self::new(WELL_CAPACITY, WELL_FILL_RATE)
    }
}

impl Well {
    /// Create an inactive, empty well.
    pub fn new(capacity: u32, fill_rate: u32) -> Self {
        Self {
            capacity: Decimal::from(capacity),
            current: Decimal::ZERO,
            fill_rate: Decimal::from(fill_rate),
            active: false,
            total_collected: Decimal::ZERO,
        }
    }

    /// Start filling. The well begins empty.
    pub const fn activate(&mut self) {
        self.active = true;
    }

    /// Whether the well has been built.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Water currently held.
    pub const fn current(&self) -> Decimal {
        self.current
    }

    /// Maximum water held.
    pub const fn capacity(&self) -> Decimal {
        self.capacity
    }

    /// Water collected over the whole run.
    pub const fn total_collected(&self) -> Decimal {
        self.total_collected
    }

    /// Overwrite the fill level, clamped to `[0, capacity]`.
    pub fn set_current(&mut self, amount: Decimal) {
        self.current = amount.clamp(Decimal::ZERO, self.capacity);
    }

    /// Add one tick of water, up to capacity. Does nothing while inactive.
    pub fn tick(&mut self) {
        if self.active {
            self.current = self.current.saturating_add(self.fill_rate).min(self.capacity);
        }
    }

    /// Drain the well into the ledger. Collecting an empty well is a no-op.
    ///
    /// Returns the water moved.
    pub fn collect(&mut self, ledger: &mut ResourceLedger) -> Decimal {
        let amount = self.current;
        if amount > Decimal::ZERO {
            ledger.credit(Resource::Water, amount);
            self.total_collected = self.total_collected.saturating_add(amount);
            self.current = Decimal::ZERO;
        }
        amount
    }
}
