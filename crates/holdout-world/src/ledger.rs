//! The resource ledger: camp stockpiles plus lifetime gathering totals.
//!
//! # Design
//!
//! - **Check-then-commit**: every spend verifies all balances before any
//!   is touched, so a rejected spend never leaves a partial deduction.
//! - **Non-negative**: balances never go below zero. Losses from events
//!   saturate at zero instead of failing.
//! - **Monotonic totals**: `total_gathered` only grows; spending and losses
//!   never reduce it.
//! - **Precision**: all quantities use [`Decimal`]; no floating point.

use holdout_types::Resource;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// A quantity of each resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stockpile {
    /// Food units.
    pub food: Decimal,
    /// Water units.
    pub water: Decimal,
    /// Wood units.
    pub wood: Decimal,
}

impl Stockpile {
    /// Build a stockpile from whole units.
    pub fn from_units(food: u32, water: u32, wood: u32) -> Self {
        Self {
            food: Decimal::from(food),
            water: Decimal::from(water),
            wood: Decimal::from(wood),
        }
    }

    /// Amount of one resource.
    pub const fn get(&self, resource: Resource) -> Decimal {
        match resource {
            Resource::Food => self.food,
            Resource::Water => self.water,
            Resource::Wood => self.wood,
        }
    }

    /// Mutable slot for one resource.
    const fn slot(&mut self, resource: Resource) -> &mut Decimal {
        match resource {
            Resource::Food => &mut self.food,
            Resource::Water => &mut self.water,
            Resource::Wood => &mut self.wood,
        }
    }
}

/// Camp stockpiles and lifetime totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    /// What the camp holds right now.
    #[serde(flatten)]
    stock: Stockpile,
    /// Everything ever added to the stockpiles this run.
    total_gathered: Stockpile,
}

impl ResourceLedger {
    /// Create a ledger with empty stockpiles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger holding `stock`. Starting supplies do not count as
    /// gathered.
    pub fn with_stock(stock: Stockpile) -> Self {
        Self {
            stock,
            total_gathered: Stockpile::default(),
        }
    }

    /// Current balance of one resource.
    pub const fn balance(&self, resource: Resource) -> Decimal {
        self.stock.get(resource)
    }

    /// Current balances.
    pub const fn stock(&self) -> &Stockpile {
        &self.stock
    }

    /// Lifetime totals added this run.
    pub const fn total_gathered(&self) -> &Stockpile {
        &self.total_gathered
    }

    /// Add `amount` to a stockpile and to its lifetime total.
    ///
    /// Non-positive amounts are ignored.
    pub fn credit(&mut self, resource: Resource, amount: Decimal) {
        if amount <= Decimal::ZERO {
            return;
        }
        let slot = self.stock.slot(resource);
        *slot = slot.saturating_add(amount);
        let total = self.total_gathered.slot(resource);
        *total = total.saturating_add(amount);
    }

    /// Verify that every cost in `costs` is covered.
    ///
    /// Costs for the same resource are summed before checking.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InsufficientResource`] for the first short
    /// resource in ledger order.
    pub fn ensure_affordable(&self, costs: &[(Resource, Decimal)]) -> Result<(), WorldError> {
        for resource in Resource::ALL {
            let requested = costs
                .iter()
                .filter(|(r, _)| *r == resource)
                .fold(Decimal::ZERO, |acc, (_, amount)| acc.saturating_add(*amount));
            let available = self.balance(resource);
            if requested > available {
                return Err(WorldError::InsufficientResource {
                    resource,
                    requested,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Deduct `amount` of one resource.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InsufficientResource`] without mutating if the
    /// balance is too low.
    pub fn debit(&mut self, resource: Resource, amount: Decimal) -> Result<(), WorldError> {
        self.debit_all(&[(resource, amount)])
    }

    /// Deduct every cost in `costs`, or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InsufficientResource`] without mutating if any
    /// balance is too low.
    pub fn debit_all(&mut self, costs: &[(Resource, Decimal)]) -> Result<(), WorldError> {
        self.ensure_affordable(costs)?;
        for (resource, amount) in costs {
            if *amount > Decimal::ZERO {
                let slot = self.stock.slot(*resource);
                *slot = slot.saturating_sub(*amount).max(Decimal::ZERO);
            }
        }
        Ok(())
    }

    /// Destroy `fraction` of a stockpile, rounded down to whole units.
    ///
    /// Returns the amount lost.
    pub fn lose_fraction(&mut self, resource: Resource, fraction: Decimal) -> Decimal {
        let slot = self.stock.slot(resource);
        let lost = slot
            .checked_mul(fraction)
            .map_or(Decimal::ZERO, |v| v.floor())
            .clamp(Decimal::ZERO, *slot);
        *slot = slot.saturating_sub(lost);
        lost
    }

    /// Destroy up to `amount` of a stockpile, stopping at zero.
    ///
    /// Returns the amount actually lost.
    pub fn lose_up_to(&mut self, resource: Resource, amount: Decimal) -> Decimal {
        let slot = self.stock.slot(resource);
        let lost = amount.clamp(Decimal::ZERO, *slot);
        *slot = slot.saturating_sub(lost);
        lost
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn credit_updates_stock_and_totals() {
        let mut ledger = ResourceLedger::new();
        ledger.credit(Resource::Food, dec!(12));
        ledger.credit(Resource::Food, dec!(0));
        ledger.credit(Resource::Food, dec!(-4));
        assert_eq!(ledger.balance(Resource::Food), dec!(12));
        assert_eq!(ledger.total_gathered().food, dec!(12));
    }

    #[test]
    fn starting_stock_is_not_gathered() {
        let ledger = ResourceLedger::with_stock(Stockpile::from_units(50, 40, 30));
        assert_eq!(ledger.balance(Resource::Water), dec!(40));
        assert_eq!(ledger.total_gathered().water, Decimal::ZERO);
    }

    #[test]
    fn debit_rejects_overdraft_without_mutation() {
        let mut ledger = ResourceLedger::with_stock(Stockpile::from_units(0, 3, 0));
        let err = ledger.debit(Resource::Water, dec!(5));
        assert_eq!(
            err,
            Err(WorldError::InsufficientResource {
                resource: Resource::Water,
                requested: dec!(5),
                available: dec!(3),
            })
        );
        assert_eq!(ledger.balance(Resource::Water), dec!(3));
    }

    #[test]
    fn debit_all_is_all_or_nothing() {
        let mut ledger = ResourceLedger::with_stock(Stockpile::from_units(200, 0, 100));
        let costs = [(Resource::Food, dec!(200)), (Resource::Wood, dec!(150))];
        assert!(ledger.debit_all(&costs).is_err());
        assert_eq!(ledger.balance(Resource::Food), dec!(200));
        assert_eq!(ledger.balance(Resource::Wood), dec!(100));

        let costs = [(Resource::Food, dec!(200)), (Resource::Wood, dec!(100))];
        assert!(ledger.debit_all(&costs).is_ok());
        assert_eq!(ledger.balance(Resource::Food), Decimal::ZERO);
        assert_eq!(ledger.balance(Resource::Wood), Decimal::ZERO);
    }

    #[test]
    fn duplicate_costs_are_summed() {
        let ledger = ResourceLedger::with_stock(Stockpile::from_units(15, 0, 0));
        let costs = [(Resource::Food, dec!(10)), (Resource::Food, dec!(10))];
        assert!(ledger.ensure_affordable(&costs).is_err());
    }

    #[test]
    fn losses_floor_and_saturate() {
        let mut ledger = ResourceLedger::with_stock(Stockpile::from_units(47, 0, 6));
        assert_eq!(ledger.lose_fraction(Resource::Food, dec!(0.2)), dec!(9));
        assert_eq!(ledger.balance(Resource::Food), dec!(38));
        assert_eq!(ledger.lose_up_to(Resource::Wood, dec!(10)), dec!(6));
        assert_eq!(ledger.balance(Resource::Wood), Decimal::ZERO);
    }

    #[test]
    fn spending_never_lowers_totals() {
        let mut ledger = ResourceLedger::new();
        ledger.credit(Resource::Wood, dec!(30));
        let _ = ledger.debit(Resource::Wood, dec!(25));
        let _ = ledger.lose_up_to(Resource::Wood, dec!(25));
        assert_eq!(ledger.total_gathered().wood, dec!(30));
    }

    #[test]
    fn ledger_serializes_flat_balances() {
        let ledger = ResourceLedger::with_stock(Stockpile::from_units(1, 2, 3));
        let json = serde_json::to_value(&ledger).unwrap_or_default();
        assert!(json.get("food").is_some());
        assert!(json.get("total_gathered").is_some());
    }
}
