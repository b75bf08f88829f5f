//! Upgrade catalog and the record of what has been bought.
//!
//! Purchases are all-or-nothing: affordability is checked across every
//! cost line before anything is deducted. The caller applies the one-time
//! effect (opening the grid, activating the well) after a successful
//! purchase.

use std::collections::BTreeSet;

use holdout_types::{Resource, UpgradeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::WorldError;
use crate::ledger::ResourceLedger;

/// Static description of one upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeSpec {
    /// Identifier.
    pub id: UpgradeId,
    /// Display name.
    pub name: &'static str,
    /// What it does.
    pub effect: &'static str,
    /// Resources consumed on purchase.
    pub cost: &'static [(Resource, u32)],
    /// Upgrade that must be owned first.
    pub prerequisite: Option<UpgradeId>,
}

impl UpgradeSpec {
    /// Cost lines as ledger amounts.
    pub fn cost_lines(&self) -> Vec<(Resource, Decimal)> {
        self.cost
            .iter()
            .map(|&(resource, amount)| (resource, Decimal::from(amount)))
            .collect()
    }
}

/// Catalog entry for `id`.
pub const fn upgrade_spec(id: UpgradeId) -> UpgradeSpec {
    match id {
        UpgradeId::Farming => UpgradeSpec {
            id,
            name: "Farming",
            effect: "Opens a 5x5 field for crops",
            cost: &[(Resource::Food, 80)],
            prerequisite: None,
        },
        UpgradeId::Well => UpgradeSpec {
            id,
            name: "Well",
            effect: "Fills with water every hour",
            cost: &[(Resource::Wood, 80)],
            prerequisite: Some(UpgradeId::Farming),
        },
        UpgradeId::AdvancedFarming => UpgradeSpec {
            id,
            name: "Advanced Farming",
            effect: "Crops grow a quarter faster and yield half again as much",
            cost: &[(Resource::Food, 300)],
            prerequisite: Some(UpgradeId::Farming),
        },
        UpgradeId::WaterPurification => UpgradeSpec {
            id,
            name: "Water Purification",
            effect: "Every water cost drops by a fifth",
            cost: &[(Resource::Water, 250), (Resource::Wood, 100)],
            prerequisite: Some(UpgradeId::Well),
        },
        UpgradeId::ToolWorkshop => UpgradeSpec {
            id,
            name: "Tool Workshop",
            effect: "Gathering brings back a quarter more",
            cost: &[(Resource::Wood, 400)],
            prerequisite: None,
        },
        UpgradeId::MedicalTent => UpgradeSpec {
            id,
            name: "Medical Tent",
            effect: "Heals everyone a little each hour and halves illness",
            cost: &[(Resource::Food, 200), (Resource::Wood, 150)],
            prerequisite: None,
        },
        UpgradeId::HuntingLodge => UpgradeSpec {
            id,
            name: "Hunting Lodge",
            effect: "Opens the hunting ground",
            cost: &[(Resource::Wood, 300), (Resource::Food, 100)],
            prerequisite: None,
        },
        UpgradeId::LumberMill => UpgradeSpec {
            id,
            name: "Lumber Mill",
            effect: "Grows trees, adds wood every hour, and boosts chopping",
            cost: &[(Resource::Wood, 300), (Resource::Food, 100)],
            prerequisite: Some(UpgradeId::ToolWorkshop),
        },
        UpgradeId::Watchtower => UpgradeSpec {
            id,
            name: "Watchtower",
            effect: "Spots survivors to rescue",
            cost: &[(Resource::Wood, 500), (Resource::Food, 200)],
            prerequisite: Some(UpgradeId::HuntingLodge),
        },
    }
}

/// The set of purchased upgrades.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpgradeBook {
    unlocked: BTreeSet<UpgradeId>,
}

impl UpgradeBook {
    /// An empty book.
    pub const fn new() -> Self {
        Self {
            unlocked: BTreeSet::new(),
        }
    }

    /// Whether `id` has been bought.
    pub fn is_unlocked(&self, id: UpgradeId) -> bool {
        self.unlocked.contains(&id)
    }

    /// Everything bought so far.
    pub fn unlocked(&self) -> impl Iterator<Item = UpgradeId> + '_ {
        self.unlocked.iter().copied()
    }

    /// Number of upgrades bought.
    pub fn count(&self) -> usize {
        self.unlocked.len()
    }

    /// Upgrades not yet owned whose prerequisite is met, in catalog order.
    pub fn available(&self) -> Vec<UpgradeSpec> {
        UpgradeId::ALL
            .into_iter()
            .filter(|id| !self.is_unlocked(*id))
            .map(upgrade_spec)
            .filter(|spec| spec.prerequisite.is_none_or(|p| self.is_unlocked(p)))
            .collect()
    }

    /// Buy `id`, deducting every cost line at once.
    ///
    /// # Errors
    ///
    /// - [`WorldError::UpgradeAlreadyUnlocked`] if owned
    /// - [`WorldError::PrerequisiteMissing`] if the prerequisite is not owned
    /// - [`WorldError::InsufficientResource`] if any cost line is short
    pub fn purchase(&mut self, id: UpgradeId, ledger: &mut ResourceLedger) -> Result<UpgradeSpec, WorldError> {
        if self.is_unlocked(id) {
            return Err(WorldError::UpgradeAlreadyUnlocked(id));
        }
        let spec = upgrade_spec(id);
        if let Some(prerequisite) = spec.prerequisite
            && !self.is_unlocked(prerequisite)
        {
            return Err(WorldError::PrerequisiteMissing {
                upgrade: id,
                prerequisite,
            });
        }
        ledger.debit_all(&spec.cost_lines())?;
        self.unlocked.insert(id);
        info!(upgrade = ?id, "Upgrade purchased");
        Ok(spec)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::ledger::Stockpile;

    #[test]
    fn fresh_book_offers_only_roots() {
        let book = UpgradeBook::new();
        let offered: Vec<UpgradeId> = book.available().iter().map(|s| s.id).collect();
        assert_eq!(
            offered,
            vec![
                UpgradeId::Farming,
                UpgradeId::ToolWorkshop,
                UpgradeId::MedicalTent,
                UpgradeId::HuntingLodge,
            ]
        );
    }

    #[test]
    fn purchase_deducts_and_unlocks_dependents() {
        let mut book = UpgradeBook::new();
        let mut ledger = ResourceLedger::with_stock(Stockpile::from_units(100, 0, 0));
        book.purchase(UpgradeId::Farming, &mut ledger).unwrap();
        assert_eq!(ledger.balance(Resource::Food), dec!(20));
        assert!(book.is_unlocked(UpgradeId::Farming));
        let offered: Vec<UpgradeId> = book.available().iter().map(|s| s.id).collect();
        assert!(offered.contains(&UpgradeId::Well));
        assert!(offered.contains(&UpgradeId::AdvancedFarming));
        assert!(!offered.contains(&UpgradeId::Farming));
    }

    #[test]
    fn repurchase_and_missing_prerequisite_are_rejected() {
        let mut book = UpgradeBook::new();
        let mut ledger = ResourceLedger::with_stock(Stockpile::from_units(1000, 1000, 1000));
        assert_eq!(
            book.purchase(UpgradeId::Well, &mut ledger),
            Err(WorldError::PrerequisiteMissing {
                upgrade: UpgradeId::Well,
                prerequisite: UpgradeId::Farming,
            })
        );
        book.purchase(UpgradeId::Farming, &mut ledger).unwrap();
        assert_eq!(
            book.purchase(UpgradeId::Farming, &mut ledger),
            Err(WorldError::UpgradeAlreadyUnlocked(UpgradeId::Farming))
        );
        assert_eq!(ledger.balance(Resource::Food), dec!(920));
    }

    #[test]
    fn partial_affordability_deducts_nothing() {
        let mut book = UpgradeBook::new();
        let mut ledger = ResourceLedger::with_stock(Stockpile::from_units(50, 0, 500));
        let err = book.purchase(UpgradeId::HuntingLodge, &mut ledger);
        assert!(matches!(err, Err(WorldError::InsufficientResource { resource: Resource::Food, .. })));
        assert_eq!(ledger.balance(Resource::Wood), dec!(500));
        assert_eq!(ledger.balance(Resource::Food), dec!(50));
        assert!(!book.is_unlocked(UpgradeId::HuntingLodge));
    }
}
