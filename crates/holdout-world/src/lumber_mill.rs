//! The lumber mill: a fixed pool of growing trees plus passive wood.
//!
//! Every tree grows by `1 / growth_time` per tick. A fully grown tree can
//! be felled for its `harvest_amount`, after which its slot is replanted
//! with a freshly randomized sapling so the pool never shrinks.

use holdout_types::{Resource, UpgradeId};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::WorldError;
use crate::ledger::ResourceLedger;

/// Tunables for the lumber mill.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LumberMillConfig {
    /// Trees kept in the pool.
    pub max_trees: usize,
    /// Mean hours for a tree to mature.
    pub base_growth_time: u32,
    /// Spread around `base_growth_time`.
    pub growth_time_variance: u32,
    /// Mean wood per felled tree.
    pub base_harvest: u32,
    /// Spread around `base_harvest`.
    pub harvest_variance: u32,
    /// Wood credited every tick once the mill is built.
    pub passive_wood_per_tick: u32,
}

impl Default for LumberMillConfig {
    fn default() -> Self {
        Self {
            max_trees: 5,
            base_growth_time: 24,
            growth_time_variance: 12,
            base_harvest: 10,
            harvest_variance: 5,
            passive_wood_per_tick: 1,
        }
    }
}

/// One tree in the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Maturity in `[0, 1]`.
    pub growth: f64,
    /// Ticks from sapling to mature.
    pub growth_time: u32,
    /// Wood yielded when felled.
    pub harvest_amount: u32,
}

impl Tree {
    /// Plant a sapling with randomized growth time and yield.
    pub fn sapling<R: Rng>(config: &LumberMillConfig, rng: &mut R) -> Self {
        Self {
            growth: 0.0,
            growth_time: around(config.base_growth_time, config.growth_time_variance, rng).max(1),
            harvest_amount: around(config.base_harvest, config.harvest_variance, rng),
        }
    }

    /// Whether the tree can be felled.
    pub fn is_mature(&self) -> bool {
        self.growth >= 1.0
    }

    #[allow(clippy::cast_precision_loss)]
    fn grow(&mut self, hours: u64) {
        let step = (hours as f64) / f64::from(self.growth_time.max(1));
        self.growth = (self.growth + step).min(1.0);
    }
}

fn around<R: Rng>(base: u32, variance: u32, rng: &mut R) -> u32 {
    rng.random_range(base.saturating_sub(variance)..=base.saturating_add(variance))
}

/// The tree pool and its activation flag.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LumberMill {
    trees: Vec<Tree>,
    active: bool,
}

impl LumberMill {
    /// Build the mill and plant a full pool.
    pub fn activate<R: Rng>(&mut self, config: &LumberMillConfig, rng: &mut R) {
        self.active = true;
        self.replenish(config, rng);
    }

    /// Whether the mill has been built.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// The current trees.
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    fn replenish<R: Rng>(&mut self, config: &LumberMillConfig, rng: &mut R) {
        while self.trees.len() < config.max_trees {
            self.trees.push(Tree::sapling(config, rng));
        }
    }

    /// Grow every tree one hour and credit passive wood.
    ///
    /// Returns the wood credited (zero while inactive).
    pub fn tick<R: Rng>(&mut self, config: &LumberMillConfig, ledger: &mut ResourceLedger, rng: &mut R) -> Decimal {
        if !self.active {
            return Decimal::ZERO;
        }
        self.replenish(config, rng);
        for tree in &mut self.trees {
            tree.grow(1);
        }
        let wood = Decimal::from(config.passive_wood_per_tick);
        ledger.credit(Resource::Wood, wood);
        wood
    }

    /// Advance every tree by `hours` without passive income.
    pub fn fast_forward(&mut self, hours: u64) {
        for tree in &mut self.trees {
            tree.grow(hours);
        }
    }

    /// Fell the tree at `index`, credit its wood, and replant the slot.
    ///
    /// # Errors
    ///
    /// - [`WorldError::ModuleLocked`] before the mill is built
    /// - [`WorldError::TreeNotFound`] for a bad index
    /// - [`WorldError::TreeImmature`] if the tree is still growing
    pub fn harvest<R: Rng>(
        &mut self,
        index: usize,
        config: &LumberMillConfig,
        ledger: &mut ResourceLedger,
        rng: &mut R,
    ) -> Result<u32, WorldError> {
        if !self.active {
            return Err(WorldError::ModuleLocked(UpgradeId::LumberMill));
        }
        let slot = self.trees.get_mut(index).ok_or(WorldError::TreeNotFound(index))?;
        if !slot.is_mature() {
            return Err(WorldError::TreeImmature(index));
        }
        let wood = slot.harvest_amount;
        *slot = Tree::sapling(config, rng);
        ledger.credit(Resource::Wood, Decimal::from(wood));
        Ok(wood)
    }
}
