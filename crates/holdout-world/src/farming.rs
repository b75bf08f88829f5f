//! The farming grid: planting, watering, growth-freeze, and harvest.
//!
//! Growth is measured from `planted_at` against the absolute hour. A dry
//! plot does not grow: each tick its `planted_at` is pushed forward one
//! hour, so its effective age stands still until it is watered again.
//! Plots only go dry through [`FarmingGrid::dry_out`], which the tick
//! calls at dawn when daily dry-out is switched on.

use holdout_types::{CropType, Resource};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::WorldError;
use crate::ledger::ResourceLedger;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Rows and columns of the grid.
pub const GRID_SIZE: usize = 5;

/// Water needed to re-water one dry plot, before purification.
pub const WATERING_COST_PER_PLOT: u32 = 5;

/// Growth, water and yield of one crop type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropSpec {
    /// Hours of watered growth until ripe.
    pub growth_hours: u64,
    /// Water spent to plant it.
    pub water_needed: u32,
    /// Food credited on harvest.
    pub yield_food: u32,
}

/// Base numbers for a crop type.
pub const fn crop_spec(crop: CropType) -> CropSpec {
    match crop {
        CropType::Wheat => CropSpec {
            growth_hours: 24,
            water_needed: 5,
            yield_food: 20,
        },
        CropType::Carrot => CropSpec {
            growth_hours: 48,
            water_needed: 10,
            yield_food: 40,
        },
        CropType::Bean => CropSpec {
            growth_hours: 72,
            water_needed: 15,
            yield_food: 60,
        },
    }
}

/// Scale a water cost for the purification upgrade (x0.8, rounded up).
pub fn water_cost(base: u32, purified: bool) -> Decimal {
    let base = Decimal::from(base);
    if purified {
        base.checked_mul(Decimal::new(8, 1))
            .map_or(base, |v| v.ceil())
    } else {
        base
    }
}

// ---------------------------------------------------------------------------
// Plot
// ---------------------------------------------------------------------------

/// A planted cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plot {
    /// What is growing.
    pub crop: CropType,
    /// Absolute hour the crop counts as planted.
    pub planted_at: u64,
    /// Whether the plot has water today.
    pub watered: bool,
}

impl Plot {
    /// Hours of growth at absolute hour `now`.
    pub const fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.planted_at)
    }
}

// ---------------------------------------------------------------------------
// FarmingGrid
// ---------------------------------------------------------------------------

/// A fixed-size field of optional plots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmingGrid {
    /// `GRID_SIZE` rows of `GRID_SIZE` cells.
    plots: Vec<Vec<Option<Plot>>>,
    /// Advanced techniques: faster growth, larger yields.
    advanced: bool,
}

impl Default for FarmingGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl FarmingGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self {
            plots: vec![vec![None; GRID_SIZE]; GRID_SIZE],
            advanced: false,
        }
    }

    /// Switch to advanced growth and yields.
    pub const fn enable_advanced(&mut self) {
        self.advanced = true;
    }

    /// Whether advanced techniques are in use.
    pub const fn is_advanced(&self) -> bool {
        self.advanced
    }

    /// Hours a crop needs, after advanced techniques (x0.75).
    pub fn growth_hours(&self, crop: CropType) -> u64 {
        let base = crop_spec(crop).growth_hours;
        if self.advanced {
            base.saturating_mul(3).checked_div(4).unwrap_or(base)
        } else {
            base
        }
    }

    /// Food a crop yields, after advanced techniques (x1.5).
    pub fn yield_of(&self, crop: CropType) -> u32 {
        let base = crop_spec(crop).yield_food;
        if self.advanced {
            base.saturating_mul(3).checked_div(2).unwrap_or(base)
        } else {
            base
        }
    }

    /// The plot at `row`, `col`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PlotOutOfBounds`] outside the grid.
    pub fn plot(&self, row: usize, col: usize) -> Result<Option<&Plot>, WorldError> {
        self.plots
            .get(row)
            .and_then(|r| r.get(col))
            .map(Option::as_ref)
            .ok_or(WorldError::PlotOutOfBounds { row, col })
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut Option<Plot>, WorldError> {
        self.plots
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(WorldError::PlotOutOfBounds { row, col })
    }

    /// Iterate over every planted plot with its coordinates.
    pub fn planted(&self) -> impl Iterator<Item = (usize, usize, &Plot)> {
        self.plots.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.as_ref().map(|plot| (row, col, plot)))
        })
    }

    fn planted_mut(&mut self) -> impl Iterator<Item = &mut Plot> {
        self.plots.iter_mut().flatten().filter_map(Option::as_mut)
    }

    /// Number of planted plots.
    pub fn occupied_count(&self) -> usize {
        self.planted().count()
    }

    /// Number of planted plots without water.
    pub fn dry_count(&self) -> usize {
        self.planted().filter(|(_, _, p)| !p.watered).count()
    }

    /// Plant `crop` at `row`, `col`, paying its water cost.
    ///
    /// Returns the water spent.
    ///
    /// # Errors
    ///
    /// - [`WorldError::PlotOutOfBounds`] outside the grid
    /// - [`WorldError::PlotOccupied`] if something already grows there
    /// - [`WorldError::InsufficientResource`] if water is short
    pub fn plant(
        &mut self,
        row: usize,
        col: usize,
        crop: CropType,
        now: u64,
        ledger: &mut ResourceLedger,
        purified: bool,
    ) -> Result<Decimal, WorldError> {
        if self.plot(row, col)?.is_some() {
            return Err(WorldError::PlotOccupied { row, col });
        }
        let cost = water_cost(crop_spec(crop).water_needed, purified);
        ledger.debit(Resource::Water, cost)?;
        *self.cell_mut(row, col)? = Some(Plot {
            crop,
            planted_at: now,
            watered: true,
        });
        Ok(cost)
    }

    /// Water every dry plot, paying for all of them or none.
    ///
    /// Returns the number of plots watered (0 costs nothing).
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InsufficientResource`] if the total is not
    /// covered.
    pub fn water_all(&mut self, ledger: &mut ResourceLedger, purified: bool) -> Result<usize, WorldError> {
        let dry = self.dry_count();
        if dry == 0 {
            return Ok(0);
        }
        let per_plot = water_cost(WATERING_COST_PER_PLOT, purified);
        let total = per_plot.saturating_mul(Decimal::from(dry));
        ledger.debit(Resource::Water, total)?;
        for plot in self.planted_mut() {
            plot.watered = true;
        }
        Ok(dry)
    }

    /// Whether the crop at `row`, `col` is watered and fully grown.
    pub fn is_harvestable(&self, row: usize, col: usize, now: u64) -> bool {
        matches!(
            self.plot(row, col),
            Ok(Some(plot)) if plot.watered && plot.age(now) >= self.growth_hours(plot.crop)
        )
    }

    /// Harvest the crop at `row`, `col`, crediting its yield as food.
    ///
    /// Returns the food gained.
    ///
    /// # Errors
    ///
    /// - [`WorldError::PlotOutOfBounds`] outside the grid
    /// - [`WorldError::PlotEmpty`] if nothing is planted
    /// - [`WorldError::CropImmature`] if dry or not fully grown
    pub fn harvest(&mut self, row: usize, col: usize, now: u64, ledger: &mut ResourceLedger) -> Result<u32, WorldError> {
        let plot = self.plot(row, col)?.copied().ok_or(WorldError::PlotEmpty { row, col })?;
        if !self.is_harvestable(row, col, now) {
            return Err(WorldError::CropImmature { row, col });
        }
        let food = self.yield_of(plot.crop);
        ledger.credit(Resource::Food, Decimal::from(food));
        *self.cell_mut(row, col)? = None;
        Ok(food)
    }

    /// Growth-freeze bookkeeping: dry plots lose this tick's growth.
    pub fn tick(&mut self) {
        for plot in self.planted_mut() {
            if !plot.watered {
                plot.planted_at = plot.planted_at.saturating_add(1);
            }
        }
    }

    /// Mark every plot dry.
    pub fn dry_out(&mut self) {
        for plot in self.planted_mut() {
            plot.watered = false;
        }
    }

    /// Set every crop back by `hours`.
    pub fn delay_all(&mut self, hours: u64) {
        for plot in self.planted_mut() {
            plot.planted_at = plot.planted_at.saturating_add(hours);
        }
    }

    /// Move every crop forward by `hours`.
    pub fn advance_all(&mut self, hours: u64) {
        for plot in self.planted_mut() {
            plot.planted_at = plot.planted_at.saturating_sub(hours);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::ledger::Stockpile;

    fn ledger(water: u32) -> ResourceLedger {
        ResourceLedger::with_stock(Stockpile::from_units(0, water, 0))
    }

    #[test]
    fn planting_spends_water_and_starts_watered() {
        let mut grid = FarmingGrid::new();
        let mut ledger = ledger(20);
        let spent = grid.plant(1, 2, CropType::Carrot, 10, &mut ledger, false).unwrap();
        assert_eq!(spent, dec!(10));
        assert_eq!(ledger.balance(Resource::Water), dec!(10));
        let plot = grid.plot(1, 2).unwrap().unwrap();
        assert!(plot.watered);
        assert_eq!(plot.planted_at, 10);
    }

    #[test]
    fn insufficient_water_blocks_planting() {
        let mut grid = FarmingGrid::new();
        let mut ledger = ledger(3);
        let err = grid.plant(0, 0, CropType::Wheat, 1, &mut ledger, false);
        assert!(matches!(err, Err(WorldError::InsufficientResource { .. })));
        assert_eq!(ledger.balance(Resource::Water), dec!(3));
        assert!(grid.plot(0, 0).unwrap().is_none());
    }

    #[test]
    fn occupied_and_out_of_bounds_are_rejected() {
        let mut grid = FarmingGrid::new();
        let mut ledger = ledger(100);
        grid.plant(0, 0, CropType::Wheat, 1, &mut ledger, false).unwrap();
        assert_eq!(
            grid.plant(0, 0, CropType::Bean, 1, &mut ledger, false),
            Err(WorldError::PlotOccupied { row: 0, col: 0 })
        );
        assert_eq!(
            grid.plant(5, 0, CropType::Bean, 1, &mut ledger, false),
            Err(WorldError::PlotOutOfBounds { row: 5, col: 0 })
        );
        assert_eq!(ledger.balance(Resource::Water), dec!(95));
    }

    #[test]
    fn watered_crop_ripens_and_harvests_once() {
        let mut grid = FarmingGrid::new();
        let mut ledger = ledger(5);
        grid.plant(2, 2, CropType::Wheat, 100, &mut ledger, false).unwrap();
        for now in 101..124 {
            grid.tick();
            assert!(!grid.is_harvestable(2, 2, now));
        }
        assert_eq!(grid.harvest(2, 2, 123, &mut ledger), Err(WorldError::CropImmature { row: 2, col: 2 }));
        grid.tick();
        assert!(grid.is_harvestable(2, 2, 124));
        assert_eq!(grid.harvest(2, 2, 124, &mut ledger), Ok(20));
        assert_eq!(ledger.balance(Resource::Food), dec!(20));
        assert!(grid.plot(2, 2).unwrap().is_none());
        assert_eq!(grid.harvest(2, 2, 124, &mut ledger), Err(WorldError::PlotEmpty { row: 2, col: 2 }));
    }

    #[test]
    fn dry_plots_freeze_growth() {
        let mut grid = FarmingGrid::new();
        let mut ledger = ledger(20);
        grid.plant(0, 1, CropType::Wheat, 0, &mut ledger, false).unwrap();
        grid.dry_out();
        for _ in 0..10 {
            grid.tick();
        }
        assert_eq!(grid.plot(0, 1).unwrap().unwrap().age(10), 0);
        assert!(!grid.is_harvestable(0, 1, 200));
    }

    #[test]
    fn watering_is_atomic_across_plots() {
        let mut grid = FarmingGrid::new();
        let mut ledger = ledger(15);
        grid.plant(0, 0, CropType::Wheat, 0, &mut ledger, false).unwrap();
        grid.plant(0, 1, CropType::Wheat, 0, &mut ledger, false).unwrap();
        grid.dry_out();
        assert!(grid.water_all(&mut ledger, false).is_err());
        assert_eq!(grid.dry_count(), 2);
        assert_eq!(ledger.balance(Resource::Water), dec!(5));

        ledger.credit(Resource::Water, dec!(5));
        assert_eq!(grid.water_all(&mut ledger, false), Ok(2));
        assert_eq!(grid.dry_count(), 0);
        assert_eq!(ledger.balance(Resource::Water), Decimal::ZERO);
        assert_eq!(grid.water_all(&mut ledger, false), Ok(0));
    }

    #[test]
    fn advanced_and_purified_numbers() {
        let mut grid = FarmingGrid::new();
        grid.enable_advanced();
        assert_eq!(grid.growth_hours(CropType::Wheat), 18);
        assert_eq!(grid.growth_hours(CropType::Bean), 54);
        assert_eq!(grid.yield_of(CropType::Carrot), 60);
        assert_eq!(water_cost(5, true), dec!(4));
        assert_eq!(water_cost(15, true), dec!(12));
    }

    #[test]
    fn frost_and_boost_shift_planting_time() {
        let mut grid = FarmingGrid::new();
        let mut ledger = ledger(5);
        grid.plant(4, 4, CropType::Wheat, 30, &mut ledger, false).unwrap();
        grid.delay_all(12);
        assert_eq!(grid.plot(4, 4).unwrap().unwrap().planted_at, 42);
        grid.advance_all(50);
        assert_eq!(grid.plot(4, 4).unwrap().unwrap().planted_at, 0);
    }
}
