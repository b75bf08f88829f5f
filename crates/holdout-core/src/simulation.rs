//! The engine's operation surface.
//!
//! [`Simulation`] bundles a [`GameState`] with its configuration and random
//! source, and exposes every operation a rendering layer may call: the
//! hour tick, the hunting clock, member actions, module commands, upgrade
//! purchases and rescue missions, plus game start, reset, snapshot and
//! resume.
//!
//! Commands return the events they produced, already written to the game
//! log, followed by any achievements they unlocked. A rejected command
//! returns a [`GameError`] and changes nothing.

use holdout_types::{
    ActionKind, CropType, Difficulty, GamePhase, MemberId, RescueDifficulty, Resource, UpgradeId,
};
use holdout_world::{HuntEvent, ResourceLedger, Stockpile, UpgradeSpec, WorldError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing::info;

use crate::achievements::check_achievements;
use crate::actions;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::journal::GameEvent;
use crate::rescue;
use crate::save::SaveGame;
use crate::state::GameState;
use crate::tick::{TickSummary, run_tick};

/// A game, its configuration, and its random source.
#[derive(Debug)]
pub struct Simulation {
    state: GameState,
    config: GameConfig,
    rng: StdRng,
}

fn seeded_rng(config: &GameConfig) -> StdRng {
    config
        .world
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

impl Simulation {
    /// A not-yet-started game.
    pub fn new(config: GameConfig) -> Self {
        let rng = seeded_rng(&config);
        Self {
            state: GameState::new(&config),
            config,
            rng,
        }
    }

    /// Continue a saved game. The clock picks up where the save left off.
    pub fn resume(config: GameConfig, save: SaveGame) -> Self {
        let rng = seeded_rng(&config);
        info!(
            day = save.state.clock.day(),
            hour = save.state.clock.hour(),
            saved_at = %save.saved_at,
            "Game resumed"
        );
        Self {
            state: save.state,
            config,
            rng,
        }
    }

    /// Read-only view of the state.
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Active configuration.
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Snapshot the game for an external store.
    pub fn snapshot(&self) -> SaveGame {
        SaveGame::capture(&self.state)
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Start a fresh game at `difficulty`, discarding any previous one.
    ///
    /// # Errors
    ///
    /// Only fails if the configured party is larger than the name pool.
    pub fn start_game(&mut self, difficulty: Difficulty) -> Result<Vec<GameEvent>, GameError> {
        let start = self.config.difficulty.for_level(difficulty);
        let mut state = GameState::new(&self.config);
        state.difficulty = difficulty;
        for _ in 0..start.party_size {
            state.party.recruit(&self.config.vitals, &mut self.rng)?;
        }
        state.ledger = ResourceLedger::with_stock(Stockpile::from_units(start.food, start.water, start.wood));
        state.phase = GamePhase::Running;
        state.next_event_hour = Some(self.rng.random_range(2..=crate::clock::HOURS_PER_DAY));
        self.state = state;

        info!(
            ?difficulty,
            party_size = start.party_size,
            food = start.food,
            water = start.water,
            wood = start.wood,
            "Game started"
        );
        Ok(self.settle(GameEvent::GameStarted {
            difficulty,
            party_size: self.state.party.len(),
        }))
    }

    /// Throw the game away and return to the not-started phase.
    pub fn reset_game(&mut self) {
        self.state = GameState::new(&self.config);
        info!("Game reset");
    }

    /// Advance one in-game hour. `None` unless the game is running.
    pub fn tick(&mut self) -> Option<TickSummary> {
        run_tick(&mut self.state, &self.config, &mut self.rng)
    }

    /// Run the hunting clock forward. Does nothing unless running.
    pub fn advance_hunting(&mut self, elapsed_ms: u64) -> Vec<HuntEvent> {
        if !self.state.is_running() {
            return Vec::new();
        }
        self.state
            .hunting
            .advance(elapsed_ms, &self.config.hunting, &mut self.rng)
    }

    /// Count wall-clock play time.
    pub fn add_play_time(&mut self, elapsed_ms: u64) {
        self.state.stats.total_play_time_ms = self.state.stats.total_play_time_ms.saturating_add(elapsed_ms);
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        if self.state.is_running() {
            Ok(())
        } else {
            Err(GameError::GameNotRunning)
        }
    }

    fn ensure_unlocked(&self, upgrade: UpgradeId) -> Result<(), GameError> {
        if self.state.has(upgrade) {
            Ok(())
        } else {
            Err(WorldError::ModuleLocked(upgrade).into())
        }
    }

    /// Log `event`, check achievements, and return everything that happened.
    fn settle(&mut self, event: GameEvent) -> Vec<GameEvent> {
        let mut events = vec![event];
        events.extend(check_achievements(&mut self.state));
        for event in &events {
            self.state.record(event);
        }
        events
    }

    /// Write a refused command to the game log.
    pub(crate) fn record_rejection(&mut self, err: &GameError) {
        self.state.record(&GameEvent::CommandRejected {
            reason: err.to_string(),
        });
    }

    // -----------------------------------------------------------------------
    // Members
    // -----------------------------------------------------------------------

    /// Have member `id` start `kind`.
    ///
    /// # Errors
    ///
    /// [`GameError::GameNotRunning`], or any rejection from
    /// [`actions::perform_action`].
    pub fn perform_action(&mut self, id: MemberId, kind: ActionKind) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_running()?;
        let event = actions::perform_action(&mut self.state, &self.config, id, kind, &mut self.rng)?;
        Ok(self.settle(event))
    }

    /// Give `kind` to the idle member with the most energy.
    ///
    /// # Errors
    ///
    /// [`GameError::GameNotRunning`], or any rejection from
    /// [`actions::assign_best_member`].
    pub fn assign_best_member(&mut self, kind: ActionKind) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_running()?;
        let event = actions::assign_best_member(&mut self.state, &self.config, kind, &mut self.rng)?;
        Ok(self.settle(event))
    }

    // -----------------------------------------------------------------------
    // Farming
    // -----------------------------------------------------------------------

    /// Plant `crop` at `row`, `col`.
    ///
    /// # Errors
    ///
    /// Not running, farming locked, or any grid rejection.
    pub fn plant_crop(&mut self, row: usize, col: usize, crop: CropType) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_running()?;
        self.ensure_unlocked(UpgradeId::Farming)?;
        let now = self.state.now();
        let purified = self.state.has(UpgradeId::WaterPurification);
        self.state
            .farming
            .plant(row, col, crop, now, &mut self.state.ledger, purified)?;
        Ok(self.settle(GameEvent::CropPlanted { crop, row, col }))
    }

    /// Water every dry plot.
    ///
    /// # Errors
    ///
    /// Not running, farming locked, or not enough water for all of them.
    pub fn water_crops(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_running()?;
        self.ensure_unlocked(UpgradeId::Farming)?;
        let purified = self.state.has(UpgradeId::WaterPurification);
        let plots = self.state.farming.water_all(&mut self.state.ledger, purified)?;
        Ok(self.settle(GameEvent::CropsWatered { plots }))
    }

    /// Harvest the ripe crop at `row`, `col`.
    ///
    /// # Errors
    ///
    /// Not running, farming locked, empty plot, or crop not ready.
    pub fn harvest_crop(&mut self, row: usize, col: usize) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_running()?;
        self.ensure_unlocked(UpgradeId::Farming)?;
        let now = self.state.now();
        let crop = self
            .state
            .farming
            .plot(row, col)?
            .map(|plot| plot.crop)
            .ok_or(WorldError::PlotEmpty { row, col })?;
        let food = self.state.farming.harvest(row, col, now, &mut self.state.ledger)?;
        self.state.stats.total_crops_harvested = self.state.stats.total_crops_harvested.saturating_add(1);
        Ok(self.settle(GameEvent::CropHarvested { crop, food }))
    }

    // -----------------------------------------------------------------------
    // Well, lumber mill, hunting
    // -----------------------------------------------------------------------

    /// Empty the well into the water stockpile. An empty well is fine.
    ///
    /// # Errors
    ///
    /// Not running or the well is not built.
    pub fn collect_well_water(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_running()?;
        self.ensure_unlocked(UpgradeId::Well)?;
        let water = self.state.well.collect(&mut self.state.ledger);
        Ok(self.settle(GameEvent::WellCollected { water }))
    }

    /// Fell the mature tree at `index`.
    ///
    /// # Errors
    ///
    /// Not running, mill not built, bad index, or tree still growing.
    pub fn harvest_tree(&mut self, index: usize) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_running()?;
        let wood = self.state.lumber_mill.harvest(
            index,
            &self.config.world.lumber_mill,
            &mut self.state.ledger,
            &mut self.rng,
        )?;
        Ok(self.settle(GameEvent::TreeHarvested { index, wood }))
    }

    /// Shoot at the current hunting target.
    ///
    /// # Errors
    ///
    /// Not running, lodge not built, or nothing on the field.
    pub fn shoot(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_running()?;
        let outcome = self
            .state
            .hunting
            .shoot(&mut self.state.ledger, &self.config.hunting, &mut self.rng)?;
        Ok(self.settle(GameEvent::AnimalShot {
            animal: outcome.kind,
            food: outcome.food,
        }))
    }

    // -----------------------------------------------------------------------
    // Upgrades and rescues
    // -----------------------------------------------------------------------

    /// Upgrades that could be bought now, in catalog order.
    pub fn available_upgrades(&self) -> Vec<UpgradeSpec> {
        self.state.upgrades.available()
    }

    /// Buy `upgrade` and apply its one-time effect.
    ///
    /// # Errors
    ///
    /// Not running, already owned, prerequisite missing, or unaffordable.
    pub fn buy_upgrade(&mut self, upgrade: UpgradeId) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_running()?;
        let spec = self.state.upgrades.purchase(upgrade, &mut self.state.ledger)?;
        match upgrade {
            UpgradeId::Well => self.state.well.activate(),
            UpgradeId::AdvancedFarming => self.state.farming.enable_advanced(),
            UpgradeId::HuntingLodge => self.state.hunting.activate(&self.config.hunting),
            UpgradeId::LumberMill => self
                .state
                .lumber_mill
                .activate(&self.config.world.lumber_mill, &mut self.rng),
            UpgradeId::Farming
            | UpgradeId::WaterPurification
            | UpgradeId::ToolWorkshop
            | UpgradeId::MedicalTent
            | UpgradeId::Watchtower => {}
        }
        Ok(self.settle(GameEvent::UpgradePurchased {
            upgrade,
            name: spec.name.to_owned(),
        }))
    }

    /// Send a rescue party from the watchtower.
    ///
    /// # Errors
    ///
    /// Not running, or any rejection from [`rescue::start_rescue`].
    pub fn start_rescue(&mut self, difficulty: RescueDifficulty) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_running()?;
        let event = rescue::start_rescue(&mut self.state, difficulty)?;
        Ok(self.settle(event))
    }

    /// Current balance of `resource`.
    pub const fn balance(&self, resource: Resource) -> Decimal {
        self.state.ledger.balance(resource)
    }
}
