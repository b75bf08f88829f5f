//! The complete game state: one explicit value passed to every operation.
//!
//! Nothing in the engine is global. A [`GameState`] holds the clock, the
//! party, the stockpiles, every production module, the upgrade book, the
//! watchtower, achievements, run statistics, the event schedule and the
//! in-game log. It serializes as-is into save files and snapshots.

use std::collections::BTreeSet;

use holdout_party::PartyRoster;
use holdout_types::{Difficulty, GamePhase, UpgradeId};
use holdout_world::{FarmingGrid, HuntingGround, LumberMill, ResourceLedger, UpgradeBook, Well};
use serde::{Deserialize, Serialize};

use crate::achievements::AchievementId;
use crate::clock::GameClock;
use crate::config::GameConfig;
use crate::journal::{GameEvent, GameLog};
use crate::rescue::Watchtower;

/// Top-level keys every compatible save must carry.
pub const REQUIRED_KEYS: [&str; 15] = [
    "phase",
    "difficulty",
    "clock",
    "party",
    "ledger",
    "farming",
    "well",
    "lumber_mill",
    "hunting",
    "upgrades",
    "watchtower",
    "achievements",
    "stats",
    "next_event_hour",
    "log",
];

/// Counters that only ever grow during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Actions accepted from any member.
    pub total_actions: u64,
    /// Crops harvested.
    pub total_crops_harvested: u64,
    /// Wall-clock milliseconds the game has been running.
    pub total_play_time_ms: u64,
}

/// Everything that makes up one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Lifecycle phase.
    pub phase: GamePhase,
    /// Difficulty the run was started at.
    pub difficulty: Difficulty,
    /// Day and hour.
    pub clock: GameClock,
    /// Living members, their activities, and the fallen.
    pub party: PartyRoster,
    /// Food, water and wood.
    pub ledger: ResourceLedger,
    /// Crop field.
    pub farming: FarmingGrid,
    /// Passive water source.
    pub well: Well,
    /// Tree pool.
    pub lumber_mill: LumberMill,
    /// Roaming target and hunting clock.
    pub hunting: HuntingGround,
    /// Purchased upgrades.
    pub upgrades: UpgradeBook,
    /// Rescue missions.
    pub watchtower: Watchtower,
    /// Achievements unlocked this run.
    pub achievements: BTreeSet<AchievementId>,
    /// Run counters.
    pub stats: RunStats,
    /// Hour of today's random event, cleared once it fires.
    pub next_event_hour: Option<u32>,
    /// In-game log, newest last.
    pub log: GameLog,
}

impl GameState {
    /// A fresh, not-yet-started state shaped by `config`.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            difficulty: config.simulation.difficulty,
            clock: GameClock::new(),
            party: PartyRoster::new(config.actions.gather_energy_cost),
            ledger: ResourceLedger::new(),
            farming: FarmingGrid::new(),
            well: Well::new(config.world.well_capacity, config.world.well_fill_rate),
            lumber_mill: LumberMill::default(),
            hunting: HuntingGround::default(),
            upgrades: UpgradeBook::new(),
            watchtower: Watchtower::default(),
            achievements: BTreeSet::new(),
            stats: RunStats::default(),
            next_event_hour: None,
            log: GameLog::with_capacity(config.world.log_capacity),
        }
    }

    /// Current absolute hour.
    pub fn now(&self) -> u64 {
        self.clock.absolute_hour()
    }

    /// Whether ticks and commands are accepted.
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Whether `upgrade` has been bought.
    pub fn has(&self, upgrade: UpgradeId) -> bool {
        self.upgrades.is_unlocked(upgrade)
    }

    /// Log `event` at the current time.
    pub fn record(&mut self, event: &GameEvent) {
        self.log.record(self.clock.day(), self.clock.hour(), event);
    }
}
