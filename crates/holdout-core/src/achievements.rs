//! Achievements: permanent milestones checked after every tick and command.

use holdout_types::{Resource, UpgradeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::journal::GameEvent;
use crate::state::GameState;

/// Play time needed for the marathon achievement.
const MARATHON_MS: u64 = 24 * 60 * 60 * 1000;

/// A milestone that unlocks once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    /// Reach day 7.
    Survivor,
    /// Gather 1000 food.
    WellFed,
    /// Gather 1000 water.
    Hydrated,
    /// Gather 1000 wood.
    Lumberjack,
    /// Start farming.
    Farmer,
    /// Build the Hunting Lodge.
    Hunter,
    /// Build the Well.
    WellDriller,
    /// Build the Medical Tent.
    Doctor,
    /// Build the Tool Workshop.
    ToolMaker,
    /// Build Water Purification.
    WaterPurifier,
    /// Learn Advanced Farming.
    MasterFarmer,
    /// Ten living members at once.
    BigFamily,
    /// 100 actions.
    Efficient,
    /// 500 of every resource at once.
    WellStocked,
    /// 24 hours of play.
    Marathon,
    /// 100 harvests.
    CropMaster,
    /// 50 animals.
    BigGame,
    /// 1000 water from the well.
    WaterWizard,
    /// Reach day 30.
    Survivor30,
    /// Every upgrade.
    JackOfAllTrades,
}

impl AchievementId {
    /// Every achievement in display order.
    pub const ALL: [Self; 20] = [
        Self::Survivor,
        Self::WellFed,
        Self::Hydrated,
        Self::Lumberjack,
        Self::Farmer,
        Self::Hunter,
        Self::WellDriller,
        Self::Doctor,
        Self::ToolMaker,
        Self::WaterPurifier,
        Self::MasterFarmer,
        Self::BigFamily,
        Self::Efficient,
        Self::WellStocked,
        Self::Marathon,
        Self::CropMaster,
        Self::BigGame,
        Self::WaterWizard,
        Self::Survivor30,
        Self::JackOfAllTrades,
    ];

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Survivor => "Survivor",
            Self::WellFed => "Well Fed",
            Self::Hydrated => "Hydrated",
            Self::Lumberjack => "Lumberjack",
            Self::Farmer => "Farmer",
            Self::Hunter => "Hunter",
            Self::WellDriller => "Well Driller",
            Self::Doctor => "Doctor",
            Self::ToolMaker => "Tool Maker",
            Self::WaterPurifier => "Water Purifier",
            Self::MasterFarmer => "Master Farmer",
            Self::BigFamily => "Big Family",
            Self::Efficient => "Efficient",
            Self::WellStocked => "Well Stocked",
            Self::Marathon => "Marathon",
            Self::CropMaster => "Crop Master",
            Self::BigGame => "Big Game Hunter",
            Self::WaterWizard => "Water Wizard",
            Self::Survivor30 => "Long-term Survivor",
            Self::JackOfAllTrades => "Jack of All Trades",
        }
    }

    /// Whether the milestone is reached in `state`.
    pub fn is_met(self, state: &GameState) -> bool {
        let gathered = state.ledger.total_gathered();
        let thousand = Decimal::from(1000);
        let five_hundred = Decimal::from(500);
        match self {
            Self::Survivor => state.clock.day() >= 7,
            Self::WellFed => gathered.food >= thousand,
            Self::Hydrated => gathered.water >= thousand,
            Self::Lumberjack => gathered.wood >= thousand,
            Self::Farmer => state.has(UpgradeId::Farming),
            Self::Hunter => state.has(UpgradeId::HuntingLodge),
            Self::WellDriller => state.has(UpgradeId::Well),
            Self::Doctor => state.has(UpgradeId::MedicalTent),
            Self::ToolMaker => state.has(UpgradeId::ToolWorkshop),
            Self::WaterPurifier => state.has(UpgradeId::WaterPurification),
            Self::MasterFarmer => state.has(UpgradeId::AdvancedFarming),
            Self::BigFamily => state.party.len() >= 10,
            Self::Efficient => state.stats.total_actions >= 100,
            Self::WellStocked => Resource::ALL
                .into_iter()
                .all(|r| state.ledger.balance(r) >= five_hundred),
            Self::Marathon => state.stats.total_play_time_ms >= MARATHON_MS,
            Self::CropMaster => state.stats.total_crops_harvested >= 100,
            Self::BigGame => state.hunting.total_hunted() >= 50,
            Self::WaterWizard => state.well.total_collected() >= thousand,
            Self::Survivor30 => state.clock.day() >= 30,
            Self::JackOfAllTrades => UpgradeId::ALL.into_iter().all(|u| state.has(u)),
        }
    }
}

/// Unlock every newly met achievement, returning one event per unlock.
pub fn check_achievements(state: &mut GameState) -> Vec<GameEvent> {
    let fresh: Vec<AchievementId> = AchievementId::ALL
        .into_iter()
        .filter(|a| !state.achievements.contains(a) && a.is_met(state))
        .collect();
    fresh
        .into_iter()
        .map(|achievement| {
            state.achievements.insert(achievement);
            info!(achievement = achievement.name(), "Achievement unlocked");
            GameEvent::AchievementUnlocked { achievement }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use holdout_world::{ResourceLedger, Stockpile};

    use super::*;
    use crate::clock::GameClock;
    use crate::config::GameConfig;

    #[test]
    fn nothing_unlocks_on_a_fresh_state() {
        let mut state = GameState::new(&GameConfig::default());
        assert!(check_achievements(&mut state).is_empty());
    }

    #[test]
    fn unlocks_are_reported_once() {
        let mut state = GameState::new(&GameConfig::default());
        state.clock = GameClock::at(7, 1);
        state.ledger = ResourceLedger::with_stock(Stockpile::from_units(500, 500, 500));
        let events = check_achievements(&mut state);
        assert_eq!(
            events,
            vec![
                GameEvent::AchievementUnlocked {
                    achievement: AchievementId::Survivor
                },
                GameEvent::AchievementUnlocked {
                    achievement: AchievementId::WellStocked
                },
            ]
        );
        assert!(check_achievements(&mut state).is_empty());
        assert_eq!(state.achievements.len(), 2);
    }

    #[test]
    fn upgrade_milestones_follow_the_book() {
        let mut state = GameState::new(&GameConfig::default());
        state.ledger = ResourceLedger::with_stock(Stockpile::from_units(80, 0, 0));
        state.upgrades.purchase(UpgradeId::Farming, &mut state.ledger).unwrap();
        assert!(AchievementId::Farmer.is_met(&state));
        assert!(!AchievementId::JackOfAllTrades.is_met(&state));
    }
}
