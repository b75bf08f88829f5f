//! Serializable commands and their dispatch.
//!
//! A [`Command`] names one mutating operation with its arguments. It is
//! what a steward plans and what a front end would send over whatever
//! boundary it uses. [`Simulation::apply`] runs a command and, when it is
//! refused, writes the reason to the game log before returning the error.

use holdout_types::{ActionKind, CropType, Difficulty, MemberId, RescueDifficulty, UpgradeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GameError;
use crate::journal::GameEvent;
use crate::simulation::Simulation;

/// One mutating operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Start a fresh game.
    StartGame {
        /// Starting difficulty.
        difficulty: Difficulty,
    },
    /// Discard the game.
    ResetGame,
    /// Advance one hour.
    Tick,
    /// Have a specific member act.
    PerformAction {
        /// Who.
        member: MemberId,
        /// What.
        action: ActionKind,
    },
    /// Have the freshest idle member act.
    AssignBestMember {
        /// What.
        action: ActionKind,
    },
    /// Plant a crop.
    PlantCrop {
        /// Grid row.
        row: usize,
        /// Grid column.
        col: usize,
        /// What.
        crop: CropType,
    },
    /// Water every dry plot.
    WaterCrops,
    /// Harvest a ripe crop.
    HarvestCrop {
        /// Grid row.
        row: usize,
        /// Grid column.
        col: usize,
    },
    /// Empty the well.
    CollectWellWater,
    /// Fell a mature tree.
    HarvestTree {
        /// Tree slot.
        index: usize,
    },
    /// Shoot the hunting target.
    Shoot,
    /// Buy an upgrade.
    BuyUpgrade {
        /// Which.
        upgrade: UpgradeId,
    },
    /// Send a rescue party.
    StartRescue {
        /// Mission difficulty.
        difficulty: RescueDifficulty,
    },
}

impl Simulation {
    /// Run `command`, logging a refusal in the game log.
    ///
    /// # Errors
    ///
    /// Whatever the underlying operation returns. A tick on a game that is
    /// not running reports [`GameError::GameNotRunning`].
    pub fn apply(&mut self, command: Command) -> Result<Vec<GameEvent>, GameError> {
        let result = match command {
            Command::StartGame { difficulty } => self.start_game(difficulty),
            Command::ResetGame => {
                self.reset_game();
                Ok(Vec::new())
            }
            Command::Tick => self
                .tick()
                .map(|summary| summary.events)
                .ok_or(GameError::GameNotRunning),
            Command::PerformAction { member, action } => self.perform_action(member, action),
            Command::AssignBestMember { action } => self.assign_best_member(action),
            Command::PlantCrop { row, col, crop } => self.plant_crop(row, col, crop),
            Command::WaterCrops => self.water_crops(),
            Command::HarvestCrop { row, col } => self.harvest_crop(row, col),
            Command::CollectWellWater => self.collect_well_water(),
            Command::HarvestTree { index } => self.harvest_tree(index),
            Command::Shoot => self.shoot(),
            Command::BuyUpgrade { upgrade } => self.buy_upgrade(upgrade),
            Command::StartRescue { difficulty } => self.start_rescue(difficulty),
        };
        if let Err(err) = &result {
            debug!(%err, "Command rejected");
            self.record_rejection(err);
        }
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use holdout_types::LogLevel;

    use super::*;
    use crate::config::GameConfig;

    fn sim() -> Simulation {
        let mut config = GameConfig::default();
        config.world.seed = Some(4);
        config.events.enabled = false;
        Simulation::new(config)
    }

    #[test]
    fn commands_round_trip_through_json() {
        let command = Command::PlantCrop {
            row: 1,
            col: 4,
            crop: CropType::Bean,
        };
        let json = serde_json::to_string(&command).unwrap();
        assert_eq!(json, r#"{"command":"plant_crop","row":1,"col":4,"crop":"bean"}"#);
        assert_eq!(serde_json::from_str::<Command>(&json).unwrap(), command);
    }

    #[test]
    fn rejection_is_written_to_the_log() {
        let mut sim = sim();
        sim.apply(Command::StartGame {
            difficulty: Difficulty::Hard,
        })
        .unwrap();
        let err = sim.apply(Command::AssignBestMember {
            action: ActionKind::Eat,
        });
        assert!(err.is_err());
        let entry = sim.state().log.latest().unwrap();
        assert_eq!(entry.level, LogLevel::Error);
        assert!(entry.message.contains("insufficient"), "{}", entry.message);
    }

    #[test]
    fn tick_command_needs_a_running_game() {
        let mut sim = sim();
        assert_eq!(sim.apply(Command::Tick), Err(GameError::GameNotRunning));
        sim.apply(Command::StartGame {
            difficulty: Difficulty::Easy,
        })
        .unwrap();
        assert!(sim.apply(Command::Tick).is_ok());
        sim.apply(Command::ResetGame).unwrap();
        assert!(sim.state().log.is_empty());
    }
}
