//! Typed game events and the capped in-game log.
//!
//! Engine operations never touch a renderer. They return [`GameEvent`]
//! values describing what happened, and the same events are rendered into
//! the [`GameLog`] that travels with the state snapshot.

use std::collections::VecDeque;

use holdout_types::{
    ActionKind, AnimalKind, CropType, DeathCause, Difficulty, EventCategory, LogEntry, LogLevel,
    RescueDifficulty, Resource, UpgradeId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::achievements::AchievementId;

/// Something log-worthy that the engine did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new game began.
    GameStarted {
        /// Chosen difficulty.
        difficulty: Difficulty,
        /// Members recruited.
        party_size: usize,
    },
    /// The clock rolled over to a new day.
    NewDay {
        /// The day that began.
        day: u32,
    },
    /// A mechanical random event fired.
    RandomEvent {
        /// Event name.
        name: String,
        /// Event category.
        category: EventCategory,
        /// What it did.
        description: String,
    },
    /// A flavor-only whisper.
    Whisper {
        /// The whispered line.
        text: String,
    },
    /// A member died.
    MemberDied {
        /// Who.
        name: String,
        /// Why.
        cause: DeathCause,
    },
    /// A resting member reached full energy.
    MemberRested {
        /// Who.
        name: String,
    },
    /// A member started an action.
    ActionPerformed {
        /// Who.
        name: String,
        /// What.
        action: ActionKind,
        /// Resource brought back, for gathering actions.
        gained: Option<(Resource, u32)>,
    },
    /// A crop was planted.
    CropPlanted {
        /// What.
        crop: CropType,
        /// Grid row.
        row: usize,
        /// Grid column.
        col: usize,
    },
    /// Dry plots were watered.
    CropsWatered {
        /// Plots watered.
        plots: usize,
    },
    /// A ripe crop was harvested.
    CropHarvested {
        /// What.
        crop: CropType,
        /// Food credited.
        food: u32,
    },
    /// The well was emptied into the stockpile.
    WellCollected {
        /// Water moved.
        water: Decimal,
    },
    /// A mature tree was felled.
    TreeHarvested {
        /// Tree slot.
        index: usize,
        /// Wood credited.
        wood: u32,
    },
    /// An animal was shot.
    AnimalShot {
        /// What.
        animal: AnimalKind,
        /// Food credited.
        food: u32,
    },
    /// An upgrade was bought.
    UpgradePurchased {
        /// Which.
        upgrade: UpgradeId,
        /// Display name.
        name: String,
    },
    /// A rescue party left the watchtower.
    RescueStarted {
        /// Mission difficulty.
        difficulty: RescueDifficulty,
        /// Hours until it returns.
        hours: u64,
    },
    /// A rescue party came back with supplies.
    RescueSucceeded {
        /// Food recovered.
        food: u32,
        /// Water recovered.
        water: u32,
        /// Wood recovered.
        wood: u32,
        /// Survivor who joined, if any.
        recruit: Option<String>,
    },
    /// A rescue party came back empty-handed.
    RescueFailed {
        /// Member hurt during the attempt, if any.
        injured: Option<String>,
    },
    /// An achievement was unlocked.
    AchievementUnlocked {
        /// Which.
        achievement: AchievementId,
    },
    /// A command was refused.
    CommandRejected {
        /// Why.
        reason: String,
    },
    /// The last member died.
    GameOver {
        /// Day the run ended.
        day: u32,
        /// Hour the run ended.
        hour: u32,
    },
}

impl GameEvent {
    /// Severity tag used in the game log.
    pub fn level(&self) -> LogLevel {
        match self {
            Self::GameStarted { .. }
            | Self::NewDay { .. }
            | Self::MemberRested { .. }
            | Self::ActionPerformed { .. }
            | Self::CropsWatered { .. }
            | Self::RescueStarted { .. } => LogLevel::Info,
            Self::RandomEvent { category, .. } => LogLevel::from(*category),
            Self::Whisper { .. } => LogLevel::Whisper,
            Self::CropPlanted { .. }
            | Self::CropHarvested { .. }
            | Self::WellCollected { .. }
            | Self::TreeHarvested { .. }
            | Self::AnimalShot { .. }
            | Self::UpgradePurchased { .. }
            | Self::RescueSucceeded { .. }
            | Self::AchievementUnlocked { .. } => LogLevel::Success,
            Self::MemberDied { .. }
            | Self::RescueFailed { .. }
            | Self::CommandRejected { .. }
            | Self::GameOver { .. } => LogLevel::Error,
        }
    }

    /// Human-readable log line.
    pub fn message(&self) -> String {
        match self {
            Self::GameStarted {
                difficulty,
                party_size,
            } => format!("A {difficulty:?} game begins with {party_size} survivor(s)."),
            Self::NewDay { day } => format!("Day {day} begins."),
            Self::RandomEvent {
                name, description, ..
            } => format!("Random Event: {name}. {description}"),
            Self::Whisper { text } => format!("The Whispers: \"{text}\""),
            Self::MemberDied { name, cause } => format!("{name} has died of {cause}."),
            Self::MemberRested { name } => format!("{name} is fully rested."),
            Self::ActionPerformed {
                name,
                action,
                gained,
            } => match gained {
                Some((resource, amount)) => {
                    format!("{name} is {} (+{amount} {}).", action.label(), resource.label())
                }
                None => format!("{name} is {}.", action.label()),
            },
            Self::CropPlanted { crop, row, col } => {
                format!("Planted {} at ({row}, {col}).", crop.label())
            }
            Self::CropsWatered { plots } => format!("Watered {plots} plot(s)."),
            Self::CropHarvested { crop, food } => {
                format!("Harvested {}: +{food} food.", crop.label())
            }
            Self::WellCollected { water } => format!("Collected {water} water from the well."),
            Self::TreeHarvested { index, wood } => format!("Felled tree {index}: +{wood} wood."),
            Self::AnimalShot { animal, food } => {
                format!("Shot a {}! Gained {food} food.", animal.label())
            }
            Self::UpgradePurchased { name, .. } => format!("Built the {name}."),
            Self::RescueStarted { difficulty, hours } => {
                format!("A {difficulty:?} rescue mission has set out. It will take {hours} hours.")
            }
            Self::RescueSucceeded {
                food,
                water,
                wood,
                recruit,
            } => match recruit {
                Some(name) => format!(
                    "Rescue mission successful! {name} has joined the party, bringing {food} food, {water} water and {wood} wood."
                ),
                None => format!(
                    "Rescue mission successful! No survivors found, but the team recovered {food} food, {water} water and {wood} wood."
                ),
            },
            Self::RescueFailed { injured } => match injured {
                Some(name) => format!("Rescue mission failed. {name} was injured during the attempt."),
                None => "Rescue mission failed. The team returned empty-handed.".to_owned(),
            },
            Self::AchievementUnlocked { achievement } => {
                format!("Achievement Unlocked: {}!", achievement.name())
            }
            Self::CommandRejected { reason } => reason.clone(),
            Self::GameOver { day, hour } => {
                format!("The last survivor has fallen on day {day} at hour {hour}. Game over.")
            }
        }
    }
}

/// Default number of entries kept.
pub const DEFAULT_LOG_CAPACITY: usize = 100;

/// The newest-last in-game log, capped at a fixed number of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for GameLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl GameLog {
    /// An empty log holding at most `capacity` entries (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, dropping the oldest when full.
    pub fn push(&mut self, entry: LogEntry) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Render `event` at `day`/`hour` and append it.
    pub fn record(&mut self, day: u32, hour: u32, event: &GameEvent) {
        self.push(LogEntry {
            day,
            hour,
            level: event.level(),
            message: event.message(),
        });
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
