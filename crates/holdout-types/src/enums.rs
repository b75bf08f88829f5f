//! Enumeration types for the Holdout simulation.
//!
//! Closed sets used across the workspace: resources, difficulty levels,
//! survivor actions, crops, game animals, upgrades, event categories and
//! the phase of a run. Balancing tables keyed by these enums live in the
//! crates that own the mechanics, not here.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A stockpiled resource tracked by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Resource {
    /// Edible supplies. Eating consumes it.
    Food,
    /// Drinkable water. Drinking, planting and watering consume it.
    Water,
    /// Timber. Only spent on upgrades.
    Wood,
}

impl Resource {
    /// Every resource, in ledger order.
    pub const ALL: [Self; 3] = [Self::Food, Self::Water, Self::Wood];

    /// Lower-case display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Water => "water",
            Self::Wood => "wood",
        }
    }
}

// ---------------------------------------------------------------------------
// Run setup
// ---------------------------------------------------------------------------

/// Difficulty chosen when a game starts.
///
/// Determines the initial party size and starting stockpile.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Difficulty {
    /// One survivor, generous supplies.
    Easy,
    /// Three survivors, modest supplies.
    #[default]
    Medium,
    /// Five mouths to feed and nothing in store.
    Hard,
}

/// Lifecycle phase of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GamePhase {
    /// No game has been started since the last reset.
    #[default]
    NotStarted,
    /// Ticks are being processed.
    Running,
    /// The whole party has died. Terminal until reset.
    GameOver,
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// A timed action a survivor can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ActionKind {
    /// Forage for food.
    GatherFood,
    /// Fetch water from a stream.
    CollectWater,
    /// Chop firewood and timber.
    ChopWood,
    /// Eat a ration from the stockpile.
    Eat,
    /// Drink from the stockpile.
    Drink,
    /// Rest until fully recovered.
    Sleep,
}

impl ActionKind {
    /// Every action kind.
    pub const ALL: [Self; 6] = [
        Self::GatherFood,
        Self::CollectWater,
        Self::ChopWood,
        Self::Eat,
        Self::Drink,
        Self::Sleep,
    ];

    /// Human-readable verb phrase used in log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::GatherFood => "gathering food",
            Self::CollectWater => "collecting water",
            Self::ChopWood => "chopping wood",
            Self::Eat => "eating",
            Self::Drink => "drinking",
            Self::Sleep => "sleeping",
        }
    }
}

// ---------------------------------------------------------------------------
// Production
// ---------------------------------------------------------------------------

/// A crop that can be planted on the farming grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CropType {
    /// Fast, small yield.
    Wheat,
    /// Two days to ripen.
    Carrot,
    /// Slowest crop, largest yield.
    Bean,
}

impl CropType {
    /// Every crop type.
    pub const ALL: [Self; 3] = [Self::Wheat, Self::Carrot, Self::Bean];

    /// Lower-case display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wheat => "wheat",
            Self::Carrot => "carrot",
            Self::Bean => "bean",
        }
    }
}

/// Game that can appear on the hunting ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AnimalKind {
    /// Rabbit.
    Rabbit,
    /// Bird.
    Bird,
    /// Rat.
    Rat,
    /// Snail.
    Snail,
    /// Squirrel.
    Squirrel,
    /// Turtle.
    Turtle,
}

impl AnimalKind {
    /// Every animal kind.
    pub const ALL: [Self; 6] = [
        Self::Rabbit,
        Self::Bird,
        Self::Rat,
        Self::Snail,
        Self::Squirrel,
        Self::Turtle,
    ];

    /// Lower-case display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rabbit => "rabbit",
            Self::Bird => "bird",
            Self::Rat => "rat",
            Self::Snail => "snail",
            Self::Squirrel => "squirrel",
            Self::Turtle => "turtle",
        }
    }
}

/// A purchasable upgrade that unlocks a module or modifies the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum UpgradeId {
    /// Unlocks the farming grid.
    Farming,
    /// Unlocks the passively filling well.
    Well,
    /// Larger, faster harvests.
    AdvancedFarming,
    /// Cheaper water for every activity.
    WaterPurification,
    /// More resources per gathering action.
    ToolWorkshop,
    /// Passive healing and illness protection.
    MedicalTent,
    /// Unlocks the hunting ground.
    HuntingLodge,
    /// Unlocks the tree pool and passive wood.
    LumberMill,
    /// Unlocks rescue missions.
    Watchtower,
}

impl UpgradeId {
    /// Every upgrade, in catalog order.
    pub const ALL: [Self; 9] = [
        Self::Farming,
        Self::Well,
        Self::AdvancedFarming,
        Self::WaterPurification,
        Self::ToolWorkshop,
        Self::MedicalTent,
        Self::HuntingLodge,
        Self::LumberMill,
        Self::Watchtower,
    ];
}

/// Difficulty of a watchtower rescue mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RescueDifficulty {
    /// One day, low risk.
    Easy,
    /// Two days, moderate risk.
    Medium,
    /// Three days, coin flip.
    Hard,
}

// ---------------------------------------------------------------------------
// Events and outcomes
// ---------------------------------------------------------------------------

/// Category of a mechanical random event, used for weighted selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EventCategory {
    /// Good news.
    Positive,
    /// Strange but balanced.
    Neutral,
    /// Bad news.
    Negative,
}

/// Why a survivor died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum DeathCause {
    /// Hunger reached its maximum.
    Starvation,
    /// Thirst reached its maximum.
    Dehydration,
    /// Energy ran out.
    Exhaustion,
    /// Health was lost to an event with vitals otherwise in range.
    Injury,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Starvation => write!(f, "starvation"),
            Self::Dehydration => write!(f, "dehydration"),
            Self::Exhaustion => write!(f, "exhaustion"),
            Self::Injury => write!(f, "injuries"),
        }
    }
}

/// Severity tag of a game log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum LogLevel {
    /// Routine information.
    Info,
    /// Something went well.
    Success,
    /// A rejected command or a loss.
    Error,
    /// A beneficial random event.
    Positive,
    /// A neutral random event.
    Neutral,
    /// A harmful random event.
    Negative,
    /// Flavor text with no mechanical effect.
    Whisper,
}

impl From<EventCategory> for LogLevel {
    fn from(category: EventCategory) -> Self {
        match category {
            EventCategory::Positive => Self::Positive,
            EventCategory::Neutral => Self::Neutral,
            EventCategory::Negative => Self::Negative,
        }
    }
}
