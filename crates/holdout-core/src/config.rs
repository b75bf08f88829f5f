//! Configuration loading and typed config structures for the Holdout game.
//!
//! The canonical configuration lives in `holdout-config.yaml` at the
//! project root. Every field has a default matching the documented game
//! constants, so a missing file or a partial file is always usable.
//!
//! Environment variables override a few deployment-level values:
//!
//! - `HOLDOUT_SEED` overrides `world.seed`
//! - `HOLDOUT_TICK_INTERVAL_MS` overrides `simulation.tick_interval_ms`
//! - `HOLDOUT_SAVE_PATH` overrides `persistence.save_path`

use std::path::{Path, PathBuf};

use holdout_party::{ActionConfig, VitalsConfig};
use holdout_types::Difficulty;
use holdout_world::{HuntingConfig, LumberMillConfig};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but cannot be used.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending key.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
///
/// Mirrors the structure of `holdout-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameConfig {
    /// Seed, log size, and production module tunables.
    #[serde(default)]
    pub world: WorldConfig,

    /// Passive drift, resting, penalties, trait ranges.
    #[serde(default)]
    pub vitals: VitalsConfig,

    /// Action costs and effects.
    #[serde(default)]
    pub actions: ActionConfig,

    /// Random event schedule and weights.
    #[serde(default)]
    pub events: EventsConfig,

    /// Hunting ground timers and field.
    #[serde(default)]
    pub hunting: HuntingConfig,

    /// Starting party and stockpiles per difficulty.
    #[serde(default)]
    pub difficulty: DifficultyTable,

    /// Runner settings.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Logging output.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Save file location and cadence.
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment overrides are applied after parsing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value fails [`Self::validate`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value fails [`Self::validate`].
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values YAML alone cannot rule out: every rate must be a
    /// finite number and `events.whisper_chance` a probability.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (v, a, h) = (&self.vitals, &self.actions, &self.hunting);
        let finite = [
            ("vitals.hunger_per_tick", v.hunger_per_tick),
            ("vitals.thirst_per_tick", v.thirst_per_tick),
            ("vitals.energy_drain_per_tick", v.energy_drain_per_tick),
            ("vitals.rest_recovery", v.rest_recovery),
            ("vitals.rest_drift_fraction", v.rest_drift_fraction),
            ("vitals.health_penalty", v.health_penalty),
            ("vitals.medical_heal_per_tick", v.medical_heal_per_tick),
            ("vitals.trait_rate_min", v.trait_rate_min),
            ("vitals.trait_rate_max", v.trait_rate_max),
            ("vitals.max_energy_min", v.max_energy_min),
            ("vitals.max_energy_max", v.max_energy_max),
            ("actions.gather_energy_cost", a.gather_energy_cost),
            ("actions.min_gather_energy_cost", a.min_gather_energy_cost),
            ("actions.eat_hunger_relief", a.eat_hunger_relief),
            ("actions.eat_health_gain", a.eat_health_gain),
            ("actions.eat_energy_gain", a.eat_energy_gain),
            ("actions.drink_thirst_relief", a.drink_thirst_relief),
            ("actions.drink_energy_gain", a.drink_energy_gain),
            ("actions.tool_efficiency", a.tool_efficiency),
            ("actions.lumber_mill_wood_bonus", a.lumber_mill_wood_bonus),
            ("hunting.field_size", h.field_size),
            ("hunting.move_step", h.move_step),
            ("events.whisper_chance", self.events.whisper_chance),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be a finite number",
                });
            }
        }
        if !(0.0..=1.0).contains(&self.events.whisper_chance) {
            return Err(ConfigError::Invalid {
                field: "events.whisper_chance",
                reason: "must be between 0 and 1",
            });
        }
        Ok(())
    }

    /// Override deployment values with environment variables when set.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(seed) = std::env::var("HOLDOUT_SEED")
            .ok()
            .and_then(|v| v.trim().parse().ok())
        {
            self.world.seed = Some(seed);
        }
        if let Some(ms) = std::env::var("HOLDOUT_TICK_INTERVAL_MS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
        {
            self.simulation.tick_interval_ms = ms;
        }
        if let Ok(path) = std::env::var("HOLDOUT_SAVE_PATH") {
            self.persistence.save_path = PathBuf::from(path);
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Random seed. `None` seeds from the operating system.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Entries kept in the in-game log.
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,

    /// Water the well can hold.
    #[serde(default = "default_well_capacity")]
    pub well_capacity: u32,

    /// Water the well gains per tick.
    #[serde(default = "default_well_fill_rate")]
    pub well_fill_rate: u32,

    /// Tree pool tunables.
    #[serde(default)]
    pub lumber_mill: LumberMillConfig,

    /// Mark every planted plot dry at the start of each day. Off by
    /// default: a plot stays watered from planting until harvest.
    #[serde(default)]
    pub daily_dry_out: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_capacity: default_log_capacity(),
            well_capacity: default_well_capacity(),
            well_fill_rate: default_well_fill_rate(),
            lumber_mill: LumberMillConfig::default(),
            daily_dry_out: false,
        }
    }
}

/// Random event configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventsConfig {
    /// Master switch. Disabled events make vitals fully deterministic.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Probability that the daily event is a whisper.
    #[serde(default = "default_whisper_chance")]
    pub whisper_chance: f64,

    /// Relative weight of positive events.
    #[serde(default = "default_positive_weight")]
    pub positive_weight: u32,

    /// Relative weight of neutral events.
    #[serde(default = "default_neutral_weight")]
    pub neutral_weight: u32,

    /// Relative weight of negative events.
    #[serde(default = "default_negative_weight")]
    pub negative_weight: u32,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            whisper_chance: default_whisper_chance(),
            positive_weight: default_positive_weight(),
            neutral_weight: default_neutral_weight(),
            negative_weight: default_negative_weight(),
        }
    }
}

/// Party size and starting stockpiles for one difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StartingConditions {
    /// Members recruited at the start.
    pub party_size: u32,
    /// Starting food.
    pub food: u32,
    /// Starting water.
    pub water: u32,
    /// Starting wood.
    pub wood: u32,
}

/// Starting conditions for every difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DifficultyTable {
    /// One survivor, comfortable stockpiles.
    #[serde(default = "default_easy")]
    pub easy: StartingConditions,
    /// Three survivors, modest stockpiles.
    #[serde(default = "default_medium")]
    pub medium: StartingConditions,
    /// Five survivors, nothing in store.
    #[serde(default = "default_hard")]
    pub hard: StartingConditions,
}

impl DifficultyTable {
    /// Starting conditions for `difficulty`.
    pub const fn for_level(&self, difficulty: Difficulty) -> StartingConditions {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: default_easy(),
            medium: default_medium(),
            hard: default_hard(),
        }
    }
}

/// Runner configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Difficulty used when the engine starts a new game.
    #[serde(default)]
    pub difficulty: Difficulty,

    /// Real-time milliseconds per in-game hour.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop after this many ticks (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: 0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Save file configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistenceConfig {
    /// Where snapshots are written and resumed from.
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,

    /// Write a snapshot every N ticks (0 = only at shutdown).
    #[serde(default = "default_snapshot_interval_ticks")]
    pub snapshot_interval_ticks: u64,

    /// Resume from `save_path` when it holds a compatible save.
    #[serde(default = "default_true")]
    pub resume: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            snapshot_interval_ticks: default_snapshot_interval_ticks(),
            resume: default_true(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_log_capacity() -> usize {
    100
}

const fn default_well_capacity() -> u32 {
    holdout_world::well::WELL_CAPACITY
}

const fn default_well_fill_rate() -> u32 {
    holdout_world::well::WELL_FILL_RATE
}

const fn default_whisper_chance() -> f64 {
    0.25
}

const fn default_positive_weight() -> u32 {
    60
}

const fn default_neutral_weight() -> u32 {
    20
}

const fn default_negative_weight() -> u32 {
    20
}

const fn default_easy() -> StartingConditions {
    StartingConditions {
        party_size: 1,
        food: 50,
        water: 50,
        wood: 50,
    }
}

const fn default_medium() -> StartingConditions {
    StartingConditions {
        party_size: 3,
        food: 25,
        water: 25,
        wood: 25,
    }
}

const fn default_hard() -> StartingConditions {
    StartingConditions {
        party_size: 5,
        food: 0,
        water: 0,
        wood: 0,
    }
}

const fn default_tick_interval_ms() -> u64 {
    1_000
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_save_path() -> PathBuf {
    PathBuf::from("holdout-save.json")
}

const fn default_snapshot_interval_ticks() -> u64 {
    24
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let config = GameConfig::default();
        assert_eq!(config.world.seed, None);
        assert_eq!(config.world.log_capacity, 100);
        assert_eq!(config.world.well_capacity, 100);
        assert!(config.events.enabled);
        assert_eq!(config.events.positive_weight, 60);
        assert_eq!(config.difficulty.for_level(Difficulty::Medium).party_size, 3);
        assert_eq!(config.difficulty.for_level(Difficulty::Hard).food, 0);
        assert_eq!(config.simulation.tick_interval_ms, 1_000);
        assert_eq!(config.hunting.escape_after_ms, 4_000);
    }

    #[test]
    fn parse_partial_yaml() {
        let yaml = r"
world:
  seed: 7
  lumber_mill:
    max_trees: 3
events:
  enabled: false
vitals:
  health_penalty: 2.5
difficulty:
  easy:
    party_size: 2
    food: 10
    water: 10
    wood: 0
simulation:
  difficulty: hard
  max_ticks: 48
logging:
  json: true
";
        let config = GameConfig::parse(yaml).unwrap();
        assert_eq!(config.world.seed, Some(7));
        assert_eq!(config.world.lumber_mill.max_trees, 3);
        assert_eq!(config.world.lumber_mill.base_growth_time, 24);
        assert!(!config.events.enabled);
        assert!((config.vitals.health_penalty - 2.5).abs() < f64::EPSILON);
        assert!((config.vitals.hunger_per_tick - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.difficulty.easy.party_size, 2);
        assert_eq!(config.difficulty.medium.party_size, 3);
        assert_eq!(config.simulation.difficulty, Difficulty::Hard);
        assert_eq!(config.simulation.max_ticks, 48);
        assert_eq!(config.simulation.tick_interval_ms, 1_000);
        assert!(config.logging.json);
    }

    #[test]
    fn rejects_malformed_yaml() {
        let result = GameConfig::parse("world: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn defaults_pass_validation() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_finite_numbers() {
        let nan = GameConfig::parse("events:\n  whisper_chance: .nan\n");
        assert!(matches!(
            nan,
            Err(ConfigError::Invalid {
                field: "events.whisper_chance",
                ..
            })
        ));
        let inf = GameConfig::parse("hunting:\n  move_step: .inf\n");
        assert!(matches!(
            inf,
            Err(ConfigError::Invalid {
                field: "hunting.move_step",
                ..
            })
        ));
        let mut config = GameConfig::default();
        config.vitals.trait_rate_max = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_whisper_chance_outside_zero_to_one() {
        let result = GameConfig::parse("events:\n  whisper_chance: 1.5\n");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                reason: "must be between 0 and 1",
                ..
            })
        ));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("holdout-config.yaml");
        if path.exists() {
            let config = GameConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
