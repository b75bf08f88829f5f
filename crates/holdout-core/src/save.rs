//! Versioned snapshots and the compatibility check used by loaders.
//!
//! A save is the whole [`GameState`] plus a version and a timestamp. Loaders
//! call [`check_compatibility`] first so that a stale or corrupt save is
//! reported as [`SaveError::IncompatibleSave`] and the player can be asked
//! to start over, instead of half-loading a broken state.
//!
//! Loading does not simulate time spent away: the game continues from the
//! saved clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::{GameState, REQUIRED_KEYS};

/// Format version written into every save.
pub const SAVE_VERSION: u32 = 3;

/// Errors that can occur when reading or writing a save.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The text is not valid JSON or does not match the state layout.
    #[error("save JSON error: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The save is from another version or is missing parts of the state.
    #[error("incompatible save: {reason}")]
    IncompatibleSave {
        /// What was wrong with it.
        reason: String,
    },
}

/// A point-in-time copy of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    /// Format version, [`SAVE_VERSION`] when written by this build.
    pub version: u32,
    /// Wall-clock time of the snapshot.
    pub saved_at: DateTime<Utc>,
    /// The game itself.
    pub state: GameState,
}

impl SaveGame {
    /// Snapshot `state` now.
    pub fn capture(state: &GameState) -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at: Utc::now(),
            state: state.clone(),
        }
    }

    /// Serialize as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn incompatible(reason: impl Into<String>) -> SaveError {
    SaveError::IncompatibleSave {
        reason: reason.into(),
    }
}

/// Check that `json` is a save this build can load.
///
/// # Errors
///
/// - [`SaveError::Json`] if the text is not JSON at all
/// - [`SaveError::IncompatibleSave`] if it is not an object, the version
///   differs, or a required state key is missing
pub fn check_compatibility(json: &str) -> Result<(), SaveError> {
    let value: Value = serde_json::from_str(json)?;
    let object = value
        .as_object()
        .ok_or_else(|| incompatible("save is not a JSON object"))?;

    let version = object.get("version").and_then(Value::as_u64);
    if version != Some(u64::from(SAVE_VERSION)) {
        return Err(incompatible(format!(
            "expected version {SAVE_VERSION}, found {}",
            version.map_or_else(|| "none".to_owned(), |v| v.to_string())
        )));
    }

    let state = object
        .get("state")
        .and_then(Value::as_object)
        .ok_or_else(|| incompatible("save has no state object"))?;
    if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !state.contains_key(**key)) {
        return Err(incompatible(format!("state is missing `{missing}`")));
    }
    Ok(())
}

/// Check and then deserialize a save.
///
/// # Errors
///
/// Any error from [`check_compatibility`], or [`SaveError::Json`] if the
/// state does not deserialize.
pub fn load(json: &str) -> Result<SaveGame, SaveError> {
    check_compatibility(json)?;
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use holdout_types::{ActionKind, Activity, CropType, Difficulty, UpgradeId};

    use super::*;
    use crate::config::{GameConfig, StartingConditions};
    use crate::simulation::Simulation;

    fn saved() -> String {
        SaveGame::capture(&GameState::new(&GameConfig::default()))
            .to_json()
            .unwrap()
    }

    #[test]
    fn fresh_save_loads_back() {
        let json = saved();
        check_compatibility(&json).unwrap();
        let save = load(&json).unwrap();
        assert_eq!(save.version, SAVE_VERSION);
        assert_eq!(save.state, GameState::new(&GameConfig::default()));
    }

    #[test]
    fn running_game_loads_back_unchanged() {
        let mut config = GameConfig::default();
        config.world.seed = Some(9);
        config.events.enabled = false;
        config.difficulty.easy = StartingConditions {
            party_size: 2,
            food: 5000,
            water: 5000,
            wood: 5000,
        };
        let mut sim = Simulation::new(config);
        sim.start_game(Difficulty::Easy).unwrap();
        for upgrade in [
            UpgradeId::Farming,
            UpgradeId::Well,
            UpgradeId::HuntingLodge,
            UpgradeId::ToolWorkshop,
            UpgradeId::LumberMill,
        ] {
            sim.buy_upgrade(upgrade).unwrap();
        }
        sim.plant_crop(1, 3, CropType::Carrot).unwrap();
        for _ in 0..3 {
            sim.tick().unwrap();
        }
        let spawn_ms = sim.config().hunting.spawn_interval_ms;
        let _ = sim.advance_hunting(spawn_ms);
        let id = sim.state().party.members().first().unwrap().id;
        sim.perform_action(id, ActionKind::ChopWood).unwrap();

        let state = sim.state();
        assert!(state.hunting.target().is_some());
        assert!(matches!(state.party.activity(id), Some(Activity::BusyUntil(_))));
        assert_eq!(state.farming.occupied_count(), 1);
        assert!(state.lumber_mill.is_active());

        let json = sim.snapshot().to_json().unwrap();
        check_compatibility(&json).unwrap();
        let loaded = load(&json).unwrap();
        assert_eq!(&loaded.state, sim.state());
    }

    #[test]
    fn non_object_is_incompatible() {
        assert!(matches!(
            check_compatibility("[1, 2, 3]"),
            Err(SaveError::IncompatibleSave { .. })
        ));
        assert!(matches!(check_compatibility("not json"), Err(SaveError::Json { .. })));
    }

    #[test]
    fn old_version_is_incompatible() {
        let mut value: Value = serde_json::from_str(&saved()).unwrap();
        value["version"] = Value::from(2);
        let err = check_compatibility(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("expected version 3, found 2"));
    }

    #[test]
    fn missing_state_key_is_incompatible() {
        let mut value: Value = serde_json::from_str(&saved()).unwrap();
        value["state"].as_object_mut().unwrap().remove("watchtower");
        let err = load(&value.to_string()).unwrap_err();
        assert!(matches!(
            &err,
            SaveError::IncompatibleSave { reason } if reason.contains("watchtower")
        ));
    }
}
