//! Core entity structs shared between the engine and its consumers.
//!
//! These are plain data. Vitals mechanics live in `holdout-party`; the
//! structs here only carry the values and a few read-only helpers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{DeathCause, LogLevel};
use crate::ids::MemberId;

/// Upper bound of every vital (health, hunger, thirst, energy).
pub const VITAL_MAX: f64 = 100.0;

/// Per-survivor multipliers, sampled once at creation.
///
/// Traits never change after a member is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Traits {
    /// Multiplier on passive hunger gain.
    pub hunger_rate: f64,
    /// Multiplier on passive thirst gain.
    pub thirst_rate: f64,
    /// Multiplier on passive energy drain.
    pub energy_rate: f64,
    /// Personal energy ceiling, before the global vital cap.
    pub max_energy: f64,
    /// Multiplier on energy regained per resting tick.
    pub energy_recovery_rate: f64,
}

/// A living survivor.
///
/// `hunger` and `thirst` count up: 100 means starving or dehydrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PartyMember {
    /// Stable identifier.
    pub id: MemberId,
    /// Display name, unique within a run.
    pub name: String,
    /// Health in `[0, 100]`. Zero is death.
    pub health: f64,
    /// Hunger in `[0, 100]`.
    pub hunger: f64,
    /// Thirst in `[0, 100]`.
    pub thirst: f64,
    /// Energy in `[0, energy_cap]`.
    pub energy: f64,
    /// Immutable multipliers.
    pub traits: Traits,
}

impl PartyMember {
    /// The highest energy this member can hold.
    ///
    /// A personal `max_energy` above the global vital cap is clipped to it.
    pub fn energy_cap(&self) -> f64 {
        self.traits.max_energy.min(VITAL_MAX)
    }

    /// Whether energy has reached the member's cap.
    pub fn is_fully_rested(&self) -> bool {
        self.energy >= self.energy_cap()
    }
}

/// What a member is doing right now.
///
/// A dead member has no activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Activity {
    /// Free to start an action.
    #[default]
    Idle,
    /// Sleeping until energy is full. Not a timestamp.
    Resting,
    /// Committed to an action until the given absolute hour.
    BusyUntil(u64),
}

impl Activity {
    /// Whether the member is unavailable at absolute hour `now`.
    ///
    /// `BusyUntil(t)` stops blocking once `now >= t`.
    pub const fn blocks_at(self, now: u64) -> bool {
        match self {
            Self::Idle => false,
            Self::Resting => true,
            Self::BusyUntil(until) => until > now,
        }
    }
}

/// A survivor who died during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FallenMember {
    /// The member's identifier while alive.
    pub id: MemberId,
    /// The member's name.
    pub name: String,
    /// What killed them.
    pub cause: DeathCause,
    /// Day of death.
    pub day: u32,
    /// Hour of death.
    pub hour: u32,
}

/// One line of the in-game log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LogEntry {
    /// Day the entry was written.
    pub day: u32,
    /// Hour the entry was written.
    pub hour: u32,
    /// Severity tag.
    pub level: LogLevel,
    /// Rendered message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(max_energy: f64) -> PartyMember {
        PartyMember {
            id: MemberId::new(),
            name: String::from("Alice"),
            health: 100.0,
            hunger: 0.0,
            thirst: 0.0,
            energy: 50.0,
            traits: Traits {
                hunger_rate: 1.0,
                thirst_rate: 1.0,
                energy_rate: 1.0,
                max_energy,
                energy_recovery_rate: 1.0,
            },
        }
    }

    #[test]
    fn energy_cap_never_exceeds_vital_max() {
        assert!((member(120.0).energy_cap() - VITAL_MAX).abs() < f64::EPSILON);
        assert!((member(85.0).energy_cap() - 85.0).abs() < f64::EPSILON);
    }

    #[test]
    fn busy_until_blocks_strictly_before_deadline() {
        let busy = Activity::BusyUntil(10);
        assert!(busy.blocks_at(9));
        assert!(!busy.blocks_at(10));
        assert!(Activity::Resting.blocks_at(u64::MAX));
        assert!(!Activity::Idle.blocks_at(0));
    }
}
