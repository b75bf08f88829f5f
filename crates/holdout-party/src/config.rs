//! Configuration and defaults for survivor vitals and actions.
//!
//! [`VitalsConfig`] holds the per-tick drift and penalty rates plus the
//! trait sampling ranges used when a member is created. [`ActionConfig`]
//! holds the costs and effects of the six actions. Both deserialize from
//! the `vitals` and `actions` sections of `holdout-config.yaml`; any
//! missing key keeps its default.

use serde::Deserialize;

/// Configuration for vital mechanics applied each tick.
///
/// Rates are per tick (one in-game hour) before the member's trait
/// multipliers are applied.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    /// Hunger gained per tick (default: 1.0).
    pub hunger_per_tick: f64,

    /// Thirst gained per tick (default: 1.5).
    pub thirst_per_tick: f64,

    /// Energy lost per tick (default: 0.5).
    pub energy_drain_per_tick: f64,

    /// Energy regained per resting tick (default: 10.0).
    pub rest_recovery: f64,

    /// Fraction of normal hunger/thirst drift applied while resting (default: 0.2).
    pub rest_drift_fraction: f64,

    /// Health lost per tick while starving, dehydrated or exhausted (default: 5.0).
    pub health_penalty: f64,

    /// Health regained per tick once a medical tent stands (default: 1.0).
    pub medical_heal_per_tick: f64,

    /// Lower bound for the rate traits (default: 0.8).
    pub trait_rate_min: f64,

    /// Upper bound for the rate traits (default: 1.2).
    pub trait_rate_max: f64,

    /// Lower bound for the `max_energy` trait (default: 80).
    pub max_energy_min: f64,

    /// Upper bound for the `max_energy` trait (default: 120).
    pub max_energy_max: f64,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            hunger_per_tick: 1.0,
            thirst_per_tick: 1.5,
            energy_drain_per_tick: 0.5,
            rest_recovery: 10.0,
            rest_drift_fraction: 0.2,
            health_penalty: 5.0,
            medical_heal_per_tick: 1.0,
            trait_rate_min: 0.8,
            trait_rate_max: 1.2,
            max_energy_min: 80.0,
            max_energy_max: 120.0,
        }
    }
}

/// Costs and effects of survivor actions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Energy spent by a gathering action at the start of a run (default: 10).
    pub gather_energy_cost: f64,

    /// Floor that events can lower the gathering energy cost to (default: 5).
    pub min_gather_energy_cost: f64,

    /// Food consumed by eating (default: 10).
    pub eat_food_cost: u32,

    /// Hunger removed by eating (default: 30).
    pub eat_hunger_relief: f64,

    /// Health restored by eating (default: 5).
    pub eat_health_gain: f64,

    /// Energy restored by eating (default: 20).
    pub eat_energy_gain: f64,

    /// Water consumed by drinking, before purification (default: 5).
    pub drink_water_cost: u32,

    /// Thirst removed by drinking (default: 25).
    pub drink_thirst_relief: f64,

    /// Energy restored by drinking (default: 10).
    pub drink_energy_gain: f64,

    /// Gathering multiplier granted by the tool workshop (default: 1.25).
    pub tool_efficiency: f64,

    /// Extra wood multiplier granted by the lumber mill (default: 1.5).
    pub lumber_mill_wood_bonus: f64,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            gather_energy_cost: 10.0,
            min_gather_energy_cost: 5.0,
            eat_food_cost: 10,
            eat_hunger_relief: 30.0,
            eat_health_gain: 5.0,
            eat_energy_gain: 20.0,
            drink_water_cost: 5,
            drink_thirst_relief: 25.0,
            drink_energy_gain: 10.0,
            tool_efficiency: 1.25,
            lumber_mill_wood_bonus: 1.5,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: VitalsConfig = serde_json::from_str(r#"{"health_penalty": 7.5}"#).unwrap();
        assert!((config.health_penalty - 7.5).abs() < f64::EPSILON);
        assert!((config.thirst_per_tick - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn recovery_outpaces_decay() {
        let config = VitalsConfig::default();
        assert!(config.rest_recovery >= config.energy_drain_per_tick * 10.0);
    }
}
