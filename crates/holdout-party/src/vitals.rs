//! Vital mechanics applied to survivors each tick.
//!
//! Passive drift depends on what the member is doing:
//!
//! - Idle (or a busy deadline already reached): hunger and thirst rise,
//!   energy drains, each scaled by the member's traits
//! - Resting: energy recovers quickly, hunger and thirst drift at a fraction
//!   of the normal rate
//! - Busy: no passive drift; the action paid its own cost up front
//!
//! The health penalty applies regardless of activity. Every vital is clamped
//! right after the step that changed it.

use holdout_types::{Activity, DeathCause, PartyMember, VITAL_MAX};

use crate::config::{ActionConfig, VitalsConfig};
use crate::death::check_death;

/// Result of applying one tick of vital mechanics to a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitalTickResult {
    /// If the member died during this tick, the cause.
    pub death: Option<DeathCause>,
    /// The member was resting and is now at full energy.
    pub rested: bool,
}

/// Apply one tick of vital mechanics to a member.
///
/// `now` is the absolute hour of the tick being processed; it decides
/// whether a [`Activity::BusyUntil`] deadline still suppresses drift.
///
/// # Order of operations
///
/// 1. Apply drift for the current activity
/// 2. Clamp hunger, thirst and energy
/// 3. Apply the health penalty if any vital is at its limit
/// 4. Clamp health
/// 5. Check death
/// 6. Report whether a resting member reached full energy
pub fn apply_vital_tick(
    member: &mut PartyMember,
    activity: Activity,
    now: u64,
    config: &VitalsConfig,
) -> VitalTickResult {
    let traits = member.traits;
    let cap = member.energy_cap();

    // 1-2. Drift and clamp
    match activity {
        Activity::Resting => {
            let fraction = config.rest_drift_fraction;
            member.hunger = clamp_vital(
                member.hunger + config.hunger_per_tick * traits.hunger_rate * fraction,
                VITAL_MAX,
            );
            member.thirst = clamp_vital(
                member.thirst + config.thirst_per_tick * traits.thirst_rate * fraction,
                VITAL_MAX,
            );
            member.energy = clamp_vital(
                member.energy + config.rest_recovery * traits.energy_recovery_rate,
                cap,
            );
        }
        Activity::BusyUntil(until) if until > now => {}
        Activity::Idle | Activity::BusyUntil(_) => {
            member.hunger = clamp_vital(
                member.hunger + config.hunger_per_tick * traits.hunger_rate,
                VITAL_MAX,
            );
            member.thirst = clamp_vital(
                member.thirst + config.thirst_per_tick * traits.thirst_rate,
                VITAL_MAX,
            );
            member.energy = clamp_vital(
                member.energy - config.energy_drain_per_tick * traits.energy_rate,
                cap,
            );
        }
    }

    // 3-4. Health penalty
    if member.hunger >= VITAL_MAX || member.thirst >= VITAL_MAX || member.energy <= 0.0 {
        member.health = clamp_vital(member.health - config.health_penalty, VITAL_MAX);
    }

    // 5. Death
    let death = check_death(member);

    // 6. Rest completion
    let rested = death.is_none() && activity == Activity::Resting && member.is_fully_rested();

    VitalTickResult { death, rested }
}

/// Apply eating effects: less hunger, some health and energy back.
pub fn apply_eat(member: &mut PartyMember, config: &ActionConfig) {
    member.hunger = clamp_vital(member.hunger - config.eat_hunger_relief, VITAL_MAX);
    member.health = clamp_vital(member.health + config.eat_health_gain, VITAL_MAX);
    member.energy = clamp_vital(member.energy + config.eat_energy_gain, member.energy_cap());
}

/// Apply drinking effects: less thirst, some energy back.
pub fn apply_drink(member: &mut PartyMember, config: &ActionConfig) {
    member.thirst = clamp_vital(member.thirst - config.drink_thirst_relief, VITAL_MAX);
    member.energy = clamp_vital(member.energy + config.drink_energy_gain, member.energy_cap());
}

/// Apply the toll of physical work.
///
/// `energy_cost` is subtracted; `hunger_gain` and `thirst_gain` are added.
pub fn apply_exertion(member: &mut PartyMember, energy_cost: f64, hunger_gain: f64, thirst_gain: f64) {
    member.energy = clamp_vital(member.energy - energy_cost, member.energy_cap());
    member.hunger = clamp_vital(member.hunger + hunger_gain, VITAL_MAX);
    member.thirst = clamp_vital(member.thirst + thirst_gain, VITAL_MAX);
}

/// Change health by `delta`, clamped to `[floor, 100]`.
///
/// Events use a non-zero floor when an effect must hurt but never kill.
pub fn adjust_health(member: &mut PartyMember, delta: f64, floor: f64) {
    member.health = (member.health + delta).clamp(floor.clamp(0.0, VITAL_MAX), VITAL_MAX);
}

/// Change energy by `delta`, clamped to `[0, energy_cap]`.
pub fn adjust_energy(member: &mut PartyMember, delta: f64) {
    member.energy = clamp_vital(member.energy + delta, member.energy_cap());
}

/// Clamp a vital to `[0, max]`, treating NaN as 0.
fn clamp_vital(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max.max(0.0))
}

#[cfg(test)]
mod tests {
    use holdout_types::{MemberId, Traits};

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// A member with neutral traits and comfortable vitals.
    fn test_member() -> PartyMember {
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
                max_energy: 100.0,
                energy_recovery_rate: 1.0,
            },
        }
    }

    #[test]
    fn idle_drift_uses_base_rates() {
        let mut m = test_member();
        let result = apply_vital_tick(&mut m, Activity::Idle, 5, &VitalsConfig::default());
        assert_eq!(result.death, None);
        assert!(approx(m.hunger, 1.0));
        assert!(approx(m.thirst, 1.5));
        assert!(approx(m.energy, 49.5));
        assert!(approx(m.health, 100.0));
    }

    #[test]
    fn traits_scale_drift() {
        let mut m = test_member();
        m.traits.hunger_rate = 1.2;
        m.traits.thirst_rate = 0.8;
        m.traits.energy_rate = 1.1;
        let _ = apply_vital_tick(&mut m, Activity::Idle, 5, &VitalsConfig::default());
        assert!(approx(m.hunger, 1.2));
        assert!(approx(m.thirst, 1.2));
        assert!(approx(m.energy, 50.0 - 0.55));
    }

    #[test]
    fn busy_member_has_no_passive_drift() {
        let mut m = test_member();
        let _ = apply_vital_tick(&mut m, Activity::BusyUntil(7), 5, &VitalsConfig::default());
        assert!(approx(m.hunger, 0.0));
        assert!(approx(m.energy, 50.0));
    }

    #[test]
    fn expired_deadline_drifts_like_idle() {
        let mut m = test_member();
        let _ = apply_vital_tick(&mut m, Activity::BusyUntil(5), 5, &VitalsConfig::default());
        assert!(approx(m.hunger, 1.0));
    }

    #[test]
    fn resting_recovers_and_drifts_slowly() {
        let mut m = test_member();
        let result = apply_vital_tick(&mut m, Activity::Resting, 5, &VitalsConfig::default());
        assert!(approx(m.energy, 60.0));
        assert!(approx(m.hunger, 0.2));
        assert!(approx(m.thirst, 0.3));
        assert!(!result.rested);
    }

    #[test]
    fn resting_ends_exactly_at_cap() {
        let mut m = test_member();
        m.traits.max_energy = 85.0;
        m.energy = 80.0;
        let result = apply_vital_tick(&mut m, Activity::Resting, 5, &VitalsConfig::default());
        assert!(approx(m.energy, 85.0));
        assert!(result.rested);
    }

    #[test]
    fn starvation_scenario_kills() {
        let mut m = test_member();
        m.hunger = 99.0;
        m.health = 5.0;
        let result = apply_vital_tick(&mut m, Activity::Idle, 5, &VitalsConfig::default());
        assert!(approx(m.hunger, 100.0));
        assert!(approx(m.health, 0.0));
        assert_eq!(result.death, Some(DeathCause::Starvation));
    }

    #[test]
    fn exhaustion_applies_single_penalty() {
        let mut m = test_member();
        m.energy = 0.2;
        let _ = apply_vital_tick(&mut m, Activity::Idle, 5, &VitalsConfig::default());
        assert!(approx(m.energy, 0.0));
        assert!(approx(m.health, 95.0));
    }

    #[test]
    fn vitals_stay_in_range_over_many_ticks() {
        let mut m = test_member();
        let config = VitalsConfig::default();
        for hour in 0..300 {
            let _ = apply_vital_tick(&mut m, Activity::Idle, hour, &config);
            for v in [m.health, m.hunger, m.thirst, m.energy] {
                assert!((0.0..=100.0).contains(&v));
            }
            assert!(m.energy <= m.energy_cap());
        }
    }

    #[test]
    fn eat_relieves_hunger_and_restores() {
        let mut m = test_member();
        m.hunger = 50.0;
        m.health = 97.0;
        apply_eat(&mut m, &ActionConfig::default());
        assert!(approx(m.hunger, 20.0));
        assert!(approx(m.health, 100.0));
        assert!(approx(m.energy, 70.0));
    }

    #[test]
    fn drink_floors_thirst_at_zero() {
        let mut m = test_member();
        m.thirst = 10.0;
        apply_drink(&mut m, &ActionConfig::default());
        assert!(approx(m.thirst, 0.0));
        assert!(approx(m.energy, 60.0));
    }

    #[test]
    fn adjust_health_respects_floor() {
        let mut m = test_member();
        m.health = 20.0;
        adjust_health(&mut m, -30.0, 1.0);
        assert!(approx(m.health, 1.0));
        adjust_health(&mut m, -30.0, 0.0);
        assert!(approx(m.health, 0.0));
    }
}
