//! Survivor creation: trait sampling and name assignment.
//!
//! Names are drawn without replacement from a fixed pool. The set of used
//! names is owned by the roster and includes the dead, so a name is never
//! reused within a run.

use std::collections::BTreeSet;

use holdout_types::{MemberId, PartyMember, Traits, VITAL_MAX};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::VitalsConfig;
use crate::error::PartyError;

/// The pool survivor names are drawn from.
pub const NAMES: [&str; 55] = [
    "Alice", "Bob", "Charlie", "David", "Eva", "Frank", "Grace", "Henry", "Ivy", "Jack", "Kate",
    "Liam", "Mia", "Noah", "Olivia", "Penny", "Quinn", "Ryan", "Sophia", "Thomas", "Uma",
    "Victor", "Wendy", "Xavier", "Yara", "Zack", "Abby", "Ben", "Chloe", "Dylan", "Emma", "Finn",
    "Gina", "Hugo", "Isla", "Adam", "Bella", "Caleb", "Daisy", "Ethan", "Fiona", "George",
    "Hannah", "Isaac", "Julia", "Kyle", "Luna", "Max", "Nora", "Oscar", "Poppy", "Quentin",
    "Rose", "Sam", "Tessa",
];

/// Pick a random name that is not in `used`.
///
/// # Errors
///
/// Returns [`PartyError::NoNamesLeft`] when the pool is exhausted.
pub fn pick_name<R: Rng>(used: &BTreeSet<String>, rng: &mut R) -> Result<String, PartyError> {
    let free: Vec<&str> = NAMES
        .iter()
        .copied()
        .filter(|name| !used.contains(*name))
        .collect();
    free.choose(rng)
        .map(|name| (*name).to_owned())
        .ok_or(PartyError::NoNamesLeft)
}

/// Sample a fresh set of traits from the configured ranges.
pub fn sample_traits<R: Rng>(config: &VitalsConfig, rng: &mut R) -> Traits {
    let rate_min = config.trait_rate_min;
    let rate_max = config.trait_rate_max;
    Traits {
        hunger_rate: sample_between(rng, rate_min, rate_max),
        thirst_rate: sample_between(rng, rate_min, rate_max),
        energy_rate: sample_between(rng, rate_min, rate_max),
        max_energy: sample_between(rng, config.max_energy_min, config.max_energy_max).round(),
        energy_recovery_rate: sample_between(rng, rate_min, rate_max),
    }
}

/// Create a new member with full health, no hunger or thirst, and energy
/// at their cap.
pub fn create_member<R: Rng>(name: String, config: &VitalsConfig, rng: &mut R) -> PartyMember {
    let traits = sample_traits(config, rng);
    let mut member = PartyMember {
        id: MemberId::from_random_bits(rng.random()),
        name,
        health: VITAL_MAX,
        hunger: 0.0,
        thirst: 0.0,
        energy: 0.0,
        traits,
    };
    member.energy = member.energy_cap();
    member
}

/// Uniform sample in `[lo, hi]`, tolerant of reversed or equal bounds.
/// Non-finite bounds fall back to whichever bound is finite, else 1.0.
fn sample_between<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    match (lo.is_finite(), hi.is_finite()) {
        (true, true) => {
            let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
            if hi > lo { rng.random_range(lo..=hi) } else { lo }
        }
        (true, false) => lo,
        (false, true) => hi,
        (false, false) => 1.0,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn traits_fall_inside_configured_ranges() {
        let config = VitalsConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let t = sample_traits(&config, &mut rng);
            for rate in [t.hunger_rate, t.thirst_rate, t.energy_rate, t.energy_recovery_rate] {
                assert!((0.8..=1.2).contains(&rate));
            }
            assert!((80.0..=120.0).contains(&t.max_energy));
            assert!((t.max_energy - t.max_energy.round()).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn degenerate_ranges_do_not_panic() {
        let config = VitalsConfig {
            trait_rate_min: 1.0,
            trait_rate_max: 1.0,
            max_energy_min: 120.0,
            max_energy_max: 90.0,
            ..VitalsConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let t = sample_traits(&config, &mut rng);
        assert!((t.hunger_rate - 1.0).abs() < f64::EPSILON);
        assert!((90.0..=120.0).contains(&t.max_energy));
    }

    #[test]
    fn non_finite_ranges_do_not_panic() {
        let config = VitalsConfig {
            trait_rate_min: f64::NAN,
            trait_rate_max: 1.1,
            max_energy_min: f64::INFINITY,
            max_energy_max: f64::NAN,
            ..VitalsConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(2);
        let t = sample_traits(&config, &mut rng);
        assert!((t.hunger_rate - 1.1).abs() < f64::EPSILON);
        assert!((t.max_energy - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_member_starts_fresh() {
        let mut rng = StdRng::seed_from_u64(3);
        let m = create_member(String::from("Ivy"), &VitalsConfig::default(), &mut rng);
        assert!((m.health - 100.0).abs() < f64::EPSILON);
        assert!(m.hunger.abs() < f64::EPSILON);
        assert!(m.is_fully_rested());
        assert!(m.energy <= 100.0);
    }

    #[test]
    fn seeded_members_are_identical() {
        let config = VitalsConfig::default();
        let first = create_member(String::from("Ivy"), &config, &mut StdRng::seed_from_u64(42));
        let second = create_member(String::from("Ivy"), &config, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
        let other = create_member(String::from("Ivy"), &config, &mut StdRng::seed_from_u64(43));
        assert_ne!(first.id, other.id);
    }

    #[test]
    fn names_are_never_repeated() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut used = BTreeSet::new();
        for _ in 0..NAMES.len() {
            let name = pick_name(&used, &mut rng).unwrap();
            assert!(used.insert(name));
        }
        assert_eq!(pick_name(&used, &mut rng), Err(PartyError::NoNamesLeft));
    }
}
