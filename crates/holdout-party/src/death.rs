//! Death conditions for survivors.
//!
//! A member dies when health reaches 0. The cause is attributed to the
//! first vital found at its limit, in the order hunger, thirst, energy;
//! with all three in range the death is put down to injury (an event or a
//! failed rescue took the last of their health).

use holdout_types::{DeathCause, FallenMember, PartyMember, VITAL_MAX};

/// Check whether a member is dead.
///
/// Returns `Some(cause)` if health is at or below 0, `None` if alive.
/// This only inspects the member, it does not mutate anything.
pub fn check_death(member: &PartyMember) -> Option<DeathCause> {
    if member.health > 0.0 {
        return None;
    }
    if member.hunger >= VITAL_MAX {
        return Some(DeathCause::Starvation);
    }
    if member.thirst >= VITAL_MAX {
        return Some(DeathCause::Dehydration);
    }
    if member.energy <= 0.0 {
        return Some(DeathCause::Exhaustion);
    }
    Some(DeathCause::Injury)
}

/// Build the memorial record for a member who died at `day`/`hour`.
pub fn memorialize(member: &PartyMember, cause: DeathCause, day: u32, hour: u32) -> FallenMember {
    FallenMember {
        id: member.id,
        name: member.name.clone(),
        cause,
        day,
        hour,
    }
}

#[cfg(test)]
mod tests {
    use holdout_types::{MemberId, Traits};

    use super::*;

    fn member() -> PartyMember {
        PartyMember {
            id: MemberId::new(),
            name: String::from("Bob"),
            health: 0.0,
            hunger: 10.0,
            thirst: 10.0,
            energy: 40.0,
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
    fn alive_member_has_no_cause() {
        let mut m = member();
        m.health = 0.5;
        assert_eq!(check_death(&m), None);
    }

    #[test]
    fn starvation_takes_priority() {
        let mut m = member();
        m.hunger = 100.0;
        m.thirst = 100.0;
        assert_eq!(check_death(&m), Some(DeathCause::Starvation));
    }

    #[test]
    fn dehydration_and_exhaustion_are_attributed() {
        let mut m = member();
        m.thirst = 100.0;
        assert_eq!(check_death(&m), Some(DeathCause::Dehydration));

        let mut m = member();
        m.energy = 0.0;
        assert_eq!(check_death(&m), Some(DeathCause::Exhaustion));
    }

    #[test]
    fn in_range_vitals_mean_injury() {
        assert_eq!(check_death(&member()), Some(DeathCause::Injury));
    }

    #[test]
    fn memorial_keeps_name_and_time() {
        let m = member();
        let fallen = memorialize(&m, DeathCause::Injury, 3, 14);
        assert_eq!(fallen.name, "Bob");
        assert_eq!(fallen.id, m.id);
        assert_eq!((fallen.day, fallen.hour), (3, 14));
    }
}
