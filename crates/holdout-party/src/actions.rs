//! The survivor action table.
//!
//! Each [`ActionKind`] has a fixed class, duration and exertion profile.
//! Gathering yields grow with the day count so that later days feed a
//! hungrier, more demanding camp.
//!
//! | kind          | duration | class   | hunger | thirst |
//! |---------------|----------|---------|--------|--------|
//! | gather food   | 2h       | gather  | +1     | +3     |
//! | collect water | 1h       | gather  | +3     | +1     |
//! | chop wood     | 3h       | gather  | +4     | +4     |
//! | eat           | 1h       | consume |        |        |
//! | drink         | 1h       | consume |        |        |
//! | sleep         | rest     | rest    |        |        |

use holdout_types::{ActionKind, Resource};
use rand::Rng;

/// Broad behavior class of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionClass {
    /// Produces the given resource and costs gathering energy.
    Gather(Resource),
    /// Consumes supplies and restores the member.
    Consume,
    /// Puts the member to sleep until rested.
    Rest,
}

/// Hunger and thirst added by doing physical work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exertion {
    /// Hunger gained.
    pub hunger: f64,
    /// Thirst gained.
    pub thirst: f64,
}

/// Classify an action.
pub const fn class_of(kind: ActionKind) -> ActionClass {
    match kind {
        ActionKind::GatherFood => ActionClass::Gather(Resource::Food),
        ActionKind::CollectWater => ActionClass::Gather(Resource::Water),
        ActionKind::ChopWood => ActionClass::Gather(Resource::Wood),
        ActionKind::Eat | ActionKind::Drink => ActionClass::Consume,
        ActionKind::Sleep => ActionClass::Rest,
    }
}

/// How many hours the action keeps a member busy.
///
/// `None` for sleep, which lasts until the member is rested.
pub const fn duration_hours(kind: ActionKind) -> Option<u64> {
    match kind {
        ActionKind::GatherFood => Some(2),
        ActionKind::CollectWater | ActionKind::Eat | ActionKind::Drink => Some(1),
        ActionKind::ChopWood => Some(3),
        ActionKind::Sleep => None,
    }
}

/// Whether the action may be started with zero energy.
pub const fn is_always_allowed(kind: ActionKind) -> bool {
    matches!(kind, ActionKind::Eat | ActionKind::Drink | ActionKind::Sleep)
}

/// Hunger and thirst cost of an action.
pub const fn exertion(kind: ActionKind) -> Exertion {
    match kind {
        ActionKind::GatherFood => Exertion { hunger: 1.0, thirst: 3.0 },
        ActionKind::CollectWater => Exertion { hunger: 3.0, thirst: 1.0 },
        ActionKind::ChopWood => Exertion { hunger: 4.0, thirst: 4.0 },
        ActionKind::Eat | ActionKind::Drink | ActionKind::Sleep => Exertion { hunger: 0.0, thirst: 0.0 },
    }
}

/// Inclusive yield range of one gathering action on `day`.
///
/// `efficiency` multiplies both bounds before flooring.
pub fn gather_range(resource: Resource, day: u32, efficiency: f64) -> (u32, u32) {
    let (min_base, max_base) = match resource {
        Resource::Food => (3.0, 8.0),
        Resource::Water => (2.0, 6.0),
        Resource::Wood => (1.0, 2.0),
    };
    let day = f64::from(day);
    let min = floor_to_u32((min_base + day / 10.0) * efficiency);
    let max = floor_to_u32((max_base + day / 5.0) * efficiency);
    (min, max.max(min))
}

/// Roll the amount gathered by one action.
pub fn roll_gather<R: Rng>(resource: Resource, day: u32, efficiency: f64, rng: &mut R) -> u32 {
    let (min, max) = gather_range(resource, day, efficiency);
    rng.random_range(min..=max)
}

/// Floor a non-negative float into a `u32`, saturating at the bounds.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn floor_to_u32(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.floor().clamp(0.0, f64::from(u32::MAX)) as u32
}
