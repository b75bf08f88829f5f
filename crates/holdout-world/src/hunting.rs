//! The hunting ground: one roaming target on its own millisecond clock.
//!
//! The hunting ground is advanced by a sub-interval that runs faster than
//! the hour tick. A target spawns when the field has been empty for the
//! spawn interval, wanders every move interval, and escapes once it has
//! been on the field for the escape window. Shooting it credits its food
//! and sends the next animal out at once.

use holdout_types::{AnimalKind, Resource, UpgradeId};
use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::WorldError;
use crate::ledger::ResourceLedger;

/// Tunables for the hunting ground.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HuntingConfig {
    /// Empty-field time before a new target appears.
    pub spawn_interval_ms: u64,
    /// Cadence of target movement. Also the runner's sub-interval.
    pub move_interval_ms: u64,
    /// Time a target stays before escaping.
    pub escape_after_ms: u64,
    /// Side length of the square field.
    pub field_size: f64,
    /// Largest displacement per move on each axis.
    pub move_step: f64,
}

impl Default for HuntingConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 5000,
            move_interval_ms: 500,
            escape_after_ms: 4000,
            field_size: 100.0,
            move_step: 10.0,
        }
    }
}

/// Food credited for shooting an animal.
pub const fn food_yield(kind: AnimalKind) -> u32 {
    match kind {
        AnimalKind::Rabbit => 5,
        AnimalKind::Bird => 3,
        AnimalKind::Rat => 2,
        AnimalKind::Snail => 1,
        AnimalKind::Squirrel => 4,
        AnimalKind::Turtle => 6,
    }
}

/// The animal currently on the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Species.
    pub kind: AnimalKind,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Food it is worth.
    pub score: u32,
    /// Hunting-clock time it appeared.
    pub spawned_at_ms: u64,
}

/// Something that happened while the hunting clock advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntEvent {
    /// A new target appeared.
    Spawned(AnimalKind),
    /// The target left unharmed.
    Escaped(AnimalKind),
}

/// Result of a successful shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuntOutcome {
    /// What was hit.
    pub kind: AnimalKind,
    /// Food credited.
    pub food: u32,
}

/// Hunting state: clock, target, and counters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HuntingGround {
    active: bool,
    clock_ms: u64,
    next_spawn_ms: u64,
    last_move_ms: u64,
    target: Option<Target>,
    total_hunted: u64,
}

impl HuntingGround {
    /// Open the ground. The first target arrives after one spawn interval.
    pub const fn activate(&mut self, config: &HuntingConfig) {
        self.active = true;
        self.next_spawn_ms = self.clock_ms.saturating_add(config.spawn_interval_ms);
    }

    /// Whether the lodge has been built.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// The animal on the field, if any.
    pub const fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    /// Animals shot over the whole run.
    pub const fn total_hunted(&self) -> u64 {
        self.total_hunted
    }

    /// Milliseconds the hunting clock has run.
    pub const fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    fn spawn<R: Rng>(&mut self, config: &HuntingConfig, rng: &mut R) -> AnimalKind {
        let kind = AnimalKind::ALL.choose(rng).copied().unwrap_or(AnimalKind::Rabbit);
        let size = config.field_size.max(0.0);
        self.target = Some(Target {
            kind,
            x: rng.random_range(0.0..=size),
            y: rng.random_range(0.0..=size),
            score: food_yield(kind),
            spawned_at_ms: self.clock_ms,
        });
        self.last_move_ms = self.clock_ms;
        kind
    }

    /// Run the hunting clock forward by `elapsed_ms`.
    pub fn advance<R: Rng>(&mut self, elapsed_ms: u64, config: &HuntingConfig, rng: &mut R) -> Vec<HuntEvent> {
        let mut events = Vec::new();
        if !self.active {
            return events;
        }
        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms);
        let now = self.clock_ms;

        if let Some(target) = &self.target
            && now.saturating_sub(target.spawned_at_ms) >= config.escape_after_ms
        {
            events.push(HuntEvent::Escaped(target.kind));
            self.target = None;
            self.next_spawn_ms = now.saturating_add(config.spawn_interval_ms);
        }

        if self.target.is_none() {
            if now >= self.next_spawn_ms {
                events.push(HuntEvent::Spawned(self.spawn(config, rng)));
            }
            return events;
        }

        let interval = config.move_interval_ms.max(1);
        let size = config.field_size.max(0.0);
        let step = (config.move_step / 2.0).abs();
        if let Some(target) = self.target.as_mut() {
            while now.saturating_sub(self.last_move_ms) >= interval {
                target.x = (target.x + rng.random_range(-step..=step)).clamp(0.0, size);
                target.y = (target.y + rng.random_range(-step..=step)).clamp(0.0, size);
                self.last_move_ms = self.last_move_ms.saturating_add(interval);
            }
        }
        events
    }

    /// Shoot the current target.
    ///
    /// # Errors
    ///
    /// - [`WorldError::ModuleLocked`] before the lodge is built
    /// - [`WorldError::NoTarget`] if the field is empty
    pub fn shoot<R: Rng>(
        &mut self,
        ledger: &mut ResourceLedger,
        config: &HuntingConfig,
        rng: &mut R,
    ) -> Result<HuntOutcome, WorldError> {
        if !self.active {
            return Err(WorldError::ModuleLocked(UpgradeId::HuntingLodge));
        }
        let target = self.target.take().ok_or(WorldError::NoTarget)?;
        ledger.credit(Resource::Food, Decimal::from(target.score));
        self.total_hunted = self.total_hunted.saturating_add(1);
        self.spawn(config, rng);
        Ok(HuntOutcome {
            kind: target.kind,
            food: target.score,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn open() -> (HuntingGround, HuntingConfig, StdRng) {
        let config = HuntingConfig::default();
        let mut ground = HuntingGround::default();
        ground.activate(&config);
        (ground, config, StdRng::seed_from_u64(3))
    }

    #[test]
    fn closed_ground_does_nothing() {
        let config = HuntingConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let mut ground = HuntingGround::default();
        assert!(ground.advance(10_000, &config, &mut rng).is_empty());
        let mut ledger = ResourceLedger::new();
        assert_eq!(
            ground.shoot(&mut ledger, &config, &mut rng),
            Err(WorldError::ModuleLocked(UpgradeId::HuntingLodge))
        );
    }

    #[test]
    fn target_spawns_after_interval() {
        let (mut ground, config, mut rng) = open();
        for _ in 0..9 {
            assert!(ground.advance(500, &config, &mut rng).is_empty());
        }
        let events = ground.advance(500, &config, &mut rng);
        assert!(matches!(events.as_slice(), [HuntEvent::Spawned(_)]));
        assert!(ground.target().is_some());
    }

    #[test]
    fn target_escapes_and_field_stays_empty_for_a_while() {
        let (mut ground, config, mut rng) = open();
        ground.advance(5000, &config, &mut rng);
        for _ in 0..7 {
            assert!(ground.advance(500, &config, &mut rng).is_empty());
            let target = ground.target().unwrap();
            assert!((0.0..=100.0).contains(&target.x));
            assert!((0.0..=100.0).contains(&target.y));
        }
        let events = ground.advance(500, &config, &mut rng);
        assert!(matches!(events.as_slice(), [HuntEvent::Escaped(_)]));
        assert!(ground.target().is_none());
        assert!(ground.advance(500, &config, &mut rng).is_empty());
    }

    #[test]
    fn shooting_credits_food_and_respawns() {
        let (mut ground, config, mut rng) = open();
        let mut ledger = ResourceLedger::new();
        assert_eq!(ground.shoot(&mut ledger, &config, &mut rng), Err(WorldError::NoTarget));

        ground.advance(5000, &config, &mut rng);
        let kind = ground.target().unwrap().kind;
        let outcome = ground.shoot(&mut ledger, &config, &mut rng).unwrap();
        assert_eq!(outcome.kind, kind);
        assert_eq!(outcome.food, food_yield(kind));
        assert_eq!(ledger.balance(Resource::Food), Decimal::from(outcome.food));
        assert_eq!(ground.total_hunted(), 1);
        assert!(ground.target().is_some());
    }
}
