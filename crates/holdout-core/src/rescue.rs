//! Watchtower rescue missions.
//!
//! Once the Watchtower stands, the camp can send one rescue party at a
//! time. A mission costs food and water up front, takes one to three days,
//! and on return either brings supplies (and sometimes a new survivor) or
//! comes back empty-handed, occasionally with someone hurt. After a
//! mission returns, the next one can leave the following day.

use holdout_party::vitals::adjust_health;
use holdout_types::{RescueDifficulty, Resource, UpgradeId};
use holdout_world::WorldError;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::journal::GameEvent;
use crate::state::GameState;

/// Cost, length and risk of a mission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionSpec {
    /// Food spent to send the party.
    pub food: u32,
    /// Water spent to send the party.
    pub water: u32,
    /// Hours until the party returns.
    pub hours: u64,
    /// Probability of failure.
    pub risk: f64,
}

/// Numbers for a mission difficulty.
pub const fn mission_spec(difficulty: RescueDifficulty) -> MissionSpec {
    match difficulty {
        RescueDifficulty::Easy => MissionSpec {
            food: 20,
            water: 20,
            hours: 24,
            risk: 0.1,
        },
        RescueDifficulty::Medium => MissionSpec {
            food: 40,
            water: 40,
            hours: 48,
            risk: 0.3,
        },
        RescueDifficulty::Hard => MissionSpec {
            food: 60,
            water: 60,
            hours: 72,
            risk: 0.5,
        },
    }
}

const INJURY: f64 = -40.0;
const INJURY_FLOOR: f64 = 10.0;

/// A party that is out searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescueMission {
    /// Mission difficulty.
    pub difficulty: RescueDifficulty,
    /// Absolute hour the party left.
    pub started_at: u64,
    /// Absolute hour the party returns.
    pub ends_at: u64,
}

/// Watchtower state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watchtower {
    mission: Option<RescueMission>,
    last_mission_day: u32,
}

impl Watchtower {
    /// The mission under way, if any.
    pub const fn mission(&self) -> Option<&RescueMission> {
        self.mission.as_ref()
    }

    /// Day the last mission returned (0 before the first).
    pub const fn last_mission_day(&self) -> u32 {
        self.last_mission_day
    }

    /// Whether a new mission could leave on `day`.
    pub const fn is_available(&self, day: u32) -> bool {
        self.mission.is_none() && day > self.last_mission_day
    }
}

/// Send a rescue party.
///
/// # Errors
///
/// - [`WorldError::ModuleLocked`] without the Watchtower
/// - [`GameError::MissionUnavailable`] while a party is out or before the
///   next mission day
/// - [`WorldError::InsufficientResource`] if food or water is short
pub fn start_rescue(state: &mut GameState, difficulty: RescueDifficulty) -> Result<GameEvent, GameError> {
    if !state.has(UpgradeId::Watchtower) {
        return Err(WorldError::ModuleLocked(UpgradeId::Watchtower).into());
    }
    if state.watchtower.mission.is_some() {
        return Err(GameError::MissionUnavailable {
            reason: "a rescue party is already out".to_owned(),
        });
    }
    if !state.watchtower.is_available(state.clock.day()) {
        return Err(GameError::MissionUnavailable {
            reason: "the next rescue party can leave tomorrow".to_owned(),
        });
    }

    let spec = mission_spec(difficulty);
    state.ledger.debit_all(&[
        (Resource::Food, Decimal::from(spec.food)),
        (Resource::Water, Decimal::from(spec.water)),
    ])?;
    let now = state.now();
    state.watchtower.mission = Some(RescueMission {
        difficulty,
        started_at: now,
        ends_at: now.saturating_add(spec.hours),
    });
    info!(?difficulty, hours = spec.hours, "Rescue mission started");
    Ok(GameEvent::RescueStarted {
        difficulty,
        hours: spec.hours,
    })
}

/// Bring back a party whose time is up. Called once per tick.
pub fn resolve_rescue<R: Rng>(state: &mut GameState, config: &GameConfig, rng: &mut R) -> Option<GameEvent> {
    let mission = state.watchtower.mission?;
    if state.now() < mission.ends_at {
        return None;
    }
    state.watchtower.mission = None;
    state.watchtower.last_mission_day = state.clock.day();

    let spec = mission_spec(mission.difficulty);
    let event = if rng.random::<f64>() > spec.risk {
        let food = rng.random_range(10..=59);
        let water = rng.random_range(10..=59);
        let wood = rng.random_range(5..=34);
        state.ledger.credit(Resource::Food, Decimal::from(food));
        state.ledger.credit(Resource::Water, Decimal::from(water));
        state.ledger.credit(Resource::Wood, Decimal::from(wood));

        let recruit = if rng.random_bool(0.5) && state.party.has_free_name() {
            state
                .party
                .recruit(&config.vitals, rng)
                .ok()
                .and_then(|id| state.party.member(id))
                .map(|m| m.name.clone())
        } else {
            None
        };
        GameEvent::RescueSucceeded {
            food,
            water,
            wood,
            recruit,
        }
    } else {
        let injured = if rng.random_bool(0.5) {
            state.party.random_member_mut(rng).map(|member| {
                adjust_health(member, INJURY, INJURY_FLOOR);
                member.name.clone()
            })
        } else {
            None
        };
        GameEvent::RescueFailed { injured }
    };
    info!(difficulty = ?mission.difficulty, outcome = %event.message(), "Rescue mission returned");
    Some(event)
}
