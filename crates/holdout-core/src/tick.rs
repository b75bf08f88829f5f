//! Tick cycle: one in-game hour.
//!
//! Each tick runs these steps in a fixed order:
//!
//! 1. **Clock** -- advance one hour; roll over to a new day after hour 24.
//! 2. **Dawn** -- on a new day, log it and schedule the day's event
//!    window. With `world.daily_dry_out` set, every plot also dries out.
//! 3. **Events** -- resolve the event window if its hour has come.
//! 4. **Vitals** -- drift, penalties, deaths, rest completion, and medical
//!    healing for every living member.
//! 5. **Activity** -- busy deadlines at or before now return to idle.
//! 6. **Production** -- farming growth-freeze, well fill, lumber mill, and
//!    returning rescue parties. Hunting runs on its own clock.
//! 7. **Extinction** -- an empty party ends the game.
//! 8. **Bookkeeping** -- achievements, then every event goes into the log.
//!
//! The tick never fails. Once the game is over it does nothing until the
//! game is reset.

use holdout_types::{GamePhase, UpgradeId};
use rand::Rng;
use tracing::{debug, info};

use crate::achievements::check_achievements;
use crate::config::GameConfig;
use crate::events::{resolve_window, schedule_hour};
use crate::journal::GameEvent;
use crate::rescue::resolve_rescue;
use crate::state::GameState;

/// What one tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// Day after the tick.
    pub day: u32,
    /// Hour after the tick.
    pub hour: u32,
    /// Absolute hour after the tick.
    pub absolute_hour: u64,
    /// Living members at the end of the tick.
    pub party_alive: usize,
    /// Everything log-worthy, in the order it happened.
    pub events: Vec<GameEvent>,
    /// Whether this tick ended the game.
    pub game_over: bool,
}

/// Run one tick. Returns `None` without touching the state unless the game
/// is running.
pub fn run_tick<R: Rng>(state: &mut GameState, config: &GameConfig, rng: &mut R) -> Option<TickSummary> {
    if !state.is_running() {
        return None;
    }
    let mut events = Vec::new();

    // 1. Clock
    let new_day = state.clock.advance();
    let now = state.now();
    let (day, hour) = (state.clock.day(), state.clock.hour());
    debug!(day, hour, now, "Tick started");

    // 2. Dawn
    if new_day {
        if config.world.daily_dry_out {
            state.farming.dry_out();
        }
        state.next_event_hour = Some(schedule_hour(rng));
        info!(day, party = state.party.len(), event_hour = ?state.next_event_hour, "New day");
        events.push(GameEvent::NewDay { day });
    }

    // 3. Events
    if config.events.enabled
        && let Some(event) = resolve_window(state, config, rng)
    {
        events.push(event);
    }

    // 4. Vitals
    let heal = if state.has(UpgradeId::MedicalTent) {
        config.vitals.medical_heal_per_tick
    } else {
        0.0
    };
    let report = state.party.tick_vitals(now, day, hour, &config.vitals, heal);
    for dead in report.deaths {
        info!(day, hour, name = %dead.name, cause = %dead.cause, "Member died");
        events.push(GameEvent::MemberDied {
            name: dead.name,
            cause: dead.cause,
        });
    }
    for (_, name) in report.rested {
        events.push(GameEvent::MemberRested { name });
    }

    // 5. Activity
    let freed = state.party.resolve_expired(now);
    debug!(now, freed = freed.len(), "Activity phase complete");

    // 6. Production
    state.farming.tick();
    state.well.tick();
    let wood = state
        .lumber_mill
        .tick(&config.world.lumber_mill, &mut state.ledger, rng);
    if let Some(event) = resolve_rescue(state, config, rng) {
        events.push(event);
    }
    debug!(
        dry_plots = state.farming.dry_count(),
        well = %state.well.current(),
        %wood,
        "Production phase complete"
    );

    // 7. Extinction
    let game_over = state.party.is_empty();
    if game_over {
        state.phase = GamePhase::GameOver;
        info!(day, hour, fallen = state.party.fallen().len(), "Party extinct, game over");
        events.push(GameEvent::GameOver { day, hour });
    }

    // 8. Bookkeeping
    events.extend(check_achievements(state));
    for event in &events {
        state.record(event);
    }

    Some(TickSummary {
        day,
        hour,
        absolute_hour: now,
        party_alive: state.party.len(),
        events,
        game_over,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use holdout_types::{ActionKind, Activity, CropType};
    use holdout_world::{ResourceLedger, Stockpile};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::clock::GameClock;

    fn running(members: usize) -> (GameState, GameConfig, StdRng) {
        let mut config = GameConfig::default();
        config.events.enabled = false;
        let mut rng = StdRng::seed_from_u64(21);
        let mut state = GameState::new(&config);
        for _ in 0..members {
            state.party.recruit(&config.vitals, &mut rng).unwrap();
        }
        state.phase = GamePhase::Running;
        (state, config, rng)
    }

    #[test]
    fn not_started_game_does_not_tick() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(run_tick(&mut state, &config, &mut rng).is_none());
        assert_eq!(state.clock, GameClock::new());
    }

    #[test]
    fn tick_advances_one_hour() {
        let (mut state, config, mut rng) = running(1);
        let summary = run_tick(&mut state, &config, &mut rng).unwrap();
        assert_eq!((summary.day, summary.hour, summary.absolute_hour), (1, 2, 2));
        assert_eq!(summary.party_alive, 1);
        assert!(!summary.game_over);
    }

    #[test]
    fn rollover_logs_new_day_and_schedules_an_event() {
        let (mut state, config, mut rng) = running(1);
        state.clock = GameClock::at(1, 24);
        let summary = run_tick(&mut state, &config, &mut rng).unwrap();
        assert_eq!((summary.day, summary.hour), (2, 1));
        assert!(summary.events.contains(&GameEvent::NewDay { day: 2 }));
        assert!(state.next_event_hour.is_some());
        assert_eq!(state.log.latest().unwrap().day, 2);
    }

    #[test]
    fn deadline_equal_to_now_resolves_this_tick() {
        let (mut state, config, mut rng) = running(1);
        let id = state.party.members().first().unwrap().id;
        state.party.commit(id, ActionKind::Eat, 1).unwrap();
        let _ = run_tick(&mut state, &config, &mut rng).unwrap();
        assert_eq!(state.party.activity(id), Some(Activity::Idle));
    }

    #[test]
    fn medical_tent_heals_survivors() {
        let (mut state, config, mut rng) = running(1);
        state.upgrades = holdout_world::UpgradeBook::new();
        state.ledger = holdout_world::ResourceLedger::with_stock(holdout_world::Stockpile::from_units(200, 0, 150));
        state.upgrades.purchase(UpgradeId::MedicalTent, &mut state.ledger).unwrap();
        state.party.members_mut().first_mut().unwrap().health = 50.0;
        let _ = run_tick(&mut state, &config, &mut rng).unwrap();
        assert!((state.party.members().first().unwrap().health - 51.0).abs() < f64::EPSILON);
    }

    /// A running game one hour before dawn with wheat planted and watered.
    fn wheat_before_dawn(config: GameConfig) -> (GameState, GameConfig, StdRng) {
        let (mut state, _, rng) = running(1);
        state.clock = GameClock::at(1, 24);
        state.ledger = ResourceLedger::with_stock(Stockpile::from_units(0, 100, 0));
        let now = state.now();
        state
            .farming
            .plant(0, 0, CropType::Wheat, now, &mut state.ledger, false)
            .unwrap();
        (state, config, rng)
    }

    #[test]
    fn watered_plots_stay_watered_across_dawn() {
        let mut config = GameConfig::default();
        config.events.enabled = false;
        let (mut state, config, mut rng) = wheat_before_dawn(config);
        let planted_at = state.farming.plot(0, 0).unwrap().unwrap().planted_at;

        let summary = run_tick(&mut state, &config, &mut rng).unwrap();

        assert!(summary.events.contains(&GameEvent::NewDay { day: 2 }));
        assert_eq!(state.farming.dry_count(), 0);
        assert_eq!(state.farming.plot(0, 0).unwrap().unwrap().planted_at, planted_at);
    }

    #[test]
    fn daily_dry_out_dries_plots_at_dawn() {
        let mut config = GameConfig::default();
        config.events.enabled = false;
        config.world.daily_dry_out = true;
        let (mut state, config, mut rng) = wheat_before_dawn(config);

        let _ = run_tick(&mut state, &config, &mut rng).unwrap();

        assert_eq!(state.farming.dry_count(), 1);
    }
}
