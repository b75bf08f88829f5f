//! Member actions against the game state.
//!
//! Every check runs before anything changes: availability first, then
//! affordability. Only then are vitals, stockpiles and the activity entry
//! updated together.

use holdout_party::actions::{ActionClass, class_of, exertion, roll_gather};
use holdout_party::vitals::{apply_drink, apply_eat, apply_exertion};
use holdout_party::PartyError;
use holdout_types::{ActionKind, MemberId, Resource, UpgradeId};
use holdout_world::farming::water_cost;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::journal::GameEvent;
use crate::state::GameState;

/// Gathering multiplier for `resource` given the upgrades bought so far.
pub fn gather_efficiency(state: &GameState, config: &GameConfig, resource: Resource) -> f64 {
    let mut efficiency = 1.0;
    if state.has(UpgradeId::ToolWorkshop) {
        efficiency *= config.actions.tool_efficiency;
    }
    if resource == Resource::Wood && state.has(UpgradeId::LumberMill) {
        efficiency *= config.actions.lumber_mill_wood_bonus;
    }
    efficiency
}

/// Have member `id` start `kind`.
///
/// # Errors
///
/// - [`PartyError::MemberNotFound`], [`PartyError::MemberBusy`] or
///   [`PartyError::MemberExhausted`] from the availability check
/// - [`holdout_world::WorldError::InsufficientResource`] when eating or
///   drinking without supplies
pub fn perform_action<R: Rng>(
    state: &mut GameState,
    config: &GameConfig,
    id: MemberId,
    kind: ActionKind,
    rng: &mut R,
) -> Result<GameEvent, GameError> {
    let now = state.now();
    let name = state.party.check_available(id, kind, now)?.name.clone();

    let gained = match class_of(kind) {
        ActionClass::Gather(resource) => {
            let efficiency = gather_efficiency(state, config, resource);
            let amount = roll_gather(resource, state.clock.day(), efficiency, rng);
            let cost = state.party.gather_energy_cost();
            let toll = exertion(kind);
            let member = state.party.member_mut(id).ok_or(PartyError::MemberNotFound(id))?;
            apply_exertion(member, cost, toll.hunger, toll.thirst);
            state.ledger.credit(resource, Decimal::from(amount));
            Some((resource, amount))
        }
        ActionClass::Consume => {
            if kind == ActionKind::Eat {
                state
                    .ledger
                    .debit(Resource::Food, Decimal::from(config.actions.eat_food_cost))?;
            } else {
                let cost = water_cost(
                    config.actions.drink_water_cost,
                    state.has(UpgradeId::WaterPurification),
                );
                state.ledger.debit(Resource::Water, cost)?;
            }
            let member = state.party.member_mut(id).ok_or(PartyError::MemberNotFound(id))?;
            if kind == ActionKind::Eat {
                apply_eat(member, &config.actions);
            } else {
                apply_drink(member, &config.actions);
            }
            None
        }
        ActionClass::Rest => None,
    };

    let activity = state.party.commit(id, kind, now)?;
    state.stats.total_actions = state.stats.total_actions.saturating_add(1);
    debug!(%id, name, ?kind, ?activity, ?gained, "Action performed");
    Ok(GameEvent::ActionPerformed {
        name,
        action: kind,
        gained,
    })
}

/// Give `kind` to the idle member with the most energy.
///
/// # Errors
///
/// [`PartyError::NobodyAvailable`] when every member is busy or resting,
/// otherwise whatever [`perform_action`] returns.
pub fn assign_best_member<R: Rng>(
    state: &mut GameState,
    config: &GameConfig,
    kind: ActionKind,
    rng: &mut R,
) -> Result<GameEvent, GameError> {
    let id = state
        .party
        .best_available(state.now())
        .ok_or(PartyError::NobodyAvailable)?;
    perform_action(state, config, id, kind, rng)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use holdout_types::Activity;
    use holdout_world::{ResourceLedger, Stockpile, WorldError};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;

    use super::*;

    fn one_member(food: u32, water: u32) -> (GameState, GameConfig, StdRng, MemberId) {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(8);
        let mut state = GameState::new(&config);
        let id = state.party.recruit(&config.vitals, &mut rng).unwrap();
        state.ledger = ResourceLedger::with_stock(Stockpile::from_units(food, water, 0));
        (state, config, rng, id)
    }

    #[test]
    fn gathering_credits_the_ledger_and_costs_energy() {
        let (mut state, config, mut rng, id) = one_member(0, 0);
        let before = state.party.member(id).unwrap().energy;
        let event = perform_action(&mut state, &config, id, ActionKind::GatherFood, &mut rng).unwrap();
        let gained = match event {
            GameEvent::ActionPerformed { gained, .. } => gained,
            _ => None,
        };
        let (resource, amount) = gained.unwrap();
        assert_eq!(resource, Resource::Food);
        assert!((3..=8).contains(&amount));
        assert_eq!(state.ledger.balance(Resource::Food), Decimal::from(amount));
        let member = state.party.member(id).unwrap();
        assert!((before - member.energy - 10.0).abs() < f64::EPSILON);
        assert_eq!(state.party.activity(id), Some(Activity::BusyUntil(3)));
        assert_eq!(state.stats.total_actions, 1);
    }

    #[test]
    fn drinking_is_cheaper_after_purification() {
        let (mut state, config, mut rng, id) = one_member(0, 300);
        state.ledger = ResourceLedger::with_stock(Stockpile::from_units(80, 300, 200));
        for upgrade in [UpgradeId::Farming, UpgradeId::Well] {
            state.upgrades.purchase(upgrade, &mut state.ledger).unwrap();
        }
        state.ledger = ResourceLedger::with_stock(Stockpile::from_units(0, 350, 100));
        state
            .upgrades
            .purchase(UpgradeId::WaterPurification, &mut state.ledger)
            .unwrap();
        perform_action(&mut state, &config, id, ActionKind::Drink, &mut rng).unwrap();
        assert_eq!(state.ledger.balance(Resource::Water), dec!(96));
    }

    #[test]
    fn unaffordable_drink_leaves_member_untouched() {
        let (mut state, config, mut rng, id) = one_member(0, 4);
        let before = state.party.member(id).unwrap().clone();
        let err = perform_action(&mut state, &config, id, ActionKind::Drink, &mut rng);
        assert!(matches!(
            err,
            Err(GameError::World {
                source: WorldError::InsufficientResource { .. }
            })
        ));
        assert_eq!(state.party.member(id), Some(&before));
        assert_eq!(state.party.activity(id), Some(Activity::Idle));
        assert_eq!(state.stats.total_actions, 0);
    }

    #[test]
    fn sleep_enters_resting() {
        let (mut state, config, mut rng, id) = one_member(0, 0);
        perform_action(&mut state, &config, id, ActionKind::Sleep, &mut rng).unwrap();
        assert_eq!(state.party.activity(id), Some(Activity::Resting));
        assert!(matches!(
            perform_action(&mut state, &config, id, ActionKind::Eat, &mut rng),
            Err(GameError::Party {
                source: PartyError::MemberBusy { .. }
            })
        ));
    }

    #[test]
    fn tools_and_mill_stack_for_wood() {
        let (mut state, config, _, _) = one_member(0, 0);
        state.ledger = ResourceLedger::with_stock(Stockpile::from_units(100, 0, 700));
        state.upgrades.purchase(UpgradeId::ToolWorkshop, &mut state.ledger).unwrap();
        state.upgrades.purchase(UpgradeId::LumberMill, &mut state.ledger).unwrap();
        let wood = gather_efficiency(&state, &config, Resource::Wood);
        let food = gather_efficiency(&state, &config, Resource::Food);
        assert!((wood - 1.875).abs() < f64::EPSILON);
        assert!((food - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn nobody_available_when_everyone_is_busy() {
        let (mut state, config, mut rng, _) = one_member(50, 0);
        assign_best_member(&mut state, &config, ActionKind::Eat, &mut rng).unwrap();
        assert!(matches!(
            assign_best_member(&mut state, &config, ActionKind::Eat, &mut rng),
            Err(GameError::Party {
                source: PartyError::NobodyAvailable
            })
        ));
    }
}
