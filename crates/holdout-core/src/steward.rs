//! Stewards decide what the camp does between ticks.
//!
//! A [`Steward`] sees the state after each tick and returns the commands
//! to run before the next one. [`IdleSteward`] leaves the camp alone;
//! [`Autopilot`] keeps everyone fed, watered and rested and puts the rest
//! of the day into gathering, the production modules and upgrades.

use holdout_types::{ActionKind, CropType, Resource, UpgradeId};
use holdout_world::farming::{GRID_SIZE, WATERING_COST_PER_PLOT, crop_spec, water_cost};
use rust_decimal::Decimal;

use crate::command::Command;
use crate::config::GameConfig;
use crate::state::GameState;

/// Plans commands from a read-only view of the game.
pub trait Steward: Send {
    /// Commands to run after the tick that produced `state`.
    fn plan(&mut self, state: &GameState, config: &GameConfig) -> Vec<Command>;
}

/// Plans nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleSteward;

impl Steward for IdleSteward {
    fn plan(&mut self, _state: &GameState, _config: &GameConfig) -> Vec<Command> {
        Vec::new()
    }
}

/// Rule-based automation for unattended play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autopilot {
    /// Eat at or above this hunger.
    pub hunger_threshold: f64,
    /// Drink at or above this thirst.
    pub thirst_threshold: f64,
    /// Sleep at or below this energy.
    pub energy_threshold: f64,
    /// Keep this much water in reserve before planting.
    pub planting_water_reserve: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            hunger_threshold: 50.0,
            thirst_threshold: 50.0,
            energy_threshold: 35.0,
            planting_water_reserve: 30,
        }
    }
}

/// Resource with the lowest balance; ties go to food, then water.
fn scarcest(food: Decimal, water: Decimal, wood: Decimal) -> Resource {
    if food <= water && food <= wood {
        Resource::Food
    } else if water <= wood {
        Resource::Water
    } else {
        Resource::Wood
    }
}

const fn gather_action(resource: Resource) -> ActionKind {
    match resource {
        Resource::Food => ActionKind::GatherFood,
        Resource::Water => ActionKind::CollectWater,
        Resource::Wood => ActionKind::ChopWood,
    }
}

impl Autopilot {
    fn plan_members(&self, state: &GameState, config: &GameConfig, budget: &mut [Decimal; 3], out: &mut Vec<Command>) {
        let now = state.now();
        let purified = state.has(UpgradeId::WaterPurification);
        let eat_cost = Decimal::from(config.actions.eat_food_cost);
        let drink_cost = water_cost(config.actions.drink_water_cost, purified);
        let [food, water, wood] = budget;

        for member in state.party.members() {
            if state.party.activity(member.id).unwrap_or_default().blocks_at(now) {
                continue;
            }
            let action = if member.hunger >= self.hunger_threshold && *food >= eat_cost {
                *food = food.saturating_sub(eat_cost);
                ActionKind::Eat
            } else if member.thirst >= self.thirst_threshold && *water >= drink_cost {
                *water = water.saturating_sub(drink_cost);
                ActionKind::Drink
            } else if member.energy <= self.energy_threshold {
                ActionKind::Sleep
            } else {
                gather_action(scarcest(*food, *water, *wood))
            };
            out.push(Command::PerformAction {
                member: member.id,
                action,
            });
        }
    }

    fn plan_modules(&self, state: &GameState, budget: &mut [Decimal; 3], out: &mut Vec<Command>) {
        let now = state.now();
        let purified = state.has(UpgradeId::WaterPurification);

        if state.has(UpgradeId::Well) && state.well.current() >= state.well.capacity() {
            out.push(Command::CollectWellWater);
        }

        for (index, tree) in state.lumber_mill.trees().iter().enumerate() {
            if tree.is_mature() {
                out.push(Command::HarvestTree { index });
            }
        }

        if state.hunting.target().is_some() {
            out.push(Command::Shoot);
        }

        if !state.has(UpgradeId::Farming) {
            return;
        }
        for (row, col, _) in state.farming.planted() {
            if state.farming.is_harvestable(row, col, now) {
                out.push(Command::HarvestCrop { row, col });
            }
        }

        let [_, water, _] = budget;
        let dry = state.farming.dry_count();
        if dry > 0 {
            let total = water_cost(WATERING_COST_PER_PLOT, purified).saturating_mul(Decimal::from(dry));
            if *water >= total {
                *water = water.saturating_sub(total);
                out.push(Command::WaterCrops);
            }
        }

        let seed_cost = water_cost(crop_spec(CropType::Wheat).water_needed, purified);
        let reserve = Decimal::from(self.planting_water_reserve);
        if *water >= reserve.max(seed_cost) {
            let free = (0..GRID_SIZE)
                .flat_map(|row| (0..GRID_SIZE).map(move |col| (row, col)))
                .find(|&(row, col)| matches!(state.farming.plot(row, col), Ok(None)));
            if let Some((row, col)) = free {
                *water = water.saturating_sub(seed_cost);
                out.push(Command::PlantCrop {
                    row,
                    col,
                    crop: CropType::Wheat,
                });
            }
        }
    }
}

impl Steward for Autopilot {
    fn plan(&mut self, state: &GameState, config: &GameConfig) -> Vec<Command> {
        let mut commands = Vec::new();
        if !state.is_running() {
            return commands;
        }
        let mut budget = Resource::ALL.map(|resource| state.ledger.balance(resource));

        self.plan_members(state, config, &mut budget, &mut commands);
        self.plan_modules(state, &mut budget, &mut commands);

        let [food, water, wood] = budget;
        let affordable = state.upgrades.available().into_iter().find(|spec| {
            spec.cost.iter().all(|&(resource, amount)| {
                let left = match resource {
                    Resource::Food => food,
                    Resource::Water => water,
                    Resource::Wood => wood,
                };
                left >= Decimal::from(amount)
            })
        });
        if let Some(spec) = affordable {
            commands.push(Command::BuyUpgrade { upgrade: spec.id });
        }
        commands
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use holdout_world::{ResourceLedger, Stockpile};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn state_with(food: u32, water: u32, wood: u32) -> (GameState, GameConfig) {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut state = GameState::new(&config);
        state.party.recruit(&config.vitals, &mut rng).unwrap();
        state.ledger = ResourceLedger::with_stock(Stockpile::from_units(food, water, wood));
        state.phase = holdout_types::GamePhase::Running;
        (state, config)
    }

    fn member_action(commands: &[Command]) -> Option<ActionKind> {
        commands.iter().find_map(|c| match c {
            Command::PerformAction { action, .. } => Some(*action),
            _ => None,
        })
    }

    #[test]
    fn idle_steward_does_nothing() {
        let (state, config) = state_with(10, 10, 10);
        assert!(IdleSteward.plan(&state, &config).is_empty());
    }

    #[test]
    fn hungry_member_eats_when_food_allows() {
        let (mut state, config) = state_with(10, 0, 0);
        state.party.members_mut().first_mut().unwrap().hunger = 60.0;
        let plan = Autopilot::default().plan(&state, &config);
        assert_eq!(member_action(&plan), Some(ActionKind::Eat));
    }

    #[test]
    fn hungry_member_without_food_gathers_it() {
        let (mut state, config) = state_with(0, 50, 50);
        state.party.members_mut().first_mut().unwrap().hunger = 60.0;
        let plan = Autopilot::default().plan(&state, &config);
        assert_eq!(member_action(&plan), Some(ActionKind::GatherFood));
    }

    #[test]
    fn tired_member_sleeps() {
        let (mut state, config) = state_with(100, 100, 100);
        state.party.members_mut().first_mut().unwrap().energy = 20.0;
        let plan = Autopilot::default().plan(&state, &config);
        assert_eq!(member_action(&plan), Some(ActionKind::Sleep));
    }

    #[test]
    fn gathers_the_scarcest_resource() {
        let (state, config) = state_with(40, 40, 5);
        let plan = Autopilot::default().plan(&state, &config);
        assert_eq!(member_action(&plan), Some(ActionKind::ChopWood));
    }

    #[test]
    fn buys_the_first_affordable_upgrade() {
        let (state, config) = state_with(100, 0, 0);
        let plan = Autopilot::default().plan(&state, &config);
        assert!(plan.contains(&Command::BuyUpgrade {
            upgrade: UpgradeId::Farming
        }));
    }

    #[test]
    fn busy_members_are_left_alone() {
        let (mut state, config) = state_with(0, 0, 0);
        let id = state.party.members().first().unwrap().id;
        state.party.commit(id, ActionKind::ChopWood, state.now()).unwrap();
        let plan = Autopilot::default().plan(&state, &config);
        assert_eq!(member_action(&plan), None);
    }

    #[test]
    fn stopped_game_plans_nothing() {
        let (mut state, config) = state_with(500, 500, 500);
        state.phase = holdout_types::GamePhase::GameOver;
        assert!(Autopilot::default().plan(&state, &config).is_empty());
    }
}
