//! Random event engine.
//!
//! One candidate event is scheduled per day, at an hour drawn when the day
//! begins. When the clock reaches that hour the slot is cleared and the
//! window resolves to either a whisper (flavor only) or a mechanical event.
//! Mechanical events are picked by weighted category, then uniformly within
//! the category.
//!
//! Effects never push a stockpile below zero and never touch traits. An
//! effect may bring a member to zero health; the death is processed by the
//! vitals step of the same tick.

use holdout_party::vitals::{adjust_energy, adjust_health};
use holdout_types::{EventCategory, Resource, UpgradeId};
use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use tracing::info;

use crate::clock::HOURS_PER_DAY;
use crate::config::{EventsConfig, GameConfig};
use crate::journal::GameEvent;
use crate::state::GameState;

/// Flavor lines for whisper windows.
pub const WHISPERS: [&str; 36] = [
    "The shadows grow longer...",
    "They're watching...",
    "The ground hungers...",
    "The air carries whispers of forgotten names...",
    "The trees remember...",
    "The water reflects faces that aren't there...",
    "Time is running out...",
    "The old ones stir in their slumber...",
    "The moon weeps blood...",
    "Forgotten rituals yearn to be performed...",
    "The wind carries the scent of decay...",
    "Shadows dance without light...",
    "The earth trembles with anticipation...",
    "Whispers of madness grow louder...",
    "The veil between worlds thins...",
    "Ancient symbols appear in the dust...",
    "The silence screams...",
    "Time flows backwards...",
    "Reality bends and warps...",
    "The abyss gazes back...",
    "Nightmares seep into waking hours...",
    "The boundaries of sanity blur...",
    "Forgotten gods demand tribute...",
    "The air grows thick with dread...",
    "Unseen eyes watch from every corner...",
    "The fabric of existence unravels...",
    "Echoes of unspoken words resonate...",
    "The stars align in impossible patterns...",
    "Memories of places never visited surface...",
    "The void between thoughts expands...",
    "Reflections move independently...",
    "Time becomes a tangible substance...",
    "The world breathes with malevolent intent...",
    "Shadows cast by nothing multiply...",
    "Reality's seams become visible...",
    "The weight of eternity presses down...",
];

/// Every mechanical event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RandomEvent {
    // Positive
    /// +50 water.
    Rainstorm,
    /// The same 5..=50 to food and water.
    LuckyFind,
    /// 10..=25 wood.
    Windfall,
    /// +20 energy for everyone.
    MoraleBoost,
    /// 20..=49 food when farming.
    BountifulHarvest,
    /// 10..=29 food.
    UnexpectedVisitor,
    /// +10 energy for everyone.
    ToolUpgrade,
    /// 20..=59 water.
    NaturalSpring,
    /// Crops jump six hours ahead when farming.
    AncientKnowledge,
    /// +25 energy for everyone.
    CommunitySpirit,
    /// Gathering costs 2 less energy.
    ToolInnovation,
    /// The same 10..=29 to wood and food.
    MeteorShower,
    /// One member wakes fully rested.
    InspiringDream,
    /// +10 health for everyone.
    ShootingStar,
    /// One member back to full health and energy.
    AlienArtifact,
    // Neutral
    /// Crops and trees jump 1..=12 hours ahead.
    TimeAnomaly,
    /// The same -25..=24 to every resource.
    QuantumFluctuation,
    // Negative
    /// One member loses 20 health.
    WildAnimalAttack,
    /// 20% of food lost.
    FoodSpoilage,
    /// Everyone loses 5 health and 10 energy.
    MysteriousIllness,
    /// 10 wood lost.
    ToolBreaking,
    /// 30% of water lost.
    WaterContamination,
    /// -15 energy for everyone.
    HarshWeather,
    /// 15% of food lost.
    WildlifeStampede,
    /// Crops set back twelve hours when farming.
    UnexpectedFrost,
    /// -20 energy for everyone.
    SolarFlare,
    /// 25% of food lost when farming.
    LocustSwarm,
    /// 20% of wood lost.
    Earthquake,
    /// One member loses 30 health, never below 1.
    CosmicRay,
}

const POSITIVE: [RandomEvent; 15] = [
    RandomEvent::Rainstorm,
    RandomEvent::LuckyFind,
    RandomEvent::Windfall,
    RandomEvent::MoraleBoost,
    RandomEvent::BountifulHarvest,
    RandomEvent::UnexpectedVisitor,
    RandomEvent::ToolUpgrade,
    RandomEvent::NaturalSpring,
    RandomEvent::AncientKnowledge,
    RandomEvent::CommunitySpirit,
    RandomEvent::ToolInnovation,
    RandomEvent::MeteorShower,
    RandomEvent::InspiringDream,
    RandomEvent::ShootingStar,
    RandomEvent::AlienArtifact,
];

const NEUTRAL: [RandomEvent; 2] = [RandomEvent::TimeAnomaly, RandomEvent::QuantumFluctuation];

const NEGATIVE: [RandomEvent; 12] = [
    RandomEvent::WildAnimalAttack,
    RandomEvent::FoodSpoilage,
    RandomEvent::MysteriousIllness,
    RandomEvent::ToolBreaking,
    RandomEvent::WaterContamination,
    RandomEvent::HarshWeather,
    RandomEvent::WildlifeStampede,
    RandomEvent::UnexpectedFrost,
    RandomEvent::SolarFlare,
    RandomEvent::LocustSwarm,
    RandomEvent::Earthquake,
    RandomEvent::CosmicRay,
];

impl RandomEvent {
    /// Events of one category, in table order.
    pub const fn of_category(category: EventCategory) -> &'static [Self] {
        match category {
            EventCategory::Positive => &POSITIVE,
            EventCategory::Neutral => &NEUTRAL,
            EventCategory::Negative => &NEGATIVE,
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rainstorm => "Rainstorm",
            Self::LuckyFind => "Lucky Find",
            Self::Windfall => "Windfall",
            Self::MoraleBoost => "Morale Boost",
            Self::BountifulHarvest => "Bountiful Harvest",
            Self::UnexpectedVisitor => "Unexpected Visitor",
            Self::ToolUpgrade => "Tool Upgrade",
            Self::NaturalSpring => "Natural Spring",
            Self::AncientKnowledge => "Ancient Knowledge",
            Self::CommunitySpirit => "Community Spirit",
            Self::ToolInnovation => "Tool Innovation",
            Self::MeteorShower => "Meteor Shower",
            Self::InspiringDream => "Inspiring Dream",
            Self::ShootingStar => "Shooting Star",
            Self::AlienArtifact => "Alien Artifact",
            Self::TimeAnomaly => "Time Anomaly",
            Self::QuantumFluctuation => "Quantum Fluctuation",
            Self::WildAnimalAttack => "Wild Animal Attack",
            Self::FoodSpoilage => "Food Spoilage",
            Self::MysteriousIllness => "Mysterious Illness",
            Self::ToolBreaking => "Tool Breaking",
            Self::WaterContamination => "Water Contamination",
            Self::HarshWeather => "Harsh Weather",
            Self::WildlifeStampede => "Wildlife Stampede",
            Self::UnexpectedFrost => "Unexpected Frost",
            Self::SolarFlare => "Solar Flare",
            Self::LocustSwarm => "Locust Swarm",
            Self::Earthquake => "Earthquake",
            Self::CosmicRay => "Cosmic Ray",
        }
    }

    /// Which weighted bucket the event belongs to.
    pub const fn category(self) -> EventCategory {
        match self {
            Self::Rainstorm
            | Self::LuckyFind
            | Self::Windfall
            | Self::MoraleBoost
            | Self::BountifulHarvest
            | Self::UnexpectedVisitor
            | Self::ToolUpgrade
            | Self::NaturalSpring
            | Self::AncientKnowledge
            | Self::CommunitySpirit
            | Self::ToolInnovation
            | Self::MeteorShower
            | Self::InspiringDream
            | Self::ShootingStar
            | Self::AlienArtifact => EventCategory::Positive,
            Self::TimeAnomaly | Self::QuantumFluctuation => EventCategory::Neutral,
            Self::WildAnimalAttack
            | Self::FoodSpoilage
            | Self::MysteriousIllness
            | Self::ToolBreaking
            | Self::WaterContamination
            | Self::HarshWeather
            | Self::WildlifeStampede
            | Self::UnexpectedFrost
            | Self::SolarFlare
            | Self::LocustSwarm
            | Self::Earthquake
            | Self::CosmicRay => EventCategory::Negative,
        }
    }

    /// Apply the effect and describe what happened.
    pub fn apply<R: Rng>(self, state: &mut GameState, config: &GameConfig, rng: &mut R) -> String {
        let farming = state.has(UpgradeId::Farming);
        match self {
            Self::Rainstorm => {
                credit(state, Resource::Water, 50);
                "A sudden rainstorm replenished your water supply! (+50 water)".to_owned()
            }
            Self::LuckyFind => {
                let amount = rng.random_range(5..=50);
                credit(state, Resource::Food, amount);
                credit(state, Resource::Water, amount);
                format!("You found a hidden cache of supplies! (+{amount} food, +{amount} water)")
            }
            Self::Windfall => {
                let wood = rng.random_range(10..=25);
                credit(state, Resource::Wood, wood);
                format!("A fallen tree provided extra wood! (+{wood} wood)")
            }
            Self::MoraleBoost => {
                energize_all(state, 20.0);
                "A surge of hope boosts everyone's morale! (+20 energy for all)".to_owned()
            }
            Self::BountifulHarvest => {
                if farming {
                    let bonus = rng.random_range(20..=49);
                    credit(state, Resource::Food, bonus);
                    format!("Your crops yielded an exceptional harvest! (+{bonus} food)")
                } else {
                    "Your crops look healthy!".to_owned()
                }
            }
            Self::UnexpectedVisitor => {
                let food = rng.random_range(10..=29);
                credit(state, Resource::Food, food);
                format!("A friendly traveler shared some food with your group! (+{food} food)")
            }
            Self::ToolUpgrade => {
                energize_all(state, 10.0);
                "You've found ways to improve your tools! (+10 energy for all)".to_owned()
            }
            Self::NaturalSpring => {
                let water = rng.random_range(20..=59);
                credit(state, Resource::Water, water);
                format!("You've discovered a natural spring! (+{water} water)")
            }
            Self::AncientKnowledge => {
                if farming {
                    state.farming.advance_all(6);
                    "You've uncovered ancient farming techniques! (crops grow 6 hours ahead)".to_owned()
                } else {
                    "You've found some interesting old documents.".to_owned()
                }
            }
            Self::CommunitySpirit => {
                energize_all(state, 25.0);
                "A wave of community spirit energizes everyone! (+25 energy for all)".to_owned()
            }
            Self::ToolInnovation => {
                let cost = state
                    .party
                    .reduce_gather_energy_cost(2.0, config.actions.min_gather_energy_cost);
                format!("You've found a way to make your tools more efficient! (gathering now costs {cost} energy)")
            }
            Self::MeteorShower => {
                let amount = rng.random_range(10..=29);
                credit(state, Resource::Wood, amount);
                credit(state, Resource::Food, amount);
                format!("A meteor shower brings rare minerals! (+{amount} wood, +{amount} food)")
            }
            Self::InspiringDream => match state.party.random_member_mut(rng) {
                Some(member) => {
                    member.energy = member.energy_cap();
                    format!("{} had an inspiring dream and woke fully rested!", member.name)
                }
                None => "Someone dreams of a better world.".to_owned(),
            },
            Self::ShootingStar => {
                for member in state.party.members_mut() {
                    adjust_health(member, 10.0, 0.0);
                }
                "A shooting star boosts everyone's spirits! (+10 health for all)".to_owned()
            }
            Self::AlienArtifact => match state.party.random_member_mut(rng) {
                Some(member) => {
                    member.health = holdout_types::VITAL_MAX;
                    member.energy = member.energy_cap();
                    format!("{} found an alien artifact! (full health and energy)", member.name)
                }
                None => "A strange artifact hums in the dirt.".to_owned(),
            },
            Self::TimeAnomaly => {
                let hours = rng.random_range(1..=12_u64);
                state.farming.advance_all(hours);
                state.lumber_mill.fast_forward(hours);
                format!("A strange time anomaly occurs! (crops and trees jump {hours} hours ahead)")
            }
            Self::QuantumFluctuation => {
                let change: i32 = rng.random_range(-25..=24);
                let magnitude = Decimal::from(change.unsigned_abs());
                for resource in Resource::ALL {
                    if change > 0 {
                        state.ledger.credit(resource, magnitude);
                    } else {
                        state.ledger.lose_up_to(resource, magnitude);
                    }
                }
                let sign = if change > 0 { "+" } else { "" };
                format!("A quantum fluctuation alters reality! ({sign}{change} to all resources)")
            }
            Self::WildAnimalAttack => match state.party.random_member_mut(rng) {
                Some(member) => {
                    adjust_health(member, -20.0, 0.0);
                    format!("{} was attacked by a wild animal! (-20 health)", member.name)
                }
                None => "A wild animal prowls the empty camp.".to_owned(),
            },
            Self::FoodSpoilage => {
                let lost = state.ledger.lose_fraction(Resource::Food, Decimal::new(2, 1));
                format!("Some of your food has spoiled! (-{lost} food)")
            }
            Self::MysteriousIllness => {
                let prevented = state.has(UpgradeId::MedicalTent) && rng.random_bool(0.5);
                if prevented {
                    "A mysterious illness threatens the group, but the Medical Tent helps prevent its spread!"
                        .to_owned()
                } else {
                    for member in state.party.members_mut() {
                        adjust_health(member, -5.0, 0.0);
                        adjust_energy(member, -10.0);
                    }
                    "A mysterious illness affects everyone in the group! (-5 health, -10 energy for all)".to_owned()
                }
            }
            Self::ToolBreaking => {
                let lost = state.ledger.lose_up_to(Resource::Wood, Decimal::from(10));
                format!("One of your tools broke! (-{lost} wood)")
            }
            Self::WaterContamination => {
                let lost = state.ledger.lose_fraction(Resource::Water, Decimal::new(3, 1));
                format!("Some of your water got contaminated! (-{lost} water)")
            }
            Self::HarshWeather => {
                energize_all(state, -15.0);
                "A spell of harsh weather has drained everyone's energy! (-15 energy for all)".to_owned()
            }
            Self::WildlifeStampede => {
                let lost = state.ledger.lose_fraction(Resource::Food, Decimal::new(15, 2));
                format!("A stampede of animals trampled some of your food stores! (-{lost} food)")
            }
            Self::UnexpectedFrost => {
                if farming {
                    state.farming.delay_all(12);
                    "An unexpected frost has slowed the growth of your crops! (12 hour delay)".to_owned()
                } else {
                    "There was an unexpected frost last night.".to_owned()
                }
            }
            Self::SolarFlare => {
                energize_all(state, -20.0);
                "A solar flare disrupts sleep patterns! (-20 energy for all)".to_owned()
            }
            Self::LocustSwarm => {
                if farming {
                    let lost = state.ledger.lose_fraction(Resource::Food, Decimal::new(25, 2));
                    format!("A locust swarm devours your crops! (-{lost} food)")
                } else {
                    "A locust swarm passes through the area.".to_owned()
                }
            }
            Self::Earthquake => {
                let lost = state.ledger.lose_fraction(Resource::Wood, Decimal::new(2, 1));
                format!("An earthquake damages some structures! (-{lost} wood)")
            }
            Self::CosmicRay => match state.party.random_member_mut(rng) {
                Some(member) => {
                    adjust_health(member, -30.0, 1.0);
                    format!("{} was hit by a cosmic ray! (-30 health)", member.name)
                }
                None => "A cosmic ray strikes the empty camp.".to_owned(),
            },
        }
    }
}

fn credit(state: &mut GameState, resource: Resource, amount: u32) {
    state.ledger.credit(resource, Decimal::from(amount));
}

fn energize_all(state: &mut GameState, delta: f64) {
    for member in state.party.members_mut() {
        adjust_energy(member, delta);
    }
}

/// Hour of the day's event window.
pub fn schedule_hour<R: Rng>(rng: &mut R) -> u32 {
    rng.random_range(1..=HOURS_PER_DAY)
}

/// Draw a category by weight. All-zero weights fall back to positive.
pub fn pick_category<R: Rng>(config: &EventsConfig, rng: &mut R) -> EventCategory {
    let positive = config.positive_weight;
    let neutral = config.neutral_weight;
    let total = positive
        .saturating_add(neutral)
        .saturating_add(config.negative_weight);
    if total == 0 {
        return EventCategory::Positive;
    }
    let roll = rng.random_range(0..total);
    if roll < positive {
        EventCategory::Positive
    } else if roll < positive.saturating_add(neutral) {
        EventCategory::Neutral
    } else {
        EventCategory::Negative
    }
}

/// Fire today's event if the clock has reached its hour.
///
/// The slot is cleared before the effect runs, so a window resolves at
/// most once. Returns `None` on every other hour.
pub fn resolve_window<R: Rng>(state: &mut GameState, config: &GameConfig, rng: &mut R) -> Option<GameEvent> {
    if state.next_event_hour != Some(state.clock.hour()) {
        return None;
    }
    state.next_event_hour = None;

    let whisper_chance = config.events.whisper_chance;
    if whisper_chance.is_finite() && rng.random_bool(whisper_chance.clamp(0.0, 1.0)) {
        let text = WHISPERS.choose(rng).copied().unwrap_or_default().to_owned();
        info!(day = state.clock.day(), hour = state.clock.hour(), "Whisper");
        return Some(GameEvent::Whisper { text });
    }

    let category = pick_category(&config.events, rng);
    let event = *RandomEvent::of_category(category).choose(rng)?;
    let description = event.apply(state, config, rng);
    info!(
        day = state.clock.day(),
        hour = state.clock.hour(),
        event = event.name(),
        ?category,
        "Random event"
    );
    Some(GameEvent::RandomEvent {
        name: event.name().to_owned(),
        category,
        description,
    })
}
