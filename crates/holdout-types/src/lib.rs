//! Shared type definitions for the Holdout survival simulation.
//!
//! This crate is the single source of truth for the data exchanged between
//! the engine and its consumers (renderers, save storage, log viewers).
//! Types flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers
//! - [`enums`] -- Closed sets (resources, actions, crops, upgrades, events)
//! - [`structs`] -- Party members, activity states, log entries

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    ActionKind, AnimalKind, CropType, DeathCause, Difficulty, EventCategory, GamePhase, LogLevel,
    RescueDifficulty, Resource, UpgradeId,
};
pub use ids::MemberId;
pub use structs::{Activity, FallenMember, LogEntry, PartyMember, Traits, VITAL_MAX};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs writes the bindings into the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::MemberId::export_all();

        // Enums
        let _ = crate::enums::Resource::export_all();
        let _ = crate::enums::Difficulty::export_all();
        let _ = crate::enums::GamePhase::export_all();
        let _ = crate::enums::ActionKind::export_all();
        let _ = crate::enums::CropType::export_all();
        let _ = crate::enums::AnimalKind::export_all();
        let _ = crate::enums::UpgradeId::export_all();
        let _ = crate::enums::RescueDifficulty::export_all();
        let _ = crate::enums::EventCategory::export_all();
        let _ = crate::enums::DeathCause::export_all();
        let _ = crate::enums::LogLevel::export_all();

        // Structs
        let _ = crate::structs::Traits::export_all();
        let _ = crate::structs::PartyMember::export_all();
        let _ = crate::structs::Activity::export_all();
        let _ = crate::structs::FallenMember::export_all();
        let _ = crate::structs::LogEntry::export_all();
    }
}
