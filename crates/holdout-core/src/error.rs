//! Error types for game commands.
//!
//! [`GameError`] is what every mutating operation on a running game can
//! return. It wraps the member-level and world-level rejections and adds
//! the few conditions only the game as a whole can detect. The tick itself
//! never fails.

use holdout_party::PartyError;
use holdout_world::WorldError;

/// A rejected game command. State is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// A member could not act.
    #[error("{source}")]
    Party {
        /// The underlying member rejection.
        #[from]
        source: PartyError,
    },

    /// Stockpiles, modules or upgrades refused the operation.
    #[error("{source}")]
    World {
        /// The underlying world rejection.
        #[from]
        source: WorldError,
    },

    /// The game has not started or is over.
    #[error("the game is not running")]
    GameNotRunning,

    /// The watchtower cannot send a party right now.
    #[error("no rescue mission available: {reason}")]
    MissionUnavailable {
        /// Why not.
        reason: String,
    },
}
