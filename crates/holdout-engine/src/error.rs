//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and shutdown so
//! that `main` can propagate with `?`.

use std::path::PathBuf;

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: holdout_core::config::ConfigError,
    },

    /// A save could not be encoded.
    #[error("save error: {source}")]
    Save {
        /// The underlying save error.
        #[from]
        source: holdout_core::save::SaveError,
    },

    /// Starting a new game failed.
    #[error("game error: {source}")]
    Game {
        /// The underlying game error.
        #[from]
        source: holdout_core::GameError,
    },

    /// The run loop refused to start.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: holdout_core::runner::RunnerError,
    },

    /// Reading or writing a snapshot file failed.
    #[error("snapshot file {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
