//! Tick callback that writes JSON snapshots to disk.
//!
//! Snapshots go to a sibling temp file first and are renamed into place,
//! so a crash mid-write never leaves a truncated save behind.

use std::path::{Path, PathBuf};

use holdout_core::GameState;
use holdout_core::runner::TickCallback;
use holdout_core::save::SaveGame;
use holdout_core::tick::TickSummary;
use tracing::{debug, warn};

use crate::error::EngineError;

/// Write `save` to `path` as pretty JSON.
pub fn write_snapshot(path: &Path, save: &SaveGame) -> Result<(), EngineError> {
    let json = save.to_json()?;
    let tmp = path.with_extension("json.tmp");
    let io = |source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    };
    std::fs::write(&tmp, json).map_err(io)?;
    std::fs::rename(&tmp, path).map_err(io)?;
    Ok(())
}

/// Callback that snapshots the game every `every` ticks.
pub struct SnapshotCallback {
    path: PathBuf,
    every: u64,
    ticks: u64,
}

impl SnapshotCallback {
    /// Snapshot to `path` every `every` ticks (0 = never).
    pub const fn new(path: PathBuf, every: u64) -> Self {
        Self {
            path,
            every,
            ticks: 0,
        }
    }
}

impl TickCallback for SnapshotCallback {
    fn on_tick(&mut self, summary: &TickSummary, state: &GameState) {
        self.ticks = self.ticks.saturating_add(1);
        if self.ticks.checked_rem(self.every) != Some(0) {
            return;
        }
        match write_snapshot(&self.path, &SaveGame::capture(state)) {
            Ok(()) => debug!(
                day = summary.day,
                hour = summary.hour,
                path = %self.path.display(),
                "Snapshot written"
            ),
            Err(e) => warn!(error = %e, "Snapshot failed"),
        }
    }
}
