//! Game clock: day and hour, plus the absolute hour used for scheduling.
//!
//! One tick is one in-game hour. Hours run `1..=24`; advancing past 24
//! wraps to hour 1 of the next day. The absolute hour
//! `hour + (day - 1) * 24` is strictly monotonic and is the only
//! timestamp the rest of the engine compares against.

use serde::{Deserialize, Serialize};

/// Hours in one in-game day.
pub const HOURS_PER_DAY: u32 = 24;

/// The in-game calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    day: u32,
    hour: u32,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    /// Day 1, hour 1.
    pub const fn new() -> Self {
        Self { day: 1, hour: 1 }
    }

    /// Build a clock at a specific time. Out-of-range values are clamped.
    pub fn at(day: u32, hour: u32) -> Self {
        Self {
            day: day.max(1),
            hour: hour.clamp(1, HOURS_PER_DAY),
        }
    }

    /// Current day, starting at 1.
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Current hour, `1..=24`.
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    /// `hour + (day - 1) * 24`.
    pub fn absolute_hour(&self) -> u64 {
        u64::from(self.day.saturating_sub(1))
            .saturating_mul(u64::from(HOURS_PER_DAY))
            .saturating_add(u64::from(self.hour))
    }

    /// Advance one hour. Returns `true` when a new day begins.
    pub const fn advance(&mut self) -> bool {
        if self.hour >= HOURS_PER_DAY {
            self.hour = 1;
            self.day = self.day.saturating_add(1);
            true
        } else {
            self.hour = self.hour.saturating_add(1);
            false
        }
    }
}
