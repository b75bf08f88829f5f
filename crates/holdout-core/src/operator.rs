//! Shared run control for an unattended game.
//!
//! [`RunControl`] is wrapped in an [`Arc`](std::sync::Arc) and shared
//! between the runner task and whoever drives it (a signal handler, a
//! front end). All fields are atomics so the tick loop never takes a lock.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::Notify;

use crate::config::SimulationConfig;

/// Smallest accepted tick interval.
pub const MIN_TICK_INTERVAL_MS: u64 = 100;

/// Pause, speed, and stop switches for the runner.
#[derive(Debug)]
pub struct RunControl {
    /// Whether the game clock is paused.
    paused: AtomicBool,

    /// Wakes a runner waiting between ticks when paused.
    pause_notify: Notify,

    /// Wakes the runner when resumed.
    resume_notify: Notify,

    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Wakes a runner sleeping between ticks.
    stop_notify: Notify,

    /// Real-time milliseconds per in-game hour.
    tick_interval_ms: AtomicU64,

    /// Maximum number of ticks (0 = unlimited).
    max_ticks: u64,
}

impl RunControl {
    /// Create run control with the given pacing and bound.
    pub fn new(tick_interval_ms: u64, max_ticks: u64) -> Self {
        Self {
            paused: AtomicBool::new(false),
            pause_notify: Notify::new(),
            resume_notify: Notify::new(),
            stop_requested: AtomicBool::new(false),
            stop_notify: Notify::new(),
            tick_interval_ms: AtomicU64::new(tick_interval_ms),
            max_ticks,
        }
    }

    /// Create run control from the runner configuration.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.tick_interval_ms, config.max_ticks)
    }

    // ---- Pause / Resume ----

    /// Check whether the game clock is paused.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Pause the game clock. Hunting and play time stop with it, and a
    /// pending tick is abandoned.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
        self.pause_notify.notify_one();
    }

    /// Resolve once the game clock is paused.
    pub async fn paused(&self) {
        while !self.is_paused() {
            self.pause_notify.notified().await;
        }
    }

    /// Resume and wake the runner.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Wait until resumed. Returns at once if not paused or if a stop
    /// has been requested.
    pub async fn wait_if_paused(&self) {
        while self.is_paused() && !self.is_stop_requested() {
            self.resume_notify.notified().await;
        }
    }

    // ---- Stop ----

    /// Request a clean stop. A paused or sleeping runner wakes up.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.stop_notify.notify_one();
        self.resume_notify.notify_one();
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Resolve once a stop has been requested.
    pub async fn stopped(&self) {
        while !self.is_stop_requested() {
            self.stop_notify.notified().await;
        }
    }

    // ---- Tick Speed ----

    /// Current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms.load(Ordering::Acquire)
    }

    /// Set the tick interval. Values under [`MIN_TICK_INTERVAL_MS`] are
    /// rejected with `None`; otherwise the previous interval is returned.
    pub fn set_tick_interval_ms(&self, ms: u64) -> Option<u64> {
        if ms < MIN_TICK_INTERVAL_MS {
            return None;
        }
        Some(self.tick_interval_ms.swap(ms, Ordering::AcqRel))
    }

    // ---- Boundaries ----

    /// The configured tick bound.
    pub const fn max_ticks(&self) -> u64 {
        self.max_ticks
    }

    /// `true` if `max_ticks > 0` and `ticks >= max_ticks`.
    pub const fn tick_limit_reached(&self, ticks: u64) -> bool {
        self.max_ticks > 0 && ticks >= self.max_ticks
    }
}
