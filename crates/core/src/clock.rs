// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! The progress monitor needs two notions of time: a monotonic instant for
//! throughput and elapsed-time math, and a wall-clock timestamp stamped onto
//! checkpoints for operators.

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync + 'static {
    /// Monotonic time, used for all interval math
    fn now(&self) -> Instant;

    /// Wall-clock time, used only for human-facing timestamps
    fn wall_now(&self) -> DateTime<Utc>;
}

/// Real system clock
#[derive(Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug)]
struct FakeTime {
    instant: Instant,
    wall: DateTime<Utc>,
}

/// Fake clock for testing with controllable time.
///
/// Clones share the same underlying time, so a test can hand one clone to a
/// monitor and advance another.
#[derive(Clone, Debug)]
pub struct FakeClock {
    current: Arc<Mutex<FakeTime>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(FakeTime {
                instant: Instant::now(),
                wall: Utc::now(),
            })),
        }
    }

    /// Advance both monotonic and wall time by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.instant += duration;
        if let Ok(delta) = chrono::Duration::from_std(duration) {
            current.wall += delta;
        }
    }

    /// Advance by a fractional number of seconds
    pub fn advance_secs_f64(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs.max(0.0)));
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).instant
    }

    fn wall_now(&self) -> DateTime<Utc> {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).wall
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
