// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pause/resume/cancel surface
//!
//! A [`ControlHandle`] is owned by whoever drives the run (a CLI, a test, a
//! supervisor). Nothing here is global: each run has its own monitor and
//! therefore its own handle.

use crate::error::ControlError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use trickle_core::{Clock, ProgressMonitor, ProgressReport, RunPhase, SystemClock};

/// Exit status used when a second interrupt forces the process down
pub const FORCED_EXIT_CODE: i32 = 130;

/// What an interrupt should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    /// First interrupt: finish the in-flight batch, then stop
    Cancel,
    /// Repeated interrupt: stop the process now
    Exit,
}

/// Cloneable handle onto a run's monitor
pub struct ControlHandle<C: Clock = SystemClock> {
    monitor: Arc<ProgressMonitor<C>>,
    interrupts: Arc<AtomicUsize>,
}

impl<C: Clock> Clone for ControlHandle<C> {
    fn clone(&self) -> Self {
        Self {
            monitor: Arc::clone(&self.monitor),
            interrupts: Arc::clone(&self.interrupts),
        }
    }
}

impl<C: Clock> ControlHandle<C> {
    pub fn new(monitor: Arc<ProgressMonitor<C>>) -> Self {
        Self {
            monitor,
            interrupts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn pause(&self) -> RunPhase {
        self.monitor.request_pause()
    }

    pub fn resume(&self) -> RunPhase {
        self.monitor.request_resume()
    }

    pub fn cancel(&self) -> RunPhase {
        self.monitor.request_cancel()
    }

    pub fn is_paused(&self) -> bool {
        self.monitor.is_paused()
    }

    pub fn is_cancelled(&self) -> bool {
        self.monitor.is_cancelled()
    }

    pub fn phase(&self) -> RunPhase {
        self.monitor.phase()
    }

    pub fn report(&self) -> ProgressReport {
        self.monitor.report()
    }

    /// Record one interrupt and decide what it means
    pub fn on_interrupt(&self) -> InterruptAction {
        let previous = self.interrupts.fetch_add(1, Ordering::SeqCst);
        if previous == 0 {
            let phase = self.cancel();
            tracing::warn!(%phase, "interrupt received, finishing current batch");
            InterruptAction::Cancel
        } else {
            tracing::warn!("second interrupt received, exiting");
            InterruptAction::Exit
        }
    }

    /// Route Ctrl-C to this run.
    ///
    /// The first interrupt cancels gracefully; a second exits with status 130.
    /// Only one handler can be installed per process.
    pub fn install_interrupt_handler(&self) -> Result<(), ControlError> {
        let handle = self.clone();
        ctrlc::set_handler(move || {
            if handle.on_interrupt() == InterruptAction::Exit {
                std::process::exit(FORCED_EXIT_CODE);
            }
        })?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
