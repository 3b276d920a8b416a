// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic progress reporting
//!
//! The monitor never pushes to a display. [`ProgressReporter`] pulls a
//! [`ProgressReport`] on a timer and hands it to a render callback, sampling
//! resources and logging performance warnings on the same tick.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use trickle_core::{Clock, ConfigError, ProgressMonitor, ProgressReport};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    /// Minimum gap between two rounds of performance warnings
    #[serde(with = "humantime_serde")]
    pub warning_cooldown: Duration,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            warning_cooldown: Duration::from_secs(30),
        }
    }
}

impl ReporterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroReportInterval);
        }
        Ok(())
    }
}

/// Background task rendering progress until the run ends or `stop` is called
pub struct ProgressReporter {
    handle: JoinHandle<()>,
}

impl ProgressReporter {
    /// Start reporting. Must be called inside a tokio runtime.
    ///
    /// The task renders one last report after the run reaches a terminal
    /// phase, then exits on its own.
    pub fn spawn<C, F>(
        monitor: Arc<ProgressMonitor<C>>,
        config: ReporterConfig,
        mut render: F,
    ) -> Result<Self, ConfigError>
    where
        C: Clock,
        F: FnMut(&ProgressReport) + Send + 'static,
    {
        config.validate()?;
        tracing::debug!(
            interval = %humantime::format_duration(config.interval),
            "progress reporter started"
        );

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last_warned: Option<Instant> = None;

            loop {
                ticker.tick().await;
                monitor.sample_resources();

                let warnings = monitor.warnings();
                let cooled = last_warned.map_or(true, |at| at.elapsed() >= config.warning_cooldown);
                if !warnings.is_empty() && cooled {
                    for warning in &warnings {
                        tracing::warn!(%warning, "performance warning");
                    }
                    last_warned = Some(Instant::now());
                }

                let report = monitor.report();
                render(&report);
                if report.phase.is_terminal() {
                    break;
                }
            }
        });

        Ok(Self { handle })
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the task and wait for it to go away
    pub async fn stop(self) {
        self.handle.abort();
        // Cancellation is the expected result
        let _ = self.handle.await;
    }
}

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod tests;
