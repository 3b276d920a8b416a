// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch scheduler
//!
//! One control task walks the manifest batch by batch. Each batch fans out
//! over a bounded set of tokio tasks and fans back in before the timing
//! model is asked for the wait that precedes the next batch. Batches never
//! overlap.

use crate::control::ControlHandle;
use crate::error::RunError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::Instrument;
use trickle_adapters::WorkExecutor;
use trickle_core::{
    Batch, Clock, ConfigError, Manifest, ProgressMonitor, ProgressReport, RunPhase, SystemClock,
    TimingModel,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Items per batch; the last batch may be shorter
    pub batch_size: usize,
    /// Upper bound on concurrent executions when `parallel` is set
    pub worker_count: usize,
    pub parallel: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size: 1,
            worker_count: 4,
            parallel: false,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.worker_count == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }

    /// Concurrent executions within one batch
    pub fn width(&self) -> usize {
        if self.parallel {
            self.worker_count
        } else {
            1
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// Stopped early on request; the in-flight batch was allowed to finish
    Cancelled,
    /// The executor broke its contract (panicked)
    Failed { reason: String },
}

/// Final state of a run, returned for every outcome
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub report: ProgressReport,
}

impl RunSummary {
    pub fn is_completed(&self) -> bool {
        self.outcome == RunOutcome::Completed
    }

    pub fn is_cancelled(&self) -> bool {
        self.outcome == RunOutcome::Cancelled
    }
}

#[derive(Debug, Default)]
struct BatchOutcome {
    succeeded: usize,
    failed: usize,
    /// Set when a worker task panicked
    broken: Option<String>,
}

/// Drives one run of a manifest through an executor
pub struct Orchestrator<E, C: Clock = SystemClock> {
    executor: Arc<E>,
    monitor: Arc<ProgressMonitor<C>>,
    config: RunConfig,
}

impl<E, C> Orchestrator<E, C>
where
    E: WorkExecutor,
    C: Clock,
{
    pub fn new(
        executor: E,
        monitor: Arc<ProgressMonitor<C>>,
        config: RunConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            executor: Arc::new(executor),
            monitor,
            config,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn monitor(&self) -> &Arc<ProgressMonitor<C>> {
        &self.monitor
    }

    /// Handle for pausing, resuming or cancelling this run from elsewhere
    pub fn control(&self) -> ControlHandle<C> {
        ControlHandle::new(Arc::clone(&self.monitor))
    }

    /// Deliver every batch of `manifest`, waiting `timing` between batches.
    ///
    /// Returns a summary for completed, cancelled and failed runs alike. Only
    /// misuse (starting the same monitor twice) is an error.
    pub async fn run(
        &self,
        manifest: Manifest<E::Item>,
        timing: &mut dyn TimingModel,
    ) -> Result<RunSummary, RunError> {
        let batch_size = self.config.batch_size;
        let batches = manifest.batch_count(batch_size);
        let run_id = self.monitor.record_start(manifest.len(), batches)?;

        let span = tracing::info_span!("run", %run_id, total = manifest.len(), batches);
        async {
            tracing::info!(
                timing = timing.name(),
                base_interval = timing.base_interval(),
                batch_size,
                width = self.config.width(),
                "starting run"
            );

            let broken = self.run_batches(&manifest, timing).await;
            let phase = self.monitor.finish(broken.is_some());
            let outcome = match (phase, broken) {
                (RunPhase::Failed, reason) => RunOutcome::Failed {
                    reason: reason.unwrap_or_else(|| "run failed".to_string()),
                },
                (RunPhase::Cancelled, _) => RunOutcome::Cancelled,
                _ => RunOutcome::Completed,
            };

            let report = self.monitor.report();
            tracing::info!(outcome = ?outcome, summary = %report.summary_line(), "run finished");
            Ok(RunSummary { outcome, report })
        }
        .instrument(span)
        .await
    }

    /// Returns the reason the run broke, if it did
    async fn run_batches(
        &self,
        manifest: &Manifest<E::Item>,
        timing: &mut dyn TimingModel,
    ) -> Option<String> {
        for batch in manifest.batches(self.config.batch_size) {
            if self.monitor.is_paused() {
                tracing::info!(batch = batch.number, "paused, waiting for resume");
                self.monitor.wait_while_paused().await;
            }
            if self.monitor.is_cancelled() {
                tracing::info!(batch = batch.number, "cancelled, not starting batch");
                return None;
            }

            let started = Instant::now();
            tracing::info!(batch = batch.number, items = batch.len(), "batch started");
            let outcome = self.dispatch(manifest, &batch).await;
            let elapsed = started.elapsed();
            self.monitor.record_batch(elapsed);
            self.monitor.sample_resources();
            tracing::info!(
                batch = batch.number,
                succeeded = outcome.succeeded,
                failed = outcome.failed,
                elapsed_ms = elapsed.as_millis() as u64,
                throughput = self.monitor.throughput(),
                "batch finished"
            );

            if outcome.broken.is_some() {
                return outcome.broken;
            }
            if batch.is_last() {
                break;
            }
            if self.monitor.is_cancelled() {
                tracing::info!(batch = batch.number, "cancelled, skipping wait");
                return None;
            }

            let delay = timing.next_delay();
            if delay.is_zero() {
                continue;
            }
            tracing::debug!(delay_ms = delay.as_millis() as u64, "waiting before next batch");
            let waited = Instant::now();
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = self.monitor.cancelled() => {
                    tracing::info!("cancelled during wait");
                }
            }
            self.monitor.record_wait(waited.elapsed());
        }
        None
    }

    /// Run one batch on at most `width` concurrent tasks and wait for all of them
    async fn dispatch(&self, manifest: &Manifest<E::Item>, batch: &Batch) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        let mut tasks = JoinSet::new();
        let mut indices = HashMap::new();
        let mut pending = batch.range.clone();

        for index in pending.by_ref().take(self.config.width()) {
            let id = self.spawn_item(&mut tasks, manifest, index);
            indices.insert(id, index);
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((_, true)) => outcome.succeeded += 1,
                Ok((_, false)) => outcome.failed += 1,
                Err(e) => {
                    let index = indices.get(&e.id()).copied();
                    let reason = match index {
                        Some(index) => format!("executor panicked on item {}", index),
                        None => "executor panicked".to_string(),
                    };
                    tracing::error!(item = index, error = %e, "worker task failed");
                    self.monitor.record_failure(reason.clone());
                    outcome.failed += 1;
                    outcome.broken.get_or_insert(reason);
                }
            }

            if let Some(index) = pending.next() {
                let id = self.spawn_item(&mut tasks, manifest, index);
                indices.insert(id, index);
            }
        }

        outcome
    }

    fn spawn_item(
        &self,
        tasks: &mut JoinSet<bool>,
        manifest: &Manifest<E::Item>,
        index: usize,
    ) -> tokio::task::Id {
        let executor = Arc::clone(&self.executor);
        let monitor = Arc::clone(&self.monitor);
        let manifest = manifest.clone();

        let handle = tasks.spawn(async move {
            let Some(item) = manifest.item(index) else {
                monitor.record_failure(format!("item {} missing from manifest", index));
                return false;
            };
            match executor.execute(item).await {
                Ok(()) => {
                    monitor.record_success();
                    true
                }
                Err(e) => {
                    tracing::warn!(item = index, error = %e, "item failed");
                    monitor.record_failure(e.reason);
                    false
                }
            }
        });
        handle.id()
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
