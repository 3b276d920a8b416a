// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thread-safe progress ledger
//!
//! [`ProgressMonitor`] is the only state shared between the orchestrator,
//! its workers, the control surface and any renderer. All of it sits behind
//! one mutex; callers only ever see copies.
//!
//! Phase changes wake async waiters through a [`Notify`], so a paused
//! orchestrator resumes (or observes a cancel) without polling.

use crate::checkpoint::{Checkpoint, CheckpointSink};
use crate::clock::{Clock, SystemClock};
use crate::error::{ConfigError, StateError};
use crate::phase::{PhaseRequest, RunPhase};
use crate::progress::{self, EtaEstimate, PerformanceWarning, ProgressReport};
use crate::resources::{ResourceSample, ResourceSampler};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::sync::Notify;
use uuid::Uuid;

/// Failure reasons kept for the final summary
const MAX_RECENT_FAILURES: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Emit a checkpoint each time this many items have been processed
    pub checkpoint_every: u64,
    /// Completion timestamps kept for throughput and ETA
    pub history_size: usize,
    /// Resource samples kept for warnings
    pub resource_history: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            checkpoint_every: 10,
            history_size: 30,
            resource_history: 60,
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.checkpoint_every == 0 {
            return Err(ConfigError::ZeroCheckpointInterval);
        }
        if self.history_size == 0 || self.resource_history == 0 {
            return Err(ConfigError::EmptyHistory);
        }
        Ok(())
    }
}

#[derive(Debug)]
struct ProgressState {
    run_id: Option<Uuid>,
    phase: RunPhase,
    total: u64,
    completed: u64,
    failed: u64,
    started_at: Option<Instant>,
    last_update_at: Option<Instant>,
    finished_at: Option<Instant>,
    /// Completion timestamps, oldest first
    completions: VecDeque<Instant>,
    batches_total: u64,
    batches_completed: u64,
    processing_time: Duration,
    wait_time: Duration,
    failures: VecDeque<String>,
    resources: VecDeque<ResourceSample>,
    peak_cpu_percent: f32,
    peak_memory_mb: f64,
}

impl ProgressState {
    fn new() -> Self {
        Self {
            run_id: None,
            phase: RunPhase::Pending,
            total: 0,
            completed: 0,
            failed: 0,
            started_at: None,
            last_update_at: None,
            finished_at: None,
            completions: VecDeque::new(),
            batches_total: 0,
            batches_completed: 0,
            processing_time: Duration::ZERO,
            wait_time: Duration::ZERO,
            failures: VecDeque::new(),
            resources: VecDeque::new(),
            peak_cpu_percent: 0.0,
            peak_memory_mb: 0.0,
        }
    }

    fn processed(&self) -> u64 {
        self.completed + self.failed
    }

    fn elapsed(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(start) => self
                .finished_at
                .unwrap_or(now)
                .saturating_duration_since(start),
            None => Duration::ZERO,
        }
    }
}

/// Shared metrics, checkpoint trigger and pause/cancel gate for one run.
///
/// Wrap in an `Arc` to share. Every method takes `&self`.
pub struct ProgressMonitor<C: Clock = SystemClock> {
    clock: C,
    config: MonitorConfig,
    state: Mutex<ProgressState>,
    changed: Notify,
    /// Held from the moment a checkpoint is built until the sink returns
    delivery: Mutex<()>,
    sink: Option<Arc<dyn CheckpointSink>>,
    sampler: Option<Arc<dyn ResourceSampler>>,
}

impl ProgressMonitor<SystemClock> {
    pub fn new(config: MonitorConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> ProgressMonitor<C> {
    pub fn with_clock(config: MonitorConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            clock,
            config,
            state: Mutex::new(ProgressState::new()),
            changed: Notify::new(),
            delivery: Mutex::new(()),
            sink: None,
            sampler: None,
        })
    }

    pub fn with_sink(mut self, sink: Arc<dyn CheckpointSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_sampler(mut self, sampler: Arc<dyn ResourceSampler>) -> Self {
        self.sampler = Some(sampler);
        self
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    fn state(&self) -> MutexGuard<'_, ProgressState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Begin the run. Pause or cancel requests made earlier are kept.
    pub fn record_start(&self, total: usize, batches: usize) -> Result<Uuid, StateError> {
        let run_id = Uuid::new_v4();
        let phase = {
            let mut state = self.state();
            if state.started_at.is_some() {
                return Err(StateError::AlreadyStarted);
            }
            let now = self.clock.now();
            state.run_id = Some(run_id);
            state.total = total as u64;
            state.batches_total = batches as u64;
            state.started_at = Some(now);
            state.last_update_at = Some(now);
            state.phase = state.phase.apply(PhaseRequest::Start);
            state.phase
        };
        tracing::info!(%run_id, total, batches, %phase, "run started");
        self.changed.notify_waiters();
        Ok(run_id)
    }

    pub fn record_success(&self) {
        self.record_completion(None);
    }

    pub fn record_failure(&self, reason: impl Into<String>) {
        self.record_completion(Some(reason.into()));
    }

    fn record_completion(&self, failure: Option<String>) {
        let pending = {
            let mut state = self.state();
            if state.started_at.is_none() || state.phase.is_terminal() {
                tracing::warn!(phase = %state.phase, "completion recorded outside a run, ignoring");
                return;
            }
            if state.processed() >= state.total {
                tracing::warn!(
                    total = state.total,
                    "completion recorded past the manifest total, ignoring"
                );
                return;
            }

            let now = self.clock.now();
            match failure {
                Some(reason) => {
                    state.failed += 1;
                    if state.failures.len() == MAX_RECENT_FAILURES {
                        state.failures.pop_front();
                    }
                    state.failures.push_back(reason);
                }
                None => state.completed += 1,
            }
            state.last_update_at = Some(now);
            if state.completions.len() == self.config.history_size {
                state.completions.pop_front();
            }
            state.completions.push_back(now);

            if state.processed() % self.config.checkpoint_every == 0 {
                let checkpoint = self.checkpoint_of(&state);
                // Taken before the state lock is released, so sinks see
                // checkpoints in the order they were built
                let delivery = self.delivery.lock().unwrap_or_else(|e| e.into_inner());
                Some((checkpoint, delivery))
            } else {
                None
            }
        };

        if let Some((checkpoint, _delivery)) = pending {
            self.deliver(&checkpoint);
        }
    }

    fn deliver(&self, checkpoint: &Checkpoint) {
        let processed = checkpoint.processed();
        match &self.sink {
            Some(sink) => match sink.emit(checkpoint) {
                Ok(()) => tracing::debug!(processed, "checkpoint emitted"),
                Err(e) => tracing::warn!(processed, error = %e, "checkpoint sink failed"),
            },
            None => tracing::debug!(processed, "checkpoint reached, no sink"),
        }
    }

    fn checkpoint_of(&self, state: &ProgressState) -> Checkpoint {
        Checkpoint {
            run_id: state.run_id.unwrap_or_else(Uuid::nil),
            completed_count: state.completed,
            failed_count: state.failed,
            total_count: state.total,
            elapsed_seconds: state.elapsed(self.clock.now()).as_secs_f64(),
            timestamp: self.clock.wall_now(),
            run_phase: state.phase,
            resources: state.resources.back().copied(),
        }
    }

    pub fn record_batch(&self, duration: Duration) {
        let mut state = self.state();
        state.batches_completed += 1;
        state.processing_time += duration;
    }

    pub fn record_wait(&self, duration: Duration) {
        self.state().wait_time += duration;
    }

    /// Take a sample from the configured sampler, if any.
    ///
    /// A missing sampler or an unavailable reading is not an error.
    pub fn sample_resources(&self) -> Option<ResourceSample> {
        let sample = self.sampler.as_ref()?.sample()?;
        self.record_resources(sample);
        Some(sample)
    }

    pub fn record_resources(&self, sample: ResourceSample) {
        let mut state = self.state();
        if state.resources.len() == self.config.resource_history {
            state.resources.pop_front();
        }
        state.resources.push_back(sample);
        state.peak_cpu_percent = state.peak_cpu_percent.max(sample.cpu_percent);
        state.peak_memory_mb = state.peak_memory_mb.max(sample.memory_used_mb);
    }

    /// Items per second over the recent completion window
    pub fn throughput(&self) -> f64 {
        progress::throughput(&self.state().completions)
    }

    pub fn eta(&self) -> EtaEstimate {
        let state = self.state();
        let remaining = state.total.saturating_sub(state.processed());
        progress::estimate(remaining, &state.completions, self.config.history_size)
    }

    fn transition(&self, request: PhaseRequest) -> RunPhase {
        let (from, to) = {
            let mut state = self.state();
            let from = state.phase;
            state.phase = from.apply(request);
            if state.phase.is_terminal() && state.finished_at.is_none() {
                state.finished_at = Some(self.clock.now());
            }
            (from, state.phase)
        };
        if from != to {
            tracing::info!(%from, %to, "run phase changed");
            self.changed.notify_waiters();
        }
        to
    }

    pub fn request_pause(&self) -> RunPhase {
        self.transition(PhaseRequest::Pause)
    }

    pub fn request_resume(&self) -> RunPhase {
        self.transition(PhaseRequest::Resume)
    }

    /// Irreversible. Also releases anyone waiting on the pause gate.
    pub fn request_cancel(&self) -> RunPhase {
        self.transition(PhaseRequest::Cancel)
    }

    /// Move to the terminal phase matching how the run ended
    pub fn finish(&self, failed: bool) -> RunPhase {
        let request = if failed {
            PhaseRequest::Fail
        } else {
            PhaseRequest::Finish
        };
        self.transition(request)
    }

    pub fn is_paused(&self) -> bool {
        self.state().phase.is_paused()
    }

    pub fn is_cancelled(&self) -> bool {
        self.state().phase.is_cancelled()
    }

    pub fn phase(&self) -> RunPhase {
        self.state().phase
    }

    pub fn run_id(&self) -> Option<Uuid> {
        self.state().run_id
    }

    /// Resolve once the run is not paused (resumed, cancelled or finished)
    pub async fn wait_while_paused(&self) {
        loop {
            let notified = self.changed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if !self.is_paused() {
                return;
            }
            notified.await;
        }
    }

    /// Resolve once cancellation has been requested
    pub async fn cancelled(&self) {
        loop {
            let notified = self.changed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }

    pub fn snapshot(&self) -> Checkpoint {
        let state = self.state();
        self.checkpoint_of(&state)
    }

    pub fn report(&self) -> ProgressReport {
        let state = self.state();
        let now = self.clock.now();
        let remaining = state.total.saturating_sub(state.processed());
        ProgressReport {
            run_id: state.run_id,
            phase: state.phase,
            total: state.total,
            completed: state.completed,
            failed: state.failed,
            elapsed: state.elapsed(now),
            idle: state
                .last_update_at
                .map_or(Duration::ZERO, |t| now.saturating_duration_since(t)),
            throughput: progress::throughput(&state.completions),
            eta: progress::estimate(remaining, &state.completions, self.config.history_size),
            batches_completed: state.batches_completed,
            batches_total: state.batches_total,
            processing_time: state.processing_time,
            wait_time: state.wait_time,
            resources: state.resources.back().copied(),
            peak_cpu_percent: state.peak_cpu_percent,
            peak_memory_mb: state.peak_memory_mb,
            recent_failures: state.failures.iter().cloned().collect(),
            history_full: state.completions.len() >= self.config.history_size,
        }
    }

    pub fn warnings(&self) -> Vec<PerformanceWarning> {
        let state = self.state();
        progress::performance_warnings(
            state.resources.back(),
            &state.resources,
            progress::throughput(&state.completions),
            state.processed(),
            state.completions.len() >= self.config.history_size,
        )
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
