// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Advisory progress checkpoints
//!
//! A checkpoint is a snapshot for operators. Nothing in this workspace reads
//! one back to resume a run.

use crate::phase::RunPhase;
use crate::resources::ResourceSample;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub run_id: Uuid,
    pub completed_count: u64,
    pub failed_count: u64,
    pub total_count: u64,
    pub elapsed_seconds: f64,
    pub timestamp: DateTime<Utc>,
    pub run_phase: RunPhase,
    /// Absent when no resource sampler is available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceSample>,
}

impl Checkpoint {
    /// Items that reached a terminal state (success or failure)
    pub fn processed(&self) -> u64 {
        self.completed_count + self.failed_count
    }

    pub fn remaining(&self) -> u64 {
        self.total_count.saturating_sub(self.processed())
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(String),
}

/// Receives every periodic checkpoint.
///
/// Called synchronously from worker tasks, one checkpoint at a time and in
/// processed order. Implementations must be quick: a slow sink holds up
/// the worker that crossed the checkpoint, and any worker reaching the next
/// one. They must not call back into the monitor. A failing sink is logged
/// and otherwise ignored.
pub trait CheckpointSink: Send + Sync {
    fn emit(&self, checkpoint: &Checkpoint) -> Result<(), SinkError>;
}
