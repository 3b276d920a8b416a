// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checkpoint sink that writes to the log.

use super::{Checkpoint, CheckpointSink, SinkError};

/// Logs each checkpoint as a structured `info` event.
///
/// Useful when operators only read logs; never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingCheckpointSink;

impl TracingCheckpointSink {
    pub fn new() -> Self {
        Self
    }
}

impl CheckpointSink for TracingCheckpointSink {
    fn emit(&self, checkpoint: &Checkpoint) -> Result<(), SinkError> {
        tracing::info!(
            run_id = %checkpoint.run_id,
            completed = checkpoint.completed_count,
            failed = checkpoint.failed_count,
            total = checkpoint.total_count,
            elapsed_s = checkpoint.elapsed_seconds,
            phase = %checkpoint.run_phase,
            cpu_percent = checkpoint.resources.map(|r| r.cpu_percent),
            memory_mb = checkpoint.resources.map(|r| r.memory_used_mb),
            "checkpoint"
        );
        Ok(())
    }
}
