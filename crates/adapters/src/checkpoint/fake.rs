// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake checkpoint sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Checkpoint, CheckpointSink, SinkError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Records every checkpoint it receives
#[derive(Clone, Default)]
pub struct FakeCheckpointSink {
    checkpoints: Arc<Mutex<Vec<Checkpoint>>>,
    failing: Arc<AtomicBool>,
}

impl FakeCheckpointSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent emits fail (the checkpoint is still recorded)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn checkpoints(&self) -> Vec<Checkpoint> {
        self.checkpoints
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn count(&self) -> usize {
        self.checkpoints
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl CheckpointSink for FakeCheckpointSink {
    fn emit(&self, checkpoint: &Checkpoint) -> Result<(), SinkError> {
        self.checkpoints
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(checkpoint.clone());
        if self.failing.load(Ordering::SeqCst) {
            return Err(SinkError::Io(std::io::Error::other("fake sink failure")));
        }
        Ok(())
    }
}
