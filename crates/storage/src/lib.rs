// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! File-backed checkpoint sinks
//!
//! Checkpoints are advisory: these files exist for operators inspecting a
//! run, and nothing in the engine reads them back.

mod journal;
mod snapshot;

pub use journal::CheckpointJournal;
pub use snapshot::{CheckpointFile, CHECKPOINT_VERSION};

use std::io;
use thiserror::Error;
use trickle_core::SinkError;

/// Errors that can occur reading or writing checkpoint files
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported checkpoint version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

impl From<StorageError> for SinkError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Io(e) => SinkError::Io(e),
            other => SinkError::Serialize(other.to_string()),
        }
    }
}
