// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checkpoint sinks that do not touch the filesystem
//!
//! File-backed sinks live in `trickle-storage`.

mod log;

pub use log::TracingCheckpointSink;
pub use trickle_core::{Checkpoint, CheckpointSink, SinkError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeCheckpointSink;
