// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! trickle-core: timing, batching and progress primitives for the trickle
//! delivery simulator
//!
//! This crate provides:
//! - Timing models that pick the wait before each batch
//! - Manifest batching
//! - The run phase state machine
//! - A thread-safe progress monitor with checkpoints and a pause/cancel gate

pub mod checkpoint;
pub mod clock;
pub mod error;
pub mod manifest;
pub mod monitor;
pub mod phase;
pub mod progress;
pub mod resources;
pub mod timing;

pub use checkpoint::{Checkpoint, CheckpointSink, SinkError};
pub use clock::{Clock, FakeClock, SystemClock};
pub use error::{ConfigError, ExecutorError, StateError};
pub use manifest::{Batch, Manifest};
pub use monitor::{MonitorConfig, ProgressMonitor};
pub use phase::{PhaseRequest, RunPhase};
pub use progress::{Confidence, EtaEstimate, PerformanceWarning, ProgressReport, Trend};
pub use resources::{ResourceSample, ResourceSampler};
pub use timing::{
    AdaptiveModel, PoissonModel, RandomModel, TimingConfig, TimingModel, UniformModel,
};
