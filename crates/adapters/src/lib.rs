// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Boundary adapters: work execution, resource sampling, checkpoint sinks

pub mod checkpoint;
pub mod executor;
pub mod resources;
pub mod traced;

pub use checkpoint::TracingCheckpointSink;
pub use executor::{ExecutorError, NoOpExecutor, WorkExecutor};
pub use resources::SysinfoSampler;
pub use traced::TracedExecutor;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use checkpoint::FakeCheckpointSink;
#[cfg(any(test, feature = "test-support"))]
pub use executor::FakeExecutor;
#[cfg(any(test, feature = "test-support"))]
pub use resources::FakeResourceSampler;
