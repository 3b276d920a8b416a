// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work item execution boundary
//!
//! The scheduler never knows what delivering an item means (copy, link,
//! synthesise). It hands each item to a [`WorkExecutor`] and records the
//! result.

mod noop;

pub use noop::NoOpExecutor;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeExecutor;

use async_trait::async_trait;
pub use trickle_core::ExecutorError;

/// Executes one work item.
///
/// Called concurrently from several workers when a run is parallel, so
/// implementations must tolerate overlapping calls.
#[async_trait]
pub trait WorkExecutor: Send + Sync + 'static {
    type Item: Send + Sync + 'static;

    async fn execute(&self, item: &Self::Item) -> Result<(), ExecutorError>;
}
