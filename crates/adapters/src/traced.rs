// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced executor wrapper for consistent observability

use crate::executor::{ExecutorError, WorkExecutor};
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::Instrument;

/// Wrapper that adds tracing to any WorkExecutor
#[derive(Clone)]
pub struct TracedExecutor<E> {
    inner: E,
}

impl<E> TracedExecutor<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

#[async_trait]
impl<E> WorkExecutor for TracedExecutor<E>
where
    E: WorkExecutor,
    E::Item: Debug,
{
    type Item = E::Item;

    async fn execute(&self, item: &E::Item) -> Result<(), ExecutorError> {
        let span = tracing::info_span!("executor.execute", item = ?item);

        async {
            tracing::debug!("starting");

            let start = std::time::Instant::now();
            let result = self.inner.execute(item).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "delivered"),
                Err(e) => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "delivery failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
