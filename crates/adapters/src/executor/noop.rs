// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op executor for dry runs.

use super::{ExecutorError, WorkExecutor};
use async_trait::async_trait;
use std::marker::PhantomData;

/// Executor that accepts every item without doing anything.
///
/// Used for dry runs that only exercise timing and progress reporting.
#[derive(Debug)]
pub struct NoOpExecutor<I> {
    _item: PhantomData<fn(&I)>,
}

impl<I> NoOpExecutor<I> {
    pub fn new() -> Self {
        Self { _item: PhantomData }
    }
}

impl<I> Default for NoOpExecutor<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> Clone for NoOpExecutor<I> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

#[async_trait]
impl<I: Send + Sync + 'static> WorkExecutor for NoOpExecutor<I> {
    type Item = I;

    async fn execute(&self, _item: &I) -> Result<(), ExecutorError> {
        Ok(())
    }
}
