// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake executor for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ExecutorError, WorkExecutor};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Hook<I> = Arc<dyn Fn(&I) + Send + Sync>;

struct FakeState<I> {
    calls: Vec<I>,
    fail_on: Vec<I>,
    panic_on: Vec<I>,
}

/// Fake executor that records every item it is given.
///
/// Items listed with [`fail_on`](Self::fail_on) return an `ExecutorError`;
/// items listed with [`panic_on`](Self::panic_on) panic, which is how tests
/// reach the scheduler's "executor broke its contract" path.
pub struct FakeExecutor<I> {
    state: Arc<Mutex<FakeState<I>>>,
    active: Arc<AtomicUsize>,
    max_active: Arc<AtomicUsize>,
    delay: Option<Duration>,
    hook: Option<Hook<I>>,
}

impl<I> Clone for FakeExecutor<I> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            active: Arc::clone(&self.active),
            max_active: Arc::clone(&self.max_active),
            delay: self.delay,
            hook: self.hook.clone(),
        }
    }
}

impl<I> Default for FakeExecutor<I> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                calls: Vec::new(),
                fail_on: Vec::new(),
                panic_on: Vec::new(),
            })),
            active: Arc::new(AtomicUsize::new(0)),
            max_active: Arc::new(AtomicUsize::new(0)),
            delay: None,
            hook: None,
        }
    }
}

impl<I: Clone + PartialEq> FakeExecutor<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Run `hook` at the start of every call, before the result is decided
    pub fn on_execute(mut self, hook: impl Fn(&I) + Send + Sync + 'static) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    pub fn fail_on(&self, item: I) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .fail_on
            .push(item);
    }

    pub fn panic_on(&self, item: I) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .panic_on
            .push(item);
    }

    /// Items executed so far, in call order
    pub fn calls(&self) -> Vec<I> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .len()
    }

    /// Highest number of calls that were in flight at once
    pub fn max_concurrency(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

/// Decrements the in-flight counter even if the call panics
struct ActiveGuard<'a>(&'a AtomicUsize);

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl<I> WorkExecutor for FakeExecutor<I>
where
    I: Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static,
{
    type Item = I;

    #[allow(clippy::panic)]
    async fn execute(&self, item: &I) -> Result<(), ExecutorError> {
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = ActiveGuard(&self.active);
        self.max_active.fetch_max(now_active, Ordering::SeqCst);

        if let Some(hook) = &self.hook {
            hook(item);
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let (fail, panic) = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            state.calls.push(item.clone());
            (state.fail_on.contains(item), state.panic_on.contains(item))
        };

        if panic {
            panic!("fake executor told to panic on {:?}", item);
        }
        if fail {
            return Err(ExecutorError::new(format!("fake failure for {:?}", item)));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
