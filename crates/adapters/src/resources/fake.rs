// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake resource sampler for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ResourceSample, ResourceSampler};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays queued samples, then repeats the last one.
///
/// An empty fake behaves like an unavailable facility.
#[derive(Clone, Default)]
pub struct FakeResourceSampler {
    queued: Arc<Mutex<VecDeque<ResourceSample>>>,
    last: Arc<Mutex<Option<ResourceSample>>>,
    calls: Arc<Mutex<usize>>,
}

impl FakeResourceSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, sample: ResourceSample) {
        self.queued
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(sample);
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ResourceSampler for FakeResourceSampler {
    fn sample(&self) -> Option<ResourceSample> {
        *self.calls.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        let next = self
            .queued
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        if next.is_some() {
            *last = next;
        }
        *last
    }
}
