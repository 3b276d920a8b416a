// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Optional CPU/memory snapshots

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceSample {
    pub cpu_percent: f32,
    pub memory_used_mb: f64,
    /// Share of total system memory used by this process
    pub memory_percent: f32,
}

/// Source of resource snapshots.
///
/// Returning `None` means the facility is unavailable right now; the monitor
/// treats that as "no sample", never as an error.
pub trait ResourceSampler: Send + Sync {
    fn sample(&self) -> Option<ResourceSample>;
}
