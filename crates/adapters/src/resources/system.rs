// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process resource sampling via `sysinfo`

use super::{ResourceSample, ResourceSampler};
use std::sync::Mutex;
use sysinfo::{MemoryRefreshKind, Pid, ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Samples CPU and memory of the current process.
///
/// CPU usage is measured between consecutive refreshes, so the first sample
/// after construction reads `0.0`.
pub struct SysinfoSampler {
    pid: Option<Pid>,
    system: Mutex<System>,
}

impl SysinfoSampler {
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!(error = e, "current process id unavailable, sampling disabled");
                None
            }
        };
        Self {
            pid,
            system: Mutex::new(System::new_with_specifics(
                RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
            )),
        }
    }
}

impl Default for SysinfoSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceSampler for SysinfoSampler {
    fn sample(&self) -> Option<ResourceSample> {
        let pid = self.pid?;
        let mut system = self.system.lock().unwrap_or_else(|e| e.into_inner());

        system.refresh_memory_specifics(MemoryRefreshKind::nothing().with_ram());
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );

        let process = system.process(pid)?;
        let rss = process.memory() as f64;
        let total = system.total_memory() as f64;
        let memory_percent = if total > 0.0 {
            (rss / total * 100.0) as f32
        } else {
            0.0
        };

        Some(ResourceSample {
            cpu_percent: process.cpu_usage(),
            memory_used_mb: rss / BYTES_PER_MB,
            memory_percent,
        })
    }
}
