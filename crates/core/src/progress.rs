// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress metrics: throughput, ETA, trend and confidence
//!
//! Everything here is pure. [`ProgressMonitor`](crate::monitor::ProgressMonitor)
//! owns the state and calls these functions while holding its lock.

use crate::phase::RunPhase;
use crate::resources::ResourceSample;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Ratio above which the recent half of the window counts as faster
const IMPROVING_RATIO: f64 = 1.05;
/// Ratio below which the recent half of the window counts as slower
const DEGRADING_RATIO: f64 = 0.95;
/// Bounds on how far a trend may bend the ETA
const MIN_TREND_ADJUSTMENT: f64 = 0.8;
const MAX_TREND_ADJUSTMENT: f64 = 1.2;
/// Gap coefficient of variation below which a full window is trusted
const STEADY_GAP_VARIATION: f64 = 0.5;

pub const MEMORY_WARNING_PERCENT: f32 = 85.0;
pub const CPU_WARNING_PERCENT: f32 = 90.0;
pub const LOW_THROUGHPUT: f64 = 0.1;
/// Completions required before low throughput is reported
const LOW_THROUGHPUT_MIN_ITEMS: u64 = 10;
/// CPU samples averaged for the CPU warning
const CPU_WARNING_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Degrading,
    Stable,
}

impl Trend {
    fn from_ratio(ratio: f64) -> Self {
        if ratio > IMPROVING_RATIO {
            Trend::Improving
        } else if ratio < DEGRADING_RATIO {
            Trend::Degrading
        } else {
            Trend::Stable
        }
    }
}

/// How much the ETA can be trusted, from the amount and steadiness of history
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Numeric score in `0..=2`
    pub fn score(self) -> u8 {
        match self {
            Confidence::Low => 0,
            Confidence::Medium => 1,
            Confidence::High => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EtaEstimate {
    /// `None` when throughput is zero and no estimate can be made
    pub remaining: Option<Duration>,
    pub trend: Trend,
    pub confidence: Confidence,
}

impl EtaEstimate {
    pub fn is_unknown(&self) -> bool {
        self.remaining.is_none()
    }
}

/// Items per second across `samples` completion timestamps.
///
/// Fewer than two samples, or samples that all share one instant, give `0.0`.
pub fn throughput(samples: &VecDeque<Instant>) -> f64 {
    match (samples.front(), samples.back()) {
        (Some(first), Some(last)) => rate(*first, *last, samples.len()),
        _ => 0.0,
    }
}

fn rate(first: Instant, last: Instant, count: usize) -> f64 {
    if count < 2 {
        return 0.0;
    }
    let span = last.saturating_duration_since(first).as_secs_f64();
    if span <= 0.0 {
        return 0.0;
    }
    (count - 1) as f64 / span
}

/// Second-half throughput over first-half throughput.
///
/// `None` until each half holds at least two samples.
pub fn trend_ratio(samples: &VecDeque<Instant>) -> Option<f64> {
    let count = samples.len();
    if count < 4 {
        return None;
    }
    let mid = count / 2;
    let early = rate(samples[0], samples[mid - 1], mid);
    let recent = rate(samples[mid], samples[count - 1], count - mid);
    if early > 0.0 {
        Some(recent / early)
    } else {
        None
    }
}

pub fn trend(samples: &VecDeque<Instant>) -> Trend {
    trend_ratio(samples).map_or(Trend::Stable, Trend::from_ratio)
}

/// Low until the window holds `window` samples; then High if the gaps between
/// completions are steady, Medium otherwise.
pub fn confidence(samples: &VecDeque<Instant>, window: usize) -> Confidence {
    if samples.len() < window.max(2) {
        return Confidence::Low;
    }
    let gaps: Vec<f64> = samples
        .iter()
        .zip(samples.iter().skip(1))
        .map(|(a, b)| b.saturating_duration_since(*a).as_secs_f64())
        .collect();
    let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
    if mean <= 0.0 {
        return Confidence::Medium;
    }
    let variance = gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / gaps.len() as f64;
    if variance.sqrt() / mean < STEADY_GAP_VARIATION {
        Confidence::High
    } else {
        Confidence::Medium
    }
}

/// ETA for `remaining` items.
///
/// A non-stable trend bends the throughput by its ratio, clamped to
/// `[0.8, 1.2]`.
pub fn estimate(remaining: u64, samples: &VecDeque<Instant>, window: usize) -> EtaEstimate {
    let confidence = confidence(samples, window);
    let ratio = trend_ratio(samples);
    let trend = ratio.map_or(Trend::Stable, Trend::from_ratio);

    if remaining == 0 {
        return EtaEstimate {
            remaining: Some(Duration::ZERO),
            trend,
            confidence,
        };
    }

    let base = throughput(samples);
    let predicted = match (trend, ratio) {
        (Trend::Stable, _) | (_, None) => base,
        (_, Some(ratio)) => base * ratio.clamp(MIN_TREND_ADJUSTMENT, MAX_TREND_ADJUSTMENT),
    };
    let remaining = if predicted > 0.0 {
        Duration::try_from_secs_f64(remaining as f64 / predicted).ok()
    } else {
        None
    };

    EtaEstimate {
        remaining,
        trend,
        confidence,
    }
}

/// Condition worth telling the operator about. Never affects the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PerformanceWarning {
    HighMemory { percent: f32 },
    HighCpu { percent: f32 },
    LowThroughput { items_per_sec: f64 },
}

impl std::fmt::Display for PerformanceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PerformanceWarning::HighMemory { percent } => {
                write!(f, "high memory usage: {:.1}%", percent)
            }
            PerformanceWarning::HighCpu { percent } => write!(f, "high CPU usage: {:.1}%", percent),
            PerformanceWarning::LowThroughput { items_per_sec } => {
                write!(f, "low throughput: {:.2} items/sec", items_per_sec)
            }
        }
    }
}

/// Warnings for the given state.
///
/// `history_full` gates the low-throughput check so a slow start is not
/// reported before there is enough history to judge.
pub fn performance_warnings(
    latest: Option<&ResourceSample>,
    resource_history: &VecDeque<ResourceSample>,
    throughput: f64,
    completed: u64,
    history_full: bool,
) -> Vec<PerformanceWarning> {
    let mut warnings = Vec::new();

    if let Some(sample) = latest {
        if sample.memory_percent > MEMORY_WARNING_PERCENT {
            warnings.push(PerformanceWarning::HighMemory {
                percent: sample.memory_percent,
            });
        }
    }

    if resource_history.len() >= CPU_WARNING_WINDOW {
        let recent = resource_history.iter().rev().take(CPU_WARNING_WINDOW);
        let mean = recent.map(|s| s.cpu_percent).sum::<f32>() / CPU_WARNING_WINDOW as f32;
        if mean > CPU_WARNING_PERCENT {
            warnings.push(PerformanceWarning::HighCpu { percent: mean });
        }
    }

    if history_full && completed > LOW_THROUGHPUT_MIN_ITEMS && throughput < LOW_THROUGHPUT {
        warnings.push(PerformanceWarning::LowThroughput {
            items_per_sec: throughput,
        });
    }

    warnings
}

/// Everything a renderer or final summary needs, copied out of the monitor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    pub run_id: Option<Uuid>,
    pub phase: RunPhase,
    pub total: u64,
    pub completed: u64,
    pub failed: u64,
    pub elapsed: Duration,
    /// Time since the last recorded completion (or the start)
    pub idle: Duration,
    pub throughput: f64,
    pub eta: EtaEstimate,
    pub batches_completed: u64,
    pub batches_total: u64,
    pub processing_time: Duration,
    pub wait_time: Duration,
    pub resources: Option<ResourceSample>,
    pub peak_cpu_percent: f32,
    pub peak_memory_mb: f64,
    /// Most recent failure reasons, oldest first
    pub recent_failures: Vec<String>,
    /// True when the throughput window has filled
    pub history_full: bool,
}

impl ProgressReport {
    pub fn processed(&self) -> u64 {
        self.completed + self.failed
    }

    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.processed())
    }

    /// Share of items processed, `0.0..=100.0`. An empty run is complete.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.processed() as f64 / self.total as f64 * 100.0
    }

    /// One-line human summary
    pub fn summary_line(&self) -> String {
        let eta = match self.eta.remaining {
            Some(d) if self.remaining() > 0 => format!(" eta={:.0}s", d.as_secs_f64()),
            Some(_) => String::new(),
            None => " eta=unknown".to_string(),
        };
        format!(
            "{} {}/{} ({:.1}%) failed={} batches={}/{} {:.2} items/s elapsed={:.1}s{}",
            self.phase,
            self.processed(),
            self.total,
            self.percent(),
            self.failed,
            self.batches_completed,
            self.batches_total,
            self.throughput,
            self.elapsed.as_secs_f64(),
            eta,
        )
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
