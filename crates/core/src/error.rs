// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy shared by the scheduler, monitor and timing models

use thiserror::Error;

/// Invalid construction parameters. Always raised before a run starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("base_interval must be non-negative, got {0}")]
    NegativeInterval(f64),
    #[error("{name} must be a finite number")]
    NotFinite { name: &'static str },
    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("burst_rate_multiplier must be positive, got {0}")]
    NonPositiveBurstMultiplier(f64),
    #[error("adaptation_rate must be in (0.0, 1.0], got {0}")]
    AdaptationRateOutOfRange(f64),
    #[error("history_size must be at least 1")]
    EmptyHistory,
    #[error("batch_size must be at least 1")]
    ZeroBatchSize,
    #[error("worker_count must be at least 1")]
    ZeroWorkers,
    #[error("checkpoint_every must be at least 1")]
    ZeroCheckpointInterval,
    #[error("report interval must be greater than zero")]
    ZeroReportInterval,
}

/// Misuse of the progress monitor API. Indicates a programming defect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("progress monitor already started")]
    AlreadyStarted,
}

/// A single work item failed. Recorded by the monitor, never fatal to a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ExecutorError {
    pub reason: String,
}

impl ExecutorError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for ExecutorError {
    fn from(e: std::io::Error) -> Self {
        Self::new(format!("io: {}", e))
    }
}

pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { name })
    }
}

pub(crate) fn require_probability(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    let value = require_finite(name, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::ProbabilityOutOfRange { name, value })
    }
}
