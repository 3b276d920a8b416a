// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timing models for inter-batch delays
//!
//! A timing model only computes the next delay. It never sleeps, never reads
//! the clock and never performs I/O; the orchestrator owns the model and does
//! the waiting.
//!
//! Four variants are provided:
//! - [`UniformModel`]: always the base interval
//! - [`RandomModel`]: symmetric jitter of `±random_factor` around the base
//! - [`PoissonModel`]: exponential gaps with an occasional burst rate
//! - [`AdaptiveModel`]: exponential gaps around a mean that drifts with its own output

use crate::error::{require_finite, require_probability, ConfigError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp1};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt::Debug;
use std::time::Duration;

/// Produces the wait before the next batch.
///
/// Implementations return a value `>= 0` and never block. The orchestrator
/// calls the model from a single task, so stateful models need no locking.
pub trait TimingModel: Send + Debug {
    /// Next delay in seconds
    fn next_interval(&mut self) -> f64;

    /// Next delay as a `Duration`
    fn next_delay(&mut self) -> Duration {
        seconds_to_duration(self.next_interval())
    }

    /// Restore the model to its freshly-constructed state
    fn reset(&mut self) {}

    fn base_interval(&self) -> f64;

    fn name(&self) -> &'static str;
}

fn seconds_to_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(if secs > 0.0 {
        Duration::MAX
    } else {
        Duration::ZERO
    })
}

fn validate_base(base_interval: f64) -> Result<f64, ConfigError> {
    let base_interval = require_finite("base_interval", base_interval)?;
    if base_interval < 0.0 {
        return Err(ConfigError::NegativeInterval(base_interval));
    }
    Ok(base_interval)
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Fixed intervals
#[derive(Debug, Clone)]
pub struct UniformModel {
    base_interval: f64,
}

impl UniformModel {
    pub fn new(base_interval: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            base_interval: validate_base(base_interval)?,
        })
    }
}

impl TimingModel for UniformModel {
    fn next_interval(&mut self) -> f64 {
        self.base_interval
    }

    fn base_interval(&self) -> f64 {
        self.base_interval
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}

/// Symmetric variation around the base interval, floored at zero
#[derive(Debug, Clone)]
pub struct RandomModel {
    base_interval: f64,
    random_factor: f64,
    rng: StdRng,
}

impl RandomModel {
    pub fn new(base_interval: f64, random_factor: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            base_interval: validate_base(base_interval)?,
            random_factor: require_probability("random_factor", random_factor)?,
            rng: rng_from(None),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = rng_from(Some(seed));
        self
    }

    pub fn random_factor(&self) -> f64 {
        self.random_factor
    }
}

impl TimingModel for RandomModel {
    fn next_interval(&mut self) -> f64 {
        let variation = if self.random_factor > 0.0 {
            self.rng
                .random_range(-self.random_factor..=self.random_factor)
        } else {
            0.0
        };
        (self.base_interval * (1.0 + variation)).max(0.0)
    }

    fn base_interval(&self) -> f64 {
        self.base_interval
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Two-component exponential mixture.
///
/// With probability `burst_probability` the gap is drawn at
/// `burst_rate_multiplier` times the base rate, otherwise at the base rate
/// (`1 / base_interval`).
#[derive(Debug, Clone)]
pub struct PoissonModel {
    base_interval: f64,
    burst_probability: f64,
    burst_rate_multiplier: f64,
    rng: StdRng,
}

impl PoissonModel {
    pub fn new(
        base_interval: f64,
        burst_probability: f64,
        burst_rate_multiplier: f64,
    ) -> Result<Self, ConfigError> {
        let base_interval = validate_base(base_interval)?;
        let burst_probability = require_probability("burst_probability", burst_probability)?;
        let burst_rate_multiplier = require_finite("burst_rate_multiplier", burst_rate_multiplier)?;
        if burst_rate_multiplier <= 0.0 {
            return Err(ConfigError::NonPositiveBurstMultiplier(burst_rate_multiplier));
        }
        Ok(Self {
            base_interval,
            burst_probability,
            burst_rate_multiplier,
            rng: rng_from(None),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = rng_from(Some(seed));
        self
    }
}

impl TimingModel for PoissonModel {
    fn next_interval(&mut self) -> f64 {
        if self.base_interval == 0.0 {
            return 0.0;
        }
        let mean = if self.rng.random_bool(self.burst_probability) {
            self.base_interval / self.burst_rate_multiplier
        } else {
            self.base_interval
        };
        let draw: f64 = Exp1.sample(&mut self.rng);
        draw * mean
    }

    fn base_interval(&self) -> f64 {
        self.base_interval
    }

    fn name(&self) -> &'static str {
        "poisson"
    }
}

/// Exponential gaps around a mean that follows an EMA of recent output
#[derive(Debug, Clone)]
pub struct AdaptiveModel {
    base_interval: f64,
    adaptation_rate: f64,
    history_size: usize,
    history: VecDeque<f64>,
    current_mean: f64,
    rng: StdRng,
}

impl AdaptiveModel {
    pub fn new(
        base_interval: f64,
        adaptation_rate: f64,
        history_size: usize,
    ) -> Result<Self, ConfigError> {
        let base_interval = validate_base(base_interval)?;
        let adaptation_rate = require_finite("adaptation_rate", adaptation_rate)?;
        if adaptation_rate <= 0.0 || adaptation_rate > 1.0 {
            return Err(ConfigError::AdaptationRateOutOfRange(adaptation_rate));
        }
        if history_size < 1 {
            return Err(ConfigError::EmptyHistory);
        }
        Ok(Self {
            base_interval,
            adaptation_rate,
            history_size,
            history: VecDeque::with_capacity(history_size),
            current_mean: base_interval,
            rng: rng_from(None),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = rng_from(Some(seed));
        self
    }

    pub fn current_mean(&self) -> f64 {
        self.current_mean
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn push(&mut self, interval: f64) {
        self.history.push_back(interval);
        while self.history.len() > self.history_size {
            self.history.pop_front();
        }
        if self.history.len() > 1 {
            let recent = self.history.iter().sum::<f64>() / self.history.len() as f64;
            self.current_mean =
                (1.0 - self.adaptation_rate) * self.current_mean + self.adaptation_rate * recent;
        }
    }
}

impl TimingModel for AdaptiveModel {
    fn next_interval(&mut self) -> f64 {
        let interval = if self.current_mean > 0.0 {
            let draw: f64 = Exp1.sample(&mut self.rng);
            draw * self.current_mean
        } else {
            0.0
        };
        self.push(interval);
        interval
    }

    fn reset(&mut self) {
        self.history.clear();
        self.current_mean = self.base_interval;
    }

    fn base_interval(&self) -> f64 {
        self.base_interval
    }

    fn name(&self) -> &'static str {
        "adaptive"
    }
}

fn default_random_factor() -> f64 {
    0.3
}

fn default_burst_probability() -> f64 {
    0.1
}

fn default_burst_rate_multiplier() -> f64 {
    5.0
}

fn default_adaptation_rate() -> f64 {
    0.1
}

fn default_history_size() -> usize {
    10
}

/// Validated-on-build description of a timing model.
///
/// Selected once per run; the resulting model is a concrete type behind
/// `Box<dyn TimingModel>`, so the batch loop never dispatches on names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum TimingConfig {
    Uniform {
        base_interval: f64,
    },
    Random {
        base_interval: f64,
        #[serde(default = "default_random_factor")]
        random_factor: f64,
    },
    Poisson {
        base_interval: f64,
        #[serde(default = "default_burst_probability")]
        burst_probability: f64,
        #[serde(default = "default_burst_rate_multiplier")]
        burst_rate_multiplier: f64,
    },
    Adaptive {
        base_interval: f64,
        #[serde(default = "default_adaptation_rate")]
        adaptation_rate: f64,
        #[serde(default = "default_history_size")]
        history_size: usize,
    },
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig::Uniform { base_interval: 5.0 }
    }
}

impl TimingConfig {
    pub fn base_interval(&self) -> f64 {
        match self {
            TimingConfig::Uniform { base_interval }
            | TimingConfig::Random { base_interval, .. }
            | TimingConfig::Poisson { base_interval, .. }
            | TimingConfig::Adaptive { base_interval, .. } => *base_interval,
        }
    }

    /// Check every parameter without keeping the model
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build(Some(0)).map(|_| ())
    }

    /// Construct the model. `seed` makes stochastic variants reproducible.
    pub fn build(&self, seed: Option<u64>) -> Result<Box<dyn TimingModel>, ConfigError> {
        let model: Box<dyn TimingModel> = match *self {
            TimingConfig::Uniform { base_interval } => Box::new(UniformModel::new(base_interval)?),
            TimingConfig::Random {
                base_interval,
                random_factor,
            } => {
                let model = RandomModel::new(base_interval, random_factor)?;
                Box::new(match seed {
                    Some(seed) => model.with_seed(seed),
                    None => model,
                })
            }
            TimingConfig::Poisson {
                base_interval,
                burst_probability,
                burst_rate_multiplier,
            } => {
                let model =
                    PoissonModel::new(base_interval, burst_probability, burst_rate_multiplier)?;
                Box::new(match seed {
                    Some(seed) => model.with_seed(seed),
                    None => model,
                })
            }
            TimingConfig::Adaptive {
                base_interval,
                adaptation_rate,
                history_size,
            } => {
                let model = AdaptiveModel::new(base_interval, adaptation_rate, history_size)?;
                Box::new(match seed {
                    Some(seed) => model.with_seed(seed),
                    None => model,
                })
            }
        };
        Ok(model)
    }
}

#[cfg(test)]
#[path = "timing_tests.rs"]
mod tests;
