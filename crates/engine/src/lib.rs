// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! trickle execution engine: batch scheduling, run control and reporting

mod control;
mod error;
pub mod logging;
mod orchestrator;
mod reporter;

pub use control::{ControlHandle, InterruptAction, FORCED_EXIT_CODE};
pub use error::{ControlError, LoggingError, RunError};
pub use orchestrator::{Orchestrator, RunConfig, RunOutcome, RunSummary};
pub use reporter::{ProgressReporter, ReporterConfig};
