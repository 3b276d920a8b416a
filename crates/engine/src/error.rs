// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use std::path::PathBuf;
use thiserror::Error;
use trickle_core::{ConfigError, StateError};

/// Errors that stop a run from starting or completing.
///
/// Per-item failures never appear here; they are counted in the report.
/// Cancellation is not an error either, see [`RunOutcome`](crate::RunOutcome).
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("monitor misuse: {0}")]
    State(#[from] StateError),
}

/// Errors installing the OS interrupt handler
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("failed to install interrupt handler: {0}")]
    Handler(#[from] ctrlc::Error),
}

/// Errors setting up logging
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("log path has no file name: {0}")]
    InvalidPath(PathBuf),
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}
