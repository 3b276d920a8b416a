// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Global tracing setup for binaries embedding the engine

use crate::error::LoggingError;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Append to this file, creating parent directories as needed
    File(PathBuf),
}

/// Install the global subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Keep the returned
/// guard alive for as long as logs should be flushed.
pub fn init_tracing(target: LogTarget) -> Result<WorkerGuard, LoggingError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (writer, guard) = match target {
        LogTarget::Stderr => tracing_appender::non_blocking(std::io::stderr()),
        LogTarget::File(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| LoggingError::InvalidPath(path.clone()))?;
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            std::fs::create_dir_all(&dir)?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, file_name))
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    Ok(guard)
}
