// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

//! The global subscriber can only be installed once per process, so the
//! whole lifecycle is one test in its own binary.

use trickle_engine::logging::{init_tracing, LogTarget};
use trickle_engine::LoggingError;

#[test]
fn file_logging_writes_and_refuses_second_init() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs/trickle.log");

    let guard = init_tracing(LogTarget::File(path.clone())).unwrap();
    tracing::info!(batch = 3, "batch finished");

    let second = init_tracing(LogTarget::Stderr);
    assert!(matches!(second, Err(LoggingError::AlreadyInitialized)));

    // Dropping the guard flushes the background writer
    drop(guard);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("batch finished"), "Logs:\n{}", contents);
    assert!(contents.contains("batch=3"), "Logs:\n{}", contents);
}
