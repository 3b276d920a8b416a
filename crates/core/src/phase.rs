// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run phase state machine
//!
//! ```text
//! Pending → Running ⇄ Paused → Cancelling → Cancelled
//!              └────────┴──────────┴──────→ Completed | Failed
//! ```
//!
//! `Running ⇄ Paused` is the only cycle. Terminal phases absorb every request.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// Not started yet
    Pending,
    Running,
    Paused,
    /// Cancel requested; the in-flight batch is finishing
    Cancelling,
    Cancelled,
    Completed,
    Failed,
}

/// Requests that move a run between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseRequest {
    Start,
    Pause,
    Resume,
    Cancel,
    /// All batches done (or the in-flight batch finished after a cancel)
    Finish,
    /// Unrecoverable condition
    Fail,
}

impl RunPhase {
    /// Pure transition function
    pub fn apply(self, request: PhaseRequest) -> RunPhase {
        use PhaseRequest as R;
        use RunPhase as P;

        match (self, request) {
            (phase, _) if phase.is_terminal() => phase,

            // Pause and cancel are honoured before the run starts
            (P::Pending, R::Start) => P::Running,
            (P::Pending | P::Running, R::Pause) => P::Paused,
            (P::Paused, R::Resume) => P::Running,
            (P::Paused, R::Start) => P::Paused,
            (P::Pending | P::Running | P::Paused, R::Cancel) => P::Cancelling,

            (P::Running | P::Paused, R::Finish) => P::Completed,
            (P::Cancelling, R::Finish) => P::Cancelled,
            (P::Pending | P::Running | P::Paused | P::Cancelling, R::Fail) => P::Failed,

            (phase, _) => phase,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RunPhase::Cancelled | RunPhase::Completed | RunPhase::Failed)
    }

    pub fn is_paused(self) -> bool {
        self == RunPhase::Paused
    }

    /// True once cancellation has been requested, including after the run stopped
    pub fn is_cancelled(self) -> bool {
        matches!(self, RunPhase::Cancelling | RunPhase::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunPhase::Pending => "pending",
            RunPhase::Running => "running",
            RunPhase::Paused => "paused",
            RunPhase::Cancelling => "cancelling",
            RunPhase::Cancelled => "cancelled",
            RunPhase::Completed => "completed",
            RunPhase::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
