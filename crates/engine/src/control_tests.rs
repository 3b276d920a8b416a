// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use trickle_core::{FakeClock, MonitorConfig};

fn handle() -> ControlHandle<FakeClock> {
    let monitor =
        ProgressMonitor::with_clock(MonitorConfig::default(), FakeClock::new()).unwrap();
    monitor.record_start(10, 10).unwrap();
    ControlHandle::new(Arc::new(monitor))
}

#[test]
fn pause_resume_cancel_map_to_monitor() {
    let control = handle();
    assert_eq!(control.pause(), RunPhase::Paused);
    assert!(control.is_paused());
    assert_eq!(control.resume(), RunPhase::Running);
    assert_eq!(control.cancel(), RunPhase::Cancelling);
    assert!(control.is_cancelled());
    assert_eq!(control.report().phase, RunPhase::Cancelling);
}

#[test]
fn clones_share_the_run() {
    let control = handle();
    let other = control.clone();
    other.pause();
    assert_eq!(control.phase(), RunPhase::Paused);
}

#[test]
fn first_interrupt_cancels_second_exits() {
    let control = handle();
    let other = control.clone();

    assert_eq!(control.on_interrupt(), InterruptAction::Cancel);
    assert_eq!(control.phase(), RunPhase::Cancelling);
    // The count is shared across clones
    assert_eq!(other.on_interrupt(), InterruptAction::Exit);
    assert_eq!(control.on_interrupt(), InterruptAction::Exit);
}

#[test]
fn interrupt_while_paused_cancels() {
    let control = handle();
    control.pause();
    assert_eq!(control.on_interrupt(), InterruptAction::Cancel);
    assert!(!control.is_paused());
    assert!(control.is_cancelled());
}
