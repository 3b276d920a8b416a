//! Cancellation specs
//!
//! A cancel lets the in-flight batch finish and starts nothing after it.

use crate::prelude::*;

#[tokio::test]
async fn cancel_after_second_batch_leaves_remaining_files_untouched() {
    let monitor = monitor();
    let control = ControlHandle::new(Arc::clone(&monitor));
    let executor = FakeExecutor::new().on_execute({
        let control = control.clone();
        move |item: &String| {
            if *item == file(10) {
                control.cancel();
            }
        }
    });
    let orchestrator = Orchestrator::new(executor.clone(), monitor, sequential(5)).unwrap();

    let summary = run_now(&orchestrator, files(50)).await;

    assert_eq!(summary.outcome, RunOutcome::Cancelled);
    assert_eq!(executor.calls(), (1..=10).map(file).collect::<Vec<_>>());
    assert_eq!(summary.report.completed, 10);
    assert_eq!(summary.report.remaining(), 40);
    assert_eq!(summary.report.batches_completed, 2);
    assert_eq!(control.phase(), RunPhase::Cancelled);
}

#[tokio::test]
async fn cancel_before_start_delivers_nothing() {
    let monitor = monitor();
    let control = ControlHandle::new(Arc::clone(&monitor));
    control.cancel();
    let executor = FakeExecutor::<String>::new();
    let orchestrator = Orchestrator::new(executor.clone(), monitor, sequential(5)).unwrap();

    let summary = run_now(&orchestrator, files(20)).await;

    assert!(summary.is_cancelled());
    assert_eq!(executor.call_count(), 0);
    assert_eq!(summary.report.batches_completed, 0);
}

#[tokio::test]
async fn cancel_cuts_a_long_wait_short() {
    let monitor = monitor();
    let control = ControlHandle::new(Arc::clone(&monitor));
    let executor = FakeExecutor::<String>::new();
    let orchestrator = Arc::new(Orchestrator::new(executor.clone(), monitor, sequential(4)).unwrap());

    let run = tokio::spawn({
        let orchestrator = Arc::clone(&orchestrator);
        async move {
            let mut model = timing("model = \"uniform\"\nbase_interval = 3600.0");
            orchestrator.run(files(12), model.as_mut()).await
        }
    });

    wait_for(|| executor.call_count() == 4).await;
    control.cancel();

    let summary = tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .expect("run should stop promptly")
        .unwrap()
        .unwrap();
    assert!(summary.is_cancelled());
    assert_eq!(executor.call_count(), 4);
}

#[tokio::test]
async fn cancelling_during_the_last_batch_still_reports_cancelled() {
    let monitor = monitor();
    let control = ControlHandle::new(Arc::clone(&monitor));
    let executor = FakeExecutor::new().on_execute({
        let control = control.clone();
        move |item: &String| {
            if *item == file(9) {
                control.cancel();
            }
        }
    });
    let orchestrator = Orchestrator::new(executor.clone(), monitor, sequential(3)).unwrap();

    let summary = run_now(&orchestrator, files(9)).await;

    assert!(summary.is_cancelled());
    assert_eq!(summary.report.completed, 9);
}
