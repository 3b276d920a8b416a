//! Pause and resume specs

use crate::prelude::*;

#[tokio::test]
async fn pause_holds_the_next_batch_until_resume() {
    let monitor = monitor();
    let control = ControlHandle::new(Arc::clone(&monitor));
    let executor = FakeExecutor::new().on_execute({
        let control = control.clone();
        move |item: &String| {
            if *item == file(10) {
                control.pause();
            }
        }
    });
    let orchestrator = Arc::new(Orchestrator::new(executor.clone(), monitor, sequential(5)).unwrap());

    let run = tokio::spawn({
        let orchestrator = Arc::clone(&orchestrator);
        async move { run_now(&*orchestrator, files(50)).await }
    });

    wait_for(|| control.is_paused() && executor.call_count() == 10).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(executor.call_count(), 10);
    assert_eq!(control.report().phase, RunPhase::Paused);

    control.resume();
    let summary = run.await.unwrap();

    assert!(summary.is_completed());
    assert_eq!(executor.calls(), (1..=50).map(file).collect::<Vec<_>>());
    assert_eq!(summary.report.batches_completed, 10);
}

#[tokio::test]
async fn resume_without_pause_changes_nothing() {
    let monitor = monitor();
    let control = ControlHandle::new(Arc::clone(&monitor));
    let executor = FakeExecutor::<String>::new();
    let orchestrator = Orchestrator::new(executor.clone(), monitor, sequential(5)).unwrap();

    assert_eq!(control.resume(), RunPhase::Pending);
    let summary = run_now(&orchestrator, files(10)).await;

    assert!(summary.is_completed());
    assert_eq!(control.resume(), RunPhase::Completed);
}
