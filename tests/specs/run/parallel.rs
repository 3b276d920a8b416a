//! Parallel delivery specs

use crate::prelude::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn hundred_files_on_eight_workers_are_counted_exactly() {
    for _ in 0..5 {
        let executor = FakeExecutor::new().with_delay(Duration::from_millis(1));
        let orchestrator = Orchestrator::new(executor.clone(), monitor(), parallel(25, 8)).unwrap();

        let summary = run_now(&orchestrator, files(100)).await;

        assert!(summary.is_completed());
        assert_eq!(summary.report.completed, 100);
        assert_eq!(summary.report.failed, 0);
        assert_eq!(executor.call_count(), 100);
        assert!(executor.max_concurrency() <= 8);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failed_files_are_counted_and_the_run_completes() {
    let executor = TracedExecutor::new(FakeExecutor::new());
    for n in [3, 17, 42] {
        executor.inner().fail_on(file(n));
    }
    let orchestrator = Orchestrator::new(executor.clone(), monitor(), parallel(10, 4)).unwrap();

    let summary = run_now(&orchestrator, files(50)).await;

    assert!(summary.is_completed());
    assert_eq!(summary.report.completed, 47);
    assert_eq!(summary.report.failed, 3);
    assert_eq!(summary.report.recent_failures.len(), 3);
    assert_eq!(executor.inner().call_count(), 50);
}

#[tokio::test]
async fn sequential_mode_never_overlaps_deliveries() {
    let executor = FakeExecutor::new().with_delay(Duration::from_millis(1));
    let config = RunConfig {
        batch_size: 10,
        worker_count: 8,
        parallel: false,
    };
    let orchestrator = Orchestrator::new(executor.clone(), monitor(), config).unwrap();

    let summary = run_now(&orchestrator, files(30)).await;

    assert!(summary.is_completed());
    assert_eq!(executor.max_concurrency(), 1);
    assert_eq!(executor.calls(), (1..=30).map(file).collect::<Vec<_>>());
}
