//! Checkpoint emission specs

use crate::prelude::*;
use trickle_storage::{CheckpointFile, CheckpointJournal};

#[tokio::test]
async fn checkpoints_every_ten_processed_files() {
    let sink = FakeCheckpointSink::new();
    let executor = FakeExecutor::<String>::new();
    let monitor = monitor_with_sink(Arc::new(sink.clone()));
    let orchestrator = Orchestrator::new(executor, monitor, sequential(1)).unwrap();

    let summary = run_now(&orchestrator, files(23)).await;

    let checkpoints = sink.checkpoints();
    assert_eq!(checkpoints.len(), 2);
    assert_eq!(checkpoints[0].processed(), 10);
    assert_eq!(checkpoints[1].processed(), 20);
    assert!(checkpoints.iter().all(|c| c.total_count == 23));
    assert!(checkpoints
        .iter()
        .all(|c| Some(c.run_id) == summary.report.run_id));
}

#[tokio::test]
async fn failures_count_toward_checkpoints() {
    let sink = FakeCheckpointSink::new();
    let executor = FakeExecutor::new();
    executor.fail_on(file(4));
    let monitor = monitor_with_sink(Arc::new(sink.clone()));
    let orchestrator = Orchestrator::new(executor, monitor, sequential(2)).unwrap();

    run_now(&orchestrator, files(10)).await;

    let checkpoints = sink.checkpoints();
    assert_eq!(checkpoints.len(), 1);
    assert_eq!(checkpoints[0].completed_count, 9);
    assert_eq!(checkpoints[0].failed_count, 1);
}

#[tokio::test]
async fn broken_sink_does_not_fail_the_run() {
    let sink = FakeCheckpointSink::new();
    sink.set_failing(true);
    let executor = FakeExecutor::<String>::new();
    let monitor = monitor_with_sink(Arc::new(sink.clone()));
    let orchestrator = Orchestrator::new(executor, monitor, sequential(5)).unwrap();

    let summary = run_now(&orchestrator, files(30)).await;

    assert!(summary.is_completed());
    assert_eq!(summary.report.completed, 30);
}

#[tokio::test]
async fn journal_keeps_every_checkpoint_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run").join("checkpoints.jsonl");
    let journal = Arc::new(CheckpointJournal::open(&path).unwrap());
    let orchestrator =
        Orchestrator::new(FakeExecutor::<String>::new(), monitor_with_sink(journal), sequential(5))
            .unwrap();

    run_now(&orchestrator, files(35)).await;

    let processed: Vec<u64> = CheckpointJournal::read_all(&path)
        .unwrap()
        .iter()
        .map(|c| c.processed())
        .collect();
    assert_eq!(processed, vec![10, 20, 30]);
}

#[tokio::test]
async fn snapshot_file_holds_the_latest_checkpoint() {
    let dir = tempfile::tempdir().unwrap();
    let file_sink = Arc::new(CheckpointFile::new(dir.path().join("checkpoint.json")));
    let orchestrator = Orchestrator::new(
        FakeExecutor::<String>::new(),
        monitor_with_sink(Arc::clone(&file_sink) as Arc<dyn CheckpointSink>),
        sequential(5),
    )
    .unwrap();

    run_now(&orchestrator, files(35)).await;

    let latest = file_sink.load().unwrap().unwrap();
    assert_eq!(latest.processed(), 30);
    assert_eq!(latest.remaining(), 5);

    file_sink.clear().unwrap();
    assert!(file_sink.load().unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn parallel_run_journals_checkpoints_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checkpoints.jsonl");
    let journal = Arc::new(CheckpointJournal::open(&path).unwrap());
    let executor = FakeExecutor::<String>::new().with_delay(Duration::from_millis(1));
    let orchestrator =
        Orchestrator::new(executor, monitor_with_sink(journal), parallel(25, 8)).unwrap();

    let summary = run_now(&orchestrator, files(100)).await;

    assert!(summary.is_completed());
    let processed: Vec<u64> = CheckpointJournal::read_all(&path)
        .unwrap()
        .iter()
        .map(|c| c.processed())
        .collect();
    assert_eq!(processed, (1..=10).map(|n| n * 10).collect::<Vec<_>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn parallel_run_leaves_a_whole_latest_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let file_sink = Arc::new(CheckpointFile::new(dir.path().join("checkpoint.json")));
    let executor = FakeExecutor::<String>::new().with_delay(Duration::from_millis(1));
    let orchestrator = Orchestrator::new(
        executor,
        monitor_with_sink(Arc::clone(&file_sink) as Arc<dyn CheckpointSink>),
        parallel(25, 8),
    )
    .unwrap();

    let summary = run_now(&orchestrator, files(100)).await;

    let latest = file_sink.load().unwrap().unwrap();
    assert_eq!(latest.processed(), 100);
    assert_eq!(Some(latest.run_id), summary.report.run_id);
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("checkpoint.json")]);
}
