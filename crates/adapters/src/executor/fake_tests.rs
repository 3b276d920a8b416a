// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn fake_executor_records_calls_in_order() {
    let executor = FakeExecutor::new();
    executor.execute(&1u32).await.unwrap();
    executor.execute(&2).await.unwrap();

    assert_eq!(executor.calls(), vec![1, 2]);
    assert_eq!(executor.call_count(), 2);
    assert_eq!(executor.max_concurrency(), 1);
}

#[tokio::test]
async fn fake_executor_fails_configured_items() {
    let executor = FakeExecutor::new();
    executor.fail_on("bad.fastq");

    let err = executor.execute(&"bad.fastq").await.unwrap_err();
    assert!(err.reason.contains("bad.fastq"));
    assert!(executor.execute(&"good.fastq").await.is_ok());
    assert_eq!(executor.call_count(), 2);
}

#[tokio::test]
async fn fake_executor_hook_sees_each_item() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let executor = FakeExecutor::new().on_execute({
        let seen = Arc::clone(&seen);
        move |item: &u32| seen.lock().unwrap().push(*item * 10)
    });

    executor.execute(&3).await.unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![30]);
}

#[tokio::test]
async fn fake_executor_panics_on_request() {
    let executor = FakeExecutor::new();
    executor.panic_on(7u32);

    let task = tokio::spawn({
        let executor = executor.clone();
        async move { executor.execute(&7).await }
    });
    let err = task.await.unwrap_err();
    assert!(err.is_panic());

    // The in-flight counter recovered
    executor.execute(&8).await.unwrap();
    assert_eq!(executor.max_concurrency(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn fake_executor_tracks_overlap() {
    let executor = FakeExecutor::new().with_delay(Duration::from_millis(50));
    let tasks: Vec<_> = (0..3u32)
        .map(|i| {
            let executor = executor.clone();
            tokio::spawn(async move { executor.execute(&i).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }
    assert_eq!(executor.max_concurrency(), 3);
}
