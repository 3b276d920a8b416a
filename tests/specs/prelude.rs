//! Shared helpers for scenario specs

#![allow(dead_code)]

pub use std::sync::Arc;
pub use std::time::Duration;
pub use trickle_adapters::{FakeCheckpointSink, FakeExecutor, TracedExecutor, WorkExecutor};
pub use trickle_core::{
    CheckpointSink, ConfigError, Manifest, MonitorConfig, ProgressMonitor, RunPhase,
    TimingConfig, TimingModel,
};
pub use trickle_engine::{ControlHandle, Orchestrator, RunConfig, RunOutcome, RunSummary};

/// Name of the `n`th file dropped into the watched directory (1-based)
pub fn file(n: usize) -> String {
    format!("file_{:03}.txt", n)
}

pub fn files(count: usize) -> Manifest<String> {
    Manifest::from((1..=count).map(file).collect::<Vec<_>>())
}

pub fn monitor() -> Arc<ProgressMonitor> {
    Arc::new(ProgressMonitor::new(MonitorConfig::default()).unwrap())
}

pub fn monitor_with_sink(sink: Arc<dyn CheckpointSink>) -> Arc<ProgressMonitor> {
    Arc::new(
        ProgressMonitor::new(MonitorConfig::default())
            .unwrap()
            .with_sink(sink),
    )
}

pub fn sequential(batch_size: usize) -> RunConfig {
    RunConfig {
        batch_size,
        worker_count: 1,
        parallel: false,
    }
}

pub fn parallel(batch_size: usize, worker_count: usize) -> RunConfig {
    RunConfig {
        batch_size,
        worker_count,
        parallel: true,
    }
}

/// Build a seeded timing model from a TOML fragment
pub fn timing(src: &str) -> Box<dyn TimingModel> {
    let config: TimingConfig = toml::from_str(src).unwrap();
    config.build(Some(7)).unwrap()
}

/// Run with no wait between batches
pub async fn run_now<E>(orchestrator: &Orchestrator<E>, manifest: Manifest<String>) -> RunSummary
where
    E: WorkExecutor<Item = String>,
{
    let mut model = timing("model = \"uniform\"\nbase_interval = 0.0");
    orchestrator.run(manifest, model.as_mut()).await.unwrap()
}

/// Poll until `condition` holds, failing after five seconds
pub async fn wait_for(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(tokio::time::Instant::now() < deadline, "condition never held");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
