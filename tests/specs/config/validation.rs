//! Configuration specs
//!
//! Invalid parameters are rejected before anything is delivered.

use crate::prelude::*;
use serde::Deserialize;
use trickle_engine::ReporterConfig;

/// A complete run profile as an operator would write it
#[derive(Debug, Deserialize)]
struct Profile {
    timing: TimingConfig,
    #[serde(default)]
    run: RunConfig,
    #[serde(default)]
    monitor: MonitorConfig,
    #[serde(default)]
    reporter: ReporterConfig,
}

#[test]
fn profile_parses_with_defaults() {
    let profile: Profile = toml::from_str(
        r#"
        [timing]
        model = "poisson"
        base_interval = 2.0

        [run]
        batch_size = 5
        parallel = true

        [reporter]
        interval = "500ms"
        "#,
    )
    .unwrap();

    assert_eq!(
        profile.timing,
        TimingConfig::Poisson {
            base_interval: 2.0,
            burst_probability: 0.1,
            burst_rate_multiplier: 5.0,
        }
    );
    assert_eq!(profile.run.width(), 4);
    assert_eq!(profile.monitor.checkpoint_every, 10);
    assert_eq!(profile.reporter.interval, Duration::from_millis(500));
    assert!(profile.timing.validate().is_ok());
}

#[test]
fn burst_probability_above_one_is_rejected() {
    let config: TimingConfig =
        toml::from_str("model = \"poisson\"\nbase_interval = 1.0\nburst_probability = 1.5").unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ProbabilityOutOfRange { value, .. }) if value == 1.5
    ));
}

#[test]
fn adaptive_with_empty_history_is_rejected() {
    let config: TimingConfig =
        toml::from_str("model = \"adaptive\"\nbase_interval = 1.0\nhistory_size = 0").unwrap();
    assert_eq!(config.build(None).err(), Some(ConfigError::EmptyHistory));
}

#[test]
fn negative_interval_is_rejected() {
    let config: TimingConfig = toml::from_str("model = \"uniform\"\nbase_interval = -1.0").unwrap();
    assert_eq!(config.validate(), Err(ConfigError::NegativeInterval(-1.0)));
}

#[tokio::test]
async fn zero_batch_size_never_starts_a_run() {
    let executor = FakeExecutor::<String>::new();
    let monitor = monitor();
    let result = Orchestrator::new(executor.clone(), Arc::clone(&monitor), sequential(0));

    assert_eq!(result.err(), Some(ConfigError::ZeroBatchSize));
    assert_eq!(monitor.phase(), RunPhase::Pending);
    assert_eq!(executor.call_count(), 0);
}
