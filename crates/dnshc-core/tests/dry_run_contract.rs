//! Contract Test: Dry-Run and Submission Failures
//!
//! Constraints verified:
//! - Dry-run never calls submit_change() but produces the same outcome and change
//! - A rejected change is fatal for the run and is reported unchanged
//!
//! If this test fails, dry-run may modify live DNS.

mod common;

use common::*;
use dnshc_core::{Error, HealthcheckEngine, ReconcileOutcome};

#[tokio::test]
async fn dry_run_builds_change_without_submitting() {
    let provider = MockDnsProvider::with_record(&["h1", "h2", "h3"]);
    let prober = ScriptedProber::new(&[("h1", true), ("h2", false), ("h3", true)]);

    let mut config = minimal_config(&["h1", "h2", "h3"]);
    config.dry_run = true;

    let engine = HealthcheckEngine::new(
        Box::new(MockDnsProvider::sharing_counters_with(&provider)),
        Box::new(ScriptedProber::sharing_counters_with(&prober)),
        config,
    )
    .unwrap();

    let report = engine.run_once().await.unwrap();

    assert!(provider.submitted().is_empty(), "dry-run must not submit");
    assert!(report.dry_run);
    assert!(!report.submitted());
    assert_eq!(
        report.outcome,
        ReconcileOutcome::Partial(strings(&["h1", "h3"]))
    );

    let change = report.change.expect("dry-run still builds the change");
    assert_eq!(change.deletions, vec![record(&["h1", "h2", "h3"])]);
    assert_eq!(change.additions, vec![record(&["h1", "h3"])]);
}

#[tokio::test]
async fn dry_run_and_live_runs_agree_on_outcome() {
    let table = [("h1", false), ("h2", true)];

    let live_provider = MockDnsProvider::with_record(&["h1", "h2"]);
    let live = HealthcheckEngine::new(
        Box::new(MockDnsProvider::sharing_counters_with(&live_provider)),
        Box::new(ScriptedProber::new(&table)),
        minimal_config(&["h1", "h2"]),
    )
    .unwrap();

    let dry_provider = MockDnsProvider::with_record(&["h1", "h2"]);
    let mut dry_config = minimal_config(&["h1", "h2"]);
    dry_config.dry_run = true;
    let dry = HealthcheckEngine::new(
        Box::new(MockDnsProvider::sharing_counters_with(&dry_provider)),
        Box::new(ScriptedProber::new(&table)),
        dry_config,
    )
    .unwrap();

    let live_report = live.run_once().await.unwrap();
    let dry_report = dry.run_once().await.unwrap();

    assert_eq!(live_report.outcome, dry_report.outcome);
    assert_eq!(live_report.change, dry_report.change);
    assert_eq!(live_provider.submitted().len(), 1);
    assert!(dry_provider.submitted().is_empty());
}

#[tokio::test]
async fn rejected_change_is_fatal() {
    let provider = MockDnsProvider::with_record(&["h1", "h2"]).failing_submit();
    let prober = ScriptedProber::new(&[("h1", true), ("h2", false)]);

    let engine = HealthcheckEngine::new(
        Box::new(MockDnsProvider::sharing_counters_with(&provider)),
        Box::new(prober),
        minimal_config(&["h1", "h2"]),
    )
    .unwrap();

    let err = engine.run_once().await.unwrap_err();

    assert!(matches!(err, Error::Provider { ref message, .. } if message.contains("412")));
    assert!(!err.is_config_mismatch());
    assert_eq!(provider.submitted().len(), 1, "submitted exactly once, no retry");
}

#[tokio::test]
async fn dry_run_with_no_op_outcomes_behaves_like_live() {
    let provider = MockDnsProvider::with_record(&["h1", "h2"]);
    let mut config = minimal_config(&["h1", "h2"]);
    config.dry_run = true;

    let engine = HealthcheckEngine::new(
        Box::new(MockDnsProvider::sharing_counters_with(&provider)),
        Box::new(ScriptedProber::new(&[])),
        config,
    )
    .unwrap();

    let report = engine.run_once().await.unwrap();

    assert_eq!(report.outcome, ReconcileOutcome::AllUnhealthy);
    assert!(report.change.is_none());
    assert!(provider.submitted().is_empty());
}
