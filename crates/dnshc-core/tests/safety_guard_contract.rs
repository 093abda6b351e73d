//! Contract Test: Fail-Safe Refusals
//!
//! Constraints verified:
//! - A record sharing no rrdata with the configuration is never probed or changed
//! - A missing or ambiguous record aborts the run before any probe
//! - A provider failure while fetching aborts the run
//!
//! If this test fails, the healthcheck may rewrite the wrong record.

mod common;

use common::*;
use dnshc_core::{Error, HealthcheckEngine};

fn engine_for(
    provider: &MockDnsProvider,
    prober: &ScriptedProber,
    rrdatas: &[&str],
) -> HealthcheckEngine {
    HealthcheckEngine::new(
        Box::new(MockDnsProvider::sharing_counters_with(provider)),
        Box::new(ScriptedProber::sharing_counters_with(prober)),
        minimal_config(rrdatas),
    )
    .expect("engine construction succeeds")
}

#[tokio::test]
async fn disjoint_record_aborts_without_probing() {
    let provider = MockDnsProvider::with_record(&["h9"]);
    let prober = ScriptedProber::new(&[("h1", true), ("h2", false)]);
    let engine = engine_for(&provider, &prober, &["h1", "h2"]);

    let err = engine.run_once().await.unwrap_err();

    assert!(matches!(err, Error::NoIntersection { .. }));
    assert!(err.is_config_mismatch());
    assert!(prober.calls().is_empty(), "no probe may be sent");
    assert!(provider.submitted().is_empty(), "no change may be sent");
    assert_eq!(provider.fetch_call_count(), 1);
}

#[tokio::test]
async fn disjoint_record_aborts_even_when_all_probes_would_fail() {
    let provider = MockDnsProvider::with_record(&["h8", "h9"]);
    let prober = ScriptedProber::new(&[]);
    let engine = engine_for(&provider, &prober, &["h1"]);

    assert!(matches!(
        engine.run_once().await,
        Err(Error::NoIntersection { .. })
    ));
    assert!(prober.calls().is_empty());
    assert!(provider.submitted().is_empty());
}

#[tokio::test]
async fn missing_record_aborts_without_probing() {
    let provider = MockDnsProvider::new(FetchBehavior::Missing);
    let prober = ScriptedProber::new(&[("h1", true)]);
    let engine = engine_for(&provider, &prober, &["h1"]);

    let err = engine.run_once().await.unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
    assert!(err.is_config_mismatch());
    assert!(prober.calls().is_empty());
}

#[tokio::test]
async fn ambiguous_record_aborts_without_probing() {
    let provider = MockDnsProvider::new(FetchBehavior::Ambiguous(2));
    let prober = ScriptedProber::new(&[("h1", true)]);
    let engine = engine_for(&provider, &prober, &["h1"]);

    let err = engine.run_once().await.unwrap_err();

    assert!(matches!(err, Error::AmbiguousRecord { count: 2, .. }));
    assert!(prober.calls().is_empty());
    assert!(provider.submitted().is_empty());
}

#[tokio::test]
async fn fetch_failure_is_fatal_but_not_a_mismatch() {
    let provider = MockDnsProvider::new(FetchBehavior::Unavailable);
    let prober = ScriptedProber::new(&[("h1", true)]);
    let engine = engine_for(&provider, &prober, &["h1"]);

    let err = engine.run_once().await.unwrap_err();

    assert!(matches!(err, Error::Provider { .. }));
    assert!(!err.is_config_mismatch());
    assert!(prober.calls().is_empty());
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let provider = MockDnsProvider::with_record(&["h1"]);
    let prober = ScriptedProber::new(&[]);

    let result = HealthcheckEngine::new(
        Box::new(provider),
        Box::new(prober),
        minimal_config(&[]),
    );

    assert!(matches!(result, Err(Error::Config(_))));
}
