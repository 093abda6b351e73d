// # Health Prober Trait
//
// Defines the interface for probing one backend address.
//
// ## Implementations
//
// - HTTP GET: `dnshc-probe-http` crate

use crate::model::HealthVerdict;
use async_trait::async_trait;

/// Trait for health prober implementations
///
/// Scheme, port, path and timeout are fixed when the prober is built;
/// a probe call only varies by address.
///
/// Probing is infallible by signature: every transport error or bad
/// status becomes [`HealthVerdict::Unhealthy`], so one failed probe can
/// never abort a run.
#[async_trait]
pub trait HealthProber: Send + Sync {
    /// Probe `address` once and classify the result
    async fn probe(&self, address: &str) -> HealthVerdict;
}
