//! Set reconciliation
//!
//! Three steps, each a plain function so they can be tested without I/O
//! (except [`probe_all`], which only drives the prober):
//!
//! 1. [`ensure_intersection`]: refuse to touch a record that shares no
//!    value with the configured rrdatas.
//! 2. [`probe_all`] + [`healthy_subset`]: probe every *configured* address
//!    and keep the healthy ones in configured order.
//! 3. [`decide`]: no-op, abort, or update.
//!
//! Step 1 compares against the record's rrdatas while steps 2 and 3 work
//! on the configured list. When the two have drifted apart they are
//! different sets, and that split is kept on purpose.

use crate::error::{Error, Result};
use crate::model::{HealthVerdict, ResourceRecordSet};
use crate::traits::HealthProber;
use std::collections::HashSet;
use tracing::debug;

/// What a run should do with the record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Every configured address passed its probe; nothing to do
    AllHealthy,

    /// Every configured address failed its probe; the record is left
    /// untouched rather than emptied
    AllUnhealthy,

    /// Some addresses failed; rewrite the record to the healthy subset
    ///
    /// The subset is never empty and never the whole configured list.
    Partial(Vec<String>),
}

impl ReconcileOutcome {
    /// Whether this outcome requires a change to the record
    pub fn requires_mutation(&self) -> bool {
        matches!(self, Self::Partial(_))
    }
}

/// The verdict for one configured address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressVerdict {
    pub address: String,
    pub verdict: HealthVerdict,
}

/// Values of `observed` that are also in `configured`, in observed order
///
/// Membership only: duplicates on either side do not matter for whether
/// the result is empty.
pub fn intersection(configured: &[String], observed: &[String]) -> Vec<String> {
    let wanted: HashSet<&str> = configured.iter().map(String::as_str).collect();

    observed
        .iter()
        .filter(|rrdata| wanted.contains(rrdata.as_str()))
        .cloned()
        .collect()
}

/// Abort with [`Error::NoIntersection`] unless the record shares at least
/// one value with the configured rrdatas
pub fn ensure_intersection(
    configured: &[String],
    record: &ResourceRecordSet,
) -> Result<Vec<String>> {
    let common = intersection(configured, &record.rrdatas);

    if common.is_empty() {
        return Err(Error::NoIntersection {
            configured: configured.to_vec(),
            observed: record.rrdatas.clone(),
        });
    }

    Ok(common)
}

/// Probe every configured address once, sequentially, in input order
pub async fn probe_all(prober: &dyn HealthProber, configured: &[String]) -> Vec<AddressVerdict> {
    let mut verdicts = Vec::with_capacity(configured.len());

    for address in configured {
        let verdict = prober.probe(address).await;
        debug!("Verdict for {}: {:?}", address, verdict);
        verdicts.push(AddressVerdict {
            address: address.clone(),
            verdict,
        });
    }

    verdicts
}

/// Addresses whose verdict is healthy, in the order given
pub fn healthy_subset(verdicts: &[AddressVerdict]) -> Vec<String> {
    verdicts
        .iter()
        .filter(|v| v.verdict.is_healthy())
        .map(|v| v.address.clone())
        .collect()
}

/// Decide what to do from the configured list and its healthy subset
///
/// The all-healthy check is a count comparison against the configured
/// list, not a set comparison against the record.
pub fn decide(configured: &[String], healthy: Vec<String>) -> ReconcileOutcome {
    if healthy.len() == configured.len() {
        ReconcileOutcome::AllHealthy
    } else if healthy.is_empty() {
        ReconcileOutcome::AllUnhealthy
    } else {
        ReconcileOutcome::Partial(healthy)
    }
}
