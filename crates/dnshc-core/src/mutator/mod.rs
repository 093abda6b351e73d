//! Record mutation
//!
//! Builds the delete+add [`Change`] that rewrites a record set to a new
//! list of rrdatas, and submits it unless running in dry-run mode.

use crate::error::Result;
use crate::model::{Change, ChangeAck, ManagedZoneRef, ResourceRecordSet};
use crate::traits::DnsProvider;
use tracing::{debug, info};

/// What [`RecordMutator::apply`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationResult {
    /// The change was accepted by the provider
    Submitted { change: Change, ack: ChangeAck },

    /// Dry-run: the change was built and logged but not sent
    DryRun(Change),
}

impl MutationResult {
    pub fn into_change(self) -> Change {
        match self {
            Self::Submitted { change, .. } | Self::DryRun(change) => change,
        }
    }
}

/// Build a change replacing `record` with the same record carrying `rrdatas`
///
/// The deletion is the fetched record verbatim; providers reject a
/// deletion that does not match the current state exactly.
pub fn build_change(record: &ResourceRecordSet, rrdatas: Vec<String>) -> Change {
    Change {
        additions: vec![record.with_rrdatas(rrdatas)],
        deletions: vec![record.clone()],
    }
}

/// Applies record changes through a [`DnsProvider`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordMutator {
    dry_run: bool,
}

impl RecordMutator {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Rewrite `record` to `rrdatas`
    ///
    /// The old and new rrdatas are logged before anything is sent. In
    /// dry-run mode nothing is sent at all, and the info-level output is
    /// the same as for a live run. Submission errors are returned
    /// unchanged.
    pub async fn apply(
        &self,
        provider: &dyn DnsProvider,
        zone: &ManagedZoneRef,
        record: &ResourceRecordSet,
        rrdatas: Vec<String>,
    ) -> Result<MutationResult> {
        let change = build_change(record, rrdatas);

        info!(
            "DNS Record change request for {} - old: {:?} new: {:?}",
            record.name, change.deletions[0].rrdatas, change.additions[0].rrdatas
        );

        if self.dry_run {
            debug!("[DRY-RUN] Not submitting change to {}", zone);
            return Ok(MutationResult::DryRun(change));
        }

        let ack = provider.submit_change(zone, &change).await?;

        debug!(
            "Change submitted to {} via {} (id: {}, status: {})",
            zone,
            provider.provider_name(),
            ack.id.as_deref().unwrap_or("-"),
            ack.status.as_deref().unwrap_or("-")
        );

        Ok(MutationResult::Submitted { change, ack })
    }
}
