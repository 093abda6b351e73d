//! Healthcheck engine
//!
//! The HealthcheckEngine runs one reconciliation pass:
//! - Fetching the record set via DnsProvider
//! - Refusing to continue when the record shares nothing with the config
//! - Probing every configured address via HealthProber
//! - Rewriting the record to the healthy subset via RecordMutator
//!
//! ## Architecture
//!
//! ```text
//!                        ┌───────────────────┐
//!                        │ HealthcheckEngine │
//!                        └───────────────────┘
//!                                  │
//!       ┌──────────────────────────┼──────────────────────────┐
//!       │                          │                          │
//!       ▼                          ▼                          ▼
//! ┌─────────────┐         ┌────────────────┐         ┌───────────────┐
//! │ DnsProvider │         │  HealthProber  │         │ RecordMutator │
//! │   (fetch)   │         │ (probe each)   │         │   (change)    │
//! └─────────────┘         └────────────────┘         └───────────────┘
//! ```
//!
//! ## Run Flow
//!
//! 1. Fetch the record set (exactly one must match)
//! 2. Abort if the configured rrdatas and the record's rrdatas are disjoint
//! 3. Probe every configured rrdata, in order
//! 4. Decide: all healthy / all unhealthy / partial
//! 5. On partial, submit (or dry-run) the delete+add change
//!
//! There is no loop: scheduling is left to whatever invokes the run.

use crate::config::HealthcheckConfig;
use crate::error::Result;
use crate::model::Change;
use crate::mutator::RecordMutator;
use crate::reconciler::{self, AddressVerdict, ReconcileOutcome};
use crate::traits::{DnsProvider, HealthProber};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Summary of one completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Record that was reconciled
    pub record_name: String,

    /// Decision taken
    pub outcome: ReconcileOutcome,

    /// Per-address probe verdicts, in configured order
    pub verdicts: Vec<AddressVerdict>,

    /// The change built for a partial outcome (submitted or not)
    pub change: Option<Change>,

    /// Whether the change was withheld because of dry-run mode
    pub dry_run: bool,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Whether a change was actually sent to the provider
    pub fn submitted(&self) -> bool {
        self.change.is_some() && !self.dry_run
    }

    /// Wall-clock duration of the run
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at.signed_duration_since(self.started_at)
    }
}

/// Core healthcheck engine
///
/// Owns its collaborators and an immutable configuration; every call to
/// [`HealthcheckEngine::run_once()`] is an independent pass.
pub struct HealthcheckEngine {
    /// DNS provider for reading and changing the record
    provider: Box<dyn DnsProvider>,

    /// Prober for the configured addresses
    prober: Box<dyn HealthProber>,

    /// Applies the change (honours dry-run)
    mutator: RecordMutator,

    /// Run configuration
    config: HealthcheckConfig,
}

impl HealthcheckEngine {
    /// Create a new engine
    ///
    /// # Returns
    ///
    /// - `Ok(Self)`: The configuration is valid
    /// - `Err(Error::Config)`: The configuration failed validation
    pub fn new(
        provider: Box<dyn DnsProvider>,
        prober: Box<dyn HealthProber>,
        config: HealthcheckConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            provider,
            prober,
            mutator: RecordMutator::new(config.dry_run),
            config,
        })
    }

    pub fn config(&self) -> &HealthcheckConfig {
        &self.config
    }

    /// Run one reconciliation pass
    ///
    /// # Returns
    ///
    /// - `Ok(RunReport)`: The pass completed (including the no-op outcomes)
    /// - `Err(Error)`: Fetch failure, missing/ambiguous record, empty
    ///   intersection, or change submission failure
    pub async fn run_once(&self) -> Result<RunReport> {
        let started_at = Utc::now();
        let config = &self.config;

        info!(
            "Checking {} record {} in {} via {} ({} rrdata(s))",
            config.record_type,
            config.record_name,
            config.zone,
            self.provider.provider_name(),
            config.rrdatas.len()
        );
        if config.dry_run {
            debug!("[DRY-RUN] Changes will be logged but not submitted");
        }

        let record = self
            .provider
            .fetch_record(&config.zone, &config.record_name, &config.record_type)
            .await?;

        debug!("Current rrdatas for {}: {:?}", record.name, record.rrdatas);

        let common = reconciler::ensure_intersection(&config.rrdatas, &record)?;
        debug!("Rrdatas both configured and in record: {:?}", common);

        let verdicts = reconciler::probe_all(self.prober.as_ref(), &config.rrdatas).await;
        let healthy = reconciler::healthy_subset(&verdicts);
        let outcome = reconciler::decide(&config.rrdatas, healthy);

        let change = match &outcome {
            ReconcileOutcome::AllHealthy => {
                info!("All rrdatas are healthy");
                None
            }
            ReconcileOutcome::AllUnhealthy => {
                warn!("All rrdatas are unhealthy. We won't touch the record");
                None
            }
            ReconcileOutcome::Partial(healthy) => {
                info!("Updating record");
                let result = self
                    .mutator
                    .apply(
                        self.provider.as_ref(),
                        &config.zone,
                        &record,
                        healthy.clone(),
                    )
                    .await?;

                Some(result.into_change())
            }
        };

        Ok(RunReport {
            record_name: record.name,
            outcome,
            verdicts,
            change,
            dry_run: self.mutator.is_dry_run(),
            started_at,
            finished_at: Utc::now(),
        })
    }
}
