// # DNS Provider Trait
//
// Defines the interface for reading and changing a DNS record set.
//
// ## Implementations
//
// - Google Cloud DNS: `dnshc-provider-gcloud` crate
//
// ## Usage
//
// ```rust,ignore
// use dnshc_core::{DnsProvider, ManagedZoneRef};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//     let zone = ManagedZoneRef::new("my-project", "example-zone");
//
//     let record = provider.fetch_record(&zone, "www.example.com.", "A").await?;
//     println!("current rrdatas: {:?}", record.rrdatas);
//
//     Ok(())
// }
// ```

use crate::model::{Change, ChangeAck, ManagedZoneRef, ResourceRecordSet};
use async_trait::async_trait;

/// Trait for DNS provider implementations
///
/// Authentication and client construction are the implementation's
/// business; the engine only ever sees record sets and changes.
///
/// # Contract
///
/// - Providers are single-shot: one logical API operation per call, no
///   retry or backoff (a failed run is simply retried by the scheduler).
/// - Providers never decide whether a change is needed.
/// - Providers never log credentials.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Fetch the one record set matching `name` and `record_type`
    ///
    /// # Returns
    ///
    /// - `Ok(ResourceRecordSet)`: Exactly one record set matched
    /// - `Err(Error::NotFound)`: No record set matched
    /// - `Err(Error::AmbiguousRecord)`: More than one record set matched
    /// - `Err(Error)`: The request failed
    async fn fetch_record(
        &self,
        zone: &ManagedZoneRef,
        name: &str,
        record_type: &str,
    ) -> Result<ResourceRecordSet, crate::Error>;

    /// Submit an atomic change to the zone
    ///
    /// Errors are returned unchanged; there is no partial state to roll back.
    async fn submit_change(
        &self,
        zone: &ManagedZoneRef,
        change: &Change,
    ) -> Result<ChangeAck, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
