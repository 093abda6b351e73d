// # dnshc-core
//
// Core library for the Cloud DNS healthcheck.
//
// One run of the healthcheck reconciles a single DNS record set against
// the health of the backends it points to:
//
// - **HealthProber**: Trait for probing one backend address over HTTP
// - **DnsProvider**: Trait for reading a record set and submitting changes
// - **reconciler**: Intersection safety check and the no-op/abort/update decision
// - **RecordMutator**: Builds the delete+add change and applies it (or not, in dry-run)
// - **HealthcheckEngine**: Sequences one pass: fetch → intersect → probe → decide → mutate
//
// ## Design Principles
//
// 1. **Stateless**: Nothing survives a run; an external scheduler invokes it periodically
// 2. **Fail-safe**: A record that shares nothing with the configuration is never touched,
//    and a total outage never empties the record
// 3. **Library-First**: The binary is a thin layer over this crate

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod mutator;
pub mod reconciler;
pub mod traits;

// Re-export core types for convenience
pub use config::{HealthcheckConfig, ProbeConfig};
pub use engine::{HealthcheckEngine, RunReport};
pub use error::{Error, Result};
pub use model::{
    Change, ChangeAck, HealthVerdict, ManagedZoneRef, ProbeFailure, ResourceRecordSet,
};
pub use mutator::{MutationResult, RecordMutator};
pub use reconciler::{AddressVerdict, ReconcileOutcome};
pub use traits::{DnsProvider, HealthProber};
