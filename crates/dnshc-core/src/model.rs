//! Data model shared by the reconciler, the providers and the probers
//!
//! Record sets and changes serialize to the Cloud DNS v1 wire shape so
//! provider crates can send them as-is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Lowest status code counted as healthy (inclusive)
pub const HEALTHY_STATUS_MIN: u16 = 200;

/// First status code counted as unhealthy again (exclusive)
pub const HEALTHY_STATUS_MAX: u16 = 400;

/// A DNS resource record set as returned by the provider
///
/// Fetched once per run and treated as a snapshot: the same value is
/// sent back verbatim as the deletion half of a [`Change`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecordSet {
    /// Fully-qualified record name (e.g. `www.example.com.`)
    pub name: String,

    /// Record type (e.g. `A`)
    #[serde(rename = "type")]
    pub record_type: String,

    /// Time-to-live in seconds
    #[serde(default)]
    pub ttl: u32,

    /// Record values
    #[serde(default)]
    pub rrdatas: Vec<String>,

    /// Every other field the provider returned (`kind`, `signatureRrdatas`,
    /// `routingPolicy`, ...), kept so the record serializes back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceRecordSet {
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        ttl: u32,
        rrdatas: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            ttl,
            rrdatas,
            extra: Map::new(),
        }
    }

    /// Same name, type and TTL, with a different set of values
    ///
    /// Only those four fields are carried over; signatures and routing
    /// policies of the old values do not apply to the new ones.
    pub fn with_rrdatas(&self, rrdatas: Vec<String>) -> Self {
        Self::new(self.name.clone(), self.record_type.clone(), self.ttl, rrdatas)
    }
}

/// An atomic change request: every deletion and addition is applied together
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Change {
    /// Record sets to add
    #[serde(default)]
    pub additions: Vec<ResourceRecordSet>,

    /// Record sets to delete (must match the current state exactly)
    #[serde(default)]
    pub deletions: Vec<ResourceRecordSet>,
}

/// Provider acknowledgement of a submitted [`Change`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAck {
    /// Provider-assigned change ID
    #[serde(default)]
    pub id: Option<String>,

    /// Change status (e.g. `pending`, `done`)
    #[serde(default)]
    pub status: Option<String>,

    /// When the provider accepted the change (RFC 3339)
    #[serde(default)]
    pub start_time: Option<String>,
}

/// The (project, managed zone) pair every provider call is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedZoneRef {
    /// Cloud project
    pub project: String,
    /// Managed zone name inside the project
    pub managed_zone: String,
}

impl ManagedZoneRef {
    pub fn new(project: impl Into<String>, managed_zone: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            managed_zone: managed_zone.into(),
        }
    }
}

impl fmt::Display for ManagedZoneRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project, self.managed_zone)
    }
}

/// Why a probe classified an address as unhealthy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    /// Connection refused, timeout, DNS resolution failure, ...
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a status outside [200, 400)
    #[error("{0} code")]
    Status(u16),

    /// No valid URL could be built for the address
    #[error("invalid probe target: {0}")]
    InvalidTarget(String),
}

/// Outcome of probing one address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthVerdict {
    Healthy,
    Unhealthy(ProbeFailure),
}

impl HealthVerdict {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

/// Classify an HTTP status code: healthy iff it falls in [200, 400)
pub fn classify_status(status: u16) -> HealthVerdict {
    if (HEALTHY_STATUS_MIN..HEALTHY_STATUS_MAX).contains(&status) {
        HealthVerdict::Healthy
    } else {
        HealthVerdict::Unhealthy(ProbeFailure::Status(status))
    }
}
