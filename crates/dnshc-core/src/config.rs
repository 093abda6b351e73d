//! Configuration types for the healthcheck
//!
//! A [`HealthcheckConfig`] is built once (by the binary from flags and
//! environment variables, or directly by library users) and is immutable
//! for the duration of a run.

use crate::model::ManagedZoneRef;
use serde::{Deserialize, Serialize};
use std::net::Ipv6Addr;
use std::time::Duration;

/// Record type reconciled when none is given
pub const DEFAULT_RECORD_TYPE: &str = "A";

/// Default HTTP probe timeout
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 5;

/// Default HTTP probe scheme
pub const DEFAULT_HTTP_SCHEME: &str = "http";

/// Main healthcheck configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthcheckConfig {
    /// DNS record name to reconcile
    pub record_name: String,

    /// DNS record type to reconcile
    #[serde(default = "default_record_type")]
    pub record_type: String,

    /// Project and managed zone holding the record
    pub zone: ManagedZoneRef,

    /// Expected rrdatas, in operator order (duplicates kept)
    pub rrdatas: Vec<String>,

    /// How each rrdata is probed
    pub probe: ProbeConfig,

    /// Log the change but never submit it
    #[serde(default)]
    pub dry_run: bool,
}

impl HealthcheckConfig {
    /// Create a configuration with default record type and probe settings
    pub fn new(
        record_name: impl Into<String>,
        zone: ManagedZoneRef,
        rrdatas: Vec<String>,
        healthcheck_path: impl Into<String>,
    ) -> Self {
        Self {
            record_name: record_name.into(),
            record_type: default_record_type(),
            zone,
            rrdatas,
            probe: ProbeConfig {
                path: healthcheck_path.into(),
                ..ProbeConfig::default()
            },
            dry_run: false,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.record_name.trim().is_empty() {
            return Err(crate::Error::config("Record name cannot be empty"));
        }

        if self.record_type.trim().is_empty() {
            return Err(crate::Error::config("Record type cannot be empty"));
        }

        if self.zone.project.trim().is_empty() {
            return Err(crate::Error::config("Project cannot be empty"));
        }

        if self.zone.managed_zone.trim().is_empty() {
            return Err(crate::Error::config("Managed zone cannot be empty"));
        }

        if self.rrdatas.is_empty() {
            return Err(crate::Error::config("At least one rrdata must be given"));
        }

        if self.rrdatas.iter().any(|r| r.trim().is_empty()) {
            return Err(crate::Error::config("Rrdatas cannot contain empty values"));
        }

        self.probe.validate()
    }
}

fn default_record_type() -> String {
    DEFAULT_RECORD_TYPE.to_string()
}

/// HTTP probe settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// URL path requested on every address
    pub path: String,

    /// URL scheme (`http` or `https`)
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Port appended to the address; `None` means no port suffix
    #[serde(default)]
    pub port: Option<String>,

    /// Per-probe timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProbeConfig {
    /// Per-probe timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the probe settings
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.path.trim().is_empty() {
            return Err(crate::Error::config("Healthcheck path cannot be empty"));
        }

        match self.scheme.as_str() {
            "http" | "https" => {}
            other => {
                return Err(crate::Error::config(format!(
                    "HTTP scheme '{}' is not supported. Supported schemes: http, https",
                    other
                )));
            }
        }

        if let Some(port) = self.port.as_deref()
            && port.parse::<u16>().is_err()
        {
            return Err(crate::Error::config(format!(
                "HTTP port must be a number between 0 and 65535. Got: {}",
                port
            )));
        }

        if self.timeout_secs == 0 {
            return Err(crate::Error::config("HTTP timeout must be > 0"));
        }

        Ok(())
    }

    /// Build the probe URL for one address: `scheme://address[:port]/path`
    ///
    /// IPv6 literals are bracketed and the path always starts with `/`.
    pub fn url_for(&self, address: &str) -> String {
        let mut host = if address.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]", address)
        } else {
            address.to_string()
        };

        if let Some(port) = self.port.as_deref() {
            host.push(':');
            host.push_str(port);
        }

        if self.path.is_empty() || self.path.starts_with('/') {
            format!("{}://{}{}", self.scheme, host, self.path)
        } else {
            format!("{}://{}/{}", self.scheme, host, self.path)
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            scheme: default_scheme(),
            port: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_scheme() -> String {
    DEFAULT_HTTP_SCHEME.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

/// Flatten comma-delimited rrdata arguments into a single list
///
/// Each entry may itself hold several comma-separated values (as the
/// `RRDATAS` environment variable does). Values are trimmed and empty
/// ones dropped; order and duplicates are kept.
pub fn split_rrdatas<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .flat_map(|v| {
            v.as_ref()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
        })
        .collect()
}
