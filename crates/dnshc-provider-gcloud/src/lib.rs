// # Google Cloud DNS Provider
//
// This crate provides the Google Cloud DNS implementation of `DnsProvider`.
//
// ## Behavior
//
// - One list request to fetch the record set, one change request to rewrite it
// - Full error propagation to the engine; no retry, no backoff
// - Specific error mapping for HTTP status codes (401/403, 404, 409, 412, 429, 5xx)
// - Access token resolved once per provider and never logged
//
// Dry-run is owned by the engine's `RecordMutator`, so this provider
// always submits what it is given.
//
// ## API Reference
//
// - Cloud DNS API v1: https://cloud.google.com/dns/docs/reference/rest/v1
// - List record sets: GET `/projects/:project/managedZones/:zone/rrsets?name=...&type=...`
// - Create change: POST `/projects/:project/managedZones/:zone/changes`

pub mod auth;

pub use auth::TokenSource;

use async_trait::async_trait;
use dnshc_core::model::{Change, ChangeAck, ManagedZoneRef, ResourceRecordSet};
use dnshc_core::traits::DnsProvider;
use dnshc_core::{Error, Result};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Cloud DNS API base URL
pub const CLOUD_DNS_API_BASE: &str = "https://dns.googleapis.com/dns/v1";

/// Environment variable overriding [`CLOUD_DNS_API_BASE`]
pub const ENDPOINT_ENV: &str = "CLOUD_DNS_ENDPOINT";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Response body of the record set list call
#[derive(Debug, Deserialize)]
struct RrsetsListResponse {
    #[serde(default)]
    rrsets: Vec<ResourceRecordSet>,
}

/// Google Cloud DNS provider
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the access token.
pub struct CloudDnsProvider {
    /// API base URL (overridable for tests)
    base_url: String,

    /// Where the bearer token comes from
    token_source: TokenSource,

    /// Token resolved on first use
    /// ⚠️ NEVER log this value
    token: OnceCell<String>,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the access token
impl std::fmt::Debug for CloudDnsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudDnsProvider")
            .field("base_url", &self.base_url)
            .field("token_source", &self.token_source)
            .field("token", &"<REDACTED>")
            .finish()
    }
}

impl CloudDnsProvider {
    /// Create a new Cloud DNS provider against the public API
    pub fn new(token_source: TokenSource) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: CLOUD_DNS_API_BASE.to_string(),
            token_source,
            token: OnceCell::new(),
            client,
        })
    }

    /// Create a provider from the environment
    ///
    /// Token from [`TokenSource::from_env`], API base from `CLOUD_DNS_ENDPOINT`
    /// when set.
    pub fn from_env() -> Result<Self> {
        let provider = Self::new(TokenSource::from_env())?;

        match std::env::var(ENDPOINT_ENV) {
            Ok(endpoint) if !endpoint.trim().is_empty() => Ok(provider.with_base_url(endpoint)),
            _ => Ok(provider),
        }
    }

    /// Use a different API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `/projects/:project/managedZones/:zone`
    fn zone_url(&self, zone: &ManagedZoneRef) -> String {
        format!(
            "{}/projects/{}/managedZones/{}",
            self.base_url, zone.project, zone.managed_zone
        )
    }

    async fn bearer(&self) -> Result<&str> {
        let token = self
            .token
            .get_or_try_init(|| self.token_source.access_token())
            .await?;
        Ok(token.as_str())
    }
}

/// Cloud DNS record names are fully qualified
fn fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Map a non-success API response to an error
fn status_error(status: reqwest::StatusCode, body: &str, context: &str) -> Error {
    match status.as_u16() {
        401 | 403 => Error::auth(format!(
            "Invalid access token or insufficient permissions. Status: {}",
            status
        )),
        404 => Error::not_found(format!("{}: {} - {}", context, status, body)),
        409 => Error::provider(
            "gcloud",
            format!("Conflict: change collides with another change. Status: {}", status),
        ),
        412 => Error::provider(
            "gcloud",
            format!(
                "Precondition failed: record changed since it was read. Status: {} - {}",
                status, body
            ),
        ),
        429 => Error::rate_limited(format!("Quota exceeded. Please retry later. Status: {}", status)),
        500..=599 => Error::provider(
            "gcloud",
            format!("Cloud DNS server error (transient): {} - {}", status, body),
        ),
        _ => Error::provider("gcloud", format!("{}: {} - {}", context, status, body)),
    }
}

async fn read_error_body(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error response".to_string())
}

#[async_trait]
impl DnsProvider for CloudDnsProvider {
    /// # API Call
    ///
    /// ```http
    /// GET /projects/:project/managedZones/:zone/rrsets?name=www.example.com.&type=A
    /// Authorization: Bearer <token>
    /// ```
    async fn fetch_record(
        &self,
        zone: &ManagedZoneRef,
        name: &str,
        record_type: &str,
    ) -> Result<ResourceRecordSet> {
        let name = fqdn(name);
        tracing::debug!("Looking up record set: {} (type: {}) in {}", name, record_type, zone);

        let url = format!("{}/rrsets", self.zone_url(zone));
        let token = self.bearer().await?;

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("name", name.as_str()), ("type", record_type)])
            .send()
            .await
            .map_err(|e| Error::http(format!("Issues find record {}: {}", name, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = read_error_body(response).await;
            return Err(status_error(status, &body, "Record set lookup failed"));
        }

        let list: RrsetsListResponse = response
            .json()
            .await
            .map_err(|e| Error::provider("gcloud", format!("Failed to parse response: {}", e)))?;

        let mut rrsets = list.rrsets;
        match rrsets.len() {
            0 => Err(Error::not_found(format!(
                "DNS record not found: {} (type: {}) in {}",
                name, record_type, zone
            ))),
            1 => Ok(rrsets.remove(0)),
            count => Err(Error::AmbiguousRecord { name, count }),
        }
    }

    /// # API Call
    ///
    /// ```http
    /// POST /projects/:project/managedZones/:zone/changes
    /// Authorization: Bearer <token>
    /// { "additions": [...], "deletions": [...] }
    /// ```
    async fn submit_change(&self, zone: &ManagedZoneRef, change: &Change) -> Result<ChangeAck> {
        let url = format!("{}/changes", self.zone_url(zone));
        let token = self.bearer().await?;

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(change)
            .send()
            .await
            .map_err(|e| Error::http(format!("Change request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = read_error_body(response).await;

            // The record was already fetched; a 404 here is not a config mismatch
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(Error::provider(
                    "gcloud",
                    format!("Failed to create change: {} - {}", status, body),
                ));
            }

            return Err(status_error(status, &body, "Failed to create change"));
        }

        response
            .json()
            .await
            .map_err(|e| Error::provider("gcloud", format!("Failed to parse response: {}", e)))
    }

    fn provider_name(&self) -> &'static str {
        "gcloud"
    }
}
