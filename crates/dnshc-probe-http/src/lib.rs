// # HTTP Health Prober
//
// This crate provides the HTTP implementation of `HealthProber`.
//
// ## Behavior
//
// One GET per address against `scheme://address[:port]/path`, bounded by
// the configured timeout:
//
// - 200..=399 → healthy
// - any other status → unhealthy
// - connection refused, timeout, DNS failure → unhealthy
//
// Redirects are not followed: a 3xx answer is itself a healthy answer.
// Nothing here retries; an unhealthy verdict is final for the run.

use async_trait::async_trait;
use dnshc_core::config::ProbeConfig;
use dnshc_core::model::{classify_status, HealthVerdict, ProbeFailure};
use dnshc_core::traits::HealthProber;
use dnshc_core::{Error, Result};
use tracing::{info, warn};

/// User agent sent with every probe
const USER_AGENT: &str = concat!("google-cloud-dns-healthcheck/", env!("CARGO_PKG_VERSION"));

/// HTTP GET prober
pub struct HttpProber {
    /// Scheme, port, path and timeout
    config: ProbeConfig,

    /// HTTP client (timeout applied per request)
    client: reqwest::Client,
}

impl HttpProber {
    /// Create a new HTTP prober
    ///
    /// # Returns
    ///
    /// - `Ok(Self)`: The client was built
    /// - `Err(Error::Config)`: The probe settings are invalid or the
    ///   HTTP client could not be built
    pub fn new(config: ProbeConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }
}

#[async_trait]
impl HealthProber for HttpProber {
    async fn probe(&self, address: &str) -> HealthVerdict {
        let url = self.config.url_for(address);

        if let Err(e) = reqwest::Url::parse(&url) {
            warn!("Error probing for {}: {}", url, e);
            return HealthVerdict::Unhealthy(ProbeFailure::InvalidTarget(e.to_string()));
        }

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Error probing for {}: {}", url, e);
                return HealthVerdict::Unhealthy(ProbeFailure::Transport(e.to_string()));
            }
        };

        let status = response.status().as_u16();
        let verdict = classify_status(status);

        if verdict.is_healthy() {
            info!("Success probing for {}", url);
        } else {
            warn!("Error probing for {}: {} code", url, status);
        }

        verdict
    }
}
