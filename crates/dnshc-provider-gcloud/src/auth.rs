//! Access tokens for the Cloud DNS API
//!
//! Sources, in the order [`TokenSource::from_env`] picks them:
//!
//! 1. `GOOGLE_OAUTH_ACCESS_TOKEN`: a ready-made bearer token
//!    (e.g. from `gcloud auth print-access-token`)
//! 2. `GOOGLE_APPLICATION_CREDENTIALS`: a service account key file
//! 3. Application Default Credentials: the gcloud user/ADC config, then
//!    the GCE/GKE metadata server

use dnshc_core::{Error, Result};
use gcp_auth::{CustomServiceAccount, TokenProvider};
use std::path::PathBuf;

/// Environment variable holding a pre-issued access token
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Environment variable naming a service account key file
pub const CREDENTIALS_FILE_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// OAuth scope requested for Cloud DNS calls
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Where the bearer token comes from
#[derive(Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// A token supplied up front
    /// ⚠️ NEVER log this value
    Static(String),

    /// A service account JSON key on disk
    ServiceAccountKey {
        /// Path to the key file
        path: PathBuf,
    },

    /// Whatever the Application Default Credentials chain finds
    ApplicationDefault,
}

// Custom Debug implementation that hides the token
impl std::fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(_) => f.debug_tuple("Static").field(&"<REDACTED>").finish(),
            Self::ServiceAccountKey { path } => f
                .debug_struct("ServiceAccountKey")
                .field("path", path)
                .finish(),
            Self::ApplicationDefault => f.write_str("ApplicationDefault"),
        }
    }
}

impl TokenSource {
    /// Pick a source from `GOOGLE_OAUTH_ACCESS_TOKEN` and
    /// `GOOGLE_APPLICATION_CREDENTIALS`
    pub fn from_env() -> Self {
        Self::select(
            std::env::var(ACCESS_TOKEN_ENV).ok().as_deref(),
            std::env::var(CREDENTIALS_FILE_ENV).ok().as_deref(),
        )
    }

    /// Pick a source from the two variables' values
    ///
    /// Blank values count as unset.
    pub fn select(access_token: Option<&str>, credentials_file: Option<&str>) -> Self {
        let access_token = access_token.map(str::trim).filter(|t| !t.is_empty());
        let credentials_file = credentials_file.map(str::trim).filter(|p| !p.is_empty());

        match (access_token, credentials_file) {
            (Some(token), _) => Self::Static(token.to_string()),
            (None, Some(path)) => Self::ServiceAccountKey {
                path: PathBuf::from(path),
            },
            (None, None) => Self::ApplicationDefault,
        }
    }

    /// Resolve a bearer token
    pub async fn access_token(&self) -> Result<String> {
        match self {
            Self::Static(token) => {
                if token.is_empty() {
                    return Err(Error::auth("Access token cannot be empty"));
                }
                Ok(token.clone())
            }
            Self::ServiceAccountKey { path } => {
                tracing::debug!("Loading service account key from {}", path.display());

                let account = CustomServiceAccount::from_file(path).map_err(|e| {
                    Error::auth(format!(
                        "Invalid service account key {}: {}",
                        path.display(),
                        e
                    ))
                })?;

                fetch_token(&account).await
            }
            Self::ApplicationDefault => {
                tracing::debug!("Looking up Application Default Credentials");

                let provider = gcp_auth::provider().await.map_err(|e| {
                    Error::auth(format!(
                        "No Google credentials found ({}). Set {} or {}",
                        e, CREDENTIALS_FILE_ENV, ACCESS_TOKEN_ENV
                    ))
                })?;

                fetch_token(provider.as_ref()).await
            }
        }
    }
}

async fn fetch_token(provider: &dyn TokenProvider) -> Result<String> {
    let token = provider
        .token(&[CLOUD_PLATFORM_SCOPE])
        .await
        .map_err(|e| Error::auth(format!("Failed to obtain access token: {}", e)))?;

    Ok(token.as_str().to_string())
}
