use clap::{Args, Parser, Subcommand, ValueEnum};
use dnshc_core::config::{split_rrdatas, DEFAULT_RECORD_TYPE};
use dnshc_core::{HealthcheckConfig, ManagedZoneRef, ProbeConfig};

/// Check health of endpoints related to a Google Cloud DNS record and update it accordingly
#[derive(Parser, Debug)]
#[command(name = "google-cloud-dns-healthcheck", author, version, about, long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Probe the record's endpoints once and drop the unhealthy ones from it
    Run(RunArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Dns record name
    #[arg(short = 'n', long, env = "RECORD_NAME")]
    pub record_name: String,

    /// Dns record type
    #[arg(long, env = "RECORD_TYPE", default_value = DEFAULT_RECORD_TYPE)]
    pub record_type: String,

    /// Google project
    #[arg(short = 'p', long, env = "PROJECT")]
    pub project: String,

    /// Google DNS managed zone
    #[arg(short = 'z', long, env = "MANAGED_ZONE")]
    pub managed_zone: String,

    /// Path requested on every endpoint
    #[arg(short = 'c', long, env = "HEALTHCHECK_PATH")]
    pub healthcheck_path: String,

    /// Expected rrdatas (comma-separated, or the flag repeated)
    #[arg(short = 'r', long, env = "RRDATAS", value_delimiter = ',', required = true)]
    pub rrdatas: Vec<String>,

    /// Timeout of each HTTP probe, in seconds
    #[arg(short = 't', long, env = "HTTP_TIMEOUT", default_value_t = 5)]
    pub http_timeout: u64,

    /// Http scheme
    #[arg(short = 's', long, env = "HTTP_SCHEME", default_value = "http")]
    pub http_scheme: String,

    /// Port for the HTTP connections
    #[arg(short = 'P', long, env = "HTTP_PORT")]
    pub http_port: Option<String>,

    /// Run without performing any modification
    #[arg(short = 'd', long, env = "DRY_RUN")]
    pub dry_run: bool,
}

impl RunArgs {
    /// Build the immutable run configuration
    pub fn into_config(self) -> HealthcheckConfig {
        HealthcheckConfig {
            record_name: self.record_name.trim().to_string(),
            record_type: self.record_type.trim().to_uppercase(),
            zone: ManagedZoneRef::new(self.project.trim(), self.managed_zone.trim()),
            rrdatas: split_rrdatas(&self.rrdatas),
            probe: ProbeConfig {
                path: self.healthcheck_path,
                scheme: self.http_scheme.trim().to_lowercase(),
                port: self
                    .http_port
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty()),
                timeout_secs: self.http_timeout,
            },
            dry_run: self.dry_run,
        }
    }
}
