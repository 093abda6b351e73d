// # google-cloud-dns-healthcheck
//
// Thin integration layer over dnshc-core:
// 1. Reading configuration from flags and environment variables
// 2. Initializing logging and the runtime
// 3. Building the Cloud DNS provider and the HTTP prober
// 4. Running one reconciliation pass and mapping its result to an exit code
//
// All decision logic lives in dnshc-core. The process runs once and exits;
// run it from cron, a Kubernetes CronJob, Cloud Scheduler, etc.
//
// ## Configuration
//
// Every flag of `run` can also be set through its environment variable:
//
// - `RECORD_NAME` (`-n`): DNS record name
// - `RECORD_TYPE`: DNS record type (default `A`)
// - `PROJECT` (`-p`): Google Cloud project
// - `MANAGED_ZONE` (`-z`): Cloud DNS managed zone
// - `HEALTHCHECK_PATH` (`-c`): URL path probed on every endpoint
// - `RRDATAS` (`-r`): Comma-separated list of expected rrdatas
// - `HTTP_TIMEOUT` (`-t`): Probe timeout in seconds (default 5)
// - `HTTP_SCHEME` (`-s`): `http` or `https` (default `http`)
// - `HTTP_PORT` (`-P`): Port appended to every rrdata (default none)
// - `DRY_RUN` (`-d`): Log the change instead of submitting it
// - `LOG_LEVEL`, `LOG_FORMAT`: Logging (`info`, `text` by default)
//
// Authentication: `GOOGLE_OAUTH_ACCESS_TOKEN` if set, otherwise the key
// file named by `GOOGLE_APPLICATION_CREDENTIALS`, otherwise Application
// Default Credentials (gcloud config, then the metadata server).
//
// ## Example
//
// ```bash
// export RECORD_NAME=www.example.com.
// export PROJECT=my-project
// export MANAGED_ZONE=example-zone
// export HEALTHCHECK_PATH=/healthz
// export RRDATAS=203.0.113.10,203.0.113.11,203.0.113.12
//
// google-cloud-dns-healthcheck run --dry-run
// ```

mod args;

use anyhow::Result;
use args::{Cli, Command, LogFormat};
use clap::Parser;
use dnshc_core::{Error, HealthcheckConfig, HealthcheckEngine, ReconcileOutcome, RunReport};
use dnshc_probe_http::HttpProber;
use dnshc_provider_gcloud::CloudDnsProvider;
use std::process::ExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the possible run results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HealthcheckExitCode {
    /// The pass completed (including no-op and dry-run outcomes)
    Success = 0,
    /// Invalid flags or configuration, or startup failure
    ConfigError = 1,
    /// The record is missing, ambiguous, or shares nothing with the rrdatas
    ConfigMismatch = 2,
    /// Provider, authentication, transport or change submission failure
    RuntimeError = 3,
}

impl From<HealthcheckExitCode> for ExitCode {
    fn from(code: HealthcheckExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Exit code for a failed run
fn exit_code_for(err: &Error) -> HealthcheckExitCode {
    if err.is_config_mismatch() {
        HealthcheckExitCode::ConfigMismatch
    } else if matches!(err, Error::Config(_) | Error::InvalidInput(_)) {
        HealthcheckExitCode::ConfigError
    } else {
        HealthcheckExitCode::RuntimeError
    }
}

fn parse_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "LOG_LEVEL '{}' is not valid. Valid levels: trace, debug, info, warn, error",
            level
        ),
    }
}

fn init_tracing(level: &str, format: LogFormat) -> Result<()> {
    let level = parse_level(level)?;
    let builder = FmtSubscriber::builder().with_max_level(level);

    match format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also land here
            let _ = e.print();
            return if e.use_stderr() {
                HealthcheckExitCode::ConfigError.into()
            } else {
                HealthcheckExitCode::Success.into()
            };
        }
    };

    if let Err(e) = init_tracing(&cli.log_level, cli.log_format) {
        eprintln!("Failed to initialize logging: {}", e);
        return HealthcheckExitCode::ConfigError.into();
    }

    let config = match cli.command {
        Command::Run(args) => args.into_config(),
    };

    if let Err(e) = config.validate() {
        error!("{}", e);
        return HealthcheckExitCode::ConfigError.into();
    }

    // Probes run one after another; a single thread is enough
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return HealthcheckExitCode::ConfigError.into();
        }
    };

    let code = rt.block_on(async {
        match run(config).await {
            Ok(report) => {
                log_report(&report);
                HealthcheckExitCode::Success
            }
            Err(e) => {
                error!("Healthcheck run failed: {}", e);
                exit_code_for(&e)
            }
        }
    });

    code.into()
}

/// Build the collaborators and run one pass
async fn run(config: HealthcheckConfig) -> dnshc_core::Result<RunReport> {
    let prober = HttpProber::new(config.probe.clone())?;
    let provider = CloudDnsProvider::from_env()?;

    let engine = HealthcheckEngine::new(Box::new(provider), Box::new(prober), config)?;
    engine.run_once().await
}

fn log_report(report: &RunReport) {
    let healthy = report
        .verdicts
        .iter()
        .filter(|v| v.verdict.is_healthy())
        .count();

    let action = match &report.outcome {
        ReconcileOutcome::AllHealthy => "none (all healthy)",
        ReconcileOutcome::AllUnhealthy => "none (all unhealthy)",
        ReconcileOutcome::Partial(_) => "record update",
    };

    info!(
        "Healthcheck of {} finished in {}ms: {}/{} healthy, action: {}",
        report.record_name,
        report.elapsed().num_milliseconds(),
        healthy,
        report.verdicts.len(),
        action
    );

    if report.change.is_some() && !report.submitted() {
        debug!("[DRY-RUN] Record update was not submitted");
    }
}
