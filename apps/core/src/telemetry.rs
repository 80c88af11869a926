//! Tracing subscriber setup.

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::{EvaluatorConfig, LogFormat};
use crate::error::AppError;

/// Name reported in bunyan records.
pub const SERVICE_NAME: &str = "simcoach";

/// Builds the `EnvFilter`, preferring `RUST_LOG` over the configured level.
pub fn env_filter(config: &EvaluatorConfig) -> Result<EnvFilter, AppError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            AppError::Config(format!("Invalid log level {:?}: {}", config.log_level, e))
        }),
    }
}

/// Installs the global subscriber. Logs go to stderr so stdout stays free for
/// command output.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &EvaluatorConfig) -> Result<(), AppError> {
    let registry = Registry::default().with(env_filter(config)?);

    match config.log_format {
        LogFormat::Json => registry
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(SERVICE_NAME.to_string(), std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
            .try_init(),
    }
    .map_err(|e| AppError::Config(format!("Failed to install tracing subscriber: {}", e)))
}
