//! Environment-driven configuration.
//!
//! Values are read from `SIMCOACH_*` variables, optionally seeded from a
//! `.env` file, and validated before use.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use validator::Validate;

use crate::error::AppError;
use crate::security::MAX_MESSAGE_LENGTH;

pub const ENV_MAX_MESSAGE_LENGTH: &str = "SIMCOACH_MAX_MESSAGE_LENGTH";
pub const ENV_ALLOWED_ORIGINS: &str = "SIMCOACH_ALLOWED_ORIGINS";
pub const ENV_RESPONDER_TIMEOUT_SECS: &str = "SIMCOACH_RESPONDER_TIMEOUT_SECS";
pub const ENV_LOG_FORMAT: &str = "SIMCOACH_LOG_FORMAT";
pub const ENV_LOG_LEVEL: &str = "SIMCOACH_LOG_LEVEL";

pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_RESPONDER_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, for terminals.
    #[default]
    Pretty,
    /// Bunyan-style JSON lines.
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown log format: {:?}", other))),
        }
    }
}

/// Runtime settings for the evaluator and its session guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EvaluatorConfig {
    /// Maximum message length in characters.
    #[validate(range(min = 1, max = 100000))]
    pub max_message_length: usize,
    /// Origins allowed to submit messages, in ASCII origin serialization.
    #[validate(length(min = 1))]
    pub allowed_origins: Vec<String>,
    /// Upper bound on a single responder call.
    #[validate(range(min = 1, max = 600))]
    pub responder_timeout_secs: u64,
    pub log_format: LogFormat,
    /// `EnvFilter` directive, e.g. `info` or `simcoach_core=debug`.
    #[validate(length(min = 1))]
    pub log_level: String,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_message_length: MAX_MESSAGE_LENGTH,
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
            responder_timeout_secs: DEFAULT_RESPONDER_TIMEOUT_SECS,
            log_format: LogFormat::Pretty,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl EvaluatorConfig {
    /// Loads configuration from the process environment, after seeding it
    /// from a `.env` file in the working directory if one exists.
    pub fn from_env() -> Result<Self, AppError> {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded .env file");
        }
        Self::from_process_env()
    }

    /// Like [`EvaluatorConfig::from_env`] but reads the given dotenv file,
    /// which must exist. Variables already set in the environment win.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        dotenv::from_path(path)
            .map_err(|e| AppError::Config(format!("Failed to load {}: {}", path.display(), e)))?;
        Self::from_process_env()
    }

    fn from_process_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let allowed_origins = match read_var(ENV_ALLOWED_ORIGINS) {
            Some(raw) => parse_origins(&raw)?,
            None => defaults.allowed_origins,
        };

        let config = Self {
            max_message_length: parse_var(ENV_MAX_MESSAGE_LENGTH, defaults.max_message_length)?,
            allowed_origins,
            responder_timeout_secs: parse_var(
                ENV_RESPONDER_TIMEOUT_SECS,
                defaults.responder_timeout_secs,
            )?,
            log_format: parse_var(ENV_LOG_FORMAT, defaults.log_format)?,
            log_level: read_var(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn responder_timeout(&self) -> Duration {
        Duration::from_secs(self.responder_timeout_secs)
    }
}

/// Reads a variable, treating blank values as unset.
fn read_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, AppError>
where
    T::Err: Display,
{
    match read_var(key) {
        Some(raw) => raw.parse().map_err(|e| {
            warn!("Invalid {key} value: {e}");
            AppError::Config(format!("Invalid {}={:?}: {}", key, raw, e))
        }),
        None => Ok(default),
    }
}

/// Parses a comma-separated origin list into ASCII origin serializations.
pub fn parse_origins(raw: &str) -> Result<Vec<String>, AppError> {
    let mut origins = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let url = Url::parse(entry)
            .map_err(|e| AppError::Config(format!("Invalid origin {:?}: {}", entry, e)))?;
        let origin = url.origin();
        if !origin.is_tuple() {
            return Err(AppError::Config(format!("Origin {:?} has no host", entry)));
        }
        let serialized = origin.ascii_serialization();
        if !origins.contains(&serialized) {
            origins.push(serialized);
        }
    }
    Ok(origins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EvaluatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_message_length, 1000);
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.responder_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_origins_normalizes() {
        let origins = parse_origins(" https://app.example.com/ , http://LOCALHOST:3000,https://app.example.com:443").unwrap();
        assert_eq!(origins, vec!["https://app.example.com", "http://localhost:3000"]);
    }

    #[test]
    fn test_parse_origins_rejects_garbage() {
        assert!(matches!(parse_origins("not a url"), Err(AppError::Config(_))));
        assert!(matches!(parse_origins("data:text/plain,hi"), Err(AppError::Config(_))));
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
