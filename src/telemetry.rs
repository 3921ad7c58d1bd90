//! Structured logging bootstrap.

use crate::config::LoggingConfig;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV_VAR: &str = "PROJEXA_LOG";

/// Errors returned while installing the log subscriber.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TelemetryError {
    /// The configured fallback directive could not be parsed.
    #[error("invalid log filter '{directive}': {reason}")]
    InvalidFilter {
        /// Offending directive.
        directive: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber was already installed.
    #[error("failed to initialize tracing subscriber: {0}")]
    AlreadyInitialized(String),
}

/// Builds the log filter from [`LOG_ENV_VAR`], falling back to the
/// configured level.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when the environment variable is
/// unset or invalid and the configured level cannot be parsed either.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_env(LOG_ENV_VAR).or_else(|_| {
        EnvFilter::try_new(config.level.trim()).map_err(|error| TelemetryError::InvalidFilter {
            directive: config.level.clone(),
            reason: error.to_string(),
        })
    })
}

/// Installs a global `fmt` subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid or a subscriber is
/// already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| TelemetryError::AlreadyInitialized(error.to_string()))
}
