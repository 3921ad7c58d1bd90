//! Configuration error types.

use thiserror::Error;

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider could not be read or extracted.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A field holds a value outside its allowed range.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// Dotted path of the field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
