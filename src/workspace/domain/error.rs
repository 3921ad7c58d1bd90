//! Error types for workspace scoping values.

use thiserror::Error;

/// Errors returned while constructing workspace domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkspaceDomainError {
    /// The project key is not 2-10 uppercase alphanumerics starting with a
    /// letter.
    #[error("invalid project key '{0}', expected 2-10 letters or digits starting with a letter")]
    InvalidProjectKey(String),
}
