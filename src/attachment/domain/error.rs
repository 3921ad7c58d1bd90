//! Error types for upload validation.

use thiserror::Error;

/// Errors returned while validating a file upload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttachmentError {
    /// The file name is empty after trimming.
    #[error("file name must not be empty")]
    EmptyFileName,

    /// The file name contains a path separator.
    #[error("file name '{0}' must not contain path separators")]
    InvalidFileName(String),

    /// The content type is not of the form `type/subtype`.
    #[error("invalid content type '{0}', expected type/subtype")]
    InvalidContentType(String),

    /// The upload has no content.
    #[error("file '{0}' is empty")]
    EmptyFile(String),
}
