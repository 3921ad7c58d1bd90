//! Error types for email rendering.

use thiserror::Error;

/// Errors returned while preparing or rendering an email.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationError {
    /// The passcode is not 4 to 8 ASCII digits.
    #[error("one-time passcode must be 4 to 8 digits")]
    InvalidCode,

    /// The passcode validity is zero minutes.
    #[error("passcode validity must be at least one minute")]
    InvalidValidity,

    /// A template failed to compile or render.
    #[error("failed to render template '{template}': {reason}")]
    TemplateRender {
        /// Template name.
        template: &'static str,
        /// Renderer error message.
        reason: String,
    },
}
