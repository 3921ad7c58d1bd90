//! Transactional email rendering.
//!
//! Only the one-time passcode email is rendered here. Issuing codes and
//! delivering mail belong to external collaborators.

mod error;
mod otp;

pub use error::NotificationError;
pub use otp::{OtpCode, OtpEmail, OtpEmailRenderer, RenderedEmail};
