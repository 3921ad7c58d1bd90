//! Domain model for file uploads.

mod error;
mod upload;

pub use error::AttachmentError;
pub use upload::{FileUpload, UploadTarget};
