//! Application services for issue attachments.

mod attachments;

pub use attachments::{AttachmentService, AttachmentServiceError, AttachmentServiceResult};
