//! Attachments stored on issues.

use super::IssueDomainError;
use serde::{Deserialize, Serialize};

/// Kind of attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    /// File uploaded to object storage.
    File,
    /// External link.
    Link,
}

/// File or link attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    kind: AttachmentKind,
    url: String,
    display_name: String,
}

impl Attachment {
    /// Creates a file attachment pointing at its public storage URL.
    ///
    /// # Errors
    ///
    /// Returns an [`IssueDomainError`] when the URL is not `http(s)` or the
    /// file name is empty.
    pub fn file(
        url: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Result<Self, IssueDomainError> {
        let normalized_url = validate_url(url.into())?;
        let name = file_name.into();
        let normalized_name = name.trim();
        if normalized_name.is_empty() {
            return Err(IssueDomainError::EmptyAttachmentName);
        }
        Ok(Self {
            kind: AttachmentKind::File,
            url: normalized_url,
            display_name: normalized_name.to_owned(),
        })
    }

    /// Creates a link attachment. An empty display name falls back to the
    /// URL itself.
    ///
    /// # Errors
    ///
    /// Returns an [`IssueDomainError`] when the URL is not `http(s)`.
    pub fn link(
        url: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, IssueDomainError> {
        let normalized_url = validate_url(url.into())?;
        let name = display_name.into();
        let normalized_name = name.trim();
        let resolved_name = if normalized_name.is_empty() {
            normalized_url.clone()
        } else {
            normalized_name.to_owned()
        };
        Ok(Self {
            kind: AttachmentKind::Link,
            url: normalized_url,
            display_name: resolved_name,
        })
    }

    /// Returns the attachment kind.
    #[must_use]
    pub const fn kind(&self) -> AttachmentKind {
        self.kind
    }

    /// Returns the attachment URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the name shown to users.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

fn validate_url(raw: String) -> Result<String, IssueDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IssueDomainError::EmptyAttachmentUrl);
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(IssueDomainError::InvalidAttachmentUrl(raw));
    }
    Ok(trimmed.to_owned())
}
