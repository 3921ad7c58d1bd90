//! Upload payloads and presigned targets.

use super::AttachmentError;
use chrono::{DateTime, Utc};

/// A validated file waiting to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl FileUpload {
    /// Validates a file upload.
    ///
    /// The content type is lowercased.
    ///
    /// # Errors
    ///
    /// Returns an [`AttachmentError`] for a blank or path-like file name, a
    /// malformed content type, or empty content.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<Self, AttachmentError> {
        let raw_name = file_name.into();
        let name = raw_name.trim();
        if name.is_empty() {
            return Err(AttachmentError::EmptyFileName);
        }
        if name.contains(['/', '\\']) {
            return Err(AttachmentError::InvalidFileName(raw_name));
        }
        let normalized_type = normalize_content_type(content_type.into())?;
        let content = bytes.into();
        if content.is_empty() {
            return Err(AttachmentError::EmptyFile(name.to_owned()));
        }
        Ok(Self {
            file_name: name.to_owned(),
            content_type: normalized_type,
            bytes: content,
        })
    }

    /// Returns the file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the MIME content type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the file content.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

fn normalize_content_type(raw: String) -> Result<String, AttachmentError> {
    let normalized = raw.trim().to_ascii_lowercase();
    let valid = normalized.split_once('/').is_some_and(|(kind, subtype)| {
        !kind.is_empty()
            && !subtype.is_empty()
            && !subtype.contains('/')
            && !normalized.contains(char::is_whitespace)
    });
    if valid {
        Ok(normalized)
    } else {
        Err(AttachmentError::InvalidContentType(raw))
    }
}

/// Where to send file bytes and where they can be read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    upload_url: String,
    public_url: String,
    expires_at: DateTime<Utc>,
}

impl UploadTarget {
    /// Creates an upload target.
    #[must_use]
    pub fn new(
        upload_url: impl Into<String>,
        public_url: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            upload_url: upload_url.into(),
            public_url: public_url.into(),
            expires_at,
        }
    }

    /// Returns the presigned URL accepting the upload.
    #[must_use]
    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    /// Returns the URL under which the object is readable.
    #[must_use]
    pub fn public_url(&self) -> &str {
        &self.public_url
    }

    /// Returns when the upload URL stops being accepted.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns whether the upload URL has lapsed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
