//! Object storage port for attachment uploads.

use crate::attachment::domain::UploadTarget;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for object storage operations.
pub type ObjectStorageResult<T> = Result<T, ObjectStorageError>;

/// Presigned-upload object store.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Reserves an upload slot for a file.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStorageError::Persistence`] when the store cannot
    /// issue a target.
    async fn presign_upload(
        &self,
        content_type: &str,
        file_name: &str,
    ) -> ObjectStorageResult<UploadTarget>;

    /// Sends file content to a previously issued target.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStorageError::Expired`] once the target has lapsed
    /// and [`ObjectStorageError::UnknownTarget`] for targets the store did
    /// not issue.
    async fn upload(&self, target: &UploadTarget, bytes: &[u8]) -> ObjectStorageResult<()>;
}

/// Errors returned by object storage implementations.
#[derive(Debug, Clone, Error)]
pub enum ObjectStorageError {
    /// The presigned upload URL is no longer valid.
    #[error("upload URL expired: {0}")]
    Expired(String),

    /// The store never issued this upload URL, or it was already used.
    #[error("unknown upload URL: {0}")]
    UnknownTarget(String),

    /// Storage-layer failure.
    #[error("storage error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ObjectStorageError {
    /// Wraps a storage-layer error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
