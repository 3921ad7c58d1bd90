//! In-memory object store for tests and local runs.

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

use crate::attachment::{
    domain::UploadTarget,
    ports::{ObjectStorage, ObjectStorageError, ObjectStorageResult},
};
use crate::config::StorageConfig;

/// An object held by [`InMemoryObjectStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// MIME content type declared at presign time.
    pub content_type: String,
    /// Object content.
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
struct PendingUpload {
    public_url: String,
    content_type: String,
    expires_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Default)]
struct InMemoryStorageState {
    pending: HashMap<String, PendingUpload>,
    objects: HashMap<String, StoredObject>,
}

/// Thread-safe in-memory object store issuing presigned-style URLs.
#[derive(Debug, Clone)]
pub struct InMemoryObjectStorage<C>
where
    C: Clock + Send + Sync,
{
    public_base_url: String,
    upload_ttl: Duration,
    clock: Arc<C>,
    state: Arc<RwLock<InMemoryStorageState>>,
}

impl<C> InMemoryObjectStorage<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store using the configured base URL and upload
    /// lifetime.
    #[must_use]
    pub fn new(config: &StorageConfig, clock: Arc<C>) -> Self {
        let ttl_secs = u32::try_from(config.upload_url_ttl_secs).unwrap_or(u32::MAX);
        Self {
            public_base_url: config.public_base_url.trim().trim_end_matches('/').to_owned(),
            upload_ttl: Duration::seconds(i64::from(ttl_secs)),
            clock,
            state: Arc::new(RwLock::new(InMemoryStorageState::default())),
        }
    }

    /// Returns the object stored under a public URL.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStorageError::Persistence`] when the state lock is
    /// poisoned.
    pub fn stored_object(&self, public_url: &str) -> ObjectStorageResult<Option<StoredObject>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.objects.get(public_url).cloned())
    }
}

#[async_trait]
impl<C> ObjectStorage for InMemoryObjectStorage<C>
where
    C: Clock + Send + Sync,
{
    async fn presign_upload(
        &self,
        content_type: &str,
        file_name: &str,
    ) -> ObjectStorageResult<UploadTarget> {
        let object_key = format!("{}/{}", Uuid::new_v4(), encode_segment(file_name));
        let public_url = format!("{}/{object_key}", self.public_base_url);
        let upload_url = format!("{}/uploads/{object_key}", self.public_base_url);
        let expires_at = self.clock.utc() + self.upload_ttl;

        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.pending.insert(
            upload_url.clone(),
            PendingUpload {
                public_url: public_url.clone(),
                content_type: content_type.to_owned(),
                expires_at,
            },
        );
        Ok(UploadTarget::new(upload_url, public_url, expires_at))
    }

    async fn upload(&self, target: &UploadTarget, bytes: &[u8]) -> ObjectStorageResult<()> {
        let now = self.clock.utc();
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let pending = state
            .pending
            .remove(target.upload_url())
            .ok_or_else(|| ObjectStorageError::UnknownTarget(target.upload_url().to_owned()))?;
        if now > pending.expires_at {
            return Err(ObjectStorageError::Expired(target.upload_url().to_owned()));
        }
        state.objects.insert(
            pending.public_url,
            StoredObject {
                content_type: pending.content_type,
                bytes: bytes.to_vec(),
            },
        );
        Ok(())
    }
}

fn encode_segment(file_name: &str) -> String {
    file_name
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

fn lock_error<T>(err: &PoisonError<T>) -> ObjectStorageError {
    ObjectStorageError::persistence(std::io::Error::other(err.to_string()))
}
