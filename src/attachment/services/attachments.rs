//! Service layer for uploading files and linking resources to issues.

use crate::attachment::{
    domain::{AttachmentError, FileUpload},
    ports::{ObjectStorage, ObjectStorageError},
};
use crate::issue::{
    domain::{Attachment, Issue, IssueDomainError, IssueId},
    ports::{IssueRepository, IssueRepositoryError},
};
use crate::workspace::domain::SessionContext;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for attachment operations.
#[derive(Debug, Error)]
pub enum AttachmentServiceError {
    /// The upload payload is invalid.
    #[error(transparent)]
    Upload(#[from] AttachmentError),

    /// The attachment violates issue rules.
    #[error(transparent)]
    Domain(#[from] IssueDomainError),

    /// Issue repository operation failed.
    #[error(transparent)]
    Repository(#[from] IssueRepositoryError),

    /// Object storage operation failed.
    #[error(transparent)]
    Storage(#[from] ObjectStorageError),

    /// No issue with the identifier exists in the session's project.
    #[error("issue not found: {0}")]
    IssueNotFound(IssueId),
}

impl AttachmentServiceError {
    /// Returns whether the caller supplied invalid input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Upload(_)
                | Self::Domain(
                    IssueDomainError::EmptyAttachmentUrl
                        | IssueDomainError::InvalidAttachmentUrl(_)
                        | IssueDomainError::EmptyAttachmentName
                )
        )
    }
}

/// Result type for attachment service operations.
pub type AttachmentServiceResult<T> = Result<T, AttachmentServiceError>;

/// Attachment orchestration service.
#[derive(Clone)]
pub struct AttachmentService<R, O, C>
where
    R: IssueRepository,
    O: ObjectStorage,
    C: Clock + Send + Sync,
{
    issues: Arc<R>,
    storage: Arc<O>,
    clock: Arc<C>,
}

impl<R, O, C> AttachmentService<R, O, C>
where
    R: IssueRepository,
    O: ObjectStorage,
    C: Clock + Send + Sync,
{
    /// Creates a new attachment service.
    #[must_use]
    pub const fn new(issues: Arc<R>, storage: Arc<O>, clock: Arc<C>) -> Self {
        Self {
            issues,
            storage,
            clock,
        }
    }

    /// Uploads a file and attaches its public URL to an issue.
    ///
    /// A failed upload is not retried and leaves the issue unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError::IssueNotFound`] when the issue is
    /// outside the session's project and [`AttachmentServiceError::Storage`]
    /// when presigning or uploading fails.
    pub async fn attach_file(
        &self,
        context: &SessionContext,
        issue_id: IssueId,
        upload: FileUpload,
    ) -> AttachmentServiceResult<Issue> {
        let mut issue = self.load(context, issue_id).await?;
        let target = self
            .storage
            .presign_upload(upload.content_type(), upload.file_name())
            .await?;
        self.storage.upload(&target, upload.bytes()).await?;

        let attachment = Attachment::file(target.public_url(), upload.file_name())?;
        issue.add_attachment(attachment, &*self.clock);
        self.issues.update(&issue).await?;
        tracing::info!(
            issue = %issue.key(),
            file = upload.file_name(),
            size = upload.bytes().len(),
            "file attached"
        );
        Ok(issue)
    }

    /// Attaches an external link to an issue.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError::Domain`] for a non-`http(s)` URL.
    pub async fn attach_link(
        &self,
        context: &SessionContext,
        issue_id: IssueId,
        url: &str,
        display_name: &str,
    ) -> AttachmentServiceResult<Issue> {
        let attachment = Attachment::link(url, display_name)?;
        let mut issue = self.load(context, issue_id).await?;
        issue.add_attachment(attachment, &*self.clock);
        self.issues.update(&issue).await?;
        tracing::info!(issue = %issue.key(), url, "link attached");
        Ok(issue)
    }

    /// Removes the attachment with the given URL from an issue.
    ///
    /// The stored object itself is left in place.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::AttachmentNotFound`] wrapped in
    /// [`AttachmentServiceError::Domain`] when no attachment has that URL.
    pub async fn remove_attachment(
        &self,
        context: &SessionContext,
        issue_id: IssueId,
        url: &str,
    ) -> AttachmentServiceResult<Attachment> {
        let mut issue = self.load(context, issue_id).await?;
        let removed = issue.remove_attachment(url, &*self.clock)?;
        self.issues.update(&issue).await?;
        tracing::info!(issue = %issue.key(), url, "attachment removed");
        Ok(removed)
    }

    async fn load(
        &self,
        context: &SessionContext,
        issue_id: IssueId,
    ) -> AttachmentServiceResult<Issue> {
        self.issues
            .find_by_id(issue_id)
            .await?
            .filter(|found| context.covers(found.workspace_id(), found.project_id()))
            .ok_or(AttachmentServiceError::IssueNotFound(issue_id))
    }
}
