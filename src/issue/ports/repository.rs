//! Repository port for issue persistence and lookup.

use crate::issue::domain::{Issue, IssueId, IssueKey, IssueNumber};
use crate::sprint::domain::SprintId;
use crate::workspace::domain::ProjectId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for issue repository operations.
pub type IssueRepositoryResult<T> = Result<T, IssueRepositoryError>;

/// Issue persistence contract.
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Reserves the next issue number for a project. Numbers start at 1 and
    /// are never handed out twice.
    async fn next_issue_number(&self, project_id: ProjectId) -> IssueRepositoryResult<IssueNumber>;

    /// Stores a new issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueRepositoryError::DuplicateIssue`] when the identifier
    /// exists or [`IssueRepositoryError::DuplicateKey`] when the key is taken
    /// within the project.
    async fn store(&self, issue: &Issue) -> IssueRepositoryResult<()>;

    /// Persists changes to an existing issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueRepositoryError::NotFound`] when the issue does not
    /// exist.
    async fn update(&self, issue: &Issue) -> IssueRepositoryResult<()>;

    /// Deletes the given issues in one step. Either all are removed or none.
    ///
    /// # Errors
    ///
    /// Returns [`IssueRepositoryError::NotFound`] when any identifier is
    /// unknown.
    async fn delete_many(&self, issue_ids: &[IssueId]) -> IssueRepositoryResult<()>;

    /// Finds an issue by identifier.
    async fn find_by_id(&self, id: IssueId) -> IssueRepositoryResult<Option<Issue>>;

    /// Finds an issue by human-readable key within a project.
    async fn find_by_key(
        &self,
        project_id: ProjectId,
        key: &IssueKey,
    ) -> IssueRepositoryResult<Option<Issue>>;

    /// Returns every issue of a project in creation order.
    async fn list_by_project(&self, project_id: ProjectId) -> IssueRepositoryResult<Vec<Issue>>;

    /// Returns every issue planned into a sprint in creation order.
    async fn list_by_sprint(&self, sprint_id: SprintId) -> IssueRepositoryResult<Vec<Issue>>;

    /// Moves the given issues to `sprint_id` (`None` = backlog) in one step.
    ///
    /// # Errors
    ///
    /// Returns [`IssueRepositoryError::NotFound`] when any identifier is
    /// unknown; no issue is moved in that case.
    async fn reassign_sprint(
        &self,
        issue_ids: &[IssueId],
        sprint_id: Option<SprintId>,
        updated_at: DateTime<Utc>,
    ) -> IssueRepositoryResult<()>;
}

/// Errors returned by issue repository implementations.
#[derive(Debug, Clone, Error)]
pub enum IssueRepositoryError {
    /// An issue with the same identifier already exists.
    #[error("duplicate issue identifier: {0}")]
    DuplicateIssue(IssueId),

    /// An issue with the same key already exists.
    #[error("duplicate issue key: {0}")]
    DuplicateKey(IssueKey),

    /// The issue was not found.
    #[error("issue not found: {0}")]
    NotFound(IssueId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IssueRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
