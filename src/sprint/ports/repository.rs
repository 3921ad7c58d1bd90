//! Repository port for sprint persistence and lookup.

use crate::sprint::domain::{Sprint, SprintId};
use crate::workspace::domain::ProjectId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for sprint repository operations.
pub type SprintRepositoryResult<T> = Result<T, SprintRepositoryError>;

/// Sprint persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SprintRepository: Send + Sync {
    /// Stores a new sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintRepositoryError::DuplicateSprint`] when the identifier
    /// already exists.
    async fn store(&self, sprint: &Sprint) -> SprintRepositoryResult<()>;

    /// Persists changes to an existing sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintRepositoryError::NotFound`] when the sprint does not
    /// exist.
    async fn update(&self, sprint: &Sprint) -> SprintRepositoryResult<()>;

    /// Finds a sprint by identifier.
    async fn find_by_id(&self, id: SprintId) -> SprintRepositoryResult<Option<Sprint>>;

    /// Returns every sprint of a project in creation order.
    async fn list_by_project(&self, project_id: ProjectId) -> SprintRepositoryResult<Vec<Sprint>>;

    /// Returns the active sprints of a project.
    ///
    /// With the single-active-sprint rule enabled this holds at most one
    /// element.
    async fn find_active(&self, project_id: ProjectId) -> SprintRepositoryResult<Vec<Sprint>>;
}

/// Errors returned by sprint repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SprintRepositoryError {
    /// A sprint with the same identifier already exists.
    #[error("duplicate sprint identifier: {0}")]
    DuplicateSprint(SprintId),

    /// The sprint was not found.
    #[error("sprint not found: {0}")]
    NotFound(SprintId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SprintRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
