//! In-memory repository for sprint tests and local tooling.

use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

use crate::sprint::{
    domain::{Sprint, SprintId, SprintStatus},
    ports::{SprintRepository, SprintRepositoryError, SprintRepositoryResult},
};
use crate::workspace::domain::ProjectId;

/// Thread-safe in-memory sprint repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySprintRepository {
    sprints: Arc<RwLock<Vec<Sprint>>>,
}

impl InMemorySprintRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn filtered(
        &self,
        predicate: impl Fn(&Sprint) -> bool,
    ) -> SprintRepositoryResult<Vec<Sprint>> {
        let sprints = self.sprints.read().map_err(|err| lock_error(&err))?;
        Ok(sprints
            .iter()
            .filter(|sprint| predicate(sprint))
            .cloned()
            .collect())
    }
}

fn lock_error<T>(err: &PoisonError<T>) -> SprintRepositoryError {
    SprintRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SprintRepository for InMemorySprintRepository {
    async fn store(&self, sprint: &Sprint) -> SprintRepositoryResult<()> {
        let mut sprints = self.sprints.write().map_err(|err| lock_error(&err))?;
        if sprints.iter().any(|existing| existing.id() == sprint.id()) {
            return Err(SprintRepositoryError::DuplicateSprint(sprint.id()));
        }
        sprints.push(sprint.clone());
        Ok(())
    }

    async fn update(&self, sprint: &Sprint) -> SprintRepositoryResult<()> {
        let mut sprints = self.sprints.write().map_err(|err| lock_error(&err))?;
        let slot = sprints
            .iter_mut()
            .find(|existing| existing.id() == sprint.id())
            .ok_or(SprintRepositoryError::NotFound(sprint.id()))?;
        *slot = sprint.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: SprintId) -> SprintRepositoryResult<Option<Sprint>> {
        Ok(self.filtered(|sprint| sprint.id() == id)?.into_iter().next())
    }

    async fn list_by_project(&self, project_id: ProjectId) -> SprintRepositoryResult<Vec<Sprint>> {
        self.filtered(|sprint| sprint.project_id() == project_id)
    }

    async fn find_active(&self, project_id: ProjectId) -> SprintRepositoryResult<Vec<Sprint>> {
        self.filtered(|sprint| {
            sprint.project_id() == project_id && sprint.status() == SprintStatus::Active
        })
    }
}
