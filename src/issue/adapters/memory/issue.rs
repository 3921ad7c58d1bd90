//! In-memory repository for issue tests and local tooling.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::issue::{
    domain::{Issue, IssueId, IssueKey, IssueNumber},
    ports::{IssueRepository, IssueRepositoryError, IssueRepositoryResult},
};
use crate::sprint::domain::SprintId;
use crate::workspace::domain::ProjectId;

/// Thread-safe in-memory issue repository.
///
/// Listing preserves insertion order, mirroring creation order in storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssueRepository {
    state: Arc<RwLock<InMemoryIssueState>>,
}

#[derive(Debug, Default)]
struct InMemoryIssueState {
    issues: HashMap<IssueId, Issue>,
    insertion_order: Vec<IssueId>,
    key_index: HashMap<(ProjectId, IssueKey), IssueId>,
    issue_counters: HashMap<ProjectId, u64>,
}

impl InMemoryIssueState {
    fn ordered(&self, predicate: impl Fn(&Issue) -> bool) -> Vec<Issue> {
        self.insertion_order
            .iter()
            .filter_map(|id| self.issues.get(id))
            .filter(|issue| predicate(issue))
            .cloned()
            .collect()
    }

    fn ensure_all_exist(&self, issue_ids: &[IssueId]) -> IssueRepositoryResult<()> {
        match issue_ids.iter().find(|id| !self.issues.contains_key(id)) {
            Some(missing) => Err(IssueRepositoryError::NotFound(*missing)),
            None => Ok(()),
        }
    }
}

impl InMemoryIssueRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error<T>(err: &PoisonError<T>) -> IssueRepositoryError {
    IssueRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepository {
    async fn next_issue_number(&self, project_id: ProjectId) -> IssueRepositoryResult<IssueNumber> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let counter = state.issue_counters.entry(project_id).or_insert(0);
        *counter = counter.saturating_add(1);
        IssueNumber::new(*counter).map_err(IssueRepositoryError::persistence)
    }

    async fn store(&self, issue: &Issue) -> IssueRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        if state.issues.contains_key(&issue.id()) {
            return Err(IssueRepositoryError::DuplicateIssue(issue.id()));
        }
        let key_entry = (issue.project_id(), issue.key().clone());
        if state.key_index.contains_key(&key_entry) {
            return Err(IssueRepositoryError::DuplicateKey(issue.key().clone()));
        }

        state.key_index.insert(key_entry, issue.id());
        state.insertion_order.push(issue.id());
        state.issues.insert(issue.id(), issue.clone());
        Ok(())
    }

    async fn update(&self, issue: &Issue) -> IssueRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let slot = state
            .issues
            .get_mut(&issue.id())
            .ok_or(IssueRepositoryError::NotFound(issue.id()))?;
        *slot = issue.clone();
        Ok(())
    }

    async fn delete_many(&self, issue_ids: &[IssueId]) -> IssueRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.ensure_all_exist(issue_ids)?;

        for id in issue_ids {
            if let Some(removed) = state.issues.remove(id) {
                state
                    .key_index
                    .remove(&(removed.project_id(), removed.key().clone()));
            }
        }
        state.insertion_order.retain(|id| !issue_ids.contains(id));
        Ok(())
    }

    async fn find_by_id(&self, id: IssueId) -> IssueRepositoryResult<Option<Issue>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.issues.get(&id).cloned())
    }

    async fn find_by_key(
        &self,
        project_id: ProjectId,
        key: &IssueKey,
    ) -> IssueRepositoryResult<Option<Issue>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state
            .key_index
            .get(&(project_id, key.clone()))
            .and_then(|id| state.issues.get(id))
            .cloned())
    }

    async fn list_by_project(&self, project_id: ProjectId) -> IssueRepositoryResult<Vec<Issue>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.ordered(|issue| issue.project_id() == project_id))
    }

    async fn list_by_sprint(&self, sprint_id: SprintId) -> IssueRepositoryResult<Vec<Issue>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.ordered(|issue| issue.sprint_id() == Some(sprint_id)))
    }

    async fn reassign_sprint(
        &self,
        issue_ids: &[IssueId],
        sprint_id: Option<SprintId>,
        updated_at: DateTime<Utc>,
    ) -> IssueRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.ensure_all_exist(issue_ids)?;

        for id in issue_ids {
            if let Some(issue) = state.issues.get_mut(id) {
                issue.move_to_sprint_at(sprint_id, updated_at);
            }
        }
        Ok(())
    }
}
