//! Shared world state for issue hierarchy BDD scenarios.

use std::{collections::HashMap, sync::Arc};

use mockable::DefaultClock;
use projexa::{
    issue::{
        adapters::memory::InMemoryIssueRepository,
        domain::Issue,
        services::{IssueService, IssueServiceError},
    },
    workspace::domain::{ProjectId, ProjectKey, SessionContext, UserId, WorkspaceId},
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestIssueService = IssueService<InMemoryIssueRepository, DefaultClock>;

/// Scenario world for issue hierarchy behaviour tests.
pub struct IssueHierarchyWorld {
    pub service: TestIssueService,
    pub context: Option<SessionContext>,
    pub issues: HashMap<String, Issue>,
    pub last_error: Option<IssueServiceError>,
}

impl IssueHierarchyWorld {
    /// Creates a world with no project selected.
    #[must_use]
    pub fn new() -> Self {
        let service = IssueService::new(
            Arc::new(InMemoryIssueRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            context: None,
            issues: HashMap::new(),
            last_error: None,
        }
    }

    /// Selects a fresh project with `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when `key` is not a valid project key.
    pub fn select_project(&mut self, key: &str) -> Result<(), eyre::Report> {
        let project_key =
            ProjectKey::new(key).map_err(|err| eyre::eyre!("invalid project key: {err}"))?;
        self.context = Some(SessionContext::new(
            WorkspaceId::new(),
            ProjectId::new(),
            project_key,
            UserId::new(),
        ));
        Ok(())
    }

    /// Returns the selected session.
    ///
    /// # Errors
    ///
    /// Returns an error when no project has been selected.
    pub fn session(&self) -> Result<SessionContext, eyre::Report> {
        self.context
            .clone()
            .ok_or_else(|| eyre::eyre!("missing project selection in scenario world"))
    }

    /// Returns a previously created issue by title.
    ///
    /// # Errors
    ///
    /// Returns an error when no issue with `title` was created.
    pub fn issue(&self, title: &str) -> Result<&Issue, eyre::Report> {
        self.issues
            .get(title)
            .ok_or_else(|| eyre::eyre!("no issue titled {title:?} in scenario world"))
    }
}

impl Default for IssueHierarchyWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> IssueHierarchyWorld {
    IssueHierarchyWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
