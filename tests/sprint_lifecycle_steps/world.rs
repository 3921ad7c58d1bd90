//! Shared world state for sprint lifecycle BDD scenarios.

use std::{collections::HashMap, sync::Arc};

use chrono::NaiveDate;
use mockable::DefaultClock;
use projexa::{
    issue::{adapters::memory::InMemoryIssueRepository, domain::Issue, services::IssueService},
    sprint::{
        adapters::memory::InMemorySprintRepository,
        domain::Sprint,
        services::{SprintLifecycleError, SprintLifecycleService},
    },
    workspace::domain::{ProjectId, ProjectKey, SessionContext, UserId, WorkspaceId},
};
use rstest::fixture;

/// Issue service type used by the BDD world.
pub type TestIssueService = IssueService<InMemoryIssueRepository, DefaultClock>;

/// Sprint service type used by the BDD world.
pub type TestSprintService =
    SprintLifecycleService<InMemorySprintRepository, InMemoryIssueRepository, DefaultClock>;

/// Scenario world for sprint lifecycle behaviour tests.
pub struct SprintWorld {
    pub context: SessionContext,
    pub issue_service: TestIssueService,
    pub sprint_service: TestSprintService,
    pub sprints: HashMap<String, Sprint>,
    pub issues: HashMap<String, Issue>,
    pub last_error: Option<SprintLifecycleError>,
}

impl SprintWorld {
    /// Creates a world for a fresh `MAR` project.
    ///
    /// # Panics
    ///
    /// Panics if the hard-coded project key is rejected.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let issue_repository = Arc::new(InMemoryIssueRepository::new());
        let context = SessionContext::new(
            WorkspaceId::new(),
            ProjectId::new(),
            ProjectKey::new("MAR").expect("valid project key"),
            UserId::new(),
        );

        Self {
            context,
            issue_service: IssueService::new(Arc::clone(&issue_repository), Arc::clone(&clock)),
            sprint_service: SprintLifecycleService::new(
                Arc::new(InMemorySprintRepository::new()),
                issue_repository,
                clock,
            ),
            sprints: HashMap::new(),
            issues: HashMap::new(),
            last_error: None,
        }
    }

    /// Returns a previously created sprint by name.
    ///
    /// # Errors
    ///
    /// Returns an error when no sprint with `name` was created.
    pub fn sprint(&self, name: &str) -> Result<&Sprint, eyre::Report> {
        self.sprints
            .get(name)
            .ok_or_else(|| eyre::eyre!("no sprint named {name:?} in scenario world"))
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

    /// Records the outcome of a sprint operation.
    pub fn record(&mut self, name: String, result: Result<Sprint, SprintLifecycleError>) {
        match result {
            Ok(sprint) => {
                self.sprints.insert(name, sprint);
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(err),
        }
    }
}

impl Default for SprintWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SprintWorld {
    SprintWorld::default()
}

/// Parses an ISO date written in a scenario.
///
/// # Errors
///
/// Returns an error when `value` is not `YYYY-MM-DD`.
pub fn scenario_date(value: &str) -> Result<NaiveDate, eyre::Report> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| eyre::eyre!("invalid date {value:?} in scenario: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
