//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::DefaultClock;
use projexa::{
    attachment::{adapters::memory::InMemoryObjectStorage, services::AttachmentService},
    config::ProjexaConfig,
    issue::{adapters::memory::InMemoryIssueRepository, services::IssueService},
    sprint::{adapters::memory::InMemorySprintRepository, services::SprintLifecycleService},
    workspace::domain::{ProjectId, ProjectKey, SessionContext, UserId, WorkspaceId},
};
use rstest::fixture;

/// Issue service wired to in-memory adapters.
pub type Issues = IssueService<InMemoryIssueRepository, DefaultClock>;

/// Sprint service wired to in-memory adapters.
pub type Sprints =
    SprintLifecycleService<InMemorySprintRepository, InMemoryIssueRepository, DefaultClock>;

/// Attachment service wired to in-memory adapters.
pub type Attachments = AttachmentService<
    InMemoryIssueRepository,
    InMemoryObjectStorage<DefaultClock>,
    DefaultClock,
>;

/// Services sharing one set of in-memory repositories.
pub struct Workbench {
    pub context: SessionContext,
    pub issues: Issues,
    pub sprints: Sprints,
    pub attachments: Attachments,
    pub storage: Arc<InMemoryObjectStorage<DefaultClock>>,
}

impl Workbench {
    /// Wires every service from `config` for a fresh `MAR` project.
    #[must_use]
    pub fn new(config: &ProjexaConfig) -> Self {
        let clock = Arc::new(DefaultClock);
        let issue_repository = Arc::new(InMemoryIssueRepository::new());
        let sprint_repository = Arc::new(InMemorySprintRepository::new());
        let storage = Arc::new(InMemoryObjectStorage::new(
            &config.storage,
            Arc::clone(&clock),
        ));

        Self {
            context: session("MAR"),
            issues: IssueService::new(Arc::clone(&issue_repository), Arc::clone(&clock))
                .with_lifecycle_config(&config.lifecycle),
            sprints: SprintLifecycleService::new(
                sprint_repository,
                Arc::clone(&issue_repository),
                Arc::clone(&clock),
            )
            .with_lifecycle_config(&config.lifecycle),
            attachments: AttachmentService::new(issue_repository, Arc::clone(&storage), clock),
            storage,
        }
    }
}

/// Provides services built from default configuration.
#[fixture]
pub fn bench() -> Workbench {
    Workbench::new(&ProjexaConfig::default())
}

/// Builds a session for a fresh project.
///
/// # Panics
///
/// Panics if `key` is not a valid project key.
#[must_use]
pub fn session(key: &str) -> SessionContext {
    SessionContext::new(
        WorkspaceId::new(),
        ProjectId::new(),
        ProjectKey::new(key).expect("valid project key"),
        UserId::new(),
    )
}

/// Returns a day in April 2025.
///
/// # Panics
///
/// Panics if `day` is not a valid day of April.
#[must_use]
pub fn april(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, day).expect("valid calendar date")
}
