//! Service layer for the sprint state machine and issue planning.

use crate::config::LifecycleConfig;
use crate::issue::{
    domain::{Issue, IssueId},
    ports::{IssueRepository, IssueRepositoryError},
};
use crate::sprint::{
    domain::{
        Sprint, SprintCompletionPlan, SprintDestination, SprintDomainError, SprintDraft, SprintId,
        SprintSchedule,
    },
    ports::{SprintRepository, SprintRepositoryError},
};
use crate::workspace::domain::SessionContext;
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a planned sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSprintRequest {
    name: String,
    goal: Option<String>,
    dates: Option<(NaiveDate, NaiveDate)>,
}

impl CreateSprintRequest {
    /// Creates a request with the sprint name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            goal: None,
            dates: None,
        }
    }

    /// Sets the sprint goal.
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    /// Sets tentative dates.
    #[must_use]
    pub const fn with_dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.dates = Some((start_date, end_date));
        self
    }
}

/// Request payload for starting a sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartSprintRequest {
    start_date: NaiveDate,
    end_date: NaiveDate,
    goal: Option<String>,
}

impl StartSprintRequest {
    /// Creates a request with the sprint schedule.
    #[must_use]
    pub const fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            goal: None,
        }
    }

    /// Sets or replaces the sprint goal.
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    fn into_schedule(self) -> SprintSchedule {
        let mut schedule = SprintSchedule::new(self.start_date, self.end_date);
        if let Some(goal) = self.goal {
            schedule = schedule.with_goal(goal);
        }
        schedule
    }
}

/// Request payload for completing a sprint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompleteSprintRequest {
    move_incomplete_issues_to: Option<String>,
}

impl CompleteSprintRequest {
    /// Creates a request that moves unfinished issues to the backlog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the carry-over destination: a sprint id or `"backlog"`.
    #[must_use]
    pub fn move_incomplete_issues_to(mut self, destination: impl Into<String>) -> Self {
        self.move_incomplete_issues_to = Some(destination.into());
        self
    }
}

/// Result of completing a sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprintCompletionOutcome {
    sprint: Sprint,
    destination: SprintDestination,
    moved: Vec<IssueId>,
}

impl SprintCompletionOutcome {
    /// Returns the completed sprint.
    #[must_use]
    pub const fn sprint(&self) -> &Sprint {
        &self.sprint
    }

    /// Returns where unfinished issues went.
    #[must_use]
    pub const fn destination(&self) -> SprintDestination {
        self.destination
    }

    /// Returns the issues that were carried over.
    #[must_use]
    pub fn moved(&self) -> &[IssueId] {
        &self.moved
    }
}

/// Service-level errors for sprint lifecycle operations.
#[derive(Debug, Error)]
pub enum SprintLifecycleError {
    /// Domain validation or a lifecycle transition failed.
    #[error(transparent)]
    Domain(#[from] SprintDomainError),

    /// Sprint repository operation failed.
    #[error(transparent)]
    Repository(#[from] SprintRepositoryError),

    /// Issue repository operation failed.
    #[error(transparent)]
    IssueRepository(#[from] IssueRepositoryError),

    /// No sprint with the identifier exists in the session's project.
    #[error("sprint not found: {0}")]
    NotFound(SprintId),

    /// The carry-over destination does not exist in the session's project.
    #[error("destination sprint not found: {0}")]
    DestinationNotFound(SprintId),

    /// No issue with the identifier exists in the session's project.
    #[error("issue not found: {0}")]
    IssueNotFound(IssueId),

    /// Another sprint of the project is already active.
    #[error("sprint {active} is already active in this project")]
    AnotherSprintActive {
        /// Sprint that was asked to start.
        sprint_id: SprintId,
        /// Sprint that is currently active.
        active: SprintId,
    },
}

impl SprintLifecycleError {
    /// Returns whether the caller supplied invalid input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Domain(
                SprintDomainError::EmptyName
                    | SprintDomainError::InvalidDateRange { .. }
                    | SprintDomainError::InvalidDestination(_)
            )
        )
    }

    /// Returns whether a lifecycle guard rejected an otherwise valid request.
    #[must_use]
    pub const fn is_guard_violation(&self) -> bool {
        matches!(
            self,
            Self::Domain(
                SprintDomainError::InvalidTransition { .. }
                    | SprintDomainError::SprintClosed(_)
                    | SprintDomainError::DestinationIsSelf(_)
                    | SprintDomainError::DestinationNotPlanned { .. }
            ) | Self::AnotherSprintActive { .. }
        )
    }
}

/// Result type for sprint lifecycle service operations.
pub type SprintLifecycleResult<T> = Result<T, SprintLifecycleError>;

/// Sprint lifecycle orchestration service.
#[derive(Clone)]
pub struct SprintLifecycleService<S, I, C>
where
    S: SprintRepository,
    I: IssueRepository,
    C: Clock + Send + Sync,
{
    sprints: Arc<S>,
    issues: Arc<I>,
    clock: Arc<C>,
    single_active_sprint: bool,
}

impl<S, I, C> SprintLifecycleService<S, I, C>
where
    S: SprintRepository,
    I: IssueRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new sprint lifecycle service allowing one active sprint
    /// per project.
    #[must_use]
    pub const fn new(sprints: Arc<S>, issues: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            sprints,
            issues,
            clock,
            single_active_sprint: true,
        }
    }

    /// Applies lifecycle configuration.
    #[must_use]
    pub const fn with_lifecycle_config(mut self, config: &LifecycleConfig) -> Self {
        self.single_active_sprint = config.single_active_sprint;
        self
    }

    /// Creates a planned sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintLifecycleError::Domain`] for a blank name or inverted
    /// tentative dates.
    pub async fn create(
        &self,
        context: &SessionContext,
        request: CreateSprintRequest,
    ) -> SprintLifecycleResult<Sprint> {
        let mut draft = SprintDraft::new(request.name)?;
        if let Some(goal) = request.goal {
            draft = draft.with_goal(goal);
        }
        if let Some((start_date, end_date)) = request.dates {
            draft = draft.with_dates(start_date, end_date);
        }
        let sprint = Sprint::new(context, draft, &*self.clock)?;
        self.sprints.store(&sprint).await?;
        tracing::info!(sprint = %sprint.id(), name = sprint.name(), "sprint created");
        Ok(sprint)
    }

    /// Starts a planned sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintLifecycleError::Domain`] when the sprint is not
    /// planned or the dates are invalid, and
    /// [`SprintLifecycleError::AnotherSprintActive`] when the project
    /// already runs a sprint and only one may be active.
    pub async fn start(
        &self,
        context: &SessionContext,
        sprint_id: SprintId,
        request: StartSprintRequest,
    ) -> SprintLifecycleResult<Sprint> {
        let mut sprint = self.load(context, sprint_id).await?;
        sprint.start(request.into_schedule(), &*self.clock)?;

        if self.single_active_sprint {
            let active = self.sprints.find_active(context.project_id()).await?;
            if let Some(running) = active.iter().find(|other| other.id() != sprint_id) {
                tracing::warn!(
                    sprint = %sprint_id,
                    active = %running.id(),
                    "sprint start rejected, another sprint is active"
                );
                return Err(SprintLifecycleError::AnotherSprintActive {
                    sprint_id,
                    active: running.id(),
                });
            }
        }

        self.sprints.update(&sprint).await?;
        tracing::info!(sprint = %sprint_id, actor = %context.actor(), "sprint started");
        Ok(sprint)
    }

    /// Completes an active sprint and carries its unfinished issues over.
    ///
    /// Done issues stay in the sprint. Unfinished issues move to the
    /// requested sprint, which must be planned, or to the backlog. If the
    /// sprint cannot be saved after issues were moved, the issues are moved
    /// back before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`SprintLifecycleError::Domain`] when the sprint is not
    /// active or the destination is invalid,
    /// [`SprintLifecycleError::DestinationNotFound`] for an unknown
    /// destination, and a repository error when persistence fails.
    pub async fn complete(
        &self,
        context: &SessionContext,
        sprint_id: SprintId,
        request: CompleteSprintRequest,
    ) -> SprintLifecycleResult<SprintCompletionOutcome> {
        let destination =
            SprintDestination::parse(request.move_incomplete_issues_to.as_deref())?;
        let mut sprint = self.load(context, sprint_id).await?;
        sprint.complete(&*self.clock)?;

        if let SprintDestination::Sprint(target_id) = destination {
            let target = self
                .find(context, target_id)
                .await?
                .ok_or(SprintLifecycleError::DestinationNotFound(target_id))?;
            target.ensure_can_receive_carry_over(sprint_id)?;
        }

        let sprint_issues = self.issues.list_by_sprint(sprint_id).await?;
        let plan = SprintCompletionPlan::new(sprint_id, &sprint_issues, destination);
        if !plan.is_empty() {
            self.issues
                .reassign_sprint(plan.carried_over(), destination.sprint_id(), sprint.updated_at())
                .await?;
        }

        if let Err(error) = self.sprints.update(&sprint).await {
            self.restore_carried_over(&plan).await;
            return Err(error.into());
        }

        tracing::info!(
            sprint = %sprint_id,
            %destination,
            moved = plan.carried_over().len(),
            finished = plan.finished().len(),
            actor = %context.actor(),
            "sprint completed"
        );
        Ok(SprintCompletionOutcome {
            sprint,
            destination,
            moved: plan.carried_over().to_vec(),
        })
    }

    /// Plans an issue into a sprint, or back to the backlog with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintLifecycleError::IssueNotFound`] or
    /// [`SprintLifecycleError::NotFound`] when either side is outside the
    /// session's project, and [`SprintDomainError::SprintClosed`] for a
    /// completed sprint.
    pub async fn assign_issue(
        &self,
        context: &SessionContext,
        issue_id: IssueId,
        sprint_id: Option<SprintId>,
    ) -> SprintLifecycleResult<Issue> {
        let mut issue = self
            .issues
            .find_by_id(issue_id)
            .await?
            .filter(|found| context.covers(found.workspace_id(), found.project_id()))
            .ok_or(SprintLifecycleError::IssueNotFound(issue_id))?;
        if let Some(target_id) = sprint_id {
            self.load(context, target_id).await?.ensure_accepts_issues()?;
        }
        if issue.sprint_id() == sprint_id {
            return Ok(issue);
        }

        issue.assign_to_sprint(sprint_id, &*self.clock);
        self.issues.update(&issue).await?;
        tracing::info!(
            issue = %issue.key(),
            destination = %SprintDestination::from(sprint_id),
            "issue planned"
        );
        Ok(issue)
    }

    /// Finds a sprint by identifier within the session's project.
    ///
    /// # Errors
    ///
    /// Returns [`SprintLifecycleError::Repository`] when the lookup fails.
    pub async fn find(
        &self,
        context: &SessionContext,
        sprint_id: SprintId,
    ) -> SprintLifecycleResult<Option<Sprint>> {
        let sprint = self.sprints.find_by_id(sprint_id).await?;
        Ok(sprint.filter(|found| context.covers(found.workspace_id(), found.project_id())))
    }

    /// Lists the sprints of the session's project in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`SprintLifecycleError::Repository`] when the lookup fails.
    pub async fn list(&self, context: &SessionContext) -> SprintLifecycleResult<Vec<Sprint>> {
        let sprints = self.sprints.list_by_project(context.project_id()).await?;
        tracing::debug!(project = %context.project_key(), count = sprints.len(), "sprints listed");
        Ok(sprints)
    }

    /// Returns the active sprint of the session's project, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SprintLifecycleError::Repository`] when the lookup fails.
    pub async fn active(&self, context: &SessionContext) -> SprintLifecycleResult<Option<Sprint>> {
        let active = self.sprints.find_active(context.project_id()).await?;
        Ok(active.into_iter().next())
    }

    async fn load(
        &self,
        context: &SessionContext,
        sprint_id: SprintId,
    ) -> SprintLifecycleResult<Sprint> {
        self.find(context, sprint_id)
            .await?
            .ok_or(SprintLifecycleError::NotFound(sprint_id))
    }

    async fn restore_carried_over(&self, plan: &SprintCompletionPlan) {
        if plan.is_empty() {
            return;
        }
        let sprint_id = plan.sprint_id();
        tracing::warn!(
            sprint = %sprint_id,
            issues = plan.carried_over().len(),
            "sprint completion failed, moving issues back"
        );
        if let Err(error) = self
            .issues
            .reassign_sprint(plan.carried_over(), Some(sprint_id), self.clock.utc())
            .await
        {
            tracing::error!(sprint = %sprint_id, %error, "failed to move issues back");
        }
    }
}
