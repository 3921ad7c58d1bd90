//! Sprint aggregate root.

use super::{SprintDomainError, SprintId, SprintStatus};
use crate::workspace::domain::{ProjectId, SessionContext, WorkspaceId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated input for creating a sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprintDraft {
    name: String,
    goal: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl SprintDraft {
    /// Creates a draft with the required name.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::EmptyName`] if the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, SprintDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SprintDomainError::EmptyName);
        }
        Ok(Self {
            name: trimmed.to_owned(),
            goal: None,
            start_date: None,
            end_date: None,
        })
    }

    /// Sets the sprint goal. Blank goals are dropped.
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = normalize_goal(goal.into());
        self
    }

    /// Sets tentative dates.
    #[must_use]
    pub const fn with_dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self.end_date = Some(end_date);
        self
    }
}

/// Dates and optional goal supplied when a sprint starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprintSchedule {
    /// First day of the sprint.
    pub start_date: NaiveDate,
    /// Last day of the sprint; must be after `start_date`.
    pub end_date: NaiveDate,
    /// Replacement goal, if any.
    pub goal: Option<String>,
}

impl SprintSchedule {
    /// Creates a schedule without a goal.
    #[must_use]
    pub const fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            goal: None,
        }
    }

    /// Sets the goal.
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }
}

/// Sprint aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    id: SprintId,
    workspace_id: WorkspaceId,
    project_id: ProjectId,
    name: String,
    goal: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    status: SprintStatus,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSprintData {
    /// Persisted sprint identifier.
    pub id: SprintId,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Sprint name.
    pub name: String,
    /// Sprint goal.
    pub goal: Option<String>,
    /// First day of the sprint.
    pub start_date: Option<NaiveDate>,
    /// Last day of the sprint.
    pub end_date: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: SprintStatus,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Sprint {
    /// Creates a planned sprint in the session's project.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidDateRange`] when tentative dates
    /// are given and the end is not after the start.
    pub fn new(
        context: &SessionContext,
        draft: SprintDraft,
        clock: &impl Clock,
    ) -> Result<Self, SprintDomainError> {
        if let (Some(start), Some(end)) = (draft.start_date, draft.end_date) {
            validate_schedule(start, end)?;
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: SprintId::new(),
            workspace_id: context.workspace_id(),
            project_id: context.project_id(),
            name: draft.name,
            goal: draft.goal,
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: SprintStatus::Planned,
            completed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a sprint from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSprintData) -> Self {
        Self {
            id: data.id,
            workspace_id: data.workspace_id,
            project_id: data.project_id,
            name: data.name,
            goal: data.goal,
            start_date: data.start_date,
            end_date: data.end_date,
            status: data.status,
            completed_at: data.completed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn id(&self) -> SprintId {
        self.id
    }

    /// Returns the owning workspace.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the sprint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sprint goal.
    #[must_use]
    pub fn goal(&self) -> Option<&str> {
        self.goal.as_deref()
    }

    /// Returns the first day of the sprint.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the last day of the sprint.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> SprintStatus {
        self.status
    }

    /// Returns when the sprint was completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Starts the sprint with the given schedule.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] unless the sprint is
    /// planned, and [`SprintDomainError::InvalidDateRange`] unless the end
    /// date is after the start date. The sprint is unchanged on error.
    pub fn start(
        &mut self,
        schedule: SprintSchedule,
        clock: &impl Clock,
    ) -> Result<(), SprintDomainError> {
        self.ensure_can_transition(SprintStatus::Active)?;
        validate_schedule(schedule.start_date, schedule.end_date)?;

        self.start_date = Some(schedule.start_date);
        self.end_date = Some(schedule.end_date);
        if let Some(goal) = schedule.goal {
            self.goal = normalize_goal(goal);
        }
        self.status = SprintStatus::Active;
        self.touch(clock);
        Ok(())
    }

    /// Marks the sprint completed.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] unless the sprint is
    /// active.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), SprintDomainError> {
        self.ensure_can_transition(SprintStatus::Completed)?;
        let timestamp = clock.utc();
        self.status = SprintStatus::Completed;
        self.completed_at = Some(timestamp);
        self.updated_at = timestamp;
        Ok(())
    }

    /// Validates that issues may still be planned into this sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::SprintClosed`] for completed sprints.
    pub const fn ensure_accepts_issues(&self) -> Result<(), SprintDomainError> {
        if self.status.is_terminal() {
            return Err(SprintDomainError::SprintClosed(self.id));
        }
        Ok(())
    }

    /// Validates that this sprint can receive unfinished issues from
    /// `source`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::DestinationIsSelf`] when both are the same
    /// sprint and [`SprintDomainError::DestinationNotPlanned`] unless this
    /// sprint is planned.
    pub fn ensure_can_receive_carry_over(&self, source: SprintId) -> Result<(), SprintDomainError> {
        if self.id == source {
            return Err(SprintDomainError::DestinationIsSelf(source));
        }
        if self.status != SprintStatus::Planned {
            return Err(SprintDomainError::DestinationNotPlanned {
                sprint_id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    const fn ensure_can_transition(&self, target: SprintStatus) -> Result<(), SprintDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(SprintDomainError::InvalidTransition {
                sprint_id: self.id,
                from: self.status,
                to: target,
            });
        }
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validate_schedule(start: NaiveDate, end: NaiveDate) -> Result<(), SprintDomainError> {
    if end <= start {
        return Err(SprintDomainError::InvalidDateRange { start, end });
    }
    Ok(())
}

fn normalize_goal(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
