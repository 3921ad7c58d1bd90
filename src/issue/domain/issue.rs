//! Issue aggregate root.

use super::{
    Attachment, IssueDomainError, IssueHierarchy, IssueId, IssueKey, IssueNumber, IssueStatus,
    IssueType, allowed_child_types,
};
use crate::sprint::domain::SprintId;
use crate::workspace::domain::{ProjectId, SessionContext, UserId, WorkspaceId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated input for creating an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDraft {
    title: String,
    issue_type: IssueType,
    status: IssueStatus,
    description: Option<String>,
    assignee_id: Option<UserId>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    attachments: Vec<Attachment>,
    sprint_id: Option<SprintId>,
}

impl IssueDraft {
    /// Creates a draft with the required title and type.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::EmptyTitle`] if the title is empty after
    /// trimming.
    pub fn new(title: impl Into<String>, issue_type: IssueType) -> Result<Self, IssueDomainError> {
        Ok(Self {
            title: normalize_title(title.into())?,
            issue_type,
            status: IssueStatus::Todo,
            description: None,
            assignee_id: None,
            start_date: None,
            end_date: None,
            attachments: Vec::new(),
            sprint_id: None,
        })
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: IssueStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the description. Blank descriptions are dropped.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_optional_text(description.into());
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the planned start and end dates.
    #[must_use]
    pub const fn with_dates(
        mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    /// Sets the initial attachments.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = Attachment>) -> Self {
        self.attachments = attachments.into_iter().collect();
        self
    }

    /// Places the new issue directly into a sprint.
    #[must_use]
    pub const fn with_sprint(mut self, sprint_id: SprintId) -> Self {
        self.sprint_id = Some(sprint_id);
        self
    }

    /// Returns the requested issue type.
    #[must_use]
    pub const fn issue_type(&self) -> IssueType {
        self.issue_type
    }
}

/// Partial update of an issue's mutable fields.
///
/// Type and parent are fixed at creation and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueUpdate {
    title: Option<String>,
    description: Option<Option<String>>,
    assignee_id: Option<Option<UserId>>,
    dates: Option<(Option<NaiveDate>, Option<NaiveDate>)>,
    attachments: Option<Vec<Attachment>>,
}

impl IssueUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Replaces or clears the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: Option<UserId>) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Replaces both planned dates.
    #[must_use]
    pub const fn with_dates(
        mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        self.dates = Some((start_date, end_date));
        self
    }

    /// Replaces the attachment list.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = Attachment>) -> Self {
        self.attachments = Some(attachments.into_iter().collect());
        self
    }

    /// Returns whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.assignee_id.is_none()
            && self.dates.is_none()
            && self.attachments.is_none()
    }
}

/// Issue aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    id: IssueId,
    workspace_id: WorkspaceId,
    project_id: ProjectId,
    key: IssueKey,
    title: String,
    description: Option<String>,
    issue_type: IssueType,
    status: IssueStatus,
    parent_id: Option<IssueId>,
    sprint_id: Option<SprintId>,
    assignee_id: Option<UserId>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    attachments: Vec<Attachment>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedIssueData {
    /// Persisted issue identifier.
    pub id: IssueId,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Human-readable key.
    pub key: IssueKey,
    /// Issue title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Issue classification.
    pub issue_type: IssueType,
    /// Workflow status.
    pub status: IssueStatus,
    /// Parent issue, if any.
    pub parent_id: Option<IssueId>,
    /// Sprint the issue is planned into; `None` means backlog.
    pub sprint_id: Option<SprintId>,
    /// Assigned user, if any.
    pub assignee_id: Option<UserId>,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Planned end date.
    pub end_date: Option<NaiveDate>,
    /// Attached files and links.
    pub attachments: Vec<Attachment>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Creates an issue inside the session's project.
    ///
    /// The hierarchy rules are checked here so they hold for every caller:
    /// epics have no parent, subtasks always have one, and the child type
    /// must be listed by [`allowed_child_types`] for the parent's type.
    ///
    /// # Errors
    ///
    /// Returns an [`IssueDomainError`] when the hierarchy rules are violated,
    /// the parent lives in another project, or the dates are inverted.
    pub fn new(
        context: &SessionContext,
        number: IssueNumber,
        draft: IssueDraft,
        parent: Option<&Self>,
        clock: &impl Clock,
    ) -> Result<Self, IssueDomainError> {
        Self::validate_draft(context, &draft, parent)?;

        let timestamp = clock.utc();
        Ok(Self {
            id: IssueId::new(),
            workspace_id: context.workspace_id(),
            project_id: context.project_id(),
            key: IssueKey::new(context.project_key().clone(), number),
            title: draft.title,
            description: draft.description,
            issue_type: draft.issue_type,
            status: draft.status,
            parent_id: parent.map(Self::id),
            sprint_id: draft.sprint_id,
            assignee_id: draft.assignee_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            attachments: draft.attachments,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Checks a draft against the hierarchy and date rules without
    /// building an issue.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Issue::new`].
    pub fn validate_draft(
        context: &SessionContext,
        draft: &IssueDraft,
        parent: Option<&Self>,
    ) -> Result<(), IssueDomainError> {
        if let Some(parent_issue) = parent
            && !context.covers(parent_issue.workspace_id, parent_issue.project_id)
        {
            return Err(IssueDomainError::ParentOutsideProject(parent_issue.id));
        }
        validate_placement(draft.issue_type, parent.map(Self::issue_type))?;
        validate_dates(draft.start_date, draft.end_date)
    }

    /// Reconstructs an issue from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedIssueData) -> Self {
        Self {
            id: data.id,
            workspace_id: data.workspace_id,
            project_id: data.project_id,
            key: data.key,
            title: data.title,
            description: data.description,
            issue_type: data.issue_type,
            status: data.status,
            parent_id: data.parent_id,
            sprint_id: data.sprint_id,
            assignee_id: data.assignee_id,
            start_date: data.start_date,
            end_date: data.end_date,
            attachments: data.attachments,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the issue identifier.
    #[must_use]
    pub const fn id(&self) -> IssueId {
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

    /// Returns the human-readable key.
    #[must_use]
    pub const fn key(&self) -> &IssueKey {
        &self.key
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the issue type.
    #[must_use]
    pub const fn issue_type(&self) -> IssueType {
        self.issue_type
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> IssueStatus {
        self.status
    }

    /// Returns the parent issue, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<IssueId> {
        self.parent_id
    }

    /// Returns the sprint, or `None` when the issue sits in the backlog.
    #[must_use]
    pub const fn sprint_id(&self) -> Option<SprintId> {
        self.sprint_id
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Returns the planned start date.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the planned end date.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns the attachments.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update.
    ///
    /// Either every field of the update is applied or none is.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::EmptyTitle`] for a blank title and
    /// [`IssueDomainError::InvalidDateRange`] when the resulting dates are
    /// inverted.
    pub fn apply_update(
        &mut self,
        update: IssueUpdate,
        clock: &impl Clock,
    ) -> Result<(), IssueDomainError> {
        let IssueUpdate {
            title,
            description,
            assignee_id,
            dates,
            attachments,
        } = update;

        let new_title = title.map(normalize_title).transpose()?;
        let (start_date, end_date) = dates.unwrap_or((self.start_date, self.end_date));
        validate_dates(start_date, end_date)?;

        if let Some(value) = new_title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value.and_then(normalize_optional_text);
        }
        if let Some(value) = assignee_id {
            self.assignee_id = value;
        }
        if let Some(value) = attachments {
            self.attachments = value;
        }
        self.start_date = start_date;
        self.end_date = end_date;
        self.touch(clock);
        Ok(())
    }

    /// Moves the issue to `target`.
    ///
    /// Moving to done requires every direct child in `project_issues` to be
    /// done already. Every other transition is unrestricted. Re-applying the
    /// current status is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::IncompleteChildren`] without mutating the
    /// issue when the guard rejects the transition.
    pub fn transition_to(
        &mut self,
        target: IssueStatus,
        project_issues: &[Self],
        clock: &impl Clock,
    ) -> Result<(), IssueDomainError> {
        if self.status == target {
            return Ok(());
        }
        if target.is_done() {
            let summary = IssueHierarchy::new(project_issues).completion_summary(self.id);
            if !summary.is_complete() {
                return Err(IssueDomainError::IncompleteChildren {
                    issue_id: self.id,
                    remaining: summary.remaining(),
                });
            }
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Moves the issue into a sprint, or to the backlog with `None`.
    pub fn assign_to_sprint(&mut self, sprint_id: Option<SprintId>, clock: &impl Clock) {
        self.move_to_sprint_at(sprint_id, clock.utc());
    }

    /// Moves the issue using a timestamp chosen by a bulk operation.
    pub(crate) const fn move_to_sprint_at(
        &mut self,
        sprint_id: Option<SprintId>,
        updated_at: DateTime<Utc>,
    ) {
        self.sprint_id = sprint_id;
        self.updated_at = updated_at;
    }

    /// Appends an attachment.
    pub fn add_attachment(&mut self, attachment: Attachment, clock: &impl Clock) {
        self.attachments.push(attachment);
        self.touch(clock);
    }

    /// Removes the attachment with the given URL.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::AttachmentNotFound`] if no attachment has
    /// that URL.
    pub fn remove_attachment(
        &mut self,
        url: &str,
        clock: &impl Clock,
    ) -> Result<Attachment, IssueDomainError> {
        let position = self
            .attachments
            .iter()
            .position(|attachment| attachment.url() == url)
            .ok_or_else(|| IssueDomainError::AttachmentNotFound {
                issue_id: self.id,
                url: url.to_owned(),
            })?;
        let removed = self.attachments.remove(position);
        self.touch(clock);
        Ok(removed)
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validate_placement(
    issue_type: IssueType,
    parent_type: Option<IssueType>,
) -> Result<(), IssueDomainError> {
    match (issue_type, parent_type) {
        (IssueType::Epic, None) => Ok(()),
        (IssueType::Epic, Some(_)) => Err(IssueDomainError::EpicCannotHaveParent),
        (IssueType::Subtask, None) => Err(IssueDomainError::SubtaskRequiresParent),
        (child_type, Some(parent)) if !allowed_child_types(Some(parent)).contains(&child_type) => {
            Err(IssueDomainError::ChildTypeNotAllowed {
                parent_type: parent,
                child_type,
            })
        }
        _ => Ok(()),
    }
}

fn validate_dates(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<(), IssueDomainError> {
    match (start_date, end_date) {
        (Some(start), Some(end)) if end < start => {
            Err(IssueDomainError::InvalidDateRange { start, end })
        }
        _ => Ok(()),
    }
}

fn normalize_title(raw: String) -> Result<String, IssueDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IssueDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

fn normalize_optional_text(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
