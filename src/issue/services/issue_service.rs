//! Service layer for issue creation, editing and hierarchy queries.

use crate::config::{ChildDeletionPolicy, LifecycleConfig};
use crate::issue::{
    domain::{
        Attachment, CompletionSummary, Issue, IssueDomainError, IssueDraft, IssueHierarchy,
        IssueId, IssueKey, IssueStatus, IssueType, IssueUpdate, allowed_child_types,
    },
    ports::{IssueRepository, IssueRepositoryError},
};
use crate::workspace::domain::{SessionContext, UserId};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIssueRequest {
    title: String,
    issue_type: IssueType,
    parent_id: Option<IssueId>,
    status: Option<IssueStatus>,
    description: Option<String>,
    assignee_id: Option<UserId>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    attachments: Vec<Attachment>,
}

impl CreateIssueRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, issue_type: IssueType) -> Self {
        Self {
            title: title.into(),
            issue_type,
            parent_id: None,
            status: None,
            description: None,
            assignee_id: None,
            start_date: None,
            end_date: None,
            attachments: Vec::new(),
        }
    }

    /// Places the new issue under `parent_id`.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: IssueId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the initial status instead of to-do.
    #[must_use]
    pub const fn with_status(mut self, status: IssueStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the planned dates.
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

    fn into_draft(self) -> Result<(IssueDraft, Option<IssueId>), IssueDomainError> {
        let mut draft = IssueDraft::new(self.title, self.issue_type)?
            .with_dates(self.start_date, self.end_date)
            .with_attachments(self.attachments);
        if let Some(status) = self.status {
            draft = draft.with_status(status);
        }
        if let Some(description) = self.description {
            draft = draft.with_description(description);
        }
        if let Some(assignee_id) = self.assignee_id {
            draft = draft.with_assignee(assignee_id);
        }
        Ok((draft, self.parent_id))
    }
}

/// Service-level errors for issue operations.
#[derive(Debug, Error)]
pub enum IssueServiceError {
    /// Domain validation or a transition guard failed.
    #[error(transparent)]
    Domain(#[from] IssueDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] IssueRepositoryError),

    /// No issue with the identifier exists in the session's project.
    #[error("issue not found: {0}")]
    NotFound(IssueId),

    /// The requested parent does not exist.
    #[error("parent issue not found: {0}")]
    ParentNotFound(IssueId),

    /// The issue still has children and the deletion policy rejects it.
    #[error("issue {issue_id} still has {children} child issue(s)")]
    HasChildren {
        /// Issue whose deletion was rejected.
        issue_id: IssueId,
        /// Number of direct children.
        children: usize,
    },
}

impl IssueServiceError {
    /// Returns whether the caller supplied invalid input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Domain(
                IssueDomainError::EmptyTitle
                    | IssueDomainError::InvalidIssueNumber(_)
                    | IssueDomainError::InvalidIssueKey(_)
                    | IssueDomainError::SubtaskRequiresParent
                    | IssueDomainError::EpicCannotHaveParent
                    | IssueDomainError::ChildTypeNotAllowed { .. }
                    | IssueDomainError::ParentOutsideProject(_)
                    | IssueDomainError::InvalidDateRange { .. }
                    | IssueDomainError::EmptyAttachmentUrl
                    | IssueDomainError::InvalidAttachmentUrl(_)
                    | IssueDomainError::EmptyAttachmentName
            )
        )
    }

    /// Returns whether a lifecycle guard rejected an otherwise valid request.
    #[must_use]
    pub const fn is_guard_violation(&self) -> bool {
        matches!(
            self,
            Self::Domain(IssueDomainError::IncompleteChildren { .. }) | Self::HasChildren { .. }
        )
    }
}

/// Result type for issue service operations.
pub type IssueServiceResult<T> = Result<T, IssueServiceError>;

/// Issue orchestration service.
#[derive(Clone)]
pub struct IssueService<R, C>
where
    R: IssueRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    child_deletion: ChildDeletionPolicy,
}

impl<R, C> IssueService<R, C>
where
    R: IssueRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new issue service that rejects deleting issues with
    /// children.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            child_deletion: ChildDeletionPolicy::Reject,
        }
    }

    /// Applies lifecycle configuration.
    #[must_use]
    pub const fn with_lifecycle_config(mut self, config: &LifecycleConfig) -> Self {
        self.child_deletion = config.child_deletion;
        self
    }

    /// Creates an issue and allocates its project key.
    ///
    /// # Errors
    ///
    /// Returns [`IssueServiceError::ParentNotFound`] for an unknown parent,
    /// [`IssueServiceError::Domain`] when the hierarchy or field rules are
    /// violated, and [`IssueServiceError::Repository`] when persistence
    /// fails.
    pub async fn create(
        &self,
        context: &SessionContext,
        request: CreateIssueRequest,
    ) -> IssueServiceResult<Issue> {
        let (draft, parent_id) = request.into_draft()?;
        let parent = self.find_parent(parent_id).await?;
        Issue::validate_draft(context, &draft, parent.as_ref())?;

        let number = self
            .repository
            .next_issue_number(context.project_id())
            .await?;
        let issue = Issue::new(context, number, draft, parent.as_ref(), &*self.clock)?;
        self.repository.store(&issue).await?;
        tracing::info!(
            issue = %issue.key(),
            issue_type = %issue.issue_type(),
            actor = %context.actor(),
            "issue created"
        );
        Ok(issue)
    }

    /// Applies a partial update to an issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueServiceError::NotFound`] when the issue is not in the
    /// session's project and [`IssueServiceError::Domain`] when the update
    /// is invalid.
    pub async fn update(
        &self,
        context: &SessionContext,
        issue_id: IssueId,
        update: IssueUpdate,
    ) -> IssueServiceResult<Issue> {
        let mut issue = self.load(context, issue_id).await?;
        if update.is_empty() {
            return Ok(issue);
        }
        issue.apply_update(update, &*self.clock)?;
        self.repository.update(&issue).await?;
        tracing::info!(issue = %issue.key(), actor = %context.actor(), "issue updated");
        Ok(issue)
    }

    /// Moves an issue to another workflow status.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::IncompleteChildren`] wrapped in
    /// [`IssueServiceError::Domain`] when moving to done while children are
    /// unfinished. Nothing is persisted in that case.
    pub async fn change_status(
        &self,
        context: &SessionContext,
        issue_id: IssueId,
        status: IssueStatus,
    ) -> IssueServiceResult<Issue> {
        let mut issue = self.load(context, issue_id).await?;
        let previous = issue.status();
        let project_issues = self
            .repository
            .list_by_project(context.project_id())
            .await?;

        if let Err(error) = issue.transition_to(status, &project_issues, &*self.clock) {
            tracing::warn!(issue = %issue.key(), target = %status, %error, "status change rejected");
            return Err(error.into());
        }
        if previous != status {
            self.repository.update(&issue).await?;
            tracing::info!(issue = %issue.key(), from = %previous, to = %status, "issue status changed");
        }
        Ok(issue)
    }

    /// Deletes an issue according to the configured child deletion policy.
    ///
    /// Returns the identifiers of every deleted issue, the requested one
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`IssueServiceError::HasChildren`] when the issue has children
    /// and the policy is [`ChildDeletionPolicy::Reject`].
    pub async fn delete(
        &self,
        context: &SessionContext,
        issue_id: IssueId,
    ) -> IssueServiceResult<Vec<IssueId>> {
        let issue = self.load(context, issue_id).await?;
        let project_issues = self
            .repository
            .list_by_project(context.project_id())
            .await?;
        let hierarchy = IssueHierarchy::new(&project_issues);

        let children = hierarchy.children_of(issue_id).len();
        if children > 0 && self.child_deletion == ChildDeletionPolicy::Reject {
            tracing::warn!(issue = %issue.key(), children, "deletion rejected, issue has children");
            return Err(IssueServiceError::HasChildren { issue_id, children });
        }

        let doomed: Vec<IssueId> = std::iter::once(issue_id)
            .chain(hierarchy.descendants_of(issue_id).into_iter().map(Issue::id))
            .collect();
        self.repository.delete_many(&doomed).await?;
        tracing::info!(
            issue = %issue.key(),
            deleted = doomed.len(),
            actor = %context.actor(),
            "issue deleted"
        );
        Ok(doomed)
    }

    /// Finds an issue by identifier within the session's project.
    ///
    /// # Errors
    ///
    /// Returns [`IssueServiceError::Repository`] when the lookup fails.
    pub async fn find(
        &self,
        context: &SessionContext,
        issue_id: IssueId,
    ) -> IssueServiceResult<Option<Issue>> {
        let issue = self.repository.find_by_id(issue_id).await?;
        Ok(issue.filter(|found| context.covers(found.workspace_id(), found.project_id())))
    }

    /// Finds an issue by its human-readable key within the session's
    /// project.
    ///
    /// # Errors
    ///
    /// Returns [`IssueServiceError::Repository`] when the lookup fails.
    pub async fn find_by_key(
        &self,
        context: &SessionContext,
        key: &IssueKey,
    ) -> IssueServiceResult<Option<Issue>> {
        let issue = self
            .repository
            .find_by_key(context.project_id(), key)
            .await?;
        Ok(issue.filter(|found| context.covers(found.workspace_id(), found.project_id())))
    }

    /// Lists the issues of the session's project in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`IssueServiceError::Repository`] when the lookup fails.
    pub async fn list(&self, context: &SessionContext) -> IssueServiceResult<Vec<Issue>> {
        let issues = self
            .repository
            .list_by_project(context.project_id())
            .await?;
        tracing::debug!(project = %context.project_key(), count = issues.len(), "issues listed");
        Ok(issues
            .into_iter()
            .filter(|issue| issue.workspace_id() == context.workspace_id())
            .collect())
    }

    /// Returns the direct children of an issue in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`IssueServiceError::NotFound`] when the issue is not in the
    /// session's project.
    pub async fn children(
        &self,
        context: &SessionContext,
        issue_id: IssueId,
    ) -> IssueServiceResult<Vec<Issue>> {
        self.load(context, issue_id).await?;
        let project_issues = self.list(context).await?;
        Ok(IssueHierarchy::new(&project_issues)
            .children_of(issue_id)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Summarizes how many direct children of an issue are done.
    ///
    /// # Errors
    ///
    /// Returns [`IssueServiceError::NotFound`] when the issue is not in the
    /// session's project.
    pub async fn completion(
        &self,
        context: &SessionContext,
        issue_id: IssueId,
    ) -> IssueServiceResult<CompletionSummary> {
        self.load(context, issue_id).await?;
        let project_issues = self.list(context).await?;
        Ok(IssueHierarchy::new(&project_issues).completion_summary(issue_id))
    }

    /// Returns the issue types that may be created under `parent_id`, or at
    /// the top level when no parent is given.
    ///
    /// # Errors
    ///
    /// Returns [`IssueServiceError::NotFound`] when the parent is not in the
    /// session's project.
    pub async fn allowed_child_types(
        &self,
        context: &SessionContext,
        parent_id: Option<IssueId>,
    ) -> IssueServiceResult<&'static [IssueType]> {
        let Some(id) = parent_id else {
            return Ok(allowed_child_types(None));
        };
        let parent = self.load(context, id).await?;
        Ok(allowed_child_types(Some(parent.issue_type())))
    }

    async fn find_parent(&self, parent_id: Option<IssueId>) -> IssueServiceResult<Option<Issue>> {
        let Some(id) = parent_id else {
            return Ok(None);
        };
        let parent = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(IssueServiceError::ParentNotFound(id))?;
        Ok(Some(parent))
    }

    async fn load(&self, context: &SessionContext, issue_id: IssueId) -> IssueServiceResult<Issue> {
        self.find(context, issue_id)
            .await?
            .ok_or(IssueServiceError::NotFound(issue_id))
    }
}
