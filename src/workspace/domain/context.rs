//! Explicit session context handed to every service call.

use super::{ProjectId, ProjectKey, UserId, WorkspaceId};

/// Identity of the caller and the project they are working in.
///
/// Created once a user has signed in and selected a project, dropped on
/// sign-out. Services scope every lookup to [`SessionContext::project_id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    workspace_id: WorkspaceId,
    project_id: ProjectId,
    project_key: ProjectKey,
    actor: UserId,
}

impl SessionContext {
    /// Creates a session context for a project selection.
    #[must_use]
    pub const fn new(
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        project_key: ProjectKey,
        actor: UserId,
    ) -> Self {
        Self {
            workspace_id,
            project_id,
            project_key,
            actor,
        }
    }

    /// Returns the selected workspace.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the selected project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the key of the selected project.
    #[must_use]
    pub const fn project_key(&self) -> &ProjectKey {
        &self.project_key
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn actor(&self) -> UserId {
        self.actor
    }

    /// Returns whether a resource in `workspace_id`/`project_id` is visible
    /// from this session.
    #[must_use]
    pub fn covers(&self, workspace_id: WorkspaceId, project_id: ProjectId) -> bool {
        self.workspace_id == workspace_id && self.project_id == project_id
    }
}
