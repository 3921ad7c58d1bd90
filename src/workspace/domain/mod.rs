//! Domain model for workspace and project scoping.

mod context;
mod error;
mod ids;
mod project_key;

pub use context::SessionContext;
pub use error::WorkspaceDomainError;
pub(crate) use ids::uuid_identifier;
pub use ids::{ProjectId, UserId, WorkspaceId};
pub use project_key::ProjectKey;
