//! Domain model for sprints and their lifecycle.

mod completion;
mod destination;
mod error;
mod ids;
mod sprint;
mod status;

pub use completion::SprintCompletionPlan;
pub use destination::SprintDestination;
pub use error::{ParseSprintStatusError, SprintDomainError};
pub use ids::SprintId;
pub use sprint::{PersistedSprintData, Sprint, SprintDraft, SprintSchedule};
pub use status::SprintStatus;
