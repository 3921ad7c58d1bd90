//! Application services for sprint lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CompleteSprintRequest, CreateSprintRequest, SprintCompletionOutcome, SprintLifecycleError,
    SprintLifecycleResult, SprintLifecycleService, StartSprintRequest,
};
