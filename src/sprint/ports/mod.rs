//! Port contracts for sprint lifecycle management.

pub mod repository;

#[cfg(test)]
pub use repository::MockSprintRepository;
pub use repository::{SprintRepository, SprintRepositoryError, SprintRepositoryResult};
