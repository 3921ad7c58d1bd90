//! In-memory adapters for sprint ports.

mod sprint;

pub use sprint::InMemorySprintRepository;
