//! Issue hierarchy management for ProJexa.
//!
//! Issues form a shallow tree: epics at the top, stories, tasks and bugs
//! below them, and subtasks under any non-epic issue. This module enforces
//! the allowed parent/child combinations at construction time, derives
//! children and completion counts from flat issue lists, and guards the
//! transition to `done` so a parent never finishes before its children.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
