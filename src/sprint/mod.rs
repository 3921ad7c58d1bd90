//! Sprint lifecycle management for ProJexa.
//!
//! Sprints move strictly forward from `planned` to `active` to `completed`.
//! Completing a sprint carries its unfinished issues over to another planned
//! sprint or back to the backlog. The module follows hexagonal architecture:
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
