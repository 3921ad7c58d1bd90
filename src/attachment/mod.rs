//! File and link attachments for issues.
//!
//! Files travel through an object store: the service asks the store for a
//! presigned upload target, sends the bytes, and records the public URL on
//! the issue. Links are recorded directly.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
