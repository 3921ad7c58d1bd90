//! `ProJexa`: issue hierarchy and sprint lifecycle coordination.
//!
//! This crate holds the coordination rules of the `ProJexa` project
//! management service: which issue types may nest under which, when an
//! issue may be marked done, and how a sprint moves from planned through
//! active to completed while carrying unfinished work forward.
//!
//! # Architecture
//!
//! `ProJexa` follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//! - **Services**: Use-case orchestration scoped by an explicit session
//!
//! # Modules
//!
//! - [`workspace`]: Workspace, project and user identity, session context
//! - [`issue`]: Issue model, hierarchy rules and the done-transition guard
//! - [`sprint`]: Sprint state machine and unfinished-issue carry-over
//! - [`attachment`]: File uploads through object storage, link attachments
//! - [`notification`]: One-time passcode email rendering
//! - [`config`]: Layered configuration
//! - [`telemetry`]: Log subscriber setup

pub mod attachment;
pub mod config;
pub mod issue;
pub mod notification;
pub mod sprint;
pub mod telemetry;
pub mod workspace;
