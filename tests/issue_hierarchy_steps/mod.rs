//! Step definitions for issue hierarchy scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
