//! Unit tests for the issue module.
//!
//! Tests are organised by domain concept: entity construction and
//! mutation, hierarchy derivation, and service orchestration.

mod hierarchy_tests;
