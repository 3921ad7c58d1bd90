//! Unit tests for the sprint module.
