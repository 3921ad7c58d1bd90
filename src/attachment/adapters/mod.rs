//! Adapter implementations of the attachment ports.

pub mod memory;
