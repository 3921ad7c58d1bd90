//! Port contracts for object storage.

pub mod storage;

pub use storage::{ObjectStorage, ObjectStorageError, ObjectStorageResult};
