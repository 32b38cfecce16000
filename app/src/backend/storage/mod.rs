//! # Storage Module
//!
//! Persistence for the rental estimator: the editable pricing configuration
//! and the last-selection cache.
//!
//! Domain services only see the traits in `traits`, so the file-backed
//! implementation used by the app and the in-memory one used in tests are
//! interchangeable.

pub mod traits;
#[cfg(test)]
pub mod memory;
pub mod file;

pub use traits::{ConfigStorage, KeyValueStore};
#[cfg(test)]
pub use memory::MemoryStore;
pub use file::{ConfigRepository, FileConnection, FileKeyValueRepository};
