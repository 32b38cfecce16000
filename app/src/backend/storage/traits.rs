//! # Storage Traits
//!
//! Storage abstractions the domain layer depends on, so services can be backed
//! by files on disk in the app and by memory in tests.

use anyhow::Result;
use shared::EstimatorConfig;

/// A flat string key-value store, the same shape as browser local storage
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Storage for the static estimator configuration
pub trait ConfigStorage: Send + Sync {
    /// Load the configuration, creating the default one if none is stored yet
    fn load_config(&self) -> Result<EstimatorConfig>;

    /// Replace the stored configuration
    fn save_config(&self, config: &EstimatorConfig) -> Result<()>;
}
