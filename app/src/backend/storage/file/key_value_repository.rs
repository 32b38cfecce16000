//! # File Key-Value Repository
//!
//! Stores each key as its own JSON document under `<data dir>/kv/`.
//!
//! ```text
//! data/
//! ├── estimator_config.yaml
//! └── kv/
//!     └── mmr_estimator.json
//! ```
//!
//! Keys are sanitized into file names; anything outside `[A-Za-z0-9_-]`
//! becomes `_`.

use anyhow::{Context, Result};
use std::fs;

use super::connection::FileConnection;
use crate::backend::storage::traits::KeyValueStore;

const KV_DIRECTORY: &str = "kv";

#[derive(Clone)]
pub struct FileKeyValueRepository {
    connection: FileConnection,
}

impl FileKeyValueRepository {
    pub fn new(connection: FileConnection) -> Result<Self> {
        let kv_dir = connection.base_directory().join(KV_DIRECTORY);
        fs::create_dir_all(&kv_dir)
            .with_context(|| format!("Failed to create {}", kv_dir.display()))?;
        Ok(Self { connection })
    }

    fn file_name(key: &str) -> String {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        format!("{}/{}.json", KV_DIRECTORY, safe)
    }
}

impl KeyValueStore for FileKeyValueRepository {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.connection.read_optional(&Self::file_name(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.connection.write_atomic(&Self::file_name(key), value)
    }
}
