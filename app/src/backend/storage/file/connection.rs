use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const DATA_DIR_ENV: &str = "RENTAL_ESTIMATOR_DATA_DIR";
const DEFAULT_DIR_NAME: &str = "Rental Estimator";

/// FileConnection owns the data directory all file repositories write into
#[derive(Clone, Debug)]
pub struct FileConnection {
    base_directory: PathBuf,
}

impl FileConnection {
    /// Create a connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory.
    ///
    /// `RENTAL_ESTIMATOR_DATA_DIR` wins when set, then the platform's local data
    /// directory, then `./data`.
    pub fn new_default() -> Result<Self> {
        let data_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => {
                info!("Using data directory from {}: {}", DATA_DIR_ENV, dir);
                PathBuf::from(dir)
            }
            _ => match dirs::data_local_dir() {
                Some(dir) => dir.join(DEFAULT_DIR_NAME),
                None => PathBuf::from("data"),
            },
        };

        info!("Data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Write a file inside the data directory atomically.
    ///
    /// Each call writes its own uniquely named temp file next to the target and
    /// renames it into place, so concurrent writers never share a temp file and
    /// readers see one complete version or the other.
    pub fn write_atomic(&self, file_name: &str, contents: &str) -> Result<()> {
        let path = self.base_directory.join(file_name);
        let directory = path.parent().unwrap_or(&self.base_directory);

        let mut temp_file = NamedTempFile::new_in(directory)
            .with_context(|| format!("Failed to create temp file in {}", directory.display()))?;
        temp_file
            .write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write temp file for {}", path.display()))?;
        temp_file
            .persist(&path)
            .with_context(|| format!("Failed to move {} into place", path.display()))?;

        debug!("Wrote {}", path.display());
        Ok(())
    }

    /// Read a file inside the data directory. `Ok(None)` when it does not exist.
    pub fn read_optional(&self, file_name: &str) -> Result<Option<String>> {
        let path = self.base_directory.join(file_name);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(contents))
    }
}
