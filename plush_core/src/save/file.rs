//! File-backed save store

use std::fs;
use std::path::{Path, PathBuf};

use super::{SaveError, SaveStore, SAVE_KEY};

/// Stores the save as `plush_save_v2.json` inside a directory.
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// mid-write leaves the previous save intact.
pub struct FileSaveStore {
    path: PathBuf,
}

impl FileSaveStore {
    /// Store inside `dir`, creating it if needed
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, SaveError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(format!("{}.json", SAVE_KEY)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for FileSaveStore {
    fn load(&self) -> Result<Option<String>, SaveError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&self.path)?;
        tracing::debug!("Loaded save from {}", self.path.display());
        Ok(Some(data))
    }

    fn save(&mut self, data: &str) -> Result<(), SaveError> {
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, data)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }

    fn delete(&mut self) -> Result<(), SaveError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            tracing::debug!("Deleted save {}", self.path.display());
        }
        Ok(())
    }
}
