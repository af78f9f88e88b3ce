//! File-backed storage connection.
//!
//! All three stores live as flat files inside one data directory:
//!
//! ```text
//! data/
//! ├── config.yaml
//! ├── evenings.json
//! └── saved_players.yaml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;

use crate::storage::traits::Connection;

/// Manages the data directory and file access for the file backend.
#[derive(Clone)]
pub struct FileConnection {
    base_directory: PathBuf,
}

impl FileConnection {
    /// Create a connection rooted at the given directory, creating it if
    /// needed.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_directory = base_directory.as_ref().to_path_buf();
        if !base_directory.exists() {
            fs::create_dir_all(&base_directory)?;
            info!("Created data directory: {}", base_directory.display());
        }
        Ok(Self { base_directory })
    }

    /// Create a connection in the default data directory, `Kegelbuch` under
    /// the user's Documents folder (falling back to the home directory).
    pub fn new_default() -> Result<Self> {
        let parent = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("could not determine a data directory"))?;
        Self::new(parent.join("Kegelbuch"))
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Read a store file, `None` if it does not exist yet.
    pub(crate) fn read_if_exists(&self, file_name: &str) -> Result<Option<String>> {
        let path = self.base_directory.join(file_name);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    /// Atomically replace a store file: write to a temp file, then rename.
    pub(crate) fn write_atomic(&self, file_name: &str, contents: &str) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
        }
        let path = self.base_directory.join(file_name);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

impl Connection for FileConnection {
    type ConfigRepository = super::config_repository::ConfigRepository;
    type EveningRepository = super::evening_repository::EveningRepository;
    type SavedPlayerRepository = super::saved_player_repository::SavedPlayerRepository;

    fn create_config_repository(&self) -> Self::ConfigRepository {
        super::config_repository::ConfigRepository::new(self.clone())
    }

    fn create_evening_repository(&self) -> Self::EveningRepository {
        super::evening_repository::EveningRepository::new(self.clone())
    }

    fn create_saved_player_repository(&self) -> Self::SavedPlayerRepository {
        super::saved_player_repository::SavedPlayerRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let connection = FileConnection::new(temp_dir.path()).unwrap();

        assert!(connection.read_if_exists("config.yaml").unwrap().is_none());

        connection.write_atomic("config.yaml", "first").unwrap();
        connection.write_atomic("config.yaml", "second").unwrap();

        assert_eq!(
            connection.read_if_exists("config.yaml").unwrap().as_deref(),
            Some("second")
        );
        // No leftover temp file.
        assert!(!temp_dir.path().join("config.tmp").exists());
    }

    #[test]
    fn new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("deep").join("data");
        let connection = FileConnection::new(&nested).unwrap();
        assert!(nested.exists());
        assert_eq!(connection.base_directory(), nested.as_path());
    }
}
