//! Path management for CreatorFlow
//!
//! ## Path Resolution Order
//!
//! 1. `CREATORFLOW_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory for `creatorflow`
//!    (`~/.config/creatorflow` on Linux, `%APPDATA%\creatorflow\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::CreatorFlowError;

/// Environment variable that overrides the data location
pub const DATA_DIR_ENV: &str = "CREATORFLOW_DATA_DIR";

/// Manages all paths used by CreatorFlow
#[derive(Debug, Clone)]
pub struct CreatorFlowPaths {
    base_dir: PathBuf,
}

impl CreatorFlowPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, CreatorFlowError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "creatorflow")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    CreatorFlowError::Config("Could not determine a home directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create paths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON file per collection
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Local session blob (signed-in user)
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Path of the JSON file backing a named collection
    pub fn collection_file(&self, collection: &str) -> PathBuf {
        self.data_dir().join(format!("{}.json", collection))
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), CreatorFlowError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            CreatorFlowError::Io(format!("Failed to create base directory: {}", e))
        })?;

        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            CreatorFlowError::Io(format!("Failed to create data directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if CreatorFlow has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.session_file(), temp_dir.path().join("session.json"));
    }

    #[test]
    fn test_collection_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(
            paths.collection_file("projects"),
            temp_dir.path().join("data").join("projects.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }
}
