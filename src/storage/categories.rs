//! Category registry persistence
//!
//! The registry is a single ordered list stored in `data/categories.json`.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::models::CategoryRegistry;

use super::file_io::{read_json, write_json_atomic};

pub struct CategoryStore {
    path: PathBuf,
    registry: RwLock<CategoryRegistry>,
}

impl CategoryStore {
    /// An empty store seeded with `seed` until something is loaded
    pub fn new(path: PathBuf, seed: CategoryRegistry) -> Self {
        Self {
            path,
            registry: RwLock::new(seed),
        }
    }

    /// Load the registry from disk; a missing file keeps the seed
    pub fn load(&self) -> CreatorFlowResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let loaded: CategoryRegistry = read_json(&self.path)?;
        let mut registry = self.registry.write().map_err(|e| {
            CreatorFlowError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *registry = loaded;
        Ok(())
    }

    pub fn get(&self) -> CreatorFlowResult<CategoryRegistry> {
        let registry = self.registry.read().map_err(|e| {
            CreatorFlowError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(registry.clone())
    }

    /// Persist `updated` and make it current
    pub fn replace(&self, updated: CategoryRegistry) -> CreatorFlowResult<()> {
        let mut registry = self.registry.write().map_err(|e| {
            CreatorFlowError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        write_json_atomic(&self.path, &updated)?;
        *registry = updated;
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
