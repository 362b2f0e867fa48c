//! Storage layer for CreatorFlow
//!
//! One JSON file per named collection (influencers, transactions,
//! deliveries, projects, tasks, categories) plus the session blob, all
//! written atomically. Every committed change is mirrored into the audit log.

pub mod categories;
pub mod collection;
mod documents;
pub mod file_io;
pub mod init;
pub mod projection;
pub mod session;

pub use categories::CategoryStore;
pub use collection::{Change, Collection, Document, WriteOp};
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, seed_sample_data};
pub use projection::Projection;
pub use session::SessionStore;

use serde::Serialize;
use uuid::Uuid;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::CreatorFlowPaths;
use crate::config::settings::Settings;
use crate::error::CreatorFlowError;
use crate::models::{
    CampaignTransaction, CategoryRegistry, Delivery, Influencer, Project, Task,
};

/// Owns every collection and the audit log
pub struct Storage {
    paths: CreatorFlowPaths,
    audit: AuditLogger,
    pub influencers: Collection<Influencer>,
    pub transactions: Collection<CampaignTransaction>,
    pub deliveries: Collection<Delivery>,
    pub projects: Collection<Project>,
    pub tasks: Collection<Task>,
    pub categories: CategoryStore,
    pub session: SessionStore,
}

fn collection<T: Document>(paths: &CreatorFlowPaths) -> Collection<T> {
    Collection::new(paths.collection_file(T::COLLECTION))
}

impl Storage {
    /// Open storage under `paths`; the category registry is seeded from settings
    pub fn new(paths: CreatorFlowPaths, settings: &Settings) -> Result<Self, CreatorFlowError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            influencers: collection(&paths),
            transactions: collection(&paths),
            deliveries: collection(&paths),
            projects: collection(&paths),
            tasks: collection(&paths),
            categories: CategoryStore::new(
                paths.collection_file("categories"),
                CategoryRegistry::new(settings.default_categories.iter().cloned()),
            ),
            session: SessionStore::new(paths.session_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &CreatorFlowPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> Result<(), CreatorFlowError> {
        self.influencers.load()?;
        self.transactions.load()?;
        self.deliveries.load()?;
        self.projects.load()?;
        self.tasks.load()?;
        self.categories.load()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), CreatorFlowError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), CreatorFlowError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Audit the result of a committed write or batch
    ///
    /// More than one change is written as a single batch sharing one id.
    pub fn log_changes<T: Document>(&self, changes: &[Change<T>]) -> Result<(), CreatorFlowError> {
        let entries: Vec<AuditEntry> = changes.iter().map(audit_entry).collect();
        match entries.len() {
            0 => Ok(()),
            1 => self.audit.log(&entries[0]),
            _ => {
                let batch = Uuid::new_v4();
                let entries: Vec<_> = entries.into_iter().map(|e| e.in_batch(batch)).collect();
                self.audit.log_batch(&entries)
            }
        }
    }
}

fn audit_entry<T: Document>(change: &Change<T>) -> AuditEntry {
    match change {
        Change::Created(doc) => {
            AuditEntry::create(T::ENTITY, doc.id().to_string(), Some(doc.label()), doc)
        }
        Change::Updated { before, after } => AuditEntry::update(
            T::ENTITY,
            after.id().to_string(),
            Some(after.label()),
            before,
            after,
        ),
        Change::Deleted(doc) => {
            AuditEntry::delete(T::ENTITY, doc.id().to_string(), Some(doc.label()), doc)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{Priority, TaskStatus};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, &Settings::default()).unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_storage_creation() {
        let (storage, temp_dir) = storage();
        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
        assert!(storage.categories.get().unwrap().contains("Other"));
    }

    #[test]
    fn test_batch_audited_with_shared_id() {
        let (storage, _temp) = storage();
        let due = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let a = storage.tasks.create(Task::new("A", due, Priority::Low)).unwrap();
        let b = storage.tasks.create(Task::new("B", due, Priority::Low)).unwrap();

        let ops = [a, b]
            .into_iter()
            .map(|mut t| {
                t.status = TaskStatus::Done;
                WriteOp::Update(t)
            })
            .collect();
        let changes = storage.tasks.commit_batch(ops).unwrap();
        storage.log_changes(&changes).unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Update);
        assert!(entries[0].batch_id.is_some());
        assert_eq!(entries[0].batch_id, entries[1].batch_id);
        assert!(entries[0]
            .diff_summary
            .as_deref()
            .unwrap()
            .contains("status"));
    }
}
