//! Append-only JSONL audit log writer and reader

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{CreatorFlowError, CreatorFlowResult};

use super::entry::AuditEntry;

/// Writes audit entries to `audit.log`, one JSON object per line
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry and flush
    pub fn log(&self, entry: &AuditEntry) -> CreatorFlowResult<()> {
        self.append(std::slice::from_ref(entry))
    }

    /// Append every entry of a bulk operation with a single flush
    pub fn log_batch(&self, entries: &[AuditEntry]) -> CreatorFlowResult<()> {
        if entries.is_empty() {
            return Ok(());
        }
        self.append(entries)
    }

    fn append(&self, entries: &[AuditEntry]) -> CreatorFlowResult<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| CreatorFlowError::Io(format!("Failed to open audit log: {}", e)))?;
        let mut writer = BufWriter::new(file);

        for entry in entries {
            let json = serde_json::to_string(entry).map_err(|e| {
                CreatorFlowError::Json(format!("Failed to serialize audit entry: {}", e))
            })?;
            writeln!(writer, "{}", json)
                .map_err(|e| CreatorFlowError::Io(format!("Failed to write audit entry: {}", e)))?;
        }

        writer
            .flush()
            .map_err(|e| CreatorFlowError::Io(format!("Failed to flush audit log: {}", e)))
    }

    /// Every entry, oldest first
    pub fn read_all(&self) -> CreatorFlowResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| CreatorFlowError::Io(format!("Failed to open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                CreatorFlowError::Io(format!("Failed to read audit log line {}: {}", index + 1, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                CreatorFlowError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    index + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> CreatorFlowResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    /// Entries whose id matches `input` (full id or short form)
    pub fn read_for_entity(&self, input: &str) -> CreatorFlowResult<Vec<AuditEntry>> {
        let input = input.trim().to_lowercase();
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|entry| !input.is_empty() && entry.entity_id.starts_with(&input))
            .collect())
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{EntityType, Operation};
    use serde_json::json;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn task_entry(id: &str) -> AuditEntry {
        AuditEntry::create(EntityType::Task, id, None, &json!({"title": id}))
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger.log(&task_entry("tsk-00000001")).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_type, EntityType::Task);
    }

    #[test]
    fn test_batch_shares_id() {
        let (logger, _temp) = create_test_logger();
        let batch = Uuid::new_v4();
        let entries: Vec<_> = (0..3)
            .map(|i| task_entry(&format!("tsk-{}", i)).in_batch(batch))
            .collect();

        logger.log_batch(&entries).unwrap();
        logger.log_batch(&[]).unwrap();

        let read = logger.read_all().unwrap();
        assert_eq!(read.len(), 3);
        assert!(read.iter().all(|e| e.batch_id == Some(batch)));
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();
        for i in 0..10 {
            logger.log(&task_entry(&format!("tsk-{}", i))).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        let ids: Vec<_> = recent.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["tsk-7", "tsk-8", "tsk-9"]);
    }

    #[test]
    fn test_read_for_entity() {
        let (logger, _temp) = create_test_logger();
        logger.log(&task_entry("prj-aaaa1111")).unwrap();
        logger.log(&task_entry("prj-bbbb2222")).unwrap();
        logger.log(&task_entry("prj-aaaa1111")).unwrap();

        assert_eq!(logger.read_for_entity("prj-aaaa").unwrap().len(), 2);
        assert!(logger.read_for_entity("").unwrap().is_empty());
    }

    #[test]
    fn test_missing_log_is_empty() {
        let (logger, _temp) = create_test_logger();
        assert!(!logger.path().exists());
        assert!(logger.read_all().unwrap().is_empty());
    }
}
