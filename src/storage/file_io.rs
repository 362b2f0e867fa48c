//! JSON file helpers with atomic writes
//!
//! A collection file is either the previous complete version or the new
//! complete version; a crash mid-write leaves only a stray `.tmp` file.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::CreatorFlowError;

/// Read JSON from `path`, or `T::default()` when the file does not exist
pub fn read_json<T, P>(path: P) -> Result<T, CreatorFlowError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| {
        CreatorFlowError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        CreatorFlowError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write JSON to `path` via a temp file, fsync and rename
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), CreatorFlowError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CreatorFlowError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| CreatorFlowError::Storage(format!("Failed to create temp file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| CreatorFlowError::Storage(format!("Failed to serialize data: {}", e)))?;
    writer
        .flush()
        .map_err(|e| CreatorFlowError::Storage(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| CreatorFlowError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CreatorFlowError::Storage(format!("Failed to rename temp file: {}", e))
    })
}

/// Delete a file; a file that is already gone is not an error
pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<bool, CreatorFlowError> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(CreatorFlowError::Storage(format!(
            "Failed to remove {}: {}",
            path.display(),
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_empty_collection() {
        let temp_dir = TempDir::new().unwrap();
        let docs: Vec<String> = read_json(temp_dir.path().join("tasks.json")).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("categories.json");

        write_json_atomic(&path, &vec!["Other", "Gift"]).unwrap();

        let loaded: Vec<String> = read_json(&path).unwrap();
        assert_eq!(loaded, vec!["Other", "Gift"]);
        assert!(!temp_dir.path().join("data").join("categories.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("projects.json");
        fs::write(&path, "not json").unwrap();

        let result: Result<Vec<String>, _> = read_json(&path);
        assert!(matches!(result, Err(CreatorFlowError::Storage(_))));
    }

    #[test]
    fn test_remove_if_exists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        fs::write(&path, "{}").unwrap();

        assert!(remove_if_exists(&path).unwrap());
        assert!(!remove_if_exists(&path).unwrap());
    }
}
