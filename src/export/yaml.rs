//! YAML Export functionality
//!
//! Exports every collection to YAML format for human-readable backup.

use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::export::json::FullExport;
use crate::storage::Storage;
use std::io::Write;

/// Export the full database to YAML format
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> CreatorFlowResult<()> {
    let export = FullExport::from_storage(storage)?;
    let export_err = |e: std::io::Error| CreatorFlowError::Export(e.to_string());

    writeln!(writer, "# CreatorFlow Full Export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| CreatorFlowError::Export(e.to_string()))?;

    tracing::info!(projects = export.metadata.project_count, "Exported YAML");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CreatorFlowPaths;
    use crate::config::settings::Settings;
    use crate::storage::seed_sample_data;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, &Settings::default()).unwrap();
        seed_sample_data(&storage).unwrap();

        let mut out = Vec::new();
        export_full_yaml(&storage, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("# CreatorFlow Full Export"));
        assert!(text.contains("schema_version: 1.0.0"));
        assert!(text.contains("Sarah Chen"));
    }
}
