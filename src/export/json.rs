//! JSON Export functionality
//!
//! Exports every collection to JSON format with schema versioning.

use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::models::{CampaignTransaction, Delivery, Influencer, Project, Task};
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub influencers: Vec<Influencer>,

    pub transactions: Vec<CampaignTransaction>,

    pub deliveries: Vec<Delivery>,

    /// Projects with their expense lines inline
    pub projects: Vec<Project>,

    pub tasks: Vec<Task>,

    /// Registered category labels, insertion order
    pub categories: Vec<String>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub influencer_count: usize,
    pub transaction_count: usize,
    pub delivery_count: usize,
    pub project_count: usize,
    /// Expense lines across all projects
    pub expense_item_count: usize,
    pub task_count: usize,
    pub category_count: usize,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> CreatorFlowResult<Self> {
        let influencers = storage.influencers.snapshot()?;
        let transactions = storage.transactions.snapshot()?;
        let deliveries = storage.deliveries.snapshot()?;
        let projects = storage.projects.snapshot()?;
        let tasks = storage.tasks.snapshot()?;
        let categories: Vec<String> = storage
            .categories
            .get()?
            .iter()
            .map(str::to_string)
            .collect();

        let metadata = ExportMetadata {
            influencer_count: influencers.len(),
            transaction_count: transactions.len(),
            delivery_count: deliveries.len(),
            project_count: projects.len(),
            expense_item_count: projects.iter().map(|p| p.expenses.len()).sum(),
            task_count: tasks.len(),
            category_count: categories.len(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            influencers,
            transactions,
            deliveries,
            projects,
            tasks,
            categories,
            metadata,
        })
    }
}

/// Export the full database to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> CreatorFlowResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| CreatorFlowError::Export(e.to_string()))?;

    tracing::info!(
        projects = export.metadata.project_count,
        deliveries = export.metadata.delivery_count,
        "Exported JSON"
    );
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
    fn test_export_counts_sample_data() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, &Settings::default()).unwrap();
        seed_sample_data(&storage).unwrap();

        let mut out = Vec::new();
        export_full_json(&storage, &mut out, true).unwrap();

        let parsed: FullExport = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed.metadata.influencer_count, 2);
        assert_eq!(parsed.metadata.delivery_count, 2);
        assert_eq!(parsed.metadata.category_count, 6);
        assert_eq!(parsed.categories[0], "Other");
    }
}
