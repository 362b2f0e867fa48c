//! CLI commands for data export
//!
//! Provides commands for exporting data in various formats.

use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::export::{csv, json, yaml};
use crate::storage::Storage;
use clap::{Subcommand, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON format (full database)
    Json,
    /// YAML format (full database, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all data to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export deliveries to CSV
    Deliveries {
        /// Output file path
        output: PathBuf,
    },

    /// Export every project's expense lines to CSV
    Items {
        /// Output file path
        output: PathBuf,
    },

    /// Show export information without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> CreatorFlowResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = create_file(&output)?;
            match format {
                ExportFormat::Json => json::export_full_json(storage, &mut writer, pretty)?,
                ExportFormat::Yaml => yaml::export_full_yaml(storage, &mut writer)?,
            }
            writer.flush()?;
            println!("Full database exported to: {}", output.display());
        }

        ExportCommands::Deliveries { output } => {
            let count = csv::export_deliveries_csv(storage, create_file(&output)?)?;
            println!("Exported {} deliveries to: {}", count, output.display());
        }

        ExportCommands::Items { output } => {
            let count = csv::export_expense_items_csv(storage, create_file(&output)?)?;
            println!("Exported {} expense items to: {}", count, output.display());
        }

        ExportCommands::Info => {
            let export = json::FullExport::from_storage(storage)?;

            println!("Export Information");
            println!("==================\n");

            println!("Schema Version: {}", export.schema_version);
            println!("App Version:    {}", export.app_version);
            println!();

            println!("Data Summary:");
            println!("  Influencers:   {}", export.metadata.influencer_count);
            println!("  Transactions:  {}", export.metadata.transaction_count);
            println!("  Deliveries:    {}", export.metadata.delivery_count);
            println!("  Projects:      {}", export.metadata.project_count);
            println!("  Expense items: {}", export.metadata.expense_item_count);
            println!("  Tasks:         {}", export.metadata.task_count);
            println!("  Categories:    {}", export.metadata.category_count);

            println!("\nExamples:");
            println!("  creatorflow export all backup.json --format json --pretty");
            println!("  creatorflow export deliveries deliveries.csv");
            println!("  creatorflow export items expenses.csv");
        }
    }

    Ok(())
}

fn create_file(path: &Path) -> CreatorFlowResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        CreatorFlowError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
