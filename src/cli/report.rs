//! CLI commands for reports
//!
//! Provides the roster dashboard and the project portfolio summary.

use crate::console::Console;
use crate::display::operations::{format_delivery_stats, format_task_stats};
use crate::error::{CreatorFlowError, CreatorFlowResult};
use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Reach, engagement, spend and settlement totals across the roster
    Dashboard,

    /// Budget, cost, payments and balance for every project
    #[command(alias = "portfolio")]
    Projects {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delivery and task counters
    Operations,
}

/// Handle report commands
pub fn handle_report_command(console: &mut Console, cmd: ReportCommands) -> CreatorFlowResult<()> {
    console.refresh();

    match cmd {
        ReportCommands::Dashboard => {
            println!("{}", console.dashboard().format_terminal());
        }

        ReportCommands::Projects { output } => {
            let report = console.portfolio();
            if let Some(path) = output {
                let file = File::create(&path).map_err(|e| {
                    CreatorFlowError::Export(format!(
                        "Failed to create file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                report.export_csv(BufWriter::new(file))?;
                println!("Project report exported to: {}", path.display());
            } else {
                println!("{}", report.format_terminal());
            }
        }

        ReportCommands::Operations => {
            println!("Deliveries: {}", format_delivery_stats(&console.delivery_stats()));
            println!("Tasks:      {}", format_task_stats(&console.task_stats()));
        }
    }

    Ok(())
}
