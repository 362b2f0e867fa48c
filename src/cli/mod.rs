//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod delivery;
pub mod export;
pub mod history;
pub mod influencer;
pub mod invoice;
pub mod project;
pub mod report;
pub mod session;
pub mod spend;
pub mod task;

pub use category::{handle_category_command, CategoryCommands};
pub use delivery::{handle_delivery_command, DeliveryCommands};
pub use export::{handle_export_command, ExportCommands};
pub use history::handle_history_command;
pub use influencer::{handle_influencer_command, InfluencerCommands};
pub use invoice::{handle_invoice_command, InvoiceCommands};
pub use project::{handle_project_command, ProjectCommands};
pub use report::{handle_report_command, ReportCommands};
pub use session::{handle_login, handle_logout, handle_whoami, require_session};
pub use spend::{handle_spend_command, SpendCommands};
pub use task::{handle_task_command, TaskCommands};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::models::Money;

/// Parse a money argument ("1250", "1,250.00", "$45.50")
pub(crate) fn parse_money(input: &str) -> CreatorFlowResult<Money> {
    Money::parse(input).map_err(|e| {
        CreatorFlowError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '1250.00'. Error: {}",
            input, e
        ))
    })
}

/// Parse a YYYY-MM-DD date argument
pub(crate) fn parse_date(input: &str) -> CreatorFlowResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        CreatorFlowError::Validation(format!(
            "Invalid date: '{}'. Use YYYY-MM-DD.",
            input
        ))
    })
}

pub(crate) fn parse_optional_money(input: Option<&str>) -> CreatorFlowResult<Option<Money>> {
    input.map(parse_money).transpose()
}

pub(crate) fn parse_optional_date(input: Option<&str>) -> CreatorFlowResult<Option<NaiveDate>> {
    input.map(parse_date).transpose()
}

/// Parse a status/priority style argument through its `FromStr`
pub(crate) fn parse_choice<T: FromStr<Err = String>>(input: &str) -> CreatorFlowResult<T> {
    input.parse().map_err(CreatorFlowError::Validation)
}

pub(crate) fn parse_optional_choice<T: FromStr<Err = String>>(
    input: Option<&str>,
) -> CreatorFlowResult<Option<T>> {
    input.map(parse_choice).transpose()
}

/// Stdout, or a file when `--output` was given
pub(crate) fn open_output(path: Option<&Path>) -> CreatorFlowResult<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                CreatorFlowError::Io(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_money("$1,250.50").unwrap(), Money::from_cents(125_050));
        assert!(parse_money("abc").unwrap_err().is_validation());
        assert_eq!(
            parse_date("2025-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert!(parse_date("28/02/2025").is_err());
        assert_eq!(parse_choice::<TaskStatus>("done").unwrap(), TaskStatus::Done);
        assert_eq!(parse_optional_date(None).unwrap(), None);
    }
}
