//! Export module for CreatorFlow
//!
//! Provides data export in multiple formats:
//! - CSV: deliveries and project expense lines (spreadsheet-compatible)
//! - JSON: machine-readable full export
//! - YAML: human-readable full export

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_deliveries_csv, export_expense_items_csv};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
