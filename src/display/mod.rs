//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display:
//! project views, operational tables, category listings, the audit trail
//! and the printable invoice.

pub mod audit;
pub mod category;
pub mod invoice;
pub mod operations;
pub mod project;

pub use audit::format_history;
pub use category::{format_category_list, format_orphans};
pub use invoice::render_invoice;
pub use operations::{
    format_delivery_list, format_delivery_stats, format_influencer_details,
    format_influencer_list, format_spend_list, format_task_list, format_task_stats,
};
pub use project::{format_project_details, format_project_list, progress_bar};
