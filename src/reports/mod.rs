//! Reports module for CreatorFlow
//!
//! Dashboard headline figures, the project portfolio, and delivery and task
//! statistics. Every report can be built from records already in memory,
//! so the console can feed them from its projections.

pub mod dashboard;
pub mod operations;
pub mod portfolio;

pub use dashboard::DashboardReport;
pub use operations::{DeliveryStats, TaskStats};
pub use portfolio::{PortfolioReport, PortfolioRow};
