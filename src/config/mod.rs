//! Configuration module for CreatorFlow
//!
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::CreatorFlowPaths;
pub use settings::{InvoiceDefaults, Settings};
