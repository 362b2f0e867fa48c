//! Custom error types for CreatorFlow
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for CreatorFlow operations
#[derive(Error, Debug)]
pub enum CreatorFlowError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Rejected input (empty required field, non-positive payment, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// An entity that cannot be removed or changed
    #[error("Protected: {0}")]
    Protected(String),

    /// Delivery status change rejected by the forward-only pipeline
    #[error("Cannot move delivery from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// No signed-in session, or a bad login attempt
    #[error("Session error: {0}")]
    Session(String),

    /// Share hand-off failed on every target
    #[error("Share error: {0}")]
    Share(String),
}

impl CreatorFlowError {
    /// Create a "not found" error for projects
    pub fn project_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Project",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expense line items
    pub fn expense_item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense item",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for deliveries
    pub fn delivery_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Delivery",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for tasks
    pub fn task_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Task",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for influencers
    pub fn influencer_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Influencer",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for campaign transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for CreatorFlowError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CreatorFlowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for CreatorFlow operations
pub type CreatorFlowResult<T> = Result<T, CreatorFlowError>;
