//! Category registry
//!
//! A flat, ordered set of labels shared by every project's expense items.
//! "Other" is a permanent member and the default for new line items.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The label that can never be removed
pub const DEFAULT_CATEGORY: &str = "Other";

/// Shared set of expense category labels, insertion ordered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategoryRegistry {
    names: Vec<String>,
}

impl CategoryRegistry {
    /// Build a registry from seed labels, dropping blanks and duplicates
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self { names: Vec::new() };
        for name in names {
            let name = name.into();
            let name = name.trim();
            if !name.is_empty() && !registry.contains(name) {
                registry.names.push(name.to_string());
            }
        }
        if !registry.contains(DEFAULT_CATEGORY) {
            registry.names.insert(0, DEFAULT_CATEGORY.to_string());
        }
        registry
    }

    /// Case-sensitive membership test on the trimmed name
    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim();
        self.names.iter().any(|n| n == name)
    }

    /// Append a label
    pub fn add(&mut self, name: &str) -> Result<String, CategoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        if self.contains(name) {
            return Err(CategoryError::AlreadyExists(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok(name.to_string())
    }

    /// Remove a label. Returns `false` when nothing was removed, which is
    /// always the case for the default category.
    ///
    /// Expense items still carrying the label are left alone.
    pub fn remove(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name == DEFAULT_CATEGORY {
            return false;
        }
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new(crate::config::settings::default_categories())
    }
}

impl From<Vec<String>> for CategoryRegistry {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<CategoryRegistry> for Vec<String> {
    fn from(registry: CategoryRegistry) -> Self {
        registry.names
    }
}

/// Rejected registry changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    EmptyName,
    AlreadyExists(String),
}

impl fmt::Display for CategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::AlreadyExists(name) => write!(f, "Category already exists: {}", name),
        }
    }
}

impl std::error::Error for CategoryError {}
