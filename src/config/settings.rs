//! User settings for CreatorFlow
//!
//! Display preferences, invoice defaults, the seed category list and the
//! delivery status policy.

use serde::{Deserialize, Serialize};

use super::paths::CreatorFlowPaths;
use crate::error::CreatorFlowError;

/// Defaults applied to every invoice unless overridden on the command line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDefaults {
    /// Prefix of auto-generated invoice numbers
    #[serde(default = "default_number_prefix")]
    pub number_prefix: String,

    /// Days between invoice date and due date
    #[serde(default = "default_due_in_days")]
    pub due_in_days: i64,

    #[serde(default = "default_logo_url")]
    pub logo_url: String,

    #[serde(default = "default_payment_terms")]
    pub payment_terms: String,

    /// Command that receives the share text on stdin (e.g. `wl-copy`, `mail -s Invoice ops@...`)
    ///
    /// Split on whitespace and run without a shell, so quoting is not
    /// supported; wrap anything needing quoted arguments in a script.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_command: Option<String>,
}

impl Default for InvoiceDefaults {
    fn default() -> Self {
        Self {
            number_prefix: default_number_prefix(),
            due_in_days: default_due_in_days(),
            logo_url: default_logo_url(),
            payment_terms: default_payment_terms(),
            share_command: None,
        }
    }
}

/// User settings for CreatorFlow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when rendering money
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// strftime format for project creation dates
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub invoice: InvoiceDefaults,

    /// Categories seeded into a fresh registry
    #[serde(default = "default_categories")]
    pub default_categories: Vec<String>,

    /// Reject backwards delivery status changes (Delivered -> Pending, ...)
    #[serde(default)]
    pub enforce_delivery_pipeline: bool,

    /// Fallback tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%b %-d, %Y".to_string()
}

fn default_number_prefix() -> String {
    "INV-".to_string()
}

fn default_due_in_days() -> i64 {
    30
}

fn default_logo_url() -> String {
    "https://cdn-icons-png.flaticon.com/512/1177/1177568.png".to_string()
}

fn default_payment_terms() -> String {
    "Please pay within 30 days. Payment can be made via wire transfer to Account #123456789."
        .to_string()
}

pub(crate) fn default_categories() -> Vec<String> {
    ["Other", "Production", "Commission", "Ad Spend", "Gift", "Software"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            invoice: InvoiceDefaults::default(),
            default_categories: default_categories(),
            enforce_delivery_pipeline: false,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &CreatorFlowPaths) -> Result<Self, CreatorFlowError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                CreatorFlowError::Io(format!("Failed to read settings file: {}", e))
            })?;

            serde_json::from_str(&contents).map_err(|e| {
                CreatorFlowError::Config(format!("Failed to parse settings file: {}", e))
            })
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CreatorFlowPaths) -> Result<(), CreatorFlowError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            CreatorFlowError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CreatorFlowError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.invoice.due_in_days, 30);
        assert_eq!(settings.invoice.number_prefix, "INV-");
        assert_eq!(settings.default_categories[0], "Other");
        assert!(!settings.enforce_delivery_pipeline);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.enforce_delivery_pipeline = true;
        settings.invoice.due_in_days = 14;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(loaded.enforce_delivery_pipeline);
        assert_eq!(loaded.invoice.due_in_days, 14);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "€"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.default_categories.len(), 6);
        assert_eq!(loaded.log_level, "info");
    }
}
