//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// The collection an audited record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Influencer,
    Transaction,
    Delivery,
    Project,
    Task,
    Category,
    Session,
}

impl EntityType {
    pub const fn label(&self) -> &'static str {
        match self {
            EntityType::Influencer => "Influencer",
            EntityType::Transaction => "Transaction",
            EntityType::Delivery => "Delivery",
            EntityType::Project => "Project",
            EntityType::Task => "Task",
            EntityType::Category => "Category",
            EntityType::Session => "Session",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    pub entity_id: String,

    /// Title, name or product shown next to the id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Shared by every entry written by the same bulk operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn blank(operation: Operation, entity_type: EntityType, entity_id: String) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name: None,
            batch_id: None,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            entity_name,
            after: serde_json::to_value(entity).ok(),
            ..Self::blank(Operation::Create, entity_type, entity_id.into())
        }
    }

    /// Update entry; the diff summary is computed from the two snapshots
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Self {
        let before = serde_json::to_value(before).ok();
        let after = serde_json::to_value(after).ok();
        let diff_summary = match (&before, &after) {
            (Some(b), Some(a)) => super::diff::generate_diff(b, a),
            _ => None,
        };
        Self {
            entity_name,
            before,
            after,
            diff_summary,
            ..Self::blank(Operation::Update, entity_type, entity_id.into())
        }
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            entity_name,
            before: serde_json::to_value(entity).ok(),
            ..Self::blank(Operation::Delete, entity_type, entity_id.into())
        }
    }

    pub fn in_batch(mut self, batch_id: Uuid) -> Self {
        self.batch_id = Some(batch_id);
        self
    }

    /// One or two lines for terminal output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }
        if let Some(batch) = &self.batch_id {
            output.push_str(&format!(" batch {}", &batch.to_string()[..8]));
        }
        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_computes_diff() {
        let before = json!({"title": "Launch", "paid_amount": 4000});
        let after = json!({"title": "Launch", "paid_amount": 10000});

        let entry = AuditEntry::update(
            EntityType::Project,
            "prj-12345678",
            Some("Launch".to_string()),
            &before,
            &after,
        );

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(
            entry.diff_summary.as_deref(),
            Some("paid_amount: 4000 -> 10000")
        );
    }

    #[test]
    fn test_delete_keeps_before_only() {
        let entry = AuditEntry::delete(
            EntityType::Task,
            "tsk-12345678",
            None,
            &json!({"title": "Ship samples"}),
        );
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_batch_round_trip() {
        let batch = Uuid::new_v4();
        let entry = AuditEntry::create(
            EntityType::Delivery,
            "dlv-12345678",
            Some("Glow Cream".into()),
            &json!({"product_name": "Glow Cream"}),
        )
        .in_batch(batch);

        let line = serde_json::to_string(&entry).unwrap();
        let parsed: AuditEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed.batch_id, Some(batch));
        assert_eq!(parsed.entity_type, EntityType::Delivery);
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::create(
            EntityType::Influencer,
            "inf-12345678",
            Some("Sarah Chen".to_string()),
            &json!({"name": "Sarah Chen"}),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("CREATE Influencer inf-12345678 (Sarah Chen)"));
    }
}
