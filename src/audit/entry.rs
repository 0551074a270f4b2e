//! Audit entry format

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of change recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        })
    }
}

/// Record types that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Occasion,
    Person,
    Subgroup,
    Expense,
    Settlement,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Occasion => "Occasion",
            Self::Person => "Person",
            Self::Subgroup => "Subgroup",
            Self::Expense => "Expense",
            Self::Settlement => "Settlement",
        })
    }
}

/// One line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Display form of the record's ID
    pub entity_id: String,

    /// Name or description shown next to the ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Record state before an update or delete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Record state after a create or update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Changed fields of an update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn new(
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
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
            after: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Create, entity_type, entity_id, entity_name)
        }
    }

    /// An update entry; the change summary is derived from the two states
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
            (Some(old), Some(new)) => super::diff_summary(old, new),
            _ => None,
        };

        Self {
            before,
            after,
            diff_summary,
            ..Self::new(Operation::Update, entity_type, entity_id, entity_name)
        }
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            before: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Delete, entity_type, entity_id, entity_name)
        }
    }

    /// One-line rendering, plus a second line with changes for updates
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
    fn test_create_and_delete_states() {
        let record = json!({"name": "Alice"});

        let created = AuditEntry::create(EntityType::Person, "per-1234abcd", None, &record);
        assert_eq!(created.operation, Operation::Create);
        assert!(created.before.is_none());
        assert_eq!(created.after, Some(record.clone()));

        let deleted = AuditEntry::delete(EntityType::Person, "per-1234abcd", None, &record);
        assert_eq!(deleted.operation, Operation::Delete);
        assert_eq!(deleted.before, Some(record));
        assert!(deleted.after.is_none());
    }

    #[test]
    fn test_update_computes_diff() {
        let before = json!({"name": "Lisbon", "updated_at": "a"});
        let after = json!({"name": "Lisbon 2026", "updated_at": "b"});

        let entry = AuditEntry::update(
            EntityType::Occasion,
            "occ-0000aaaa",
            Some("Lisbon 2026".into()),
            &before,
            &after,
        );

        assert_eq!(
            entry.diff_summary.as_deref(),
            Some(r#"name: "Lisbon" -> "Lisbon 2026""#)
        );
    }

    #[test]
    fn test_serialized_shape() {
        let entry = AuditEntry::create(EntityType::Settlement, "stl-1", None, &json!({}));
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["operation"], "create");
        assert_eq!(value["entity_type"], "settlement");
        assert!(value.get("entity_name").is_none());
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::delete(
            EntityType::Expense,
            "exp-12345678",
            Some("Dinner".into()),
            &json!({"description": "Dinner"}),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("DELETE Expense exp-12345678 (Dinner)"));
        assert!(!formatted.contains("Changes"));
    }
}
