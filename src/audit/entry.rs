//! Audit entry data structures
//!
//! Defines the structure of audit log entries: the operation, the affected
//! declaration, and a JSON snapshot of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Classification, Declaration};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Declaration was saved
    Create,
    /// Declaration was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub declaration_id: String,

    pub category: Classification,

    /// Direction and period, e.g. "DR Alger, Mars 2025"
    pub summary: String,

    /// Stored form of the declaration before the operation (deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Stored form of the declaration after the operation (creates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    fn base(operation: Operation, declaration: &Declaration) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            declaration_id: declaration.id.as_str().to_string(),
            category: declaration.category(),
            summary: format!("{}, {}", declaration.direction, declaration.period),
            before: None,
            after: None,
        }
    }

    /// Create a new audit entry for a saved declaration
    pub fn create(declaration: &Declaration) -> Self {
        Self {
            after: serde_json::to_value(declaration).ok(),
            ..Self::base(Operation::Create, declaration)
        }
    }

    /// Create a new audit entry for a deleted declaration
    pub fn delete(declaration: &Declaration) -> Self {
        Self {
            before: serde_json::to_value(declaration).ok(),
            ..Self::base(Operation::Delete, declaration)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        format!(
            "[{}] {} {} {} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.category.label(),
            self.declaration_id,
            self.summary
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DeclarationBody, DeclarationCategory, DeclarationDraft, EncaissementRow, Period,
    };

    fn declaration() -> Declaration {
        DeclarationDraft::new(
            "DR Alger",
            Period::new("03", "2025"),
            DeclarationBody::Encaissement(vec![EncaissementRow {
                label: "Ventes".into(),
                gross_amount: "1190".into(),
            }]),
        )
        .into_declaration()
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_create_entry() {
        let decl = declaration();
        let entry = AuditEntry::create(&decl);

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(
            entry.category,
            Classification::Category(DeclarationCategory::Encaissement)
        );
        assert_eq!(entry.declaration_id, decl.id.as_str());
        assert!(entry.before.is_none());
        assert_eq!(
            entry.after.as_ref().map(|v| v["encRows"][0]["ttc"].clone()),
            Some(serde_json::json!("1190"))
        );
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(&declaration());

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::create(&declaration());

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.operation, Operation::Create);
        assert_eq!(deserialized.summary, "DR Alger, Mars 2025");
    }

    #[test]
    fn test_human_readable_format() {
        let decl = declaration();
        let formatted = AuditEntry::create(&decl).format_human_readable();
        assert!(formatted.contains("CREATE"));
        assert!(formatted.contains("Encaissement"));
        assert!(formatted.contains(decl.id.as_str()));
        assert!(formatted.contains("DR Alger, Mars 2025"));
    }

    #[test]
    fn test_undefined_record_entry() {
        let decl: Declaration =
            serde_json::from_str(r#"{"id": "2", "direction": "DR Blida"}"#).unwrap();
        let entry = AuditEntry::delete(&decl);
        assert_eq!(entry.category, Classification::Undefined);
        assert!(entry.format_human_readable().contains("Non défini"));

        let line = serde_json::to_string(&entry).unwrap();
        assert!(line.contains(r#""category":"undefined""#));
    }

    #[test]
    fn test_reads_category_key_entries() {
        let line = r#"{"timestamp":"2025-03-14T09:30:00Z","operation":"create","declaration_id":"1","category":"vat_goods_services","summary":"DR Alger, Mars 2025"}"#;
        let entry: AuditEntry = serde_json::from_str(line).unwrap();
        assert_eq!(
            entry.category,
            Classification::Category(DeclarationCategory::VatGoodsServices)
        );
    }
}
