//! Audit records for transactions, bills and settings

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::settings::Settings;
use crate::models::{Bill, Transaction};

use super::diff::generate_diff;

/// What kind of record an entry is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Transaction,
    Bill,
    Settings,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityType::Transaction => "transaction",
            EntityType::Bill => "bill",
            EntityType::Settings => "settings",
        })
    }
}

/// Anything whose changes are written to the audit log
pub trait Audited: Serialize {
    const ENTITY: EntityType;

    /// Reference a user can type back into the CLI
    fn audit_reference(&self) -> String;

    /// Short human label shown in `history`
    fn audit_label(&self) -> String;
}

impl Audited for Bill {
    const ENTITY: EntityType = EntityType::Bill;

    fn audit_reference(&self) -> String {
        self.id.to_string()
    }

    fn audit_label(&self) -> String {
        format!("{} due {}", self.description, self.due_date)
    }
}

impl Audited for Transaction {
    const ENTITY: EntityType = EntityType::Transaction;

    fn audit_reference(&self) -> String {
        self.id.to_string()
    }

    fn audit_label(&self) -> String {
        format!(
            "{} {} {} on {}",
            self.kind.to_string().to_lowercase(),
            self.amount,
            self.description,
            self.date
        )
    }
}

impl Audited for Settings {
    const ENTITY: EntityType = EntityType::Settings;

    fn audit_reference(&self) -> String {
        "settings".to_string()
    }

    fn audit_label(&self) -> String {
        format!(
            "work days {}; currency {}",
            self.work_days, self.currency_symbol
        )
    }
}

/// The recorded change with the snapshots it needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum Change {
    Created {
        after: Value,
    },
    Updated {
        before: Value,
        after: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
    },
    Deleted {
        before: Value,
    },
}

impl Change {
    fn verb(&self) -> &'static str {
        match self {
            Change::Created { .. } => "created",
            Change::Updated { .. } => "updated",
            Change::Deleted { .. } => "deleted",
        }
    }
}

/// One line of the audit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub entity: EntityType,
    pub reference: String,
    pub label: String,
    #[serde(flatten)]
    pub change: Change,
}

impl AuditEntry {
    fn new<T: Audited>(subject: &T, change: Change) -> Self {
        Self {
            timestamp: Utc::now(),
            entity: T::ENTITY,
            reference: subject.audit_reference(),
            label: subject.audit_label(),
            change,
        }
    }

    pub fn created<T: Audited>(subject: &T) -> Self {
        Self::new(
            subject,
            Change::Created {
                after: snapshot(subject),
            },
        )
    }

    /// Records both snapshots and summarises the fields that differ.
    /// The label is taken from the new state.
    pub fn updated<T: Audited>(before: &T, after: &T) -> Self {
        let before = snapshot(before);
        let after_value = snapshot(after);
        let summary = generate_diff(&before, &after_value);
        Self::new(
            after,
            Change::Updated {
                before,
                after: after_value,
                summary,
            },
        )
    }

    pub fn deleted<T: Audited>(subject: &T) -> Self {
        Self::new(
            subject,
            Change::Deleted {
                before: snapshot(subject),
            },
        )
    }

    /// `2025-01-06 14:02  updated bill  Rent due 2025-01-10  [bill-1a2b3c4d]`
    /// followed by the changed fields on an indented line
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "{}  {} {}  {}  [{}]",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.change.verb(),
            self.entity,
            self.label,
            self.reference
        );

        if let Change::Updated {
            summary: Some(summary),
            ..
        } = &self.change
        {
            output.push_str("\n    ");
            output.push_str(summary);
        }

        output
    }
}

fn snapshot<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
