use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single income or expense transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Transaction amount; semantically positive for both directions.
    pub amount: f64,
    pub category: String,
    /// Date the transaction applies to (calendar date, no time-of-day).
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Id of the task this entry was created from, when it was created by
    /// marking a task paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_todo_id: Option<String>,
    /// Date the entry was recorded (stamped by the repository).
    pub created_at: NaiveDate,
}

/// Direction of a money entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    /// Human-readable label used in exports and reports.
    pub fn label(&self) -> &'static str {
        match self {
            EntryType::Income => "Income",
            EntryType::Expense => "Expense",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Fields supplied when recording an entry; id and creation date are assigned
/// by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMoneyEntry {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_todo_id: Option<String>,
}

/// Partial update applied to an existing entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoneyEntryPatch {
    pub entry_type: Option<EntryType>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub description: Option<Option<String>>,
    pub linked_todo_id: Option<Option<String>>,
}

impl MoneyEntryPatch {
    pub(crate) fn apply(self, entry: &mut MoneyEntry) {
        if let Some(entry_type) = self.entry_type {
            entry.entry_type = entry_type;
        }
        if let Some(amount) = self.amount {
            entry.amount = amount;
        }
        if let Some(category) = self.category {
            entry.category = category;
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(description) = self.description {
            entry.description = description;
        }
        if let Some(linked_todo_id) = self.linked_todo_id {
            entry.linked_todo_id = linked_todo_id;
        }
    }
}
