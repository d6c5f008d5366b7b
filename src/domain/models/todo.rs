use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A billable or non-billable task with a due date and completion/payment state.
///
/// Field names serialize in camelCase to stay compatible with the persisted
/// JSON layout and the backup file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    /// Id of the client this task belongs to.
    pub client_id: String,
    pub completed: bool,
    /// Due date (calendar date, no time-of-day).
    pub due_date: NaiveDate,
    pub payment_status: PaymentStatus,
    /// Billed amount; semantically required when `payment_status` is billable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Id of the income entry created when this task was marked paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_money_id: Option<String>,
    /// Date the task was created (stamped by the repository).
    pub created_at: NaiveDate,
    /// Date the task was last marked complete, if it is complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDate>,
}

/// Payment lifecycle of a task.
///
/// Transitions normally run no-payment → unpaid → paid, but no transition is
/// rejected; the enum only drives which optional fields are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "unpaid")]
    Unpaid,
    #[serde(rename = "paid")]
    Paid,
    #[serde(rename = "no-payment")]
    NoPayment,
}

impl PaymentStatus {
    /// Whether this status implies a billed amount.
    pub fn is_billable(&self) -> bool {
        !matches!(self, PaymentStatus::NoPayment)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
            PaymentStatus::NoPayment => "no-payment",
        };
        write!(f, "{}", label)
    }
}

impl Todo {
    /// Date a completed task counts towards: the completion date when it was
    /// recorded, otherwise the due date.
    pub fn completion_date(&self) -> NaiveDate {
        self.completed_at.unwrap_or(self.due_date)
    }

    /// Billed amount, treating an absent amount as zero for aggregation.
    pub fn amount_or_zero(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }
}

/// Fields supplied when creating a task; id and creation date are assigned by
/// the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub title: String,
    pub client_id: String,
    pub completed: bool,
    pub due_date: NaiveDate,
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// Partial update applied to an existing task.
///
/// `None` means "leave unchanged"; the nested options on clearable fields
/// distinguish "set" from "clear".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub client_id: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<NaiveDate>,
    pub payment_status: Option<PaymentStatus>,
    pub amount: Option<Option<f64>>,
    pub linked_money_id: Option<Option<String>>,
    pub completed_at: Option<Option<NaiveDate>>,
}

impl TodoPatch {
    pub(crate) fn apply(self, todo: &mut Todo) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(client_id) = self.client_id {
            todo.client_id = client_id;
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        if let Some(due_date) = self.due_date {
            todo.due_date = due_date;
        }
        if let Some(payment_status) = self.payment_status {
            todo.payment_status = payment_status;
        }
        if let Some(amount) = self.amount {
            todo.amount = amount;
        }
        if let Some(linked_money_id) = self.linked_money_id {
            todo.linked_money_id = linked_money_id;
        }
        if let Some(completed_at) = self.completed_at {
            todo.completed_at = completed_at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_payment_status_serializes_with_hyphen() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::NoPayment).unwrap(),
            "\"no-payment\""
        );
        let parsed: PaymentStatus = serde_json::from_str("\"no-payment\"").unwrap();
        assert_eq!(parsed, PaymentStatus::NoPayment);
    }

    #[test]
    fn test_todo_round_trips_camel_case() {
        let todo = Todo {
            id: "t1".to_string(),
            title: "Landing page".to_string(),
            client_id: "c1".to_string(),
            completed: false,
            due_date: date("2024-03-15"),
            payment_status: PaymentStatus::Unpaid,
            amount: Some(500.0),
            linked_money_id: None,
            created_at: date("2024-03-01"),
            completed_at: None,
        };

        let json = serde_json::to_string(&todo).unwrap();
        assert!(json.contains("\"clientId\":\"c1\""));
        assert!(json.contains("\"dueDate\":\"2024-03-15\""));
        assert!(!json.contains("linkedMoneyId"));

        let parsed: Todo = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, todo);
    }

    #[test]
    fn test_completion_date_prefers_completed_at() {
        let mut todo = Todo {
            id: "t1".to_string(),
            title: "x".to_string(),
            client_id: "c1".to_string(),
            completed: true,
            due_date: date("2024-03-15"),
            payment_status: PaymentStatus::NoPayment,
            amount: None,
            linked_money_id: None,
            created_at: date("2024-03-01"),
            completed_at: Some(date("2024-03-17")),
        };
        assert_eq!(todo.completion_date(), date("2024-03-17"));

        todo.completed_at = None;
        assert_eq!(todo.completion_date(), date("2024-03-15"));
    }

    #[test]
    fn test_patch_can_clear_optional_fields() {
        let mut todo = Todo {
            id: "t1".to_string(),
            title: "x".to_string(),
            client_id: "c1".to_string(),
            completed: true,
            due_date: date("2024-03-15"),
            payment_status: PaymentStatus::Unpaid,
            amount: Some(500.0),
            linked_money_id: Some("m1".to_string()),
            created_at: date("2024-03-01"),
            completed_at: Some(date("2024-03-16")),
        };

        let patch = TodoPatch {
            amount: Some(None),
            completed_at: Some(None),
            ..Default::default()
        };
        patch.apply(&mut todo);

        assert_eq!(todo.amount, None);
        assert_eq!(todo.completed_at, None);
        assert_eq!(todo.linked_money_id, Some("m1".to_string()));
    }
}
