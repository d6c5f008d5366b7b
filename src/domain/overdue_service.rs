//! Overdue payment detection.
//!
//! A task is overdue when it has been completed, is still unpaid, and its due
//! date has passed. Overdue status is never persisted; it is recomputed
//! against the caller's "today" on every evaluation.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::models::{PaymentStatus, Todo};

/// Display tier for an overdue task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverdueSeverity {
    /// Fewer than 7 days behind.
    Info,
    /// 7 or more days behind.
    Warning,
    /// 14 or more days behind.
    Severe,
}

impl OverdueSeverity {
    /// Tier for a number of days overdue; boundaries are inclusive.
    pub fn for_days(days: i64) -> Self {
        if days >= 14 {
            OverdueSeverity::Severe
        } else if days >= 7 {
            OverdueSeverity::Warning
        } else {
            OverdueSeverity::Info
        }
    }
}

/// An overdue task together with how far behind it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverdueTask {
    pub todo: Todo,
    pub days_overdue: i64,
    pub severity: OverdueSeverity,
}

/// Everything the overdue banner and unpaid-tasks screen need.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct OverdueReport {
    /// Overdue tasks, most overdue first.
    pub tasks: Vec<OverdueTask>,
    /// Sum of the billed amounts still outstanding.
    pub total_amount: f64,
}

/// Stateless overdue computations.
#[derive(Clone, Default)]
pub struct OverdueService;

impl OverdueService {
    pub fn new() -> Self {
        Self
    }

    /// The overdue predicate: completed, unpaid, and past due.
    pub fn is_overdue(&self, todo: &Todo, today: NaiveDate) -> bool {
        todo.completed && todo.payment_status == PaymentStatus::Unpaid && todo.due_date < today
    }

    /// Whole days the payment has been waiting, measured from the completion
    /// date when recorded, otherwise from the creation date.
    pub fn days_overdue(&self, todo: &Todo, today: NaiveDate) -> i64 {
        let reference = todo.completed_at.unwrap_or(todo.created_at);
        (today - reference).num_days()
    }

    /// Evaluate a single task; `None` when it is not overdue.
    pub fn evaluate(&self, todo: &Todo, today: NaiveDate) -> Option<OverdueTask> {
        if !self.is_overdue(todo, today) {
            return None;
        }
        let days_overdue = self.days_overdue(todo, today);
        Some(OverdueTask {
            todo: todo.clone(),
            days_overdue,
            severity: OverdueSeverity::for_days(days_overdue),
        })
    }

    /// Collect every overdue task, most overdue first, with the outstanding
    /// total. Empty input yields an empty report.
    pub fn report(&self, todos: &[Todo], today: NaiveDate) -> OverdueReport {
        let mut tasks: Vec<OverdueTask> = todos
            .iter()
            .filter_map(|t| self.evaluate(t, today))
            .collect();
        tasks.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue));

        let total_amount = tasks.iter().map(|t| t.todo.amount_or_zero()).sum();
        OverdueReport { tasks, total_amount }
    }
}
