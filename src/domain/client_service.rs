//! Client statistics and guarded client mutations.
//!
//! The statistics feed the clients list and the client detail screen: linked
//! income, task counts, unpaid backlog, overdue state, and a six-month income
//! trend. Deletion is the one client mutation with a business rule attached:
//! a client that still has tasks cannot be removed.

use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::dates::{month_key, months_back};
use crate::domain::error::DomainError;
use crate::domain::models::{Client, EntryType, MoneyEntry, PaymentStatus, Todo};
use crate::domain::overdue_service::OverdueService;
use crate::storage::repositories::{ClientRepository, TodoRepository};

/// Name shown when a referenced client no longer exists.
pub const UNKNOWN_CLIENT: &str = "Unknown";

/// Aggregated figures for one client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientStats {
    pub client: Client,
    /// Income from entries linked to this client's tasks.
    pub total_income: f64,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Completed tasks still awaiting payment.
    pub unpaid_tasks: usize,
    pub overdue_tasks: usize,
    pub overdue_amount: f64,
    /// Trailing six months of linked income, oldest first, keyed `YYYY-MM`.
    pub income_trend: Vec<MonthIncome>,
}

/// One month of a client's income trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthIncome {
    /// `YYYY-MM` bucket key.
    pub month: String,
    pub income: f64,
}

/// Filter applied to a client's task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Completed,
    Pending,
    Unpaid,
}

/// Sort order applied to a client's task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSort {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

/// Client statistics and guarded mutations.
#[derive(Clone)]
pub struct ClientService {
    clients: ClientRepository,
    todos: TodoRepository,
    overdue: OverdueService,
}

impl ClientService {
    pub fn new(clients: ClientRepository, todos: TodoRepository) -> Self {
        Self {
            clients,
            todos,
            overdue: OverdueService::new(),
        }
    }

    /// Statistics for every stored client.
    pub fn all_stats(
        &self,
        todos: &[Todo],
        entries: &[MoneyEntry],
        today: NaiveDate,
    ) -> Result<Vec<ClientStats>, DomainError> {
        let clients = self.clients.list()?;
        Ok(clients
            .into_iter()
            .map(|client| self.stats_for(client, todos, entries, today))
            .collect())
    }

    /// Statistics for one client, or `None` when the id is unknown.
    pub fn stats(
        &self,
        client_id: &str,
        todos: &[Todo],
        entries: &[MoneyEntry],
        today: NaiveDate,
    ) -> Result<Option<ClientStats>, DomainError> {
        Ok(self
            .clients
            .get(client_id)?
            .map(|client| self.stats_for(client, todos, entries, today)))
    }

    fn stats_for(
        &self,
        client: Client,
        todos: &[Todo],
        entries: &[MoneyEntry],
        today: NaiveDate,
    ) -> ClientStats {
        let client_todos: Vec<&Todo> =
            todos.iter().filter(|t| t.client_id == client.id).collect();

        let todo_by_id: HashMap<&str, &Todo> =
            todos.iter().map(|t| (t.id.as_str(), t)).collect();

        // Income reaches a client through the task its entry is linked to
        let linked_income: Vec<&MoneyEntry> = entries
            .iter()
            .filter(|e| {
                e.entry_type == EntryType::Income
                    && e.linked_todo_id
                        .as_deref()
                        .and_then(|id| todo_by_id.get(id))
                        .is_some_and(|t| t.client_id == client.id)
            })
            .collect();

        let completed_tasks = client_todos.iter().filter(|t| t.completed).count();
        let unpaid: Vec<&&Todo> = client_todos
            .iter()
            .filter(|t| t.completed && t.payment_status == PaymentStatus::Unpaid)
            .collect();

        let overdue: Vec<&&Todo> = client_todos
            .iter()
            .filter(|t| self.overdue.is_overdue(t, today))
            .collect();

        ClientStats {
            total_income: linked_income.iter().map(|e| e.amount).sum(),
            total_tasks: client_todos.len(),
            completed_tasks,
            unpaid_tasks: unpaid.len(),
            overdue_tasks: overdue.len(),
            overdue_amount: overdue.iter().map(|t| t.amount_or_zero()).sum(),
            income_trend: income_trend(&linked_income, today),
            client,
        }
    }

    /// A client's tasks, filtered and sorted for the detail view.
    pub fn filtered_tasks(
        &self,
        client_id: &str,
        todos: &[Todo],
        filter: TaskFilter,
        sort: TaskSort,
    ) -> Vec<Todo> {
        let mut tasks: Vec<Todo> = todos
            .iter()
            .filter(|t| t.client_id == client_id)
            .filter(|t| match filter {
                TaskFilter::All => true,
                TaskFilter::Completed => t.completed,
                TaskFilter::Pending => !t.completed,
                TaskFilter::Unpaid => t.completed && t.payment_status == PaymentStatus::Unpaid,
            })
            .cloned()
            .collect();

        match sort {
            TaskSort::DateDesc => tasks.sort_by(|a, b| b.due_date.cmp(&a.due_date)),
            TaskSort::DateAsc => tasks.sort_by(|a, b| a.due_date.cmp(&b.due_date)),
            TaskSort::AmountDesc => tasks.sort_by(|a, b| {
                b.amount_or_zero()
                    .partial_cmp(&a.amount_or_zero())
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            TaskSort::AmountAsc => tasks.sort_by(|a, b| {
                a.amount_or_zero()
                    .partial_cmp(&b.amount_or_zero())
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
        }
        tasks
    }

    /// Resolve a client name, falling back to a placeholder for dangling
    /// references.
    pub fn display_name(&self, client_id: &str) -> Result<String, DomainError> {
        Ok(self
            .clients
            .get(client_id)?
            .map(|c| c.name)
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string()))
    }

    /// Delete a client, rejecting the deletion while any task references it.
    pub fn delete_client(&self, client_id: &str) -> Result<(), DomainError> {
        let task_count = self
            .todos
            .list()?
            .iter()
            .filter(|t| t.client_id == client_id)
            .count();
        if task_count > 0 {
            warn!(
                "Refusing to delete client {}: {} referencing task(s)",
                client_id, task_count
            );
            return Err(DomainError::ClientHasTasks { task_count });
        }

        info!("Deleting client {}", client_id);
        self.clients.delete(client_id)?;
        Ok(())
    }
}

/// The trailing six calendar months of income, oldest first.
fn income_trend(linked_income: &[&MoneyEntry], today: NaiveDate) -> Vec<MonthIncome> {
    use chrono::Datelike;

    (0..6)
        .rev()
        .map(|offset| {
            let (year, month) = months_back(today.year(), today.month(), offset);
            let key = format!("{:04}-{:02}", year, month);
            let income = linked_income
                .iter()
                .filter(|e| month_key(e.date) == key)
                .map(|e| e.amount)
                .sum();
            MonthIncome { month: key, income }
        })
        .collect()
}
