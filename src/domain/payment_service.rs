//! Mark-as-paid: the one cross-entity transition.
//!
//! Flipping a task to paid also records the matching income entry, and the
//! two writes must land together from the user's point of view. The store has
//! no multi-key transaction, so a failure after the first write is undone by
//! a compensating write before the error is surfaced.

use chrono::{Local, NaiveDate};
use log::{info, warn};

use crate::domain::error::DomainError;
use crate::domain::models::{
    EntryType, MoneyEntry, NewMoneyEntry, PaymentStatus, TodoPatch,
};
use crate::storage::repositories::{ClientRepository, MoneyEntryRepository, TodoRepository};

/// Category stamped on auto-created payment entries.
const PAYMENT_CATEGORY: &str = "Development";

/// Outcome of a mark-as-paid transition.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOutcome {
    pub todo_id: String,
    /// The income entry recorded for the payment, when the task carried a
    /// positive amount.
    pub entry: Option<MoneyEntry>,
}

/// Executes the paid transition across the task and money repositories.
#[derive(Clone)]
pub struct PaymentService {
    todos: TodoRepository,
    money: MoneyEntryRepository,
    clients: ClientRepository,
}

impl PaymentService {
    pub fn new(
        todos: TodoRepository,
        money: MoneyEntryRepository,
        clients: ClientRepository,
    ) -> Self {
        Self { todos, money, clients }
    }

    /// Mark the task paid, recording a linked income entry dated today.
    pub fn mark_paid(&self, todo_id: &str) -> Result<PaymentOutcome, DomainError> {
        self.mark_paid_on(todo_id, Local::now().date_naive())
    }

    /// As [`mark_paid`](Self::mark_paid), with an explicit entry date.
    pub fn mark_paid_on(
        &self,
        todo_id: &str,
        today: NaiveDate,
    ) -> Result<PaymentOutcome, DomainError> {
        let todo = self
            .todos
            .get(todo_id)?
            .ok_or_else(|| DomainError::TodoNotFound { id: todo_id.to_string() })?;

        let previous_status = todo.payment_status;
        self.todos.update(
            todo_id,
            TodoPatch {
                payment_status: Some(PaymentStatus::Paid),
                ..Default::default()
            },
        )?;

        // Only a positive billed amount produces an income entry
        let amount = match todo.amount {
            Some(amount) if amount > 0.0 => amount,
            _ => {
                info!("Task {} marked paid with no billable amount", todo_id);
                return Ok(PaymentOutcome { todo_id: todo_id.to_string(), entry: None });
            }
        };

        // The client name is appended only when it still resolves; a dangling
        // client reference leaves the bare task title.
        let description = match self.clients.get(&todo.client_id)? {
            Some(client) => format!("{} - {}", todo.title, client.name),
            None => todo.title.clone(),
        };

        let draft = NewMoneyEntry {
            entry_type: EntryType::Income,
            amount,
            category: PAYMENT_CATEGORY.to_string(),
            date: today,
            description: Some(description),
            linked_todo_id: Some(todo_id.to_string()),
        };

        let entry = match self.money.add_on(draft, today) {
            Ok(entry) => entry,
            Err(err) => {
                // Roll the status flip back so the amount is never owed twice
                warn!("Payment entry write failed for {}; rolling back status", todo_id);
                self.todos.update(
                    todo_id,
                    TodoPatch {
                        payment_status: Some(previous_status),
                        ..Default::default()
                    },
                )?;
                return Err(err.into());
            }
        };

        if let Err(err) = self.todos.update(
            todo_id,
            TodoPatch {
                linked_money_id: Some(Some(entry.id.clone())),
                ..Default::default()
            },
        ) {
            // Undo the entry rather than leave income without a paid task
            warn!("Back-link write failed for {}; removing entry {}", todo_id, entry.id);
            self.money.delete(&entry.id)?;
            self.todos.update(
                todo_id,
                TodoPatch {
                    payment_status: Some(previous_status),
                    ..Default::default()
                },
            )?;
            return Err(err.into());
        }

        info!(
            "Task {} marked paid; recorded income entry {} of {}",
            todo_id, entry.id, amount
        );
        Ok(PaymentOutcome { todo_id: todo_id.to_string(), entry: Some(entry) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ClientColor, NewClient, NewTodo};
    use crate::storage::memory::MemoryStore;
    use std::sync::Arc;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn setup() -> (PaymentService, TodoRepository, MoneyEntryRepository, ClientRepository) {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let todos = TodoRepository::new(store.clone());
        let money = MoneyEntryRepository::new(store.clone());
        let clients = ClientRepository::new(store);
        (
            PaymentService::new(todos.clone(), money.clone(), clients.clone()),
            todos,
            money,
            clients,
        )
    }

    fn billable_todo(client_id: &str, amount: Option<f64>) -> NewTodo {
        NewTodo {
            title: "Website redesign".to_string(),
            client_id: client_id.to_string(),
            completed: true,
            due_date: date("2024-03-01"),
            payment_status: PaymentStatus::Unpaid,
            amount,
        }
    }

    #[test]
    fn test_mark_paid_flips_status_and_creates_linked_entry() {
        let (service, todos, money, clients) = setup();
        let client = clients
            .add(NewClient { name: "Acme".to_string(), color: ClientColor::Blue })
            .unwrap();
        let todo = todos
            .add_on(billable_todo(&client.id, Some(500.0)), date("2024-02-01"))
            .unwrap();

        let outcome = service.mark_paid_on(&todo.id, date("2024-03-10")).unwrap();

        let updated = todos.get(&todo.id).unwrap().unwrap();
        assert_eq!(updated.payment_status, PaymentStatus::Paid);

        let entries = money.list().unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.entry_type, EntryType::Income);
        assert_eq!(entry.amount, 500.0);
        assert_eq!(entry.linked_todo_id.as_deref(), Some(todo.id.as_str()));
        assert_eq!(entry.category, "Development");
        assert_eq!(entry.date, date("2024-03-10"));
        assert_eq!(entry.description.as_deref(), Some("Website redesign - Acme"));

        // Task carries the back-link to the entry it produced
        assert_eq!(updated.linked_money_id.as_deref(), Some(entry.id.as_str()));
        assert_eq!(outcome.entry.as_ref().unwrap().id, entry.id);
    }

    #[test]
    fn test_mark_paid_without_amount_skips_entry() {
        let (service, todos, money, _) = setup();
        let todo = todos
            .add_on(billable_todo("c1", None), date("2024-02-01"))
            .unwrap();

        let outcome = service.mark_paid_on(&todo.id, date("2024-03-10")).unwrap();
        assert!(outcome.entry.is_none());
        assert!(money.list().unwrap().is_empty());
        assert_eq!(
            todos.get(&todo.id).unwrap().unwrap().payment_status,
            PaymentStatus::Paid
        );
    }

    #[test]
    fn test_mark_paid_vanished_client_uses_bare_title() {
        let (service, todos, money, _) = setup();
        let todo = todos
            .add_on(billable_todo("vanished", Some(250.0)), date("2024-02-01"))
            .unwrap();

        service.mark_paid_on(&todo.id, date("2024-03-10")).unwrap();
        let entry = &money.list().unwrap()[0];
        // No " - <client>" suffix when the client reference is dangling
        assert_eq!(entry.description.as_deref(), Some("Website redesign"));
    }

    #[test]
    fn test_mark_paid_vanished_todo_errors_without_writes() {
        let (service, _, money, _) = setup();
        let err = service.mark_paid_on("missing", date("2024-03-10")).unwrap_err();
        assert!(matches!(err, DomainError::TodoNotFound { .. }));
        assert!(money.list().unwrap().is_empty());
    }

    #[test]
    fn test_mark_paid_creates_exactly_one_entry() {
        let (service, todos, money, _) = setup();
        let todo = todos
            .add_on(billable_todo("c1", Some(500.0)), date("2024-02-01"))
            .unwrap();

        service.mark_paid_on(&todo.id, date("2024-03-10")).unwrap();
        let linked: Vec<MoneyEntry> = money
            .list()
            .unwrap()
            .into_iter()
            .filter(|e| e.linked_todo_id.as_deref() == Some(todo.id.as_str()))
            .collect();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].amount, 500.0);
    }
}
