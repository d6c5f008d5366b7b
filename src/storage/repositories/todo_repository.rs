use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::{NewTodo, Todo, TodoPatch};
use crate::storage::traits::RecordStore;

use super::{load_collection, save_collection, TODOS_KEY};

/// CRUD façade over the persisted task collection.
#[derive(Clone)]
pub struct TodoRepository {
    store: Arc<dyn RecordStore>,
}

impl TodoRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// All tasks in insertion order.
    pub fn list(&self) -> Result<Vec<Todo>> {
        load_collection(self.store.as_ref(), TODOS_KEY)
    }

    pub fn get(&self, id: &str) -> Result<Option<Todo>> {
        Ok(self.list()?.into_iter().find(|t| t.id == id))
    }

    /// Create a task, assigning a fresh id and stamping today's date as the
    /// creation date.
    pub fn add(&self, new_todo: NewTodo) -> Result<Todo> {
        self.add_on(new_todo, Local::now().date_naive())
    }

    /// As [`add`](Self::add), with an explicit creation date.
    pub fn add_on(&self, new_todo: NewTodo, created_at: NaiveDate) -> Result<Todo> {
        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            title: new_todo.title,
            client_id: new_todo.client_id,
            completed: new_todo.completed,
            due_date: new_todo.due_date,
            payment_status: new_todo.payment_status,
            amount: new_todo.amount,
            linked_money_id: None,
            created_at,
            completed_at: None,
        };

        let mut todos = self.list()?;
        todos.push(todo.clone());
        save_collection(self.store.as_ref(), TODOS_KEY, &todos)?;

        info!("Created task '{}' ({})", todo.title, todo.id);
        Ok(todo)
    }

    /// Merge `patch` into the task with `id`; no-op when the id is unknown.
    pub fn update(&self, id: &str, patch: TodoPatch) -> Result<()> {
        let mut todos = self.list()?;
        match todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => patch.apply(todo),
            None => return Ok(()),
        }
        save_collection(self.store.as_ref(), TODOS_KEY, &todos)
    }

    /// Remove the task with `id`; no-op when the id is unknown. Nothing
    /// cascades: linked money entries keep their dangling reference and are
    /// rendered with a placeholder.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut todos = self.list()?;
        let before = todos.len();
        todos.retain(|t| t.id != id);
        if todos.len() == before {
            return Ok(());
        }
        save_collection(self.store.as_ref(), TODOS_KEY, &todos)
    }

    /// Flip the completed flag, stamping the completion date when the task
    /// becomes complete and clearing it when the task is reopened.
    pub fn toggle(&self, id: &str) -> Result<()> {
        self.toggle_on(id, Local::now().date_naive())
    }

    /// As [`toggle`](Self::toggle), with an explicit completion date.
    pub fn toggle_on(&self, id: &str, today: NaiveDate) -> Result<()> {
        let mut todos = self.list()?;
        match todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.completed = !todo.completed;
                todo.completed_at = if todo.completed { Some(today) } else { None };
            }
            None => return Ok(()),
        }
        save_collection(self.store.as_ref(), TODOS_KEY, &todos)
    }

    /// Tasks due on the given date.
    pub fn due_on(&self, date: NaiveDate) -> Result<Vec<Todo>> {
        Ok(self.list()?.into_iter().filter(|t| t.due_date == date).collect())
    }

    /// Completed tasks still awaiting payment.
    pub fn unpaid_completed(&self) -> Result<Vec<Todo>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|t| t.completed && t.payment_status == crate::domain::models::PaymentStatus::Unpaid)
            .collect())
    }

    /// Replace the whole collection (backup import).
    pub fn replace_all(&self, todos: &[Todo]) -> Result<()> {
        save_collection(self.store.as_ref(), TODOS_KEY, todos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::PaymentStatus;
    use crate::storage::memory::MemoryStore;

    fn setup() -> TodoRepository {
        TodoRepository::new(Arc::new(MemoryStore::new()))
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn new_todo(title: &str, due: &str) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            client_id: "c1".to_string(),
            completed: false,
            due_date: date(due),
            payment_status: PaymentStatus::Unpaid,
            amount: Some(100.0),
        }
    }

    #[test]
    fn test_add_stamps_id_and_creation_date() {
        let repo = setup();
        let todo = repo
            .add_on(new_todo("Logo", "2024-03-20"), date("2024-03-01"))
            .unwrap();
        assert!(!todo.id.is_empty());
        assert_eq!(todo.created_at, date("2024-03-01"));
        assert_eq!(todo.completed_at, None);
        assert_eq!(todo.linked_money_id, None);
    }

    #[test]
    fn test_toggle_stamps_and_clears_completion_date() {
        let repo = setup();
        let todo = repo
            .add_on(new_todo("Logo", "2024-03-20"), date("2024-03-01"))
            .unwrap();

        repo.toggle_on(&todo.id, date("2024-03-21")).unwrap();
        let completed = repo.get(&todo.id).unwrap().unwrap();
        assert!(completed.completed);
        assert_eq!(completed.completed_at, Some(date("2024-03-21")));

        repo.toggle_on(&todo.id, date("2024-03-22")).unwrap();
        let reopened = repo.get(&todo.id).unwrap().unwrap();
        assert!(!reopened.completed);
        assert_eq!(reopened.completed_at, None);
    }

    #[test]
    fn test_due_on_filters_by_exact_date() {
        let repo = setup();
        repo.add_on(new_todo("A", "2024-03-20"), date("2024-03-01")).unwrap();
        repo.add_on(new_todo("B", "2024-03-21"), date("2024-03-01")).unwrap();
        repo.add_on(new_todo("C", "2024-03-20"), date("2024-03-01")).unwrap();

        let due = repo.due_on(date("2024-03-20")).unwrap();
        let titles: Vec<String> = due.into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn test_unpaid_completed_requires_both_flags() {
        let repo = setup();
        let unpaid_open = repo
            .add_on(new_todo("open", "2024-03-20"), date("2024-03-01"))
            .unwrap();
        let unpaid_done = repo
            .add_on(new_todo("done", "2024-03-20"), date("2024-03-01"))
            .unwrap();
        repo.toggle_on(&unpaid_done.id, date("2024-03-21")).unwrap();

        let pending = repo.unpaid_completed().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, unpaid_done.id);
        assert_ne!(pending[0].id, unpaid_open.id);
    }

    #[test]
    fn test_update_and_delete_unknown_ids_are_no_ops() {
        let repo = setup();
        repo.update("missing", TodoPatch::default()).unwrap();
        repo.delete("missing").unwrap();
        repo.toggle_on("missing", date("2024-03-21")).unwrap();
        assert!(repo.list().unwrap().is_empty());
    }
}
