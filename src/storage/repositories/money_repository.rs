use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::{MoneyEntry, MoneyEntryPatch, NewMoneyEntry};
use crate::storage::traits::RecordStore;

use super::{load_collection, save_collection, MONEY_KEY};

/// CRUD façade over the persisted income/expense collection.
#[derive(Clone)]
pub struct MoneyEntryRepository {
    store: Arc<dyn RecordStore>,
}

impl MoneyEntryRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// All entries in insertion order.
    pub fn list(&self) -> Result<Vec<MoneyEntry>> {
        load_collection(self.store.as_ref(), MONEY_KEY)
    }

    pub fn get(&self, id: &str) -> Result<Option<MoneyEntry>> {
        Ok(self.list()?.into_iter().find(|e| e.id == id))
    }

    /// Record an entry, assigning a fresh id and stamping today's date as the
    /// creation date.
    pub fn add(&self, new_entry: NewMoneyEntry) -> Result<MoneyEntry> {
        self.add_on(new_entry, Local::now().date_naive())
    }

    /// As [`add`](Self::add), with an explicit creation date.
    pub fn add_on(&self, new_entry: NewMoneyEntry, created_at: NaiveDate) -> Result<MoneyEntry> {
        let entry = MoneyEntry {
            id: Uuid::new_v4().to_string(),
            entry_type: new_entry.entry_type,
            amount: new_entry.amount,
            category: new_entry.category,
            date: new_entry.date,
            description: new_entry.description,
            linked_todo_id: new_entry.linked_todo_id,
            created_at,
        };

        let mut entries = self.list()?;
        entries.push(entry.clone());
        save_collection(self.store.as_ref(), MONEY_KEY, &entries)?;

        info!(
            "Recorded {} entry of {} in '{}' ({})",
            entry.entry_type, entry.amount, entry.category, entry.id
        );
        Ok(entry)
    }

    /// Merge `patch` into the entry with `id`; no-op when the id is unknown.
    pub fn update(&self, id: &str, patch: MoneyEntryPatch) -> Result<()> {
        let mut entries = self.list()?;
        match entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => patch.apply(entry),
            None => return Ok(()),
        }
        save_collection(self.store.as_ref(), MONEY_KEY, &entries)
    }

    /// Remove the entry with `id`; no-op when the id is unknown.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut entries = self.list()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(());
        }
        save_collection(self.store.as_ref(), MONEY_KEY, &entries)
    }

    /// Entries dated on the given day.
    pub fn on_date(&self, date: NaiveDate) -> Result<Vec<MoneyEntry>> {
        Ok(self.list()?.into_iter().filter(|e| e.date == date).collect())
    }

    /// Entries dated within the given calendar month.
    pub fn in_month(&self, year: i32, month: u32) -> Result<Vec<MoneyEntry>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|e| e.date.year() == year && e.date.month() == month)
            .collect())
    }

    /// Replace the whole collection (backup import).
    pub fn replace_all(&self, entries: &[MoneyEntry]) -> Result<()> {
        save_collection(self.store.as_ref(), MONEY_KEY, entries)
    }
}
