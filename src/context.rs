//! Application context.
//!
//! The repositories are constructed once over a single record store and
//! passed by reference to services and the presentation layer; there are no
//! hidden global singletons.

use std::sync::Arc;

use crate::storage::repositories::{
    ClientRepository, MoneyEntryRepository, SettingsRepository, TodoRepository,
};
use crate::storage::traits::RecordStore;

/// Owns the repository instances for one application process.
#[derive(Clone)]
pub struct AppContext {
    pub clients: ClientRepository,
    pub todos: TodoRepository,
    pub money: MoneyEntryRepository,
    pub settings: SettingsRepository,
}

impl AppContext {
    /// Build the context over any record store backend.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            clients: ClientRepository::new(store.clone()),
            todos: TodoRepository::new(store.clone()),
            money: MoneyEntryRepository::new(store.clone()),
            settings: SettingsRepository::new(store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    #[test]
    fn test_repositories_share_one_store() {
        let ctx = AppContext::new(Arc::new(MemoryStore::new()));
        // A write through one handle is visible through a clone: no caching
        // layer sits between the repositories and the store.
        let cloned = ctx.clone();
        let client = ctx
            .clients
            .add(crate::domain::models::NewClient {
                name: "Acme".to_string(),
                color: crate::domain::models::ClientColor::Blue,
            })
            .unwrap();
        assert!(cloned.clients.get(&client.id).unwrap().is_some());
    }
}
