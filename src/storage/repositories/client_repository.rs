use anyhow::Result;
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::{Client, ClientPatch, NewClient};
use crate::storage::traits::RecordStore;

use super::{load_collection, save_collection, CLIENTS_KEY};

/// CRUD façade over the persisted client collection.
#[derive(Clone)]
pub struct ClientRepository {
    store: Arc<dyn RecordStore>,
}

impl ClientRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// All clients in insertion order.
    pub fn list(&self) -> Result<Vec<Client>> {
        load_collection(self.store.as_ref(), CLIENTS_KEY)
    }

    pub fn get(&self, id: &str) -> Result<Option<Client>> {
        Ok(self.list()?.into_iter().find(|c| c.id == id))
    }

    /// Create a client, assigning it a fresh id.
    pub fn add(&self, new_client: NewClient) -> Result<Client> {
        let client = Client {
            id: Uuid::new_v4().to_string(),
            name: new_client.name,
            color: new_client.color,
        };

        let mut clients = self.list()?;
        clients.push(client.clone());
        save_collection(self.store.as_ref(), CLIENTS_KEY, &clients)?;

        info!("Created client {} ({})", client.name, client.id);
        Ok(client)
    }

    /// Merge `patch` into the client with `id`; no-op when the id is unknown.
    pub fn update(&self, id: &str, patch: ClientPatch) -> Result<()> {
        let mut clients = self.list()?;
        match clients.iter_mut().find(|c| c.id == id) {
            Some(client) => patch.apply(client),
            None => return Ok(()),
        }
        save_collection(self.store.as_ref(), CLIENTS_KEY, &clients)
    }

    /// Remove the client with `id`; no-op when the id is unknown.
    ///
    /// Referential integrity against tasks is enforced one layer up, in
    /// [`ClientService`](crate::domain::client_service::ClientService).
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut clients = self.list()?;
        let before = clients.len();
        clients.retain(|c| c.id != id);
        if clients.len() == before {
            return Ok(());
        }
        save_collection(self.store.as_ref(), CLIENTS_KEY, &clients)
    }

    /// Replace the whole collection (backup import).
    pub fn replace_all(&self, clients: &[Client]) -> Result<()> {
        save_collection(self.store.as_ref(), CLIENTS_KEY, clients)
    }
}
