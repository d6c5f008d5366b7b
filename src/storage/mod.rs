//! Persistence layer: the record-store abstraction, its backends, and the
//! entity repositories built on top.

pub mod json;
pub mod memory;
pub mod repositories;
pub mod traits;

pub use json::JsonConnection;
pub use memory::MemoryStore;
pub use repositories::{
    ClientRepository, MoneyEntryRepository, SettingsRepository, TodoRepository,
};
pub use traits::RecordStore;
