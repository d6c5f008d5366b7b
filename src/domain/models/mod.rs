//! Domain records persisted by the repositories and consumed by the
//! derived-view services.

pub mod client;
pub mod money_entry;
pub mod settings;
pub mod todo;

pub use client::{Client, ClientColor, ClientPatch, NewClient};
pub use money_entry::{EntryType, MoneyEntry, MoneyEntryPatch, NewMoneyEntry};
pub use settings::{currency_catalog, Currency, Settings};
pub use todo::{NewTodo, PaymentStatus, Todo, TodoPatch};
