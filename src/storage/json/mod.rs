pub mod connection;

pub use connection::JsonConnection;
