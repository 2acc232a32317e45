//! BRSR Storage Layer
//!
//! SQLite-backed key/value settings. Tabs and history are never persisted;
//! only preferences owned by collaborators of the shell land here.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
