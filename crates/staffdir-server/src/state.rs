//! Application state shared by all handlers.
//!
//! [`AppState`] wraps the [`Directory`] in `Arc<tokio::sync::Mutex<>>`.
//! `rusqlite::Connection` is `!Sync`, so an `RwLock` is not an option; the
//! async mutex lets handlers await the lock without blocking the runtime.
//! Each request's guard check and mutation run under one lock acquisition.

use std::sync::Arc;

use staffdir_directory::Directory;
use staffdir_storage::{SqliteStore, StorageError};

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The directory over the SQLite store (async Mutex -- non-blocking await).
    pub directory: Arc<tokio::sync::Mutex<Directory<SqliteStore>>>,
}

impl AppState {
    /// Creates a new `AppState` backed by the SQLite database at `db_path`.
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        Ok(Self::with_store(SqliteStore::new(db_path)?))
    }

    /// Creates a new `AppState` with an in-memory database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        Ok(Self::with_store(SqliteStore::in_memory()?))
    }

    fn with_store(store: SqliteStore) -> Self {
        AppState {
            directory: Arc::new(tokio::sync::Mutex::new(Directory::new(store))),
        }
    }
}
