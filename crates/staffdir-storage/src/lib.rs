//! Storage layer for the staff directory.
//!
//! Provides the [`DirectoryStore`] trait defining the persistence contract,
//! plus [`SqliteStore`] and [`InMemoryStore`] as first-class backends.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`traits`]: DirectoryStore trait definition
//! - [`memory`]: InMemoryStore implementation
//! - [`schema`]: SQL migrations and connection setup
//! - [`sqlite`]: SqliteStore implementation

pub mod error;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod traits;

#[cfg(test)]
mod contract;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
pub use traits::DirectoryStore;
