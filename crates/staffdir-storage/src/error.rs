//! Storage error types for staffdir-storage.
//!
//! [`StorageError`] separates constraint failures the directory layer can
//! explain to a user (duplicates, foreign-key violations) from everything
//! else the database may report.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Any SQLite failure not classified below.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Applying schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// A UNIQUE constraint rejected the write.
    #[error("duplicate value in {table}: {value}")]
    Duplicate { table: &'static str, value: String },

    /// A FOREIGN KEY constraint rejected the write: either the referenced
    /// row is missing, or a delete target is still referenced.
    #[error("integrity error: {reason}")]
    IntegrityError { reason: String },
}

/// Reclassifies constraint failures reported by SQLite.
///
/// `table` and `value` describe the write for the duplicate case. A RESTRICT
/// action refusing a delete reports `SQLITE_CONSTRAINT_TRIGGER` rather than
/// `SQLITE_CONSTRAINT_FOREIGNKEY`; both are foreign-key failures here.
pub(crate) fn classify(err: rusqlite::Error, table: &'static str, value: &str) -> StorageError {
    if let rusqlite::Error::SqliteFailure(ref failure, ref message) = err {
        if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
            return StorageError::Duplicate {
                table,
                value: value.to_string(),
            };
        }
        if is_foreign_key_failure(failure, message.as_deref()) {
            return StorageError::IntegrityError {
                reason: message
                    .clone()
                    .unwrap_or_else(|| FOREIGN_KEY_FAILED.to_string()),
            };
        }
    }
    StorageError::Sqlite(err)
}

const FOREIGN_KEY_FAILED: &str = "FOREIGN KEY constraint failed";

fn is_foreign_key_failure(failure: &rusqlite::ffi::Error, message: Option<&str>) -> bool {
    match failure.extended_code {
        rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY | rusqlite::ffi::SQLITE_CONSTRAINT_TRIGGER => true,
        _ => {
            failure.code == rusqlite::ErrorCode::ConstraintViolation
                && message.is_some_and(|m| m.contains(FOREIGN_KEY_FAILED))
        }
    }
}

impl From<StorageError> for staffdir_core::DirectoryError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate { table, value } => staffdir_core::DirectoryError::Validation(
                format!("{} '{}' already exists", singular(table), value),
            ),
            other => staffdir_core::DirectoryError::Query(other.to_string()),
        }
    }
}

fn singular(table: &str) -> &str {
    match table {
        "departments" => "department",
        "roles" => "role",
        "employees" => "employee",
        other => other,
    }
}
