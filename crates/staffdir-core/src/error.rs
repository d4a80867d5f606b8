//! Error taxonomy shared by every directory operation.
//!
//! Uses `thiserror` for structured, matchable variants. Adapters map each
//! variant to their own surface: an HTTP status, or a console message.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Department,
    Role,
    Employee,
    Manager,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Department => "Department",
            EntityKind::Role => "Role",
            EntityKind::Employee => "Employee",
            EntityKind::Manager => "Manager",
        };
        f.write_str(name)
    }
}

/// Why a delete was refused: dependent records still reference the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// At least one role belongs to the department.
    RolesExist,
    /// At least one employee holds a role in the department.
    EmployeesExistViaRoles,
    /// At least one employee holds the role.
    EmployeesExist,
    /// At least one employee reports to the employee.
    ManagesOtherEmployees,
}

impl BlockReason {
    /// Message shown to users and API clients.
    pub fn message(&self) -> &'static str {
        match self {
            BlockReason::RolesExist => "Cannot delete department. Roles are associated with it.",
            BlockReason::EmployeesExistViaRoles => {
                "Cannot delete department. Employees are associated with its roles."
            }
            BlockReason::EmployeesExist => "Cannot delete role. Employees are associated with it.",
            BlockReason::ManagesOtherEmployees => {
                "Cannot delete employee. They manage other employees."
            }
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Errors produced by directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Input was empty or otherwise invalid. Checked before any query.
    #[error("{0}")]
    Validation(String),

    /// A referenced row does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: EntityKind, key: String },

    /// Dependent records block the mutation.
    #[error("{0}")]
    Integrity(BlockReason),

    /// The store failed. The message is for logs, never for clients.
    #[error("query failed: {0}")]
    Query(String),
}

impl DirectoryError {
    pub fn not_found(entity: EntityKind, key: impl fmt::Display) -> Self {
        DirectoryError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}
