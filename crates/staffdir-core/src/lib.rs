//! Data model for the staff directory: departments, roles and employees.
//!
//! This crate has no storage or I/O. It defines the record types every
//! other crate passes around, the validated inputs for inserts, and the
//! [`DirectoryError`] taxonomy.

pub mod error;
pub mod id;
pub mod model;

// Re-export commonly used types
pub use error::{BlockReason, DirectoryError, EntityKind};
pub use id::{DepartmentId, EmployeeId, RoleId};
pub use model::{
    parse_salary, Department, DepartmentRef, Employee, EmployeeListing, NewDepartment,
    NewEmployee, NewRole, Role, RoleListing,
};
