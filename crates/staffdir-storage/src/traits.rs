//! The [`DirectoryStore`] trait defining the storage contract.
//!
//! Each method maps to a single parameterized statement (or one read for the
//! joined listings). Nothing here decides whether a mutation is allowed; that
//! is the integrity guard's job one layer up. Backends only report what the
//! database itself enforces.
//!
//! All backends (InMemoryStore, SqliteStore) implement this trait, so the
//! directory layer can be tested without touching disk.

use staffdir_core::{
    Department, DepartmentId, Employee, EmployeeId, EmployeeListing, NewDepartment, NewEmployee,
    Role, RoleId, RoleListing,
};

use crate::error::StorageError;

/// The storage contract for directory records.
///
/// The trait is synchronous. Callers that share a store across async tasks
/// wrap it in a mutex.
pub trait DirectoryStore {
    // -------------------------------------------------------------------
    // Listings
    // -------------------------------------------------------------------

    /// All departments, ordered by id.
    fn list_departments(&self) -> Result<Vec<Department>, StorageError>;

    /// All roles with their department name, ordered by id.
    fn list_roles(&self) -> Result<Vec<RoleListing>, StorageError>;

    /// All employees with role, department and manager details, ordered by id.
    fn list_employees(&self) -> Result<Vec<EmployeeListing>, StorageError>;

    // -------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------

    fn get_department(&self, id: DepartmentId) -> Result<Option<Department>, StorageError>;

    /// Exact, case-sensitive match on the department name.
    fn find_department_by_name(&self, name: &str) -> Result<Option<Department>, StorageError>;

    fn get_role(&self, id: RoleId) -> Result<Option<Role>, StorageError>;

    fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>, StorageError>;

    // -------------------------------------------------------------------
    // Inserts
    // -------------------------------------------------------------------

    fn insert_department(&mut self, new: &NewDepartment) -> Result<Department, StorageError>;

    /// Inserts a role under an already-resolved department.
    fn insert_role(
        &mut self,
        title: &str,
        salary: f64,
        department_id: DepartmentId,
    ) -> Result<Role, StorageError>;

    fn insert_employee(&mut self, new: &NewEmployee) -> Result<Employee, StorageError>;

    // -------------------------------------------------------------------
    // Updates (`None` when no row matched)
    // -------------------------------------------------------------------

    fn update_employee_role(
        &mut self,
        id: EmployeeId,
        role_id: RoleId,
    ) -> Result<Option<Employee>, StorageError>;

    fn update_employee_manager(
        &mut self,
        id: EmployeeId,
        manager_id: Option<EmployeeId>,
    ) -> Result<Option<Employee>, StorageError>;

    // -------------------------------------------------------------------
    // Dependent counts (read-only, used by the integrity guard)
    // -------------------------------------------------------------------

    /// Roles whose `department_id` is `id`.
    fn count_roles_in_department(&self, id: DepartmentId) -> Result<u64, StorageError>;

    /// Employees holding any role of the department.
    fn count_employees_in_department(&self, id: DepartmentId) -> Result<u64, StorageError>;

    /// Employees whose `role_id` is `id`.
    fn count_employees_with_role(&self, id: RoleId) -> Result<u64, StorageError>;

    /// Employees whose `manager_id` is `id`.
    fn count_direct_reports(&self, id: EmployeeId) -> Result<u64, StorageError>;

    // -------------------------------------------------------------------
    // Deletes (`false` when no row matched)
    // -------------------------------------------------------------------

    fn delete_department(&mut self, id: DepartmentId) -> Result<bool, StorageError>;

    fn delete_role(&mut self, id: RoleId) -> Result<bool, StorageError>;

    fn delete_employee(&mut self, id: EmployeeId) -> Result<bool, StorageError>;
}
