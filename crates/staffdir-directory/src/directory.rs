//! Directory operations: list, add, update and delete for each record kind.
//!
//! [`Directory`] owns an injected [`DirectoryStore`] and is the single entry
//! point both the REST handlers and the interactive menu call into. Every
//! operation validates first, consults the [`IntegrityGuard`] where a delete
//! or reassignment is involved, then issues its store calls.

use staffdir_core::{
    BlockReason, Department, DepartmentId, DepartmentRef, DirectoryError, Employee, EmployeeId,
    EmployeeListing, EntityKind, NewDepartment, NewEmployee, NewRole, Role, RoleId, RoleListing,
};
use staffdir_storage::{DirectoryStore, StorageError};

use crate::guard::{GuardDecision, IntegrityGuard};

/// CRUD over departments, roles and employees.
pub struct Directory<S: DirectoryStore> {
    store: S,
}

impl<S: DirectoryStore> Directory<S> {
    pub fn new(store: S) -> Self {
        Directory { store }
    }

    /// The underlying store, for read-only inspection.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn guard(&self) -> IntegrityGuard<'_, S> {
        IntegrityGuard::new(&self.store)
    }

    // -----------------------------------------------------------------------
    // List
    // -----------------------------------------------------------------------

    pub fn list_departments(&self) -> Result<Vec<Department>, DirectoryError> {
        Ok(self.store.list_departments()?)
    }

    pub fn list_roles(&self) -> Result<Vec<RoleListing>, DirectoryError> {
        Ok(self.store.list_roles()?)
    }

    pub fn list_employees(&self) -> Result<Vec<EmployeeListing>, DirectoryError> {
        Ok(self.store.list_employees()?)
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    pub fn get_department(&self, id: DepartmentId) -> Result<Department, DirectoryError> {
        self.store
            .get_department(id)?
            .ok_or_else(|| DirectoryError::not_found(EntityKind::Department, id))
    }

    pub fn get_role(&self, id: RoleId) -> Result<Role, DirectoryError> {
        self.store
            .get_role(id)?
            .ok_or_else(|| DirectoryError::not_found(EntityKind::Role, id))
    }

    pub fn get_employee(&self, id: EmployeeId) -> Result<Employee, DirectoryError> {
        self.store
            .get_employee(id)?
            .ok_or_else(|| DirectoryError::not_found(EntityKind::Employee, id))
    }

    // -----------------------------------------------------------------------
    // Add
    // -----------------------------------------------------------------------

    pub fn add_department(&mut self, new: NewDepartment) -> Result<Department, DirectoryError> {
        let dept = self.store.insert_department(&new)?;
        tracing::info!(id = %dept.id, name = %dept.name, "department added");
        Ok(dept)
    }

    /// Resolves the department (by name through the guard, or by id) before
    /// inserting. An unmatched department inserts nothing.
    pub fn add_role(&mut self, new: NewRole) -> Result<Role, DirectoryError> {
        let department_id = match new.department() {
            DepartmentRef::Name(name) => self.guard().resolve_department_by_name(name)?.id,
            DepartmentRef::Id(id) => self.get_department(*id)?.id,
        };
        let role = self
            .store
            .insert_role(new.title(), new.salary(), department_id)?;
        tracing::info!(id = %role.id, title = %role.title, department = %department_id, "role added");
        Ok(role)
    }

    pub fn add_employee(&mut self, new: NewEmployee) -> Result<Employee, DirectoryError> {
        self.get_role(new.role_id())?;
        if let Some(manager_id) = new.manager_id() {
            self.require_manager(manager_id)?;
        }
        let emp = self.store.insert_employee(&new)?;
        tracing::info!(id = %emp.id, name = %emp.full_name(), "employee added");
        Ok(emp)
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    pub fn update_employee_role(
        &mut self,
        id: EmployeeId,
        role_id: RoleId,
    ) -> Result<Employee, DirectoryError> {
        self.get_employee(id)?;
        self.get_role(role_id)?;
        let emp = self
            .store
            .update_employee_role(id, role_id)?
            .ok_or_else(|| DirectoryError::not_found(EntityKind::Employee, id))?;
        tracing::info!(id = %id, role = %role_id, "employee role updated");
        Ok(emp)
    }

    /// `None` clears the manager. A manager must exist and must not already
    /// report (directly or through others) to the employee. Self and cyclic
    /// assignments are refused here; the schema alone would accept them.
    pub fn update_employee_manager(
        &mut self,
        id: EmployeeId,
        manager_id: Option<EmployeeId>,
    ) -> Result<Employee, DirectoryError> {
        self.get_employee(id)?;
        if let Some(manager_id) = manager_id {
            self.require_manager(manager_id)?;
            if manager_id == id {
                return Err(DirectoryError::Validation(
                    "an employee cannot be their own manager".to_string(),
                ));
            }
            if self.guard().manager_chain_reaches(manager_id, id)? {
                return Err(DirectoryError::Validation(format!(
                    "employee {} already reports to employee {}; assignment would create a cycle",
                    manager_id, id
                )));
            }
        }
        let emp = self
            .store
            .update_employee_manager(id, manager_id)?
            .ok_or_else(|| DirectoryError::not_found(EntityKind::Employee, id))?;
        tracing::info!(id = %id, manager = ?manager_id.map(|m| m.0), "employee manager updated");
        Ok(emp)
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    pub fn delete_department(&mut self, id: DepartmentId) -> Result<(), DirectoryError> {
        self.check(self.guard().can_delete_department(id)?, EntityKind::Department, id)?;
        let removed = self
            .store
            .delete_department(id)
            .map_err(|e| restricted(e, BlockReason::RolesExist))?;
        self.finish_delete(removed, EntityKind::Department, id)
    }

    pub fn delete_role(&mut self, id: RoleId) -> Result<(), DirectoryError> {
        self.check(self.guard().can_delete_role(id)?, EntityKind::Role, id)?;
        let removed = self
            .store
            .delete_role(id)
            .map_err(|e| restricted(e, BlockReason::EmployeesExist))?;
        self.finish_delete(removed, EntityKind::Role, id)
    }

    pub fn delete_employee(&mut self, id: EmployeeId) -> Result<(), DirectoryError> {
        self.check(self.guard().can_delete_employee(id)?, EntityKind::Employee, id)?;
        let removed = self
            .store
            .delete_employee(id)
            .map_err(|e| restricted(e, BlockReason::ManagesOtherEmployees))?;
        self.finish_delete(removed, EntityKind::Employee, id)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn require_manager(&self, id: EmployeeId) -> Result<Employee, DirectoryError> {
        self.store
            .get_employee(id)?
            .ok_or_else(|| DirectoryError::not_found(EntityKind::Manager, id))
    }

    fn check(
        &self,
        decision: GuardDecision,
        entity: EntityKind,
        id: impl std::fmt::Display,
    ) -> Result<(), DirectoryError> {
        decision.into_result().inspect_err(|err| {
            tracing::warn!(entity = %entity, id = %id, reason = %err, "delete blocked");
        })
    }

    fn finish_delete(
        &self,
        removed: bool,
        entity: EntityKind,
        id: impl std::fmt::Display,
    ) -> Result<(), DirectoryError> {
        if !removed {
            return Err(DirectoryError::not_found(entity, id));
        }
        tracing::info!(entity = %entity, id = %id, "deleted");
        Ok(())
    }
}

/// A foreign-key failure on delete means a dependent appeared after the guard
/// ran; report it the way the guard would have.
fn restricted(err: StorageError, reason: BlockReason) -> DirectoryError {
    match err {
        StorageError::IntegrityError { .. } => DirectoryError::Integrity(reason),
        other => other.into(),
    }
}
