//! In-memory implementation of [`DirectoryStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and anywhere
//! persistence isn't needed. It keeps rows in `BTreeMap`s (so listings come
//! back ordered by id) and reproduces the constraints the SQLite schema
//! enforces: unique department names, required references on insert, and
//! RESTRICT on delete.

use std::collections::BTreeMap;

use staffdir_core::{
    Department, DepartmentId, Employee, EmployeeId, EmployeeListing, NewDepartment, NewEmployee,
    Role, RoleId, RoleListing,
};

use crate::error::StorageError;
use crate::traits::DirectoryStore;

/// In-memory directory store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    departments: BTreeMap<DepartmentId, Department>,
    roles: BTreeMap<RoleId, Role>,
    employees: BTreeMap<EmployeeId, Employee>,
    next_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids are shared across tables, like a single sequence. Callers only rely
    /// on uniqueness within a table.
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn restrict(reason: &str) -> StorageError {
        StorageError::IntegrityError {
            reason: reason.to_string(),
        }
    }

    fn require_role(&self, id: RoleId) -> Result<(), StorageError> {
        if self.roles.contains_key(&id) {
            Ok(())
        } else {
            Err(Self::restrict("FOREIGN KEY constraint failed: role_id"))
        }
    }

    fn require_manager(&self, id: Option<EmployeeId>) -> Result<(), StorageError> {
        match id {
            Some(id) if !self.employees.contains_key(&id) => {
                Err(Self::restrict("FOREIGN KEY constraint failed: manager_id"))
            }
            _ => Ok(()),
        }
    }
}

impl DirectoryStore for InMemoryStore {
    fn list_departments(&self) -> Result<Vec<Department>, StorageError> {
        Ok(self.departments.values().cloned().collect())
    }

    fn list_roles(&self) -> Result<Vec<RoleListing>, StorageError> {
        Ok(self
            .roles
            .values()
            .map(|role| RoleListing {
                id: role.id,
                title: role.title.clone(),
                salary: role.salary,
                department_id: role.department_id,
                department_name: self
                    .departments
                    .get(&role.department_id)
                    .map(|d| d.name.clone()),
            })
            .collect())
    }

    fn list_employees(&self) -> Result<Vec<EmployeeListing>, StorageError> {
        Ok(self
            .employees
            .values()
            .map(|emp| {
                let role = self.roles.get(&emp.role_id);
                let department = role
                    .and_then(|r| self.departments.get(&r.department_id))
                    .map(|d| d.name.clone());
                let manager = emp
                    .manager_id
                    .and_then(|m| self.employees.get(&m))
                    .map(Employee::full_name);
                EmployeeListing {
                    id: emp.id,
                    first_name: emp.first_name.clone(),
                    last_name: emp.last_name.clone(),
                    role_id: emp.role_id,
                    manager_id: emp.manager_id,
                    title: role.map(|r| r.title.clone()),
                    salary: role.map(|r| r.salary),
                    department,
                    manager,
                }
            })
            .collect())
    }

    fn get_department(&self, id: DepartmentId) -> Result<Option<Department>, StorageError> {
        Ok(self.departments.get(&id).cloned())
    }

    fn find_department_by_name(&self, name: &str) -> Result<Option<Department>, StorageError> {
        Ok(self.departments.values().find(|d| d.name == name).cloned())
    }

    fn get_role(&self, id: RoleId) -> Result<Option<Role>, StorageError> {
        Ok(self.roles.get(&id).cloned())
    }

    fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>, StorageError> {
        Ok(self.employees.get(&id).cloned())
    }

    fn insert_department(&mut self, new: &NewDepartment) -> Result<Department, StorageError> {
        if self.departments.values().any(|d| d.name == new.name()) {
            return Err(StorageError::Duplicate {
                table: "departments",
                value: new.name().to_string(),
            });
        }
        let dept = Department {
            id: DepartmentId(self.allocate_id()),
            name: new.name().to_string(),
        };
        self.departments.insert(dept.id, dept.clone());
        Ok(dept)
    }

    fn insert_role(
        &mut self,
        title: &str,
        salary: f64,
        department_id: DepartmentId,
    ) -> Result<Role, StorageError> {
        if !self.departments.contains_key(&department_id) {
            return Err(Self::restrict("FOREIGN KEY constraint failed: department_id"));
        }
        let role = Role {
            id: RoleId(self.allocate_id()),
            title: title.to_string(),
            salary,
            department_id,
        };
        self.roles.insert(role.id, role.clone());
        Ok(role)
    }

    fn insert_employee(&mut self, new: &NewEmployee) -> Result<Employee, StorageError> {
        self.require_role(new.role_id())?;
        self.require_manager(new.manager_id())?;
        let emp = Employee {
            id: EmployeeId(self.allocate_id()),
            first_name: new.first_name().to_string(),
            last_name: new.last_name().to_string(),
            role_id: new.role_id(),
            manager_id: new.manager_id(),
        };
        self.employees.insert(emp.id, emp.clone());
        Ok(emp)
    }

    fn update_employee_role(
        &mut self,
        id: EmployeeId,
        role_id: RoleId,
    ) -> Result<Option<Employee>, StorageError> {
        if !self.employees.contains_key(&id) {
            return Ok(None);
        }
        self.require_role(role_id)?;
        Ok(self.employees.get_mut(&id).map(|emp| {
            emp.role_id = role_id;
            emp.clone()
        }))
    }

    fn update_employee_manager(
        &mut self,
        id: EmployeeId,
        manager_id: Option<EmployeeId>,
    ) -> Result<Option<Employee>, StorageError> {
        if !self.employees.contains_key(&id) {
            return Ok(None);
        }
        self.require_manager(manager_id)?;
        Ok(self.employees.get_mut(&id).map(|emp| {
            emp.manager_id = manager_id;
            emp.clone()
        }))
    }

    fn count_roles_in_department(&self, id: DepartmentId) -> Result<u64, StorageError> {
        Ok(self.roles.values().filter(|r| r.department_id == id).count() as u64)
    }

    fn count_employees_in_department(&self, id: DepartmentId) -> Result<u64, StorageError> {
        Ok(self
            .employees
            .values()
            .filter(|e| {
                self.roles
                    .get(&e.role_id)
                    .is_some_and(|r| r.department_id == id)
            })
            .count() as u64)
    }

    fn count_employees_with_role(&self, id: RoleId) -> Result<u64, StorageError> {
        Ok(self.employees.values().filter(|e| e.role_id == id).count() as u64)
    }

    fn count_direct_reports(&self, id: EmployeeId) -> Result<u64, StorageError> {
        Ok(self
            .employees
            .values()
            .filter(|e| e.manager_id == Some(id))
            .count() as u64)
    }

    fn delete_department(&mut self, id: DepartmentId) -> Result<bool, StorageError> {
        if self.count_roles_in_department(id)? > 0 {
            return Err(Self::restrict("FOREIGN KEY constraint failed: roles.department_id"));
        }
        Ok(self.departments.remove(&id).is_some())
    }

    fn delete_role(&mut self, id: RoleId) -> Result<bool, StorageError> {
        if self.count_employees_with_role(id)? > 0 {
            return Err(Self::restrict("FOREIGN KEY constraint failed: employees.role_id"));
        }
        Ok(self.roles.remove(&id).is_some())
    }

    fn delete_employee(&mut self, id: EmployeeId) -> Result<bool, StorageError> {
        if self.count_direct_reports(id)? > 0 {
            return Err(Self::restrict("FOREIGN KEY constraint failed: employees.manager_id"));
        }
        Ok(self.employees.remove(&id).is_some())
    }
}
