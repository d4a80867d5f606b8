//! SQLite implementation of [`DirectoryStore`].
//!
//! [`SqliteStore`] keeps one connection with WAL mode, foreign keys enabled
//! and migrations applied. Every statement is parameterized; inserts and
//! updates use `RETURNING` so the written row comes back in the same
//! round-trip.

use rusqlite::{params, Connection, OptionalExtension, Row};

use staffdir_core::{
    Department, DepartmentId, Employee, EmployeeId, EmployeeListing, NewDepartment, NewEmployee,
    Role, RoleId, RoleListing,
};

use crate::error::{classify, StorageError};
use crate::traits::DirectoryStore;

const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, role_id, manager_id";

/// SQLite-backed implementation of [`DirectoryStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        Ok(SqliteStore { conn })
    }

    /// Opens an in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(SqliteStore { conn })
    }

    // -----------------------------------------------------------------------
    // Row mapping
    // -----------------------------------------------------------------------

    fn department_from_row(row: &Row<'_>) -> rusqlite::Result<Department> {
        Ok(Department {
            id: DepartmentId(row.get(0)?),
            name: row.get(1)?,
        })
    }

    fn role_from_row(row: &Row<'_>) -> rusqlite::Result<Role> {
        Ok(Role {
            id: RoleId(row.get(0)?),
            title: row.get(1)?,
            salary: row.get(2)?,
            department_id: DepartmentId(row.get(3)?),
        })
    }

    fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
        Ok(Employee {
            id: EmployeeId(row.get(0)?),
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            role_id: RoleId(row.get(3)?),
            manager_id: row.get::<_, Option<i64>>(4)?.map(EmployeeId),
        })
    }

    fn count(&self, sql: &str, id: i64) -> Result<u64, StorageError> {
        let n: i64 = self.conn.query_row(sql, params![id], |row| row.get(0))?;
        Ok(n as u64)
    }

    fn delete(&mut self, sql: &str, table: &'static str, id: i64) -> Result<bool, StorageError> {
        let affected = self
            .conn
            .execute(sql, params![id])
            .map_err(|e| classify(e, table, &id.to_string()))?;
        Ok(affected > 0)
    }
}

impl DirectoryStore for SqliteStore {
    fn list_departments(&self) -> Result<Vec<Department>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name FROM departments ORDER BY id")?;
        let rows = stmt
            .query_map([], Self::department_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn list_roles(&self) -> Result<Vec<RoleListing>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT r.id, r.title, r.salary, r.department_id, d.name
             FROM roles r
             LEFT JOIN departments d ON r.department_id = d.id
             ORDER BY r.id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RoleListing {
                    id: RoleId(row.get(0)?),
                    title: row.get(1)?,
                    salary: row.get(2)?,
                    department_id: DepartmentId(row.get(3)?),
                    department_name: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn list_employees(&self) -> Result<Vec<EmployeeListing>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT e.id, e.first_name, e.last_name, e.role_id, e.manager_id,
                    r.title, r.salary, d.name,
                    m.first_name || ' ' || m.last_name
             FROM employees e
             LEFT JOIN roles r ON e.role_id = r.id
             LEFT JOIN departments d ON r.department_id = d.id
             LEFT JOIN employees m ON e.manager_id = m.id
             ORDER BY e.id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(EmployeeListing {
                    id: EmployeeId(row.get(0)?),
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    role_id: RoleId(row.get(3)?),
                    manager_id: row.get::<_, Option<i64>>(4)?.map(EmployeeId),
                    title: row.get(5)?,
                    salary: row.get(6)?,
                    department: row.get(7)?,
                    manager: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn get_department(&self, id: DepartmentId) -> Result<Option<Department>, StorageError> {
        let dept = self
            .conn
            .query_row(
                "SELECT id, name FROM departments WHERE id = ?1",
                params![id.0],
                Self::department_from_row,
            )
            .optional()?;
        Ok(dept)
    }

    fn find_department_by_name(&self, name: &str) -> Result<Option<Department>, StorageError> {
        let dept = self
            .conn
            .query_row(
                "SELECT id, name FROM departments WHERE name = ?1",
                params![name],
                Self::department_from_row,
            )
            .optional()?;
        Ok(dept)
    }

    fn get_role(&self, id: RoleId) -> Result<Option<Role>, StorageError> {
        let role = self
            .conn
            .query_row(
                "SELECT id, title, salary, department_id FROM roles WHERE id = ?1",
                params![id.0],
                Self::role_from_row,
            )
            .optional()?;
        Ok(role)
    }

    fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>, StorageError> {
        let employee = self
            .conn
            .query_row(
                &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1"),
                params![id.0],
                Self::employee_from_row,
            )
            .optional()?;
        Ok(employee)
    }

    fn insert_department(&mut self, new: &NewDepartment) -> Result<Department, StorageError> {
        self.conn
            .query_row(
                "INSERT INTO departments (name) VALUES (?1) RETURNING id, name",
                params![new.name()],
                Self::department_from_row,
            )
            .map_err(|e| classify(e, "departments", new.name()))
    }

    fn insert_role(
        &mut self,
        title: &str,
        salary: f64,
        department_id: DepartmentId,
    ) -> Result<Role, StorageError> {
        self.conn
            .query_row(
                "INSERT INTO roles (title, salary, department_id) VALUES (?1, ?2, ?3)
                 RETURNING id, title, salary, department_id",
                params![title, salary, department_id.0],
                Self::role_from_row,
            )
            .map_err(|e| classify(e, "roles", title))
    }

    fn insert_employee(&mut self, new: &NewEmployee) -> Result<Employee, StorageError> {
        self.conn
            .query_row(
                &format!(
                    "INSERT INTO employees (first_name, last_name, role_id, manager_id)
                     VALUES (?1, ?2, ?3, ?4) RETURNING {EMPLOYEE_COLUMNS}"
                ),
                params![
                    new.first_name(),
                    new.last_name(),
                    new.role_id().0,
                    new.manager_id().map(|m| m.0),
                ],
                Self::employee_from_row,
            )
            .map_err(|e| classify(e, "employees", new.first_name()))
    }

    fn update_employee_role(
        &mut self,
        id: EmployeeId,
        role_id: RoleId,
    ) -> Result<Option<Employee>, StorageError> {
        self.conn
            .query_row(
                &format!(
                    "UPDATE employees SET role_id = ?1 WHERE id = ?2 RETURNING {EMPLOYEE_COLUMNS}"
                ),
                params![role_id.0, id.0],
                Self::employee_from_row,
            )
            .optional()
            .map_err(|e| classify(e, "employees", &id.to_string()))
    }

    fn update_employee_manager(
        &mut self,
        id: EmployeeId,
        manager_id: Option<EmployeeId>,
    ) -> Result<Option<Employee>, StorageError> {
        self.conn
            .query_row(
                &format!(
                    "UPDATE employees SET manager_id = ?1 WHERE id = ?2 RETURNING {EMPLOYEE_COLUMNS}"
                ),
                params![manager_id.map(|m| m.0), id.0],
                Self::employee_from_row,
            )
            .optional()
            .map_err(|e| classify(e, "employees", &id.to_string()))
    }

    fn count_roles_in_department(&self, id: DepartmentId) -> Result<u64, StorageError> {
        self.count("SELECT COUNT(*) FROM roles WHERE department_id = ?1", id.0)
    }

    fn count_employees_in_department(&self, id: DepartmentId) -> Result<u64, StorageError> {
        self.count(
            "SELECT COUNT(*) FROM employees
             WHERE role_id IN (SELECT id FROM roles WHERE department_id = ?1)",
            id.0,
        )
    }

    fn count_employees_with_role(&self, id: RoleId) -> Result<u64, StorageError> {
        self.count("SELECT COUNT(*) FROM employees WHERE role_id = ?1", id.0)
    }

    fn count_direct_reports(&self, id: EmployeeId) -> Result<u64, StorageError> {
        self.count("SELECT COUNT(*) FROM employees WHERE manager_id = ?1", id.0)
    }

    fn delete_department(&mut self, id: DepartmentId) -> Result<bool, StorageError> {
        self.delete("DELETE FROM departments WHERE id = ?1", "departments", id.0)
    }

    fn delete_role(&mut self, id: RoleId) -> Result<bool, StorageError> {
        self.delete("DELETE FROM roles WHERE id = ?1", "roles", id.0)
    }

    fn delete_employee(&mut self, id: EmployeeId) -> Result<bool, StorageError> {
        self.delete("DELETE FROM employees WHERE id = ?1", "employees", id.0)
    }
}
