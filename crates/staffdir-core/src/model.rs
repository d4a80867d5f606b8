//! Directory records and the validated inputs used to create them.
//!
//! Stored records ([`Department`], [`Role`], [`Employee`]) mirror table rows.
//! Listing views ([`RoleListing`], [`EmployeeListing`]) carry the names of the
//! referenced rows, resolved through LEFT joins, so every joined column is
//! optional.
//!
//! The `New*` types are the only way to hand data to a store for insertion.
//! Their constructors trim text fields and reject empty strings and
//! non-positive salaries, so validation always happens before any query.

use serde::{Deserialize, Serialize};

use crate::error::DirectoryError;
use crate::id::{DepartmentId, EmployeeId, RoleId};

/// A department row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}

/// A role row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub title: String,
    pub salary: f64,
    pub department_id: DepartmentId,
}

/// An employee row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub role_id: RoleId,
    pub manager_id: Option<EmployeeId>,
}

impl Employee {
    /// `"first last"`, as shown in selection lists and manager columns.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A role joined with its department's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleListing {
    pub id: RoleId,
    pub title: String,
    pub salary: f64,
    pub department_id: DepartmentId,
    pub department_name: Option<String>,
}

/// An employee joined with role, department and manager details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeListing {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub role_id: RoleId,
    pub manager_id: Option<EmployeeId>,
    pub title: Option<String>,
    pub salary: Option<f64>,
    /// Department name reached through the employee's role.
    pub department: Option<String>,
    /// Manager's full name; `None` when the employee has no manager.
    pub manager: Option<String>,
}

/// Validated input for a new department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDepartment {
    name: String,
}

impl NewDepartment {
    pub fn new(name: &str) -> Result<Self, DirectoryError> {
        Ok(NewDepartment {
            name: required("department name", name)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// How a new role names the department it belongs to.
///
/// The interactive menu asks for a department name; the REST API takes an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentRef {
    Id(DepartmentId),
    Name(String),
}

/// Validated input for a new role. The department reference is resolved
/// by the caller before insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRole {
    title: String,
    salary: f64,
    department: DepartmentRef,
}

impl NewRole {
    pub fn new(title: &str, salary: f64, department: DepartmentRef) -> Result<Self, DirectoryError> {
        let title = required("role title", title)?;
        let salary = positive_salary(salary)?;
        let department = match department {
            DepartmentRef::Name(name) => DepartmentRef::Name(required("department name", &name)?),
            DepartmentRef::Id(id) => DepartmentRef::Id(id),
        };
        Ok(NewRole {
            title,
            salary,
            department,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn department(&self) -> &DepartmentRef {
        &self.department
    }
}

/// Validated input for a new employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    first_name: String,
    last_name: String,
    role_id: RoleId,
    manager_id: Option<EmployeeId>,
}

impl NewEmployee {
    pub fn new(
        first_name: &str,
        last_name: &str,
        role_id: RoleId,
        manager_id: Option<EmployeeId>,
    ) -> Result<Self, DirectoryError> {
        Ok(NewEmployee {
            first_name: required("first name", first_name)?,
            last_name: required("last name", last_name)?,
            role_id,
            manager_id,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn role_id(&self) -> RoleId {
        self.role_id
    }

    pub fn manager_id(&self) -> Option<EmployeeId> {
        self.manager_id
    }
}

/// Parses a salary typed by a user. Accepts anything `f64` parses that is
/// finite and strictly positive.
pub fn parse_salary(input: &str) -> Result<f64, DirectoryError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| DirectoryError::Validation(format!("salary '{}' is not a number", input.trim())))?;
    positive_salary(value)
}

fn required(field: &str, value: &str) -> Result<String, DirectoryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DirectoryError::Validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn positive_salary(salary: f64) -> Result<f64, DirectoryError> {
    if !salary.is_finite() || salary <= 0.0 {
        return Err(DirectoryError::Validation(format!(
            "salary must be a positive number, got {}",
            salary
        )));
    }
    Ok(salary)
}
