//! The numbered interactive menu.
//!
//! Each menu entry maps to one [`Directory`] operation. Operation errors are
//! printed and the loop continues; only a failing prompt (closed terminal,
//! interrupted input) ends the session.

use std::fmt;
use std::io::{self, Write};

use staffdir_core::{
    parse_salary, DepartmentRef, DirectoryError, EmployeeId, EntityKind, NewDepartment,
    NewEmployee, NewRole,
};
use staffdir_directory::Directory;
use staffdir_storage::DirectoryStore;
use thiserror::Error;

use crate::prompt::Prompt;
use crate::table;

/// Menu entries in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ViewDepartments,
    ViewRoles,
    ViewEmployees,
    AddDepartment,
    AddRole,
    AddEmployee,
    UpdateEmployeeRole,
    UpdateEmployeeManager,
    DeleteDepartment,
    DeleteRole,
    DeleteEmployee,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 12] = [
        MenuChoice::ViewDepartments,
        MenuChoice::ViewRoles,
        MenuChoice::ViewEmployees,
        MenuChoice::AddDepartment,
        MenuChoice::AddRole,
        MenuChoice::AddEmployee,
        MenuChoice::UpdateEmployeeRole,
        MenuChoice::UpdateEmployeeManager,
        MenuChoice::DeleteDepartment,
        MenuChoice::DeleteRole,
        MenuChoice::DeleteEmployee,
        MenuChoice::Exit,
    ];

    fn label(&self) -> &'static str {
        match self {
            MenuChoice::ViewDepartments => "View All Departments",
            MenuChoice::ViewRoles => "View All Roles",
            MenuChoice::ViewEmployees => "View All Employees",
            MenuChoice::AddDepartment => "Add a Department",
            MenuChoice::AddRole => "Add a Role",
            MenuChoice::AddEmployee => "Add an Employee",
            MenuChoice::UpdateEmployeeRole => "Update Employee Role",
            MenuChoice::UpdateEmployeeManager => "Update Employee Manager",
            MenuChoice::DeleteDepartment => "Delete Department",
            MenuChoice::DeleteRole => "Delete Role",
            MenuChoice::DeleteEmployee => "Delete Employee",
            MenuChoice::Exit => "Exit",
        }
    }

    /// What the entry does, phrased for "Error <activity>: ..." messages.
    fn activity(&self) -> &'static str {
        match self {
            MenuChoice::ViewDepartments => "fetching departments",
            MenuChoice::ViewRoles => "fetching roles",
            MenuChoice::ViewEmployees => "fetching employees",
            MenuChoice::AddDepartment => "adding department",
            MenuChoice::AddRole => "adding role",
            MenuChoice::AddEmployee => "adding employee",
            MenuChoice::UpdateEmployeeRole => "updating employee role",
            MenuChoice::UpdateEmployeeManager => "updating employee manager",
            MenuChoice::DeleteDepartment => "deleting department",
            MenuChoice::DeleteRole => "deleting role",
            MenuChoice::DeleteEmployee => "deleting employee",
            MenuChoice::Exit => "exiting",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let number = MenuChoice::ALL
            .iter()
            .position(|c| c == self)
            .map_or(0, |i| i + 1);
        write!(f, "{}. {}", number, self.label())
    }
}

#[derive(Debug, Error)]
enum ActionError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Runs menu entries against a directory, reading answers from `P` and
/// writing results to `W`.
pub struct Menu<S: DirectoryStore, P: Prompt, W: Write> {
    directory: Directory<S>,
    prompt: P,
    out: W,
}

impl<S: DirectoryStore, P: Prompt, W: Write> Menu<S, P, W> {
    pub fn new(directory: Directory<S>, prompt: P, out: W) -> Self {
        Menu {
            directory,
            prompt,
            out,
        }
    }

    /// Shows the menu until the user picks Exit.
    pub fn run(&mut self) -> io::Result<()> {
        let labels: Vec<String> = MenuChoice::ALL.iter().map(ToString::to_string).collect();
        loop {
            writeln!(self.out, "\nEmployee Management System")?;
            writeln!(self.out, "-------------------------\n")?;
            let index = self.prompt.select("What would you like to do?", &labels)?;
            let choice = MenuChoice::ALL[index];
            if choice == MenuChoice::Exit {
                writeln!(self.out, "Goodbye!")?;
                return Ok(());
            }
            self.perform(choice)?;
        }
    }

    /// Runs one entry. Directory errors are reported and swallowed.
    pub fn perform(&mut self, choice: MenuChoice) -> io::Result<()> {
        tracing::debug!(?choice, "menu selection");
        let result = match choice {
            MenuChoice::ViewDepartments => self.view_departments(),
            MenuChoice::ViewRoles => self.view_roles(),
            MenuChoice::ViewEmployees => self.view_employees(),
            MenuChoice::AddDepartment => self.add_department(),
            MenuChoice::AddRole => self.add_role(),
            MenuChoice::AddEmployee => self.add_employee(),
            MenuChoice::UpdateEmployeeRole => self.update_employee_role(),
            MenuChoice::UpdateEmployeeManager => self.update_employee_manager(),
            MenuChoice::DeleteDepartment => self.delete_department(),
            MenuChoice::DeleteRole => self.delete_role(),
            MenuChoice::DeleteEmployee => self.delete_employee(),
            MenuChoice::Exit => Ok(()),
        };
        match result {
            Ok(()) => Ok(()),
            Err(ActionError::Io(e)) => Err(e),
            Err(ActionError::Directory(e)) => self.report(choice, e),
        }
    }

    fn report(&mut self, choice: MenuChoice, err: DirectoryError) -> io::Result<()> {
        match err {
            DirectoryError::Query(detail) => {
                tracing::error!(error = %detail, "error {}", choice.activity());
                writeln!(
                    self.out,
                    "Error {}. An unexpected database error occurred.",
                    choice.activity()
                )
            }
            other => writeln!(self.out, "Error {}: {}", choice.activity(), other),
        }
    }

    // -----------------------------------------------------------------------
    // View
    // -----------------------------------------------------------------------

    fn view_departments(&mut self) -> Result<(), ActionError> {
        let rows: Vec<Vec<String>> = self
            .directory
            .list_departments()?
            .into_iter()
            .map(|d| vec![d.id.to_string(), d.name])
            .collect();
        writeln!(self.out, "{}", table::render(&["id", "name"], &rows))?;
        Ok(())
    }

    fn view_roles(&mut self) -> Result<(), ActionError> {
        let rows: Vec<Vec<String>> = self
            .directory
            .list_roles()?
            .into_iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.title,
                    r.salary.to_string(),
                    r.department_name.unwrap_or_default(),
                ]
            })
            .collect();
        writeln!(
            self.out,
            "{}",
            table::render(&["id", "title", "salary", "department"], &rows)
        )?;
        Ok(())
    }

    fn view_employees(&mut self) -> Result<(), ActionError> {
        let rows: Vec<Vec<String>> = self
            .directory
            .list_employees()?
            .into_iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.first_name,
                    e.last_name,
                    e.title.unwrap_or_default(),
                    e.salary.map(|s| s.to_string()).unwrap_or_default(),
                    e.department.unwrap_or_default(),
                    e.manager.unwrap_or_default(),
                ]
            })
            .collect();
        writeln!(
            self.out,
            "{}",
            table::render(
                &["id", "first_name", "last_name", "title", "salary", "department", "manager"],
                &rows
            )
        )?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Add
    // -----------------------------------------------------------------------

    fn add_department(&mut self) -> Result<(), ActionError> {
        let name = self.prompt.input(
            "Enter the name of the new department",
            &|s| validated(NewDepartment::new(s)),
        )?;
        let dept = self.directory.add_department(NewDepartment::new(&name)?)?;
        writeln!(self.out, "Department '{}' added successfully!", dept.name)?;
        Ok(())
    }

    fn add_role(&mut self) -> Result<(), ActionError> {
        let title = self
            .prompt
            .input("Enter the title of the new role", &non_empty)?;
        let salary = self
            .prompt
            .input("Enter the salary for the new role", &|s| validated(parse_salary(s)))?;
        let department = self
            .prompt
            .input("Enter the department for the new role", &non_empty)?;

        let new = NewRole::new(&title, parse_salary(&salary)?, DepartmentRef::Name(department))?;
        let department = match new.department() {
            DepartmentRef::Name(name) => name.clone(),
            DepartmentRef::Id(id) => id.to_string(),
        };
        match self.directory.add_role(new) {
            Ok(role) => {
                writeln!(
                    self.out,
                    "Role '{}' added successfully to department '{}'!",
                    role.title, department
                )?;
                Ok(())
            }
            Err(DirectoryError::NotFound {
                entity: EntityKind::Department,
                ..
            }) => {
                writeln!(self.out, "Department '{}' not found.", department)?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn add_employee(&mut self) -> Result<(), ActionError> {
        let roles = self.directory.list_roles()?;
        if roles.is_empty() {
            writeln!(self.out, "No roles found. Add a role first.")?;
            return Ok(());
        }
        let employees = self.directory.list_employees()?;

        let first = self
            .prompt
            .input("Enter the employee's first name", &non_empty)?;
        let last = self
            .prompt
            .input("Enter the employee's last name", &non_empty)?;

        let titles: Vec<String> = roles.iter().map(|r| r.title.clone()).collect();
        let role = &roles[self.prompt.select("Select the employee's role", &titles)?];

        let manager = self.select_manager(
            "Select the employee's manager (or 'None' for no manager)",
            employees.iter().map(|e| (e.id, format!("{} {}", e.first_name, e.last_name))),
        )?;

        let emp = self
            .directory
            .add_employee(NewEmployee::new(&first, &last, role.id, manager)?)?;
        writeln!(self.out, "Employee {} added successfully!", emp.full_name())?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    fn update_employee_role(&mut self) -> Result<(), ActionError> {
        let Some(employee) = self.select_employee("Select the employee to update")? else {
            return Ok(());
        };
        let roles = self.directory.list_roles()?;
        if roles.is_empty() {
            writeln!(self.out, "No roles found.")?;
            return Ok(());
        }
        let titles: Vec<String> = roles.iter().map(|r| r.title.clone()).collect();
        let role = &roles[self.prompt.select("Select the employee's new role", &titles)?];

        self.directory.update_employee_role(employee, role.id)?;
        writeln!(self.out, "Employee role updated successfully!")?;
        Ok(())
    }

    fn update_employee_manager(&mut self) -> Result<(), ActionError> {
        let employees = self.directory.list_employees()?;
        let Some(employee) = self.select_employee("Select the employee to update")? else {
            return Ok(());
        };
        let manager = self.select_manager(
            "Select the employee's new manager (or 'None' for no manager)",
            employees.iter().map(|e| (e.id, format!("{} {}", e.first_name, e.last_name))),
        )?;

        self.directory.update_employee_manager(employee, manager)?;
        writeln!(self.out, "Employee manager updated successfully!")?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    fn delete_department(&mut self) -> Result<(), ActionError> {
        let departments = self.directory.list_departments()?;
        if departments.is_empty() {
            writeln!(self.out, "No departments found to delete.")?;
            return Ok(());
        }
        let names: Vec<String> = departments.iter().map(|d| d.name.clone()).collect();
        let dept = &departments[self.prompt.select("Select a department to delete", &names)?];

        self.directory.delete_department(dept.id)?;
        writeln!(self.out, "Department deleted successfully!")?;
        Ok(())
    }

    fn delete_role(&mut self) -> Result<(), ActionError> {
        let roles = self.directory.list_roles()?;
        if roles.is_empty() {
            writeln!(self.out, "No roles found to delete.")?;
            return Ok(());
        }
        let titles: Vec<String> = roles.iter().map(|r| r.title.clone()).collect();
        let role = &roles[self.prompt.select("Select a role to delete", &titles)?];

        self.directory.delete_role(role.id)?;
        writeln!(self.out, "Role deleted successfully!")?;
        Ok(())
    }

    fn delete_employee(&mut self) -> Result<(), ActionError> {
        let Some(employee) = self.select_employee("Select an employee to delete")? else {
            return Ok(());
        };
        self.directory.delete_employee(employee)?;
        writeln!(self.out, "Employee deleted successfully!")?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Selection helpers
    // -----------------------------------------------------------------------

    /// `None` (after telling the user) when there is nobody to pick.
    fn select_employee(&mut self, prompt: &str) -> Result<Option<EmployeeId>, ActionError> {
        let employees = self.directory.list_employees()?;
        if employees.is_empty() {
            writeln!(self.out, "No employees found.")?;
            return Ok(None);
        }
        let names: Vec<String> = employees
            .iter()
            .map(|e| format!("{} {}", e.first_name, e.last_name))
            .collect();
        let index = self.prompt.select(prompt, &names)?;
        Ok(Some(employees[index].id))
    }

    /// Offers "None" followed by every candidate.
    fn select_manager(
        &mut self,
        prompt: &str,
        candidates: impl Iterator<Item = (EmployeeId, String)>,
    ) -> Result<Option<EmployeeId>, ActionError> {
        let (ids, mut names): (Vec<EmployeeId>, Vec<String>) = candidates.unzip();
        names.insert(0, "None".to_string());
        let index = self.prompt.select(prompt, &names)?;
        Ok(index.checked_sub(1).map(|i| ids[i]))
    }
}

fn non_empty(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        Err("a value is required".to_string())
    } else {
        Ok(())
    }
}

fn validated<T>(result: Result<T, DirectoryError>) -> Result<(), String> {
    result.map(|_| ()).map_err(|e| e.to_string())
}
