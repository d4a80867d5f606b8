//! Employee handlers (list, create, role/manager updates, delete).

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use staffdir_core::{Employee, EmployeeId, EmployeeListing, NewEmployee, RoleId};

use crate::error::{ApiError, DirectoryResultExt};
use crate::handlers::parse_id;
use crate::schema::common::MessageResponse;
use crate::schema::employees::{
    CreateEmployeeRequest, UpdateEmployeeManagerRequest, UpdateEmployeeRoleRequest,
};
use crate::state::AppState;

/// Lists all employees with role, department and manager.
///
/// `GET /api/employees`
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeListing>>, ApiError> {
    let directory = state.directory.lock().await;
    let employees = directory
        .list_employees()
        .or_fail("Failed to fetch employees")?;
    Ok(Json(employees))
}

/// Creates an employee.
///
/// `POST /api/employees`
pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let Json(req) = payload?;
    let role_id = req
        .role_id
        .ok_or_else(|| ApiError::BadRequest("Missing required fields".to_string()))?;
    let new = NewEmployee::new(
        req.first_name.as_deref().unwrap_or_default(),
        req.last_name.as_deref().unwrap_or_default(),
        RoleId(role_id),
        req.manager_id.map(EmployeeId),
    )
    .or_fail("Failed to add employee")?;

    let mut directory = state.directory.lock().await;
    let employee = directory
        .add_employee(new)
        .or_fail("Failed to add employee")?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Moves an employee to another role.
///
/// `PUT /api/employees/{id}`
pub async fn update_employee_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEmployeeRoleRequest>, JsonRejection>,
) -> Result<Json<Employee>, ApiError> {
    let id = EmployeeId(parse_id(&id, "employee")?);
    let Json(req) = payload?;
    let role_id = req
        .role_id
        .ok_or_else(|| ApiError::BadRequest("Missing required fields".to_string()))?;

    let mut directory = state.directory.lock().await;
    let employee = directory
        .update_employee_role(id, RoleId(role_id))
        .or_fail("Failed to update employee role")?;
    Ok(Json(employee))
}

/// Assigns or clears an employee's manager.
///
/// `PUT /api/employees/{id}/manager`
pub async fn update_employee_manager(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEmployeeManagerRequest>, JsonRejection>,
) -> Result<Json<Employee>, ApiError> {
    let invalid = || ApiError::BadRequest("Invalid employee or manager ID".to_string());
    let id = EmployeeId(parse_id(&id, "employee").map_err(|_| invalid())?);
    let Json(req) = payload?;
    let manager_id = parse_manager_id(req.manager_id).ok_or_else(invalid)?;

    let mut directory = state.directory.lock().await;
    let employee = directory
        .update_employee_manager(id, manager_id)
        .or_fail("Failed to update employee manager")?;
    Ok(Json(employee))
}

/// Deletes an employee nobody reports to.
///
/// `DELETE /api/employees/{id}`
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = EmployeeId(parse_id(&id, "employee")?);
    let mut directory = state.directory.lock().await;
    directory
        .delete_employee(id)
        .or_fail("Failed to delete employee")?;
    Ok(Json(MessageResponse::new("Employee deleted successfully")))
}

/// `None` when the value is absent or not a usable id; `Some(None)` for an
/// explicit null. Numeric strings are accepted.
fn parse_manager_id(value: Option<serde_json::Value>) -> Option<Option<EmployeeId>> {
    let id = match value? {
        serde_json::Value::Null => return Some(None),
        serde_json::Value::Number(n) => n.as_i64()?,
        serde_json::Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (id > 0).then_some(Some(EmployeeId(id)))
}
