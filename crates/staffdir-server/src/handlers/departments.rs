//! Department handlers (list, create, delete).

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use staffdir_core::{Department, DepartmentId, NewDepartment};

use crate::error::{ApiError, DirectoryResultExt};
use crate::handlers::parse_id;
use crate::schema::common::MessageResponse;
use crate::schema::departments::CreateDepartmentRequest;
use crate::state::AppState;

/// Lists all departments.
///
/// `GET /api/departments`
pub async fn list_departments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Department>>, ApiError> {
    let directory = state.directory.lock().await;
    let departments = directory
        .list_departments()
        .or_fail("Failed to fetch departments")?;
    Ok(Json(departments))
}

/// Creates a department.
///
/// `POST /api/departments`
pub async fn create_department(
    State(state): State<AppState>,
    payload: Result<Json<CreateDepartmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Department>), ApiError> {
    let Json(req) = payload?;
    let new = NewDepartment::new(&req.name).or_fail("Failed to add department")?;
    let mut directory = state.directory.lock().await;
    let department = directory
        .add_department(new)
        .or_fail("Failed to add department")?;
    Ok((StatusCode::CREATED, Json(department)))
}

/// Deletes a department that no role references.
///
/// `DELETE /api/departments/{id}`
pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = DepartmentId(parse_id(&id, "department")?);
    let mut directory = state.directory.lock().await;
    directory
        .delete_department(id)
        .or_fail("Failed to delete department")?;
    Ok(Json(MessageResponse::new("Department deleted successfully")))
}
