//! Role handlers (list, create, delete).

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use staffdir_core::{DepartmentId, DepartmentRef, NewRole, Role, RoleId, RoleListing};

use crate::error::{ApiError, DirectoryResultExt};
use crate::handlers::parse_id;
use crate::schema::common::MessageResponse;
use crate::schema::roles::CreateRoleRequest;
use crate::state::AppState;

/// Lists all roles with their department name.
///
/// `GET /api/roles`
pub async fn list_roles(State(state): State<AppState>) -> Result<Json<Vec<RoleListing>>, ApiError> {
    let directory = state.directory.lock().await;
    let roles = directory.list_roles().or_fail("Failed to fetch roles")?;
    Ok(Json(roles))
}

/// Creates a role under an existing department.
///
/// `POST /api/roles`
pub async fn create_role(
    State(state): State<AppState>,
    payload: Result<Json<CreateRoleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Role>), ApiError> {
    let Json(req) = payload?;
    let new = role_from_request(req)?;
    let mut directory = state.directory.lock().await;
    let role = directory.add_role(new).or_fail("Failed to add role")?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// Deletes a role no employee holds.
///
/// `DELETE /api/roles/{id}`
pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = RoleId(parse_id(&id, "role")?);
    let mut directory = state.directory.lock().await;
    directory.delete_role(id).or_fail("Failed to delete role")?;
    Ok(Json(MessageResponse::new("Role deleted successfully")))
}

/// Empty title, zero salary and a missing department all count as missing.
fn role_from_request(req: CreateRoleRequest) -> Result<NewRole, ApiError> {
    let missing = || ApiError::BadRequest("Missing required fields".to_string());

    let title = req.title.filter(|t| !t.trim().is_empty()).ok_or_else(missing)?;
    let salary = req.salary.filter(|s| *s != 0.0).ok_or_else(missing)?;
    let department = match (req.department_id, req.department_name) {
        (Some(id), _) if id != 0 => DepartmentRef::Id(DepartmentId(id)),
        (_, Some(name)) if !name.trim().is_empty() => DepartmentRef::Name(name),
        _ => return Err(missing()),
    };
    NewRole::new(&title, salary, department).or_fail("Failed to add role")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_rejected() {
        let cases = [
            CreateRoleRequest::default(),
            CreateRoleRequest {
                title: Some("Engineer".into()),
                salary: Some(0.0),
                department_id: Some(1),
                ..Default::default()
            },
            CreateRoleRequest {
                title: Some("Engineer".into()),
                salary: Some(10.0),
                ..Default::default()
            },
        ];
        for req in cases {
            let err = role_from_request(req).unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Missing required fields"));
        }
    }

    #[test]
    fn department_id_wins_over_name() {
        let role = role_from_request(CreateRoleRequest {
            title: Some("Engineer".into()),
            salary: Some(10.0),
            department_id: Some(3),
            department_name: Some("Sales".into()),
        })
        .unwrap();
        assert_eq!(role.department(), &DepartmentRef::Id(DepartmentId(3)));
    }

    #[test]
    fn negative_salary_is_bad_request() {
        let err = role_from_request(CreateRoleRequest {
            title: Some("Engineer".into()),
            salary: Some(-10.0),
            department_id: Some(3),
            department_name: None,
        })
        .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
