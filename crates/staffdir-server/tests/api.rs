//! End-to-end tests for the directory HTTP API.
//!
//! Tests exercise the full stack: HTTP request -> axum router -> handler ->
//! Directory -> IntegrityGuard -> SqliteStore -> HTTP response.
//!
//! Each test creates a fresh AppState backed by an in-memory SQLite
//! database, and uses `tower::ServiceExt::oneshot` to send requests directly
//! to the router without starting a network server.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use staffdir_server::router::build_router;
use staffdir_server::state::AppState;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

fn test_app() -> Router {
    let state = AppState::in_memory().expect("failed to create in-memory AppState");
    build_router(state)
}

async fn request_json(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(json!(null));
    (status, json)
}

async fn get_json(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    request_json(app, Method::GET, path, None).await
}

async fn post_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    request_json(app, Method::POST, path, Some(body)).await
}

async fn put_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    request_json(app, Method::PUT, path, Some(body)).await
}

async fn delete(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    request_json(app, Method::DELETE, path, None).await
}

async fn create_department(app: &Router, name: &str) -> i64 {
    let (status, body) = post_json(app, "/api/departments", json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED, "create department failed: {body:?}");
    body["id"].as_i64().unwrap()
}

async fn create_role(app: &Router, title: &str, salary: f64, department_id: i64) -> i64 {
    let (status, body) = post_json(
        app,
        "/api/roles",
        json!({ "title": title, "salary": salary, "department_id": department_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create role failed: {body:?}");
    body["id"].as_i64().unwrap()
}

async fn create_employee(
    app: &Router,
    first: &str,
    last: &str,
    role_id: i64,
    manager_id: Option<i64>,
) -> i64 {
    let (status, body) = post_json(
        app,
        "/api/employees",
        json!({
            "first_name": first,
            "last_name": last,
            "role_id": role_id,
            "manager_id": manager_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create employee failed: {body:?}");
    body["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Departments
// ---------------------------------------------------------------------------

#[tokio::test]
async fn department_lifecycle() {
    let app = test_app();

    let (status, body) = get_json(&app, "/api/departments").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = post_json(&app, "/api/departments", json!({ "name": "Engineering" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Engineering");
    let id = body["id"].as_i64().unwrap();

    let (_, body) = get_json(&app, "/api/departments").await;
    assert_eq!(body, json!([{ "id": id, "name": "Engineering" }]));

    let (status, body) = delete(&app, &format!("/api/departments/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Department deleted successfully");

    let (status, body) = delete(&app, &format!("/api/departments/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Department not found");
}

#[tokio::test]
async fn department_name_is_validated() {
    let app = test_app();

    let (status, _) = post_json(&app, "/api/departments", json!({ "name": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    create_department(&app, "Sales").await;
    let (status, body) = post_json(&app, "/api/departments", json!({ "name": "Sales" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn department_delete_is_blocked_by_roles() {
    let app = test_app();
    let dept = create_department(&app, "Engineering").await;
    create_role(&app, "Engineer", 80000.0, dept).await;

    let (status, body) = delete(&app, &format!("/api/departments/{dept}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Cannot delete department. Roles are associated with it."
    );

    let (_, body) = get_json(&app, "/api/departments").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_path_ids_are_bad_requests() {
    let app = test_app();

    let (status, body) = delete(&app, "/api/departments/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid department ID");

    let (status, body) = delete(&app, "/api/roles/x1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid role ID");

    let (status, body) = delete(&app, "/api/employees/-").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid employee ID");
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[tokio::test]
async fn roles_list_includes_department_name() {
    let app = test_app();
    let dept = create_department(&app, "Engineering").await;
    let role = create_role(&app, "Engineer", 80000.0, dept).await;

    let (status, body) = get_json(&app, "/api/roles").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "id": role,
            "title": "Engineer",
            "salary": 80000.0,
            "department_id": dept,
            "department_name": "Engineering",
        }])
    );
}

#[tokio::test]
async fn role_creation_requires_fields_and_department() {
    let app = test_app();

    let (status, body) = post_json(&app, "/api/roles", json!({ "title": "Engineer" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");

    let (status, body) = post_json(
        &app,
        "/api/roles",
        json!({ "title": "Engineer", "salary": 1, "department_id": 77 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Department not found");

    let (status, body) = post_json(
        &app,
        "/api/roles",
        json!({ "title": "Engineer", "salary": 1, "department_name": "Nowhere" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body:?}");

    let (_, body) = get_json(&app, "/api/roles").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn role_can_name_its_department() {
    let app = test_app();
    let dept = create_department(&app, "Engineering").await;

    let (status, body) = post_json(
        &app,
        "/api/roles",
        json!({ "title": "Engineer", "salary": 80000, "department_name": "Engineering" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["department_id"], dept);
}

#[tokio::test]
async fn role_delete_is_blocked_by_employees() {
    let app = test_app();
    let dept = create_department(&app, "Engineering").await;
    let role = create_role(&app, "Engineer", 80000.0, dept).await;
    let spare = create_role(&app, "Intern", 10000.0, dept).await;
    create_employee(&app, "Ada", "Lovelace", role, None).await;

    let (status, body) = delete(&app, &format!("/api/roles/{role}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Cannot delete role. Employees are associated with it."
    );

    let (status, body) = delete(&app, &format!("/api/roles/{spare}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Role deleted successfully");

    let (_, body) = get_json(&app, "/api/roles").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = delete(&app, &format!("/api/roles/{spare}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

#[tokio::test]
async fn engineering_scenario() {
    let app = test_app();
    let dept = create_department(&app, "Engineering").await;
    let role = create_role(&app, "Engineer", 80000.0, dept).await;
    let ada = create_employee(&app, "Ada", "Lovelace", role, None).await;

    let (status, body) = get_json(&app, "/api/employees").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], ada);
    assert_eq!(rows[0]["first_name"], "Ada");
    assert_eq!(rows[0]["title"], "Engineer");
    assert_eq!(rows[0]["salary"], 80000.0);
    assert_eq!(rows[0]["department"], "Engineering");
    assert_eq!(rows[0]["manager"], serde_json::Value::Null);

    let (status, body) = delete(&app, &format!("/api/departments/{dept}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Cannot delete department. Roles are associated with it."
    );
}

#[tokio::test]
async fn employee_creation_validates_references() {
    let app = test_app();
    let dept = create_department(&app, "Engineering").await;
    let role = create_role(&app, "Engineer", 80000.0, dept).await;

    let (status, _) = post_json(
        &app,
        "/api/employees",
        json!({ "first_name": "", "last_name": "Lovelace", "role_id": role }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_json(
        &app,
        "/api/employees",
        json!({ "first_name": "Ada", "last_name": "Lovelace", "role_id": 999 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Role not found");

    let (status, body) = post_json(
        &app,
        "/api/employees",
        json!({ "first_name": "Ada", "last_name": "Lovelace", "role_id": role, "manager_id": 999 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Manager not found");

    let (_, body) = get_json(&app, "/api/employees").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn update_employee_role() {
    let app = test_app();
    let dept = create_department(&app, "Engineering").await;
    let role = create_role(&app, "Engineer", 80000.0, dept).await;
    let lead = create_role(&app, "Lead", 120000.0, dept).await;
    let ada = create_employee(&app, "Ada", "Lovelace", role, None).await;

    let (status, body) = put_json(&app, &format!("/api/employees/{ada}"), json!({ "role_id": lead })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role_id"], lead);

    let (status, body) = put_json(&app, "/api/employees/999", json!({ "role_id": lead })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Employee not found");

    let (status, body) = put_json(&app, &format!("/api/employees/{ada}"), json!({ "role_id": 999 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Role not found");
}

#[tokio::test]
async fn update_employee_manager_validation() {
    let app = test_app();
    let dept = create_department(&app, "Engineering").await;
    let role = create_role(&app, "Engineer", 80000.0, dept).await;
    let ada = create_employee(&app, "Ada", "Lovelace", role, None).await;
    let grace = create_employee(&app, "Grace", "Hopper", role, None).await;
    let path = format!("/api/employees/{ada}/manager");

    let (status, body) = put_json(&app, &path, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid employee or manager ID");

    let (status, _) = put_json(&app, &path, json!({ "managerId": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = put_json(&app, "/api/employees/abc/manager", json!({ "managerId": grace })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = put_json(&app, "/api/employees/999/manager", json!({ "managerId": grace })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Employee not found");

    let (status, body) = put_json(&app, &path, json!({ "managerId": 999 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Manager not found");

    let (status, body) = put_json(&app, &path, json!({ "managerId": grace })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["manager_id"], grace);

    let (_, body) = get_json(&app, "/api/employees").await;
    assert_eq!(body[0]["manager"], "Grace Hopper");

    // Grace reporting to Ada would close a loop.
    let (status, _) = put_json(
        &app,
        &format!("/api/employees/{grace}/manager"),
        json!({ "managerId": ada }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn manager_scenario() {
    let app = test_app();
    let dept = create_department(&app, "Engineering").await;
    let role = create_role(&app, "Engineer", 80000.0, dept).await;
    let b = create_employee(&app, "Grace", "Hopper", role, None).await;
    let a = create_employee(&app, "Ada", "Lovelace", role, Some(b)).await;

    let (status, body) = delete(&app, &format!("/api/employees/{b}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Cannot delete employee. They manage other employees."
    );

    let (status, body) = put_json(
        &app,
        &format!("/api/employees/{a}/manager"),
        json!({ "managerId": null }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["manager_id"], serde_json::Value::Null);

    let (status, body) = delete(&app, &format!("/api/employees/{b}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee deleted successfully");

    let (status, _) = delete(&app, &format!("/api/employees/{b}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unmatched_routes_return_json_404() {
    let app = test_app();

    for path in ["/api/unknown", "/departments", "/"] {
        let (status, body) = get_json(&app, path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(body["error"], "Route Not found");
    }

    for (method, path) in [
        (Method::PATCH, "/api/departments"),
        (Method::DELETE, "/api/departments"),
        (Method::GET, "/api/departments/1"),
        (Method::POST, "/api/employees/1/manager"),
    ] {
        let (status, body) = request_json(&app, method.clone(), path, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {path}");
        assert_eq!(body["error"], "Route Not found", "{method} {path}");
    }
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/departments")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
