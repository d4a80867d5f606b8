//! Router assembly for the directory HTTP API.
//!
//! [`build_router`] mounts every resource under `/api` with CORS and tracing
//! middleware layers. Anything unmatched, including a known path with the
//! wrong method, falls through to a JSON 404.

use axum::routing::{delete, get, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/departments",
            get(handlers::departments::list_departments)
                .post(handlers::departments::create_department),
        )
        .route(
            "/departments/{id}",
            delete(handlers::departments::delete_department),
        )
        .route(
            "/roles",
            get(handlers::roles::list_roles).post(handlers::roles::create_role),
        )
        .route("/roles/{id}", delete(handlers::roles::delete_role))
        .route(
            "/employees",
            get(handlers::employees::list_employees)
                .post(handlers::employees::create_employee),
        )
        .route(
            "/employees/{id}",
            put(handlers::employees::update_employee_role)
                .delete(handlers::employees::delete_employee),
        )
        .route(
            "/employees/{id}/manager",
            put(handlers::employees::update_employee_manager),
        )
        .method_not_allowed_fallback(handlers::route_not_found);

    Router::new()
        .nest("/api", api)
        .fallback(handlers::route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
