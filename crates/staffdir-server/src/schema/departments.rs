//! Department request types.

use serde::Deserialize;

/// `POST /api/departments`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepartmentRequest {
    #[serde(default)]
    pub name: String,
}
