//! Employee request types.

use serde::{Deserialize, Deserializer};

/// `POST /api/employees`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEmployeeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role_id: Option<i64>,
    pub manager_id: Option<i64>,
}

/// `PUT /api/employees/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployeeRoleRequest {
    pub role_id: Option<i64>,
}

/// `PUT /api/employees/{id}/manager`
///
/// `managerId` must be present. An explicit `null` clears the manager, so
/// the field keeps the raw JSON value: `None` means absent, `Some(Null)`
/// means null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployeeManagerRequest {
    #[serde(rename = "managerId", default, deserialize_with = "present")]
    pub manager_id: Option<serde_json::Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}
