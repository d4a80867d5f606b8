//! Role request types.

use serde::Deserialize;

/// `POST /api/roles`
///
/// Every field is optional at the JSON level so a missing field yields the
/// API's own 400 message rather than a deserialization error. The department
/// is given by `department_id`, or by `department_name` when no id is sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRoleRequest {
    pub title: Option<String>,
    pub salary: Option<f64>,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
}
