//! API schema types for request/response definitions.
//!
//! Each sub-module defines the request types for one resource. Rows returned
//! by the API are the `staffdir_core` records themselves, serialized as-is.

pub mod common;
pub mod departments;
pub mod employees;
pub mod roles;
