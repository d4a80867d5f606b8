//! HTTP/JSON API for the staff directory.
//!
//! Exposes departments, roles and employees under `/api`. This crate holds
//! the server framework: configuration, shared state, request schema types,
//! error mapping and route definitions. All directory logic lives in
//! `staffdir-directory`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod state;
