//! Passeador accounts: CRUD and login.
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Hashing, token issuance and store calls
//! - `router.rs`: Axum router configuration

pub mod controller;
pub mod router;
pub mod service;
