//! # Passeador Core
//!
//! Core types, errors, and utilities for the Passeador API.
//!
//! This crate provides the foundational pieces shared by every other crate:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Salted password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use passeador_core::errors::AppError;
//! use passeador_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Email não encontrado!"));
//!
//! let hash = hash_password("secret1")?;
//! assert!(verify_password("secret1", &hash)?);
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse, FieldErrors};
pub use password::{hash_password, hash_password_with_cost, verify_password};
