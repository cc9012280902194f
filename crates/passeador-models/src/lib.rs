//! # Passeador Models
//!
//! Domain models and DTOs for the Passeador API.
//!
//! - [`passeador`]: The account entity, its request DTO and store input
//! - [`auth`]: Login request
//! - [`text`]: String body fields and the rules applied to them
//!
//! Request DTO fields carry the public API names (`nome`, `senha`,
//! `disponibilidade`) so validation reports are keyed the way clients sent
//! them. The stored entity uses English field and column names and renames
//! them for JSON.

pub mod auth;
pub mod passeador;
pub mod text;

// Re-export commonly used types at crate root
pub use auth::LoginRequest;
pub use passeador::{Passeador, PasseadorDto, PasseadorFields};
pub use text::TextField;
