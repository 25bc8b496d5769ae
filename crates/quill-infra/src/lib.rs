//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `postgres` - PostgreSQL store via SeaORM
//! - `auth` - JWT session tokens + Argon2 password hashing

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::InMemoryStore;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
