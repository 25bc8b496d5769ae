//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
///
/// Mutations report guard failures in a fixed order:
/// `Unauthenticated`, then `NotFound`, then `Forbidden`.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Only the author may change this post")]
    Forbidden,

    #[error("Validation failed: {}", .0.join(" "))]
    Validation(Vec<String>),

    /// Taken usernames or emails, one message each.
    #[error("Conflict: {}", .0.join(" "))]
    Conflict(Vec<String>),

    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
