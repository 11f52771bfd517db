use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Invalid category name: {0}")]
    InvalidCategory(String),

    #[error("Moderator identifier cannot be empty")]
    InvalidModerator,

    #[error("Invalid credential")]
    InvalidCredential,

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Upstream stream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
