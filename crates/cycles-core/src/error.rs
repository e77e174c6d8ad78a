//! Error types for the Cycles system.

use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type CyclesResult<T> = Result<T, CyclesError>;

#[derive(Debug, Error)]
pub enum CyclesError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("invalid slug: {reason}")]
    InvalidSlug { reason: String },

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("backend unavailable: {0}")]
    Backend(String),
}
