//! Store-specific error types and conversions.

use cycles_core::error::CyclesError;

/// Backend-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<StoreError> for CyclesError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => CyclesError::NotFound { entity, id },
            other => CyclesError::Backend(other.to_string()),
        }
    }
}
