pub mod repository;

pub use repository::{RecordStore, StoreResult};

use aerodesk_shared::DraftError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Stored record is not a valid draft: {0}")]
    DraftError(#[from] DraftError),
    #[error("Serialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Record store error: {0}")]
    StoreError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
