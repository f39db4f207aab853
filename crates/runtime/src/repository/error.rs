//! Error types raised by repository implementations.

use size_core::{ErrorSeverity, RecordId, SizeError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("no record with id {0}")]
    NotFound(RecordId),

    #[error("cannot save a record without an id")]
    MissingId,

    #[error("record repository lock was poisoned")]
    LockPoisoned,

    #[error("JSON error: {0}")]
    Json(String),
}

impl SizeError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound(_) => ErrorSeverity::NotFound,
            Self::MissingId | Self::Json(_) => ErrorSeverity::Validation,
            Self::LockPoisoned => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "REPOSITORY_NOT_FOUND",
            Self::MissingId => "REPOSITORY_MISSING_ID",
            Self::LockPoisoned => "REPOSITORY_LOCK_POISONED",
            Self::Json(_) => "REPOSITORY_JSON",
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
