//! Match engine error types

use thiserror::Error;

use crate::queue_store::StoreError;

/// Errors surfaced by [`MatchEngine`](crate::engine::MatchEngine)
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Group size must be positive, got {0}")]
    InvalidGroupSize(usize),

    #[error("Player already queued: {0}")]
    DuplicatePlayer(String),

    #[error("Queue store failure: {0}")]
    Store(#[from] StoreError),
}

impl MatchError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::InvalidGroupSize(_) => "INVALID_GROUP_SIZE",
            MatchError::DuplicatePlayer(_) => "DUPLICATE_PLAYER",
            MatchError::Store(_) => "STORE_ERROR",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            MatchError::DuplicatePlayer(_) => 409,
            MatchError::InvalidGroupSize(_) | MatchError::Store(_) => 500,
        }
    }
}
