//! Core error types used across the engine

use thiserror::Error;

use crate::money::CostRangeError;
use crate::score::ScoreError;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cost range error: {0}")]
    CostRange(#[from] CostRangeError),

    #[error("Score error: {0}")]
    Score(#[from] ScoreError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }
}
