use thiserror::Error;

use stockcast_core::DomainError;

/// Failure of a forecasting or optimization job.
///
/// Degenerate optimizer parameters are *not* errors: they resolve to safe
/// defaults inside [`crate::ReorderOptimizer`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AiError {
    #[error("at least {needed} data points are required for forecasting, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("model must be fitted before making predictions")]
    NotFitted,

    #[error("historical data must be sorted by date ascending (out of order at index {index})")]
    UnsortedHistory { index: usize },

    #[error("invalid job input: {0}")]
    InvalidInput(String),

    #[error("inference failed: {0}")]
    InferenceFailed(String),
}

impl AiError {
    /// Whether the caller can fix this by sending different input.
    ///
    /// `NotFitted` is a contract violation by the integrating code, and
    /// `InferenceFailed` is numeric trouble on our side; both are internal.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AiError::InsufficientData { .. } | AiError::UnsortedHistory { .. } | AiError::InvalidInput(_)
        )
    }
}

impl From<DomainError> for AiError {
    fn from(value: DomainError) -> Self {
        AiError::InvalidInput(value.to_string())
    }
}
