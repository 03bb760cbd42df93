use thiserror::Error;

use crate::model::ModelError;
use crate::tokenizer::TokenizerError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("input length mismatch: {first} first sequences vs {second} second sequences")]
    InputLengthMismatch { first: usize, second: usize },

    #[error("no sequence pairs to score")]
    EmptyInput,

    #[error("cannot score an empty batch")]
    EmptyBatch,

    #[error("batch size must be at least 1, got {got}")]
    InvalidBatchSize { got: usize },

    #[error("invalid scoring configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("model inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("failed to load model: {reason}")]
    ModelLoadFailed { reason: String },
}

impl From<TokenizerError> for ScoringError {
    fn from(err: TokenizerError) -> Self {
        match err {
            TokenizerError::LoadFailed { reason } => ScoringError::ModelLoadFailed { reason },
            TokenizerError::EncodeFailed { reason } => ScoringError::TokenizationFailed { reason },
        }
    }
}

impl From<ModelError> for ScoringError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::ModelNotFound { path } => ScoringError::ModelLoadFailed {
                reason: format!("model not found at {}", path.display()),
            },
            ModelError::ModelLoadFailed { reason }
            | ModelError::DeviceUnavailable { reason, .. } => {
                ScoringError::ModelLoadFailed { reason }
            }
            ModelError::InferenceFailed { reason } => ScoringError::InferenceFailed { reason },
        }
    }
}

impl From<candle_core::Error> for ScoringError {
    fn from(err: candle_core::Error) -> Self {
        ScoringError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}
