use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("failed to load tokenizer: {reason}")]
    LoadFailed { reason: String },

    #[error("pair encoding failed: {reason}")]
    EncodeFailed { reason: String },
}

impl From<std::io::Error> for TokenizerError {
    fn from(err: std::io::Error) -> Self {
        TokenizerError::LoadFailed {
            reason: err.to_string(),
        }
    }
}
