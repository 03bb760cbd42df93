use std::path::PathBuf;

use crate::constants::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_SEQ_LEN};

use super::error::ScoringError;

/// Configuration for [`NspScorer`](super::NspScorer).
#[derive(Debug, Clone)]
pub struct NspConfig {
    /// Directory holding `config.json` and `model.safetensors`.
    pub model_path: PathBuf,

    /// Path to `tokenizer.json`. Defaults to `model_path/tokenizer.json`.
    pub tokenizer_path: Option<PathBuf>,

    /// Pairs scored per forward pass.
    pub batch_size: usize,

    /// Max tokens a joint encoding is truncated to.
    pub max_seq_len: usize,
}

impl Default for NspConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::new(),
            tokenizer_path: None,
            batch_size: DEFAULT_BATCH_SIZE,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }
}

impl NspConfig {
    /// Env var used to locate the model directory.
    pub const ENV_MODEL_PATH: &'static str = "NEXTSENT_MODEL_PATH";
    /// Env var used to locate the tokenizer file.
    pub const ENV_TOKENIZER_PATH: &'static str = "NEXTSENT_TOKENIZER_PATH";
    /// Env var overriding the batch size.
    pub const ENV_BATCH_SIZE: &'static str = "NEXTSENT_BATCH_SIZE";

    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: model_path.into(),
            ..Self::default()
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_tokenizer_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.tokenizer_path = Some(path.into());
        self
    }

    /// Loads config from environment variables (missing values keep defaults).
    pub fn from_env() -> Self {
        let model_path = std::env::var(Self::ENV_MODEL_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_default();

        let tokenizer_path = std::env::var(Self::ENV_TOKENIZER_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let batch_size = std::env::var(Self::ENV_BATCH_SIZE)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_BATCH_SIZE);

        Self {
            model_path,
            tokenizer_path,
            batch_size,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }

    /// Resolved tokenizer path (explicit, or `model_path/tokenizer.json`).
    pub fn tokenizer_path(&self) -> PathBuf {
        self.tokenizer_path
            .clone()
            .unwrap_or_else(|| self.model_path.join("tokenizer.json"))
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.model_path.as_os_str().is_empty() {
            return Err(ScoringError::InvalidConfig {
                reason: "model_path cannot be empty".to_string(),
            });
        }
        if self.batch_size == 0 {
            return Err(ScoringError::InvalidBatchSize { got: 0 });
        }
        if self.max_seq_len == 0 {
            return Err(ScoringError::InvalidConfig {
                reason: "max_seq_len must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
