use tracing::{debug, info};

use crate::model::{BertForNextSentencePrediction, NspModel, select_device};
use crate::tokenizer::{HfPairTokenizer, PairTokenizer};

use super::config::NspConfig;
use super::driver::score_all;
use super::error::ScoringError;

/// Continuation scorer owning a model, a tokenizer, and a batch size.
///
/// Generic over the capability traits so tests can drive it with the mock
/// backends; [`NspScorer::load`] builds the candle-backed configuration.
pub struct NspScorer<M, T> {
    model: M,
    tokenizer: T,
    batch_size: usize,
}

impl<M, T> std::fmt::Debug for NspScorer<M, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NspScorer")
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl<M, T> NspScorer<M, T>
where
    M: NspModel,
    T: PairTokenizer,
{
    /// Wraps existing model and tokenizer capabilities.
    pub fn new(model: M, tokenizer: T, batch_size: usize) -> Result<Self, ScoringError> {
        if batch_size == 0 {
            return Err(ScoringError::InvalidBatchSize { got: 0 });
        }
        Ok(Self {
            model,
            tokenizer,
            batch_size,
        })
    }

    /// Scores every pair: the probability that `second[i]` continues
    /// `first[i]`, in input order.
    pub fn score_pairs(&self, first: &[&str], second: &[&str]) -> Result<Vec<f32>, ScoringError> {
        debug!(
            pairs = first.len(),
            batch_size = self.batch_size,
            "Scoring sequence pairs"
        );
        score_all(first, second, &self.model, &self.tokenizer, self.batch_size)
    }

    /// Scores a single pair.
    pub fn score_pair(&self, first: &str, second: &str) -> Result<f32, ScoringError> {
        let scores = self.score_pairs(&[first], &[second])?;
        Ok(scores[0])
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }
}

impl NspScorer<BertForNextSentencePrediction, HfPairTokenizer> {
    /// Loads the BERT NSP model and tokenizer named by `config`.
    pub fn load(config: NspConfig) -> Result<Self, ScoringError> {
        config.validate()?;

        let device = select_device()?;
        debug!(?device, "Selected compute device for NSP scoring");

        if !config.model_path.exists() {
            return Err(ScoringError::ModelLoadFailed {
                reason: format!("model path not found: {}", config.model_path.display()),
            });
        }

        let model = BertForNextSentencePrediction::load(&config.model_path, &device).map_err(
            |e| ScoringError::ModelLoadFailed {
                reason: format!("Failed to load BERT NSP model: {}", e),
            },
        )?;

        let tokenizer = HfPairTokenizer::load(config.tokenizer_path(), config.max_seq_len)?;

        info!(
            model_path = %config.model_path.display(),
            batch_size = config.batch_size,
            max_seq_len = config.max_seq_len,
            "NSP model loaded"
        );

        Self::new(model, tokenizer, config.batch_size)
    }
}
