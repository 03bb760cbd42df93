//! Tokenizer capability and the HuggingFace `tokenizers` backend.
//!
//! Pairs are always encoded jointly so the tokenizer places its boundary
//! tokens between and around the two sequences, and so the type markers
//! distinguish first-sequence from second-sequence tokens.

mod error;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::TokenizerError;

use std::io;
use std::path::Path;

use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

/// Joint encoding of one sequence pair.
///
/// `type_ids[j]` is `0` for tokens originating from the first sequence and
/// `1` for tokens from the second; both vectors have equal length.
#[derive(Debug, Clone)]
pub struct PairEncoding {
    pub input_ids: Vec<u32>,
    pub type_ids: Vec<u32>,
}

/// A tokenizer the scoring core can drive.
pub trait PairTokenizer {
    /// Encodes the two sequences jointly into one token-id/type-id pair.
    fn encode_pair(&self, first: &str, second: &str) -> Result<PairEncoding, TokenizerError>;

    /// The designated padding token id.
    fn pad_token_id(&self) -> u32;
}

/// [`PairTokenizer`] backed by a HuggingFace `tokenizer.json`.
pub struct HfPairTokenizer {
    inner: Tokenizer,
    pad_id: u32,
}

impl std::fmt::Debug for HfPairTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HfPairTokenizer")
            .field("pad_id", &self.pad_id)
            .finish()
    }
}

impl HfPairTokenizer {
    /// Loads a tokenizer from a model directory or explicit `tokenizer.json`
    /// path, with truncation capped at `max_len` tokens.
    ///
    /// Cross-encoder style models have a fixed maximum sequence length, so
    /// joint encodings exceeding `max_len` are truncated to fit.
    pub fn load<P: AsRef<Path>>(path: P, max_len: usize) -> Result<Self, TokenizerError> {
        let mut inner = load_tokenizer(path.as_ref())?;

        let truncation = TruncationParams {
            max_length: max_len,
            ..Default::default()
        };
        inner
            .with_truncation(Some(truncation))
            .map_err(|e| TokenizerError::LoadFailed {
                reason: format!("Failed to configure truncation: {}", e),
            })?;

        let pad_id = resolve_pad_id(&inner);
        debug!(pad_id, max_len, "Tokenizer loaded");

        Ok(Self { inner, pad_id })
    }
}

impl PairTokenizer for HfPairTokenizer {
    fn encode_pair(&self, first: &str, second: &str) -> Result<PairEncoding, TokenizerError> {
        let encoding = self.inner.encode((first, second), true).map_err(|e| {
            TokenizerError::EncodeFailed {
                reason: e.to_string(),
            }
        })?;

        Ok(PairEncoding {
            input_ids: encoding.get_ids().to_vec(),
            type_ids: encoding.get_type_ids().to_vec(),
        })
    }

    fn pad_token_id(&self) -> u32 {
        self.pad_id
    }
}

/// Loads a tokenizer from a model directory or a `tokenizer.json` file path.
fn load_tokenizer(path: &Path) -> Result<Tokenizer, TokenizerError> {
    let tokenizer_path = if path
        .file_name()
        .is_some_and(|name| name == std::ffi::OsStr::new("tokenizer.json"))
    {
        path.to_path_buf()
    } else {
        path.join("tokenizer.json")
    };

    if !tokenizer_path.exists() {
        return Err(TokenizerError::from(io::Error::new(
            io::ErrorKind::NotFound,
            format!("tokenizer.json not found at {}", tokenizer_path.display()),
        )));
    }

    Tokenizer::from_file(&tokenizer_path).map_err(|e| TokenizerError::LoadFailed {
        reason: e.to_string(),
    })
}

/// Resolves the padding id from the tokenizer's padding params, then the
/// vocabulary (`[PAD]`, `<pad>`), defaulting to `0` (the BERT convention).
fn resolve_pad_id(tokenizer: &Tokenizer) -> u32 {
    tokenizer
        .get_padding()
        .map(|params| params.pad_id)
        .or_else(|| tokenizer.token_to_id("[PAD]"))
        .or_else(|| tokenizer.token_to_id("<pad>"))
        .unwrap_or(0)
}
