//! Deterministic stand-in tokenizer for tests and examples.

use std::hash::{DefaultHasher, Hash, Hasher};

use crate::tokenizer::{PairEncoding, PairTokenizer, TokenizerError};

const CLS_ID: u32 = 101;
const SEP_ID: u32 = 102;
const PAD_ID: u32 = 0;

/// Whitespace tokenizer double with BERT-shaped pair encodings.
///
/// Produces `[CLS] first [SEP] second [SEP]` with type markers `0` through
/// the first separator and `1` afterwards. Word ids are hash-derived and
/// start at 1000, so they never collide with the padding id or the boundary
/// tokens.
pub struct StubPairTokenizer {
    fail: bool,
}

impl StubPairTokenizer {
    pub fn new() -> Self {
        Self { fail: false }
    }

    /// A stub whose encoding always fails, for error-propagation tests.
    pub fn failing() -> Self {
        Self { fail: true }
    }

    fn word_id(word: &str) -> u32 {
        let mut hasher = DefaultHasher::new();
        word.hash(&mut hasher);
        1000 + (hasher.finish() % 20_000) as u32
    }
}

impl Default for StubPairTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PairTokenizer for StubPairTokenizer {
    fn encode_pair(&self, first: &str, second: &str) -> Result<PairEncoding, TokenizerError> {
        if self.fail {
            return Err(TokenizerError::EncodeFailed {
                reason: "stub tokenizer armed to fail".to_string(),
            });
        }

        let mut input_ids = vec![CLS_ID];
        let mut type_ids = vec![0];

        for word in first.split_whitespace() {
            input_ids.push(Self::word_id(word));
            type_ids.push(0);
        }
        input_ids.push(SEP_ID);
        type_ids.push(0);

        for word in second.split_whitespace() {
            input_ids.push(Self::word_id(word));
            type_ids.push(1);
        }
        input_ids.push(SEP_ID);
        type_ids.push(1);

        Ok(PairEncoding {
            input_ids,
            type_ids,
        })
    }

    fn pad_token_id(&self) -> u32 {
        PAD_ID
    }
}
