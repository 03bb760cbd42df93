//! Batched next-sentence-prediction scoring for BERT-style models.
//!
//! Given parallel lists of sentence pairs, this crate computes the
//! model-assigned probability that each second sentence is a plausible
//! continuation of the first. Inputs of arbitrary length are partitioned
//! into fixed-size batches to bound peak memory; per-batch results are
//! stitched back into one vector in input order.
//!
//! # Public API Surface
//!
//! - [`score_all`] / [`score_batch`] — the scoring core, generic over the
//!   [`NspModel`] and [`PairTokenizer`] capability traits
//! - [`NspScorer`], [`NspConfig`] — convenience wrapper bundling a loaded
//!   model, tokenizer, and batch size
//! - [`BertForNextSentencePrediction`] — candle-backed model implementation
//! - [`HfPairTokenizer`] — HuggingFace `tokenizers`-backed implementation
//! - [`ScoringError`], [`ModelError`], [`TokenizerError`] — failure taxonomy
//!
//! # Example
//!
//! ```no_run
//! use nextsent::{NspConfig, NspScorer};
//!
//! let scorer = NspScorer::load(NspConfig::new("/models/bert-nsp").with_batch_size(8))?;
//! let scores = scorer.score_pairs(
//!     &["The cat sat on the mat."],
//!     &["It was tired."],
//! )?;
//! assert_eq!(scores.len(), 1);
//! # Ok::<(), nextsent::ScoringError>(())
//! ```
//!
//! Deterministic mock backends for testing without model files are available
//! behind the `mock` feature.

pub mod constants;
pub mod model;
pub mod scoring;
pub mod tokenizer;

pub use constants::{CONTINUATION_CLASS, DEFAULT_BATCH_SIZE, DEFAULT_MAX_SEQ_LEN};
pub use model::{BertForNextSentencePrediction, ModelError, NspModel, select_device};
pub use scoring::{NspConfig, NspScorer, ScoringError, score_all, score_batch};
pub use tokenizer::{HfPairTokenizer, PairEncoding, PairTokenizer, TokenizerError};

#[cfg(any(test, feature = "mock"))]
pub use model::mock::StubNspModel;
#[cfg(any(test, feature = "mock"))]
pub use tokenizer::mock::StubPairTokenizer;
