//! Batched continuation scoring.
//!
//! [`score_batch`] scores one batch of sequence pairs; [`score_all`]
//! partitions arbitrary-length inputs into batches, scores them in order,
//! and concatenates the results. [`NspScorer`] bundles a model, a tokenizer,
//! and a batch size behind one call.

mod batch;
/// Scorer configuration.
pub mod config;
mod driver;
mod error;
mod scorer;

#[cfg(test)]
mod tests;

pub use batch::score_batch;
pub use config::NspConfig;
pub use driver::score_all;
pub use error::ScoringError;
pub use scorer::NspScorer;
