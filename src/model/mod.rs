//! Model capability and the candle-backed BERT NSP backend.
//!
//! The scoring core only sees [`NspModel`]; the concrete
//! [`BertForNextSentencePrediction`] is one implementation of it.

/// BERT with the next-sentence-prediction head.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use bert::BertForNextSentencePrediction;
pub use device::select_device;
pub use error::ModelError;

use candle_core::{Device, Tensor};

/// A next-sentence-prediction model the scoring core can drive.
///
/// Implementations consume three `(rows, max_len)` tensors and produce a
/// `(rows, 2)` logit tensor, where column [`CONTINUATION_CLASS`] holds the
/// "second sequence follows the first" class.
///
/// [`CONTINUATION_CLASS`]: crate::constants::CONTINUATION_CLASS
pub trait NspModel {
    /// Places the model in evaluation mode.
    ///
    /// The batch driver calls this exactly once per scoring run, before the
    /// first batch; it is never repeated per batch.
    fn set_eval(&self);

    /// Runs one forward pass over a padded batch.
    fn forward(
        &self,
        input_ids: &Tensor,
        attention_mask: &Tensor,
        token_type_ids: &Tensor,
    ) -> Result<Tensor, ModelError>;

    /// Device input tensors must be materialized on.
    fn device(&self) -> &Device;
}
