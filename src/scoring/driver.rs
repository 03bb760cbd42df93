//! Batch driver: partitions the input, scores batch by batch, reassembles.

use tracing::{debug, info};

use crate::model::NspModel;
use crate::tokenizer::PairTokenizer;

use super::batch::score_batch;
use super::error::ScoringError;

/// Scores every sequence pair, `batch_size` pairs per forward pass.
///
/// The input lists are partitioned into contiguous chunks of `batch_size`
/// (the final chunk may be shorter) and scored strictly in order; per-batch
/// score vectors are concatenated, so output index `i` always corresponds to
/// input pair `i`. Scores do not depend on `batch_size` because each row is
/// scored independently of its batch mates; only peak memory and the number
/// of forward passes change.
///
/// Puts the model in evaluation mode exactly once, before the first batch.
///
/// All-or-nothing: the first failing batch aborts the call and scores from
/// earlier batches are discarded.
pub fn score_all<M, T>(
    first: &[&str],
    second: &[&str],
    model: &M,
    tokenizer: &T,
    batch_size: usize,
) -> Result<Vec<f32>, ScoringError>
where
    M: NspModel,
    T: PairTokenizer,
{
    if first.len() != second.len() {
        return Err(ScoringError::InputLengthMismatch {
            first: first.len(),
            second: second.len(),
        });
    }
    if first.is_empty() {
        return Err(ScoringError::EmptyInput);
    }
    if batch_size == 0 {
        return Err(ScoringError::InvalidBatchSize { got: 0 });
    }

    model.set_eval();

    let mut scores = Vec::with_capacity(first.len());
    for (index, (first_chunk, second_chunk)) in first
        .chunks(batch_size)
        .zip(second.chunks(batch_size))
        .enumerate()
    {
        debug!(batch = index, rows = first_chunk.len(), "Dispatching batch");
        scores.extend(score_batch(first_chunk, second_chunk, model, tokenizer)?);
    }

    info!(
        pairs = scores.len(),
        batch_size, "Scoring run complete"
    );

    Ok(scores)
}
