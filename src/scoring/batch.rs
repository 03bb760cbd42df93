//! Single-batch scoring: joint encoding, padding, masking, forward pass.

use candle_core::{D, Device, IndexOp, Tensor};
use tracing::debug;

use crate::constants::{CONTINUATION_CLASS, TYPE_ID_PAD};
use crate::model::NspModel;
use crate::tokenizer::{PairEncoding, PairTokenizer};

use super::error::ScoringError;

/// One batch of joint encodings stacked into rectangular tensors.
///
/// Every row is right-padded to the batch's longest encoding: token ids with
/// the tokenizer's padding id, type markers with [`TYPE_ID_PAD`], and the
/// attention mask set to `1` exactly where the padded id differs from the
/// padding id.
pub(crate) struct PaddedBatch {
    pub input_ids: Tensor,
    pub attention_mask: Tensor,
    pub token_type_ids: Tensor,
    pub rows: usize,
    pub max_len: usize,
}

impl PaddedBatch {
    pub(crate) fn build(
        encodings: &[PairEncoding],
        pad_id: u32,
        device: &Device,
    ) -> Result<Self, ScoringError> {
        let rows = encodings.len();
        let max_len = encodings
            .iter()
            .map(|e| e.input_ids.len())
            .max()
            .ok_or(ScoringError::EmptyBatch)?;

        let mut ids = Vec::with_capacity(rows * max_len);
        let mut types = Vec::with_capacity(rows * max_len);
        let mut mask = Vec::with_capacity(rows * max_len);

        for encoding in encodings {
            let mut row_ids = encoding.input_ids.clone();
            row_ids.resize(max_len, pad_id);

            let mut row_types = encoding.type_ids.clone();
            row_types.resize(max_len, TYPE_ID_PAD);

            // Mask purely by id: a genuine token sharing the padding id is
            // masked out. Accepted limitation of id-based masking.
            mask.extend(row_ids.iter().map(|&id| u32::from(id != pad_id)));
            ids.append(&mut row_ids);
            types.append(&mut row_types);
        }

        Ok(Self {
            input_ids: Tensor::from_vec(ids, (rows, max_len), device)?,
            attention_mask: Tensor::from_vec(mask, (rows, max_len), device)?,
            token_type_ids: Tensor::from_vec(types, (rows, max_len), device)?,
            rows,
            max_len,
        })
    }
}

/// Scores one batch of sequence pairs for continuation probability.
///
/// Encodes each pair jointly, stacks the encodings into a [`PaddedBatch`],
/// runs one forward pass, and softmaxes the two NSP logits per row, returning
/// the continuation-class probability for each pair in input order.
///
/// Tokenizer and model failures propagate unmodified; no recovery happens
/// here.
pub fn score_batch<M, T>(
    first: &[&str],
    second: &[&str],
    model: &M,
    tokenizer: &T,
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
        return Err(ScoringError::EmptyBatch);
    }

    let encodings = first
        .iter()
        .zip(second)
        .map(|(a, b)| tokenizer.encode_pair(a, b))
        .collect::<Result<Vec<_>, _>>()?;

    let batch = PaddedBatch::build(&encodings, tokenizer.pad_token_id(), model.device())?;

    debug!(
        rows = batch.rows,
        max_len = batch.max_len,
        "Scoring batch"
    );

    let logits = model.forward(&batch.input_ids, &batch.attention_mask, &batch.token_type_ids)?;

    let probs = candle_nn::ops::softmax(&logits, D::Minus1)?;
    let scores = probs.i((.., CONTINUATION_CLASS))?.to_vec1::<f32>()?;

    Ok(scores)
}
