//! Deterministic stand-in model for tests and examples.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use candle_core::{Device, Tensor};

use crate::model::{ModelError, NspModel};

/// NSP model double producing logits derived only from each row's unmasked
/// tokens.
///
/// Because masked (padding) positions never influence a row's logits, scores
/// are invariant to batch composition, which is exactly the property the
/// batch driver tests rely on. The stub also records how it was driven:
/// `set_eval` invocations, forward passes, and the row count of every batch.
pub struct StubNspModel {
    device: Device,
    fail: bool,
    eval_calls: AtomicUsize,
    batch_rows: Mutex<Vec<usize>>,
}

impl StubNspModel {
    pub fn new() -> Self {
        Self {
            device: Device::Cpu,
            fail: false,
            eval_calls: AtomicUsize::new(0),
            batch_rows: Mutex::new(Vec::new()),
        }
    }

    /// A stub whose forward pass always fails, for error-propagation tests.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Number of times `set_eval` was invoked.
    pub fn eval_calls(&self) -> usize {
        self.eval_calls.load(Ordering::SeqCst)
    }

    /// Number of forward passes run so far.
    pub fn forward_calls(&self) -> usize {
        self.batch_rows.lock().unwrap().len()
    }

    /// Row count of each forward pass, in invocation order.
    pub fn batch_rows(&self) -> Vec<usize> {
        self.batch_rows.lock().unwrap().clone()
    }

    fn row_logits(ids: &[u32], mask: &[u32]) -> (f32, f32) {
        let mut hasher = DefaultHasher::new();
        for (id, m) in ids.iter().zip(mask) {
            if *m != 0 {
                id.hash(&mut hasher);
            }
        }
        let seed = hasher.finish();

        // Two logits in [-2, 2], stable for a given unmasked token sequence.
        let next = (seed % 1000) as f32 / 250.0 - 2.0;
        let not_next = ((seed / 1000) % 1000) as f32 / 250.0 - 2.0;
        (next, not_next)
    }
}

impl Default for StubNspModel {
    fn default() -> Self {
        Self::new()
    }
}

impl NspModel for StubNspModel {
    fn set_eval(&self) {
        self.eval_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn forward(
        &self,
        input_ids: &Tensor,
        attention_mask: &Tensor,
        _token_type_ids: &Tensor,
    ) -> Result<Tensor, ModelError> {
        if self.fail {
            return Err(ModelError::InferenceFailed {
                reason: "stub model armed to fail".to_string(),
            });
        }

        let ids = input_ids.to_vec2::<u32>()?;
        let mask = attention_mask.to_vec2::<u32>()?;

        let rows = ids.len();
        let mut logits = Vec::with_capacity(rows * 2);
        for (row_ids, row_mask) in ids.iter().zip(&mask) {
            let (next, not_next) = Self::row_logits(row_ids, row_mask);
            logits.push(next);
            logits.push(not_next);
        }

        self.batch_rows.lock().unwrap().push(rows);

        Ok(Tensor::from_vec(logits, (rows, 2), &self.device)?)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}
