//! Cross-cutting, shared constants.
//!
//! Defaults mirror the conventions of HuggingFace BERT NSP checkpoints;
//! prefer deriving secondary values from these to avoid drift.

/// Number of pairs scored per forward pass when no batch size is configured.
pub const DEFAULT_BATCH_SIZE: usize = 1;

/// Maximum token length a joint encoding is truncated to.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Logit column holding the "second sequence follows the first" class.
///
/// HF BERT NSP heads put "is next" at label 0 and "not next" at label 1.
pub const CONTINUATION_CLASS: usize = 0;

/// Type marker assigned to padding positions.
///
/// Padding counts as second-sequence type, matching the tokenizer's own
/// padding convention for pair encodings.
pub const TYPE_ID_PAD: u32 = 1;

/// Number of output classes of an NSP head.
pub const NSP_CLASSES: usize = 2;
