//! Top-level module for the n-gram prediction system.
//!
//! This module provides:
//! - Text normalization into tokens (`tokenizer`)
//! - Token interning (`Vocabulary`)
//! - Per-order count tables (`OrderTable`)
//! - The backoff model itself (`NGramModel`)
//! - Ranked prediction output (`Prediction`)
//! - Parallel training from a corpus folder (`trainer`)

/// Word and punctuation tokenizer, plus the sentinel tokens.
pub mod tokenizer;

/// Token-to-identifier interning table owned by a model.
pub mod vocabulary;

/// Gram and context counts for a single order.
///
/// Not exposed publicly; reached through `NGramModel`.
mod order_table;

/// Multi-order n-gram model (`n >= 1`).
///
/// Handles cumulative training, backoff prediction and model merging.
pub mod ngram_model;

/// Prediction result type and candidate ranking.
pub mod prediction;

/// Builds a model from a folder of corpus files using worker threads.
pub mod trainer;
