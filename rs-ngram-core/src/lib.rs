//! Word-level n-gram language model for next-word prediction.
//!
//! This crate provides:
//! - A deterministic word/punctuation tokenizer
//! - An n-gram model counting every order from 1 to N
//! - Backoff prediction ranking the most likely next tokens
//! - Corpus loading helpers and parallel folder training
//!
//! The model itself is single-owner and synchronous. Callers sharing it
//! between threads must serialize access themselves.

/// Tokenizer, n-gram model, prediction ranking and folder training.
pub mod model;

/// Corpus I/O utilities (dataset loading, file listing, path helpers).
pub mod io;

/// Error type shared by the crate.
pub mod error;

pub use error::{NGramError, NGramResult};
pub use model::ngram_model::{NGramModel, DEFAULT_ORDER, DEFAULT_TOP_K};
pub use model::prediction::Prediction;
pub use model::tokenizer::{tokenize, END_TOKEN, START_TOKEN};
pub use model::trainer::train_folder;
