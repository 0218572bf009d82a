use thiserror::Error;

/// Errors raised by model construction, merging and corpus loading.
///
/// Training and prediction never fail; only the surrounding glue does.
#[derive(Error, Debug)]
pub enum NGramError {
	#[error("Invalid order: n must be >= 1, got {0}")]
	InvalidOrder(usize),

	#[error("Order mismatch: self={expected}, other={found}")]
	OrderMismatch { expected: usize, found: usize },

	#[error("IO Error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Invalid path: {0}")]
	InvalidPath(String),

	#[error("Unknown corpus: {0}")]
	UnknownCorpus(String),

	#[error("Training worker failed: {0}")]
	Worker(String),
}

pub type NGramResult<T> = Result<T, NGramError>;
