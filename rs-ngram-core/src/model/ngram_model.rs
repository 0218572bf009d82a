use std::collections::HashMap;

use log::debug;

use super::order_table::OrderTable;
use super::prediction::{rank, Prediction};
use super::tokenizer::{tokenize, END_TOKEN, START_TOKEN};
use super::vocabulary::{TokenId, Vocabulary};
use crate::error::{NGramError, NGramResult};

/// Order used when none is given.
pub const DEFAULT_ORDER: usize = 3;

/// Number of predictions returned when none is requested.
pub const DEFAULT_TOP_K: usize = 5;

/// Word-level n-gram language model.
///
/// The model counts every gram of order 1 to `n` seen during training and
/// predicts the next token of a phrase by backing off from the longest
/// context to the shortest one.
///
/// # Responsibilities
/// - Accumulate gram and context counts over successive `train` calls
/// - Rank next-token candidates for a phrase
/// - Merge with another model of the same order
///
/// # Invariants
/// - `n` is always >= 1
/// - `tables[k - 1]` holds the counts of order `k`, for every k in `1..=n`
/// - Every token id stored in a table is interned in `vocabulary`
///
/// The model is not internally synchronized. Sharing it between threads
/// requires the caller to serialize `train` and `predict`.
#[derive(Clone, Debug)]
pub struct NGramModel {
	/// Maximum gram length.
	n: usize,

	/// One count table per order, built eagerly at construction.
	tables: Vec<OrderTable>,

	/// Every token observed during training, sentinels included.
	vocabulary: Vocabulary,
}

impl Default for NGramModel {
	fn default() -> Self {
		Self {
			n: DEFAULT_ORDER,
			tables: (1..=DEFAULT_ORDER).map(OrderTable::new).collect(),
			vocabulary: Vocabulary::new(),
		}
	}
}

impl NGramModel {
	/// Creates an untrained model of order `n`.
	///
	/// # Errors
	/// Returns an error if `n < 1`.
	pub fn new(n: usize) -> NGramResult<Self> {
		if n < 1 {
			return Err(NGramError::InvalidOrder(n));
		}
		Ok(Self {
			n,
			tables: (1..=n).map(OrderTable::new).collect(),
			vocabulary: Vocabulary::new(),
		})
	}

	/// Returns the maximum gram length `n`.
	pub fn order(&self) -> usize {
		self.n
	}

	/// Returns the interned vocabulary.
	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	/// Returns `true` once at least one `train` call completed.
	///
	/// Every training call adds at least the end sentinel, so an empty
	/// vocabulary means the model was never trained.
	pub fn is_trained(&self) -> bool {
		!self.vocabulary.is_empty()
	}

	fn table(&self, k: usize) -> Option<&OrderTable> {
		k.checked_sub(1).and_then(|index| self.tables.get(index))
	}

	/// Adds a text to the model.
	///
	/// # Behavior
	/// - Tokenizes `text`, then pads it with `n - 1` start sentinels and
	///   a single end sentinel.
	/// - Adds every padded token to the vocabulary.
	/// - For every position and every order `k` that fits, counts the gram
	///   of `k` tokens ending at that position and its context.
	///
	/// # Notes
	/// - Training is cumulative: counts are added, never reset.
	/// - An empty text still contributes the sentinel grams.
	pub fn train(&mut self, text: &str) {
		let tokens = tokenize(text);

		let mut padded: Vec<TokenId> = Vec::with_capacity(tokens.len() + self.n);
		if self.n > 1 {
			let start = self.vocabulary.intern(START_TOKEN);
			padded.resize(self.n - 1, start);
		}
		for token in &tokens {
			padded.push(self.vocabulary.intern(token));
		}
		padded.push(self.vocabulary.intern(END_TOKEN));

		// For each position, every gram ending there
		for i in 0..padded.len() {
			for k in 1..=self.n.min(i + 1) {
				self.tables[k - 1].add_gram(&padded[i + 1 - k..=i]);
			}
		}

		debug!(
			"Trained on {} tokens ({} padded), vocabulary size {}",
			tokens.len(),
			padded.len(),
			self.vocabulary.len()
		);
	}

	/// Predicts the most likely next tokens for `phrase`.
	///
	/// # Behavior
	/// - Tokenizes `phrase` and keeps its last `n - 1` tokens, left-padding
	///   with start sentinels when it is shorter.
	/// - Tries orders `n` down to 1. At order `k` the query context is the
	///   last `k - 1` tokens. The first order whose context was seen
	///   provides all the candidates; lower orders are not consulted.
	/// - Each candidate scores `count(gram) / count(context)`.
	///
	/// # Returns
	/// At most `top_k` predictions sorted by score (highest first), ties
	/// ordered by token text. Empty when the model was never trained.
	pub fn predict(&self, phrase: &str, top_k: usize) -> Vec<Prediction> {
		let context_len = self.n - 1;
		let words = tokenize(phrase);

		// Unknown tokens cannot match any stored context
		let mut context: Vec<Option<TokenId>> = words
			.iter()
			.skip(words.len().saturating_sub(context_len))
			.map(|word| self.vocabulary.id(word))
			.collect();
		if context.len() < context_len {
			let start = self.vocabulary.id(START_TOKEN);
			let mut padded = vec![start; context_len - context.len()];
			padded.append(&mut context);
			context = padded;
		}

		let mut candidates: HashMap<String, f64> = HashMap::new();
		for k in (1..=self.n).rev() {
			let query = &context[context.len() - (k - 1)..];
			let Some(query) = query.iter().copied().collect::<Option<Vec<TokenId>>>() else {
				continue;
			};
			let Some(table) = self.table(k) else {
				continue;
			};
			let Some(total) = table.context_count(&query) else {
				continue;
			};

			for (last, count) in table.continuations(&query) {
				if let Some(token) = self.vocabulary.token(last) {
					*candidates.entry(token.to_owned()).or_insert(0.0) += count as f64 / total as f64;
				}
			}
			debug!("Matched order {} with {} candidates", k, candidates.len());
			break;
		}

		rank(candidates, top_k)
	}

	/// Translates a token sequence into interned ids, if all are known.
	fn ids(&self, tokens: &[&str]) -> Option<Vec<TokenId>> {
		tokens.iter().map(|token| self.vocabulary.id(token)).collect()
	}

	/// Number of times `gram` was observed (0 if never, or if its length
	/// is not an order of this model).
	pub fn gram_count(&self, gram: &[&str]) -> usize {
		match (self.table(gram.len()), self.ids(gram)) {
			(Some(table), Some(ids)) => table.gram_count(&ids),
			_ => 0,
		}
	}

	/// Total occurrences of order-`k` grams starting with `context`.
	///
	/// `context` must hold `k - 1` tokens; 0 is returned otherwise or when
	/// the context was never seen.
	pub fn context_count(&self, k: usize, context: &[&str]) -> usize {
		if context.len() + 1 != k {
			return 0;
		}
		match (self.table(k), self.ids(context)) {
			(Some(table), Some(ids)) => table.context_count(&ids).unwrap_or(0),
			_ => 0,
		}
	}

	/// Lists every order-`k` context with its total, as token text.
	pub fn contexts(&self, k: usize) -> Vec<(Vec<String>, usize)> {
		let Some(table) = self.table(k) else {
			return Vec::new();
		};
		table
			.contexts()
			.map(|(context, count)| {
				let tokens = context
					.iter()
					.filter_map(|id| self.vocabulary.token(*id))
					.map(str::to_owned)
					.collect();
				(tokens, count)
			})
			.collect()
	}

	/// Number of distinct grams stored at order `k`.
	pub fn distinct_grams(&self, k: usize) -> usize {
		self.table(k).map_or(0, OrderTable::len)
	}

	/// Merges another model into this one.
	///
	/// # Notes
	/// - Both models must have the same order `n`.
	/// - Gram and context counts are summed; the vocabularies are united.
	/// - The result matches training both corpora into a single model.
	///
	/// # Errors
	/// Returns an error if the model orders do not match.
	pub fn merge(&mut self, other: &Self) -> NGramResult<()> {
		if self.n != other.n {
			return Err(NGramError::OrderMismatch { expected: self.n, found: other.n });
		}

		let remap: Vec<TokenId> = other
			.vocabulary
			.iter()
			.map(|token| self.vocabulary.intern(token))
			.collect();

		for (table, other_table) in self.tables.iter_mut().zip(&other.tables) {
			table.merge(other_table, &remap)?;
		}

		Ok(())
	}
}
