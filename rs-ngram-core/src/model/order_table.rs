use std::collections::HashMap;

use super::vocabulary::TokenId;
use crate::error::{NGramError, NGramResult};

/// Count tables for a single order `k`.
///
/// Holds both `NGramCounts[k]` (every observed gram of exactly `k` tokens)
/// and `ContextCounts[k]` (the total number of grams sharing each
/// `k-1` token prefix).
///
/// ## Invariants
/// - Every key of `grams` has length `k`; every key of `contexts` has
///   length `k-1`
/// - For each context, `contexts[context]` equals the sum of the counts
///   of all grams starting with it
/// - All counts are strictly positive
#[derive(Clone, Debug)]
pub struct OrderTable {
	/// Order of the table (number of tokens per gram).
	k: usize,
	/// Gram occurrences, keyed by interned token sequence.
	grams: HashMap<Vec<TokenId>, usize>,
	/// Gram occurrences grouped by their leading `k-1` tokens.
	contexts: HashMap<Vec<TokenId>, usize>,
}

impl OrderTable {
	/// Creates an empty table of order `k`.
	pub fn new(k: usize) -> Self {
		Self {
			k,
			grams: HashMap::new(),
			contexts: HashMap::new(),
		}
	}

	/// Records one occurrence of `gram` and of its context.
	pub fn add_gram(&mut self, gram: &[TokenId]) {
		debug_assert_eq!(gram.len(), self.k);
		self.add_gram_count(gram, 1);
	}

	fn add_gram_count(&mut self, gram: &[TokenId], count: usize) {
		let context = &gram[..gram.len() - 1];
		*self.grams.entry(gram.to_vec()).or_insert(0) += count;
		*self.contexts.entry(context.to_vec()).or_insert(0) += count;
	}

	/// Number of times `gram` was observed (0 if never).
	pub fn gram_count(&self, gram: &[TokenId]) -> usize {
		self.grams.get(gram).copied().unwrap_or(0)
	}

	/// Total gram occurrences sharing `context`, or `None` if unseen.
	pub fn context_count(&self, context: &[TokenId]) -> Option<usize> {
		self.contexts.get(context).copied()
	}

	/// Iterates over every context of this order with its total.
	pub fn contexts(&self) -> impl Iterator<Item = (&[TokenId], usize)> {
		self.contexts.iter().map(|(context, count)| (context.as_slice(), *count))
	}

	/// Number of distinct grams stored at this order.
	pub fn len(&self) -> usize {
		self.grams.len()
	}

	/// Scans every gram and yields `(last token, count)` for those whose
	/// leading `k-1` tokens equal `context`.
	///
	/// This is a linear scan over all grams of the order.
	pub fn continuations<'a>(
		&'a self,
		context: &'a [TokenId],
	) -> impl Iterator<Item = (TokenId, usize)> + 'a {
		self.grams.iter().filter_map(move |(gram, count)| {
			let (last, prefix) = gram.split_last()?;
			(prefix == context).then_some((*last, *count))
		})
	}

	/// Adds the counts of `other` into this table.
	///
	/// `remap[id]` translates a token id of `other`'s vocabulary into the
	/// matching id of this table's vocabulary.
	///
	/// # Errors
	/// Returns an error if the orders differ.
	pub fn merge(&mut self, other: &Self, remap: &[TokenId]) -> NGramResult<()> {
		if self.k != other.k {
			return Err(NGramError::OrderMismatch { expected: self.k, found: other.k });
		}

		for (gram, count) in &other.grams {
			let translated: Vec<TokenId> = gram.iter().map(|id| remap[*id as usize]).collect();
			self.add_gram_count(&translated, *count);
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn context_totals_follow_grams() {
		let mut table = OrderTable::new(2);
		table.add_gram(&[0, 1]);
		table.add_gram(&[0, 2]);
		table.add_gram(&[0, 1]);

		assert_eq!(table.gram_count(&[0, 1]), 2);
		assert_eq!(table.gram_count(&[0, 2]), 1);
		assert_eq!(table.context_count(&[0]), Some(3));
		assert_eq!(table.context_count(&[1]), None);
	}

	#[test]
	fn continuations_only_match_context() {
		let mut table = OrderTable::new(2);
		table.add_gram(&[0, 1]);
		table.add_gram(&[2, 3]);

		let found: Vec<_> = table.continuations(&[0]).collect();
		assert_eq!(found, vec![(1, 1)]);
	}

	#[test]
	fn unigram_context_is_empty() {
		let mut table = OrderTable::new(1);
		table.add_gram(&[5]);
		table.add_gram(&[6]);
		assert_eq!(table.context_count(&[]), Some(2));
		assert_eq!(table.continuations(&[]).count(), 2);
	}

	#[test]
	fn merge_remaps_ids() {
		let mut left = OrderTable::new(2);
		left.add_gram(&[0, 1]);

		let mut right = OrderTable::new(2);
		right.add_gram(&[1, 0]);

		// right's 0 is left's 1 and vice versa
		left.merge(&right, &[1, 0]).unwrap();
		assert_eq!(left.gram_count(&[0, 1]), 2);
		assert_eq!(left.context_count(&[0]), Some(2));
	}

	#[test]
	fn merge_rejects_other_order() {
		let mut left = OrderTable::new(2);
		let right = OrderTable::new(3);
		assert!(matches!(
			left.merge(&right, &[]),
			Err(NGramError::OrderMismatch { expected: 2, found: 3 })
		));
	}
}
