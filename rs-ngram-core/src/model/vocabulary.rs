use std::collections::HashMap;

/// Interned identifier of a token.
pub type TokenId = u32;

/// Interning table mapping tokens to small integer identifiers.
///
/// Identifiers are assigned densely in first-seen order, so `TokenId`
/// doubles as an index into `tokens`.
///
/// # Invariants
/// - `ids` and `tokens` always describe the same bijection
/// - A token is never re-assigned a different id
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
	ids: HashMap<String, TokenId>,
	tokens: Vec<String>,
}

impl Vocabulary {
	/// Creates an empty vocabulary.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the id of `token`, assigning a new one if it was never seen.
	pub fn intern(&mut self, token: &str) -> TokenId {
		if let Some(&id) = self.ids.get(token) {
			return id;
		}
		let id = self.tokens.len() as TokenId;
		self.tokens.push(token.to_owned());
		self.ids.insert(token.to_owned(), id);
		id
	}

	/// Looks up the id of an already interned token.
	pub fn id(&self, token: &str) -> Option<TokenId> {
		self.ids.get(token).copied()
	}

	/// Resolves an id back to its token text.
	pub fn token(&self, id: TokenId) -> Option<&str> {
		self.tokens.get(id as usize).map(String::as_str)
	}

	/// Returns `true` if `token` was observed during training.
	pub fn contains(&self, token: &str) -> bool {
		self.ids.contains_key(token)
	}

	/// Number of distinct tokens (sentinels included).
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Iterates over all tokens in id order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.tokens.iter().map(String::as_str)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn same_token_same_id() {
		let mut vocabulary = Vocabulary::new();
		let a = vocabulary.intern("cat");
		let b = vocabulary.intern("sat");
		assert_ne!(a, b);
		assert_eq!(vocabulary.intern("cat"), a);
		assert_eq!(vocabulary.len(), 2);
	}

	#[test]
	fn resolves_both_ways() {
		let mut vocabulary = Vocabulary::new();
		let id = vocabulary.intern("</s>");
		assert_eq!(vocabulary.token(id), Some("</s>"));
		assert_eq!(vocabulary.id("</s>"), Some(id));
		assert_eq!(vocabulary.id("missing"), None);
		assert_eq!(vocabulary.token(42), None);
	}
}
