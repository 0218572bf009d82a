/// Start-of-sequence sentinel, used to left-pad training text and queries.
pub const START_TOKEN: &str = "<s>";

/// End-of-sequence sentinel, appended once per training call.
pub const END_TOKEN: &str = "</s>";

/// Punctuation marks that always become tokens of their own.
pub const PUNCTUATION: [char; 8] = ['.', ',', '!', '?', ';', ':', '(', ')'];

/// Returns `true` if `c` is split out as a standalone token.
fn is_punctuation(c: char) -> bool {
	PUNCTUATION.contains(&c)
}

/// Returns `true` if `c` separates tokens.
///
/// Besides Unicode whitespace, the ASCII information separators
/// (U+001C to U+001F) also count as separators.
fn is_separator(c: char) -> bool {
	c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Splits raw text into lowercase word and punctuation tokens.
///
/// # Behavior
/// - Lowercases the whole input.
/// - Every mark of `PUNCTUATION` becomes its own token, even when glued
///   to a word (`"end."` → `["end", "."]`).
/// - Any run of separators (see `is_separator`) splits tokens; leading
///   and trailing separators are ignored.
///
/// Empty or whitespace-only input yields an empty sequence. The function
/// is pure and accepts any string.
pub fn tokenize(text: &str) -> Vec<String> {
	let lowered = text.to_lowercase();
	let mut tokens = Vec::new();
	let mut current = String::new();

	for c in lowered.chars() {
		if is_separator(c) {
			flush(&mut current, &mut tokens);
		} else if is_punctuation(c) {
			flush(&mut current, &mut tokens);
			tokens.push(c.to_string());
		} else {
			current.push(c);
		}
	}
	flush(&mut current, &mut tokens);

	tokens
}

/// Moves the pending word (if any) into `tokens`.
fn flush(current: &mut String, tokens: &mut Vec<String>) {
	if !current.is_empty() {
		tokens.push(std::mem::take(current));
	}
}
