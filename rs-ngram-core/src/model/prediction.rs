use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A candidate next token with its relative-frequency score.
///
/// The score is `count(gram) / count(context)` at the order that
/// produced the match. Scores of all candidates at that order sum to 1.0
/// before truncation; they are not calibrated probabilities.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Prediction {
	pub token: String,
	pub score: f64,
}

impl Prediction {
	pub fn new(token: impl Into<String>, score: f64) -> Self {
		Self { token: token.into(), score }
	}
}

/// Orders candidates by score (highest first), then by token text.
fn compare(a: &Prediction, b: &Prediction) -> Ordering {
	b.score.total_cmp(&a.score).then_with(|| a.token.cmp(&b.token))
}

/// Turns an accumulated candidate map into a ranked list of at most
/// `top_k` predictions.
///
/// Ties on score are broken by ascending token text, so the result does
/// not depend on map iteration or training order.
pub fn rank(candidates: HashMap<String, f64>, top_k: usize) -> Vec<Prediction> {
	let mut ranked: Vec<Prediction> = candidates
		.into_iter()
		.map(|(token, score)| Prediction { token, score })
		.collect();

	ranked.sort_by(compare);
	ranked.truncate(top_k);
	ranked
}
