use std::collections::HashSet;

use crate::text;

/// Common words that never carry search intent on their own.
pub const STOPWORDS: &[&str] = &[
	"a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have", "if",
	"in", "into", "is", "it", "its", "not", "of", "on", "or", "so", "such", "that", "the",
	"their", "then", "there", "these", "they", "this", "to", "was", "were", "will", "with",
];

/// Splits normalized text into lowercase keywords, dropping stopwords and duplicates.
///
/// The first occurrence of every keyword decides its position.
pub fn extract_keywords(input: &str) -> Vec<String> {
	let normalized = text::normalize(input);
	let mut out = Vec::new();
	let mut seen = HashSet::new();

	for token in split_words(&normalized) {
		let token = token.to_lowercase();

		if is_stopword(&token) {
			continue;
		}
		if seen.insert(token.clone()) {
			out.push(token);
		}
	}

	out
}

/// Lowercase word tokens of a query, stopwords included.
pub fn query_tokens(query: &str) -> HashSet<String> {
	split_words(query).map(str::to_lowercase).collect()
}

pub fn is_stopword(token: &str) -> bool {
	STOPWORDS.contains(&token)
}

fn split_words(text: &str) -> impl Iterator<Item = &str> {
	text.split(|ch: char| !(ch.is_alphanumeric() || ch == '_')).filter(|token| !token.is_empty())
}
