//! Query rewriting strategies and the relevance-tiered dispatcher that picks between them.

pub mod broaden;
pub mod focus;
pub mod tweak;

pub use broaden::broaden_query;
pub use focus::focus_query_based_on_results;
pub use tweak::tweak_query;

use qrefine_domain::SearchResult;

/// Lower relevance bounds, highest first. The first tier whose bound the relevance meets wins.
pub const RELEVANCE_TIERS: [(f32, RefinementStrategy); 2] =
	[(0.7, RefinementStrategy::Tweak), (0.3, RefinementStrategy::Focus)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefinementStrategy {
	Broaden,
	Focus,
	Tweak,
}
impl RefinementStrategy {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Broaden => "broaden",
			Self::Focus => "focus",
			Self::Tweak => "tweak",
		}
	}

	pub fn apply(self, query: &str, results: &[SearchResult]) -> String {
		match self {
			Self::Broaden => broaden_query(query),
			Self::Focus => focus_query_based_on_results(query, results),
			Self::Tweak => tweak_query(query, results),
		}
	}
}

/// Picks the rewrite for a relevance level. Anything below every tier, NaN included, broadens.
pub fn select_strategy(relevance: f32) -> RefinementStrategy {
	RELEVANCE_TIERS
		.iter()
		.find(|(lower, _)| relevance >= *lower)
		.map(|(_, strategy)| *strategy)
		.unwrap_or(RefinementStrategy::Broaden)
}

pub fn refine_query(query: &str, results: &[SearchResult], relevance: f32) -> String {
	select_strategy(relevance).apply(query, results)
}

/// Appends `terms` after the query, separated by a single space.
fn append_terms(query: &str, terms: &str) -> String {
	let query = query.trim_end();

	if query.is_empty() { terms.to_string() } else { format!("{query} {terms}") }
}

#[cfg(test)]
mod tests {
	use qrefine_domain::{FileChunk, ResultPayload};

	use super::*;

	fn located(filepath: &str, content: &str, score: f32) -> SearchResult {
		SearchResult::new(
			"id",
			score,
			ResultPayload::FileChunk(FileChunk {
				filepath: filepath.to_string(),
				content_chunk: content.to_string(),
				..FileChunk::default()
			}),
		)
	}

	#[test]
	fn tiers_are_inclusive_at_their_lower_bound() {
		assert_eq!(select_strategy(0.0), RefinementStrategy::Broaden);
		assert_eq!(select_strategy(0.299), RefinementStrategy::Broaden);
		assert_eq!(select_strategy(0.3), RefinementStrategy::Focus);
		assert_eq!(select_strategy(0.699), RefinementStrategy::Focus);
		assert_eq!(select_strategy(0.7), RefinementStrategy::Tweak);
		assert_eq!(select_strategy(1.0), RefinementStrategy::Tweak);
	}

	#[test]
	fn non_finite_relevance_broadens() {
		assert_eq!(select_strategy(f32::NAN), RefinementStrategy::Broaden);
		assert_eq!(select_strategy(f32::NEG_INFINITY), RefinementStrategy::Broaden);
	}

	#[test]
	fn refine_routes_to_the_selected_strategy() {
		let results = vec![located("src/auth/login.ts", "export function validateToken", 0.5)];

		assert_eq!(refine_query("login.ts only", &results, 0.1), broaden_query("login.ts only"));
		assert_eq!(
			refine_query("login", &results, 0.5),
			focus_query_based_on_results("login", &results)
		);
		assert_eq!(refine_query("login", &results, 0.9), tweak_query("login", &results));
	}

	#[test]
	fn appends_with_a_single_separator() {
		assert_eq!(append_terms("search login ", "ts"), "search login ts");
		assert_eq!(append_terms("", "ts"), "ts");
	}
}
