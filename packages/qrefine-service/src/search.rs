use serde::{Deserialize, Serialize};

use qrefine_domain::{SearchQuery, SearchResult, top_relevance};

use crate::{Error, RefinementService, Result, refine::RefinementStrategy, select_strategy};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRefinementRequest {
	pub query: String,
	/// Restricts every search of the loop to these file locations when non-empty.
	#[serde(default)]
	pub filepaths: Vec<String>,
	pub limit: Option<u32>,
	pub max_refinements: Option<u32>,
	pub relevance_threshold: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRefinementResponse {
	/// Results of the final search, best first.
	pub results: Vec<SearchResult>,
	/// Query that produced `results`.
	pub refined_query: String,
	pub relevance_score: f32,
	pub refinements: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefinementState {
	pub current_query: String,
	pub iterations_used: u32,
	pub last_relevance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefinementLimits {
	pub max_refinements: u32,
	pub relevance_threshold: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
	/// Search again with the rewritten query.
	Continue { state: RefinementState, strategy: RefinementStrategy },
	/// The last search is final.
	Done(RefinementState),
}

impl SearchRefinementRequest {
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			query: query.into(),
			filepaths: Vec::new(),
			limit: None,
			max_refinements: None,
			relevance_threshold: None,
		}
	}
}

impl RefinementState {
	pub fn new(query: impl Into<String>) -> Self {
		Self { current_query: query.into(), iterations_used: 0, last_relevance: 0.0 }
	}
}

/// Advances the loop with the results of the search for `state.current_query`.
///
/// Stops when the relevance reaches the threshold (inclusive) or the refinement budget is spent.
/// Otherwise the strategy for the observed relevance rewrites the query.
pub fn step(state: RefinementState, results: &[SearchResult], limits: &RefinementLimits) -> Step {
	let relevance = top_relevance(results);

	if relevance >= limits.relevance_threshold || state.iterations_used >= limits.max_refinements {
		return Step::Done(RefinementState { last_relevance: relevance, ..state });
	}

	let strategy = select_strategy(relevance);
	let current_query = strategy.apply(&state.current_query, results);

	Step::Continue {
		state: RefinementState {
			current_query,
			iterations_used: state.iterations_used + 1,
			last_relevance: relevance,
		},
		strategy,
	}
}

impl RefinementService {
	/// Searches, then rewrites and re-searches until the results are relevant enough or the
	/// refinement budget runs out.
	///
	/// Embedding and backend failures abort the whole call.
	pub async fn search_with_refinement(
		&self,
		req: SearchRefinementRequest,
	) -> Result<SearchRefinementResponse> {
		let search_cfg = &self.cfg.search;
		let collection = self.cfg.storage.qdrant.collection.as_str();
		let limits = RefinementLimits {
			max_refinements: req.max_refinements.unwrap_or(search_cfg.max_refinement_iterations),
			relevance_threshold: req
				.relevance_threshold
				.unwrap_or(search_cfg.default_relevance_threshold),
		};
		let filepaths = req
			.filepaths
			.into_iter()
			.map(|filepath| filepath.trim().to_string())
			.filter(|filepath| !filepath.is_empty())
			.collect();
		let mut query = SearchQuery {
			vector: Vec::new(),
			limit: req.limit.unwrap_or(search_cfg.default_limit),
			filepaths,
		};
		let mut state = RefinementState::new(req.query);

		loop {
			query.vector = self.embed_single_query(&state.current_query).await?;

			let results = self.backend.search(collection, &query).await?;

			if let Some(best) = results.first()
				&& !best.score.is_finite()
			{
				tracing::warn!(result_id = %best.id, "Search backend returned a non-finite score.");
			}

			match step(state, &results, &limits) {
				Step::Continue { state: next, strategy } => {
					tracing::debug!(
						iteration = next.iterations_used,
						relevance = next.last_relevance,
						strategy = strategy.as_str(),
						refined_query = %next.current_query,
						"Refining search query."
					);

					state = next;
				},
				Step::Done(done) => {
					tracing::info!(
						refinements = done.iterations_used,
						relevance_score = done.last_relevance,
						results = results.len(),
						"Completed search with {} refinements.",
						done.iterations_used
					);

					return Ok(SearchRefinementResponse {
						results,
						refined_query: done.current_query,
						relevance_score: done.last_relevance,
						refinements: done.iterations_used,
					});
				},
			}
		}
	}

	async fn embed_single_query(&self, query: &str) -> Result<Vec<f32>> {
		let embeddings = self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, std::slice::from_ref(&query.to_string()))
			.await?;
		let query_vec = embeddings.into_iter().next().ok_or_else(|| Error::Provider {
			message: "Embedding provider returned no vectors.".to_string(),
		})?;

		if query_vec.len() != self.cfg.storage.qdrant.vector_dim as usize {
			return Err(Error::Provider {
				message: "Embedding vector dimension mismatch.".to_string(),
			});
		}

		Ok(query_vec)
	}
}

#[cfg(test)]
mod tests {
	use qrefine_domain::{FileChunk, ResultPayload};

	use super::*;
	use crate::refine::{broaden_query, focus_query_based_on_results};

	const LIMITS: RefinementLimits =
		RefinementLimits { max_refinements: 2, relevance_threshold: 0.75 };

	fn scored(score: f32) -> Vec<SearchResult> {
		vec![SearchResult::new(
			"chunk",
			score,
			ResultPayload::FileChunk(FileChunk {
				filepath: "src/auth/login.ts".to_string(),
				content_chunk: "export function validateToken".to_string(),
				..FileChunk::default()
			}),
		)]
	}

	#[test]
	fn stops_at_the_threshold() {
		let Step::Done(done) = step(RefinementState::new("login"), &scored(0.75), &LIMITS) else {
			panic!("Expected the loop to stop at the threshold.");
		};

		assert_eq!(done.current_query, "login");
		assert_eq!(done.iterations_used, 0);
		assert_eq!(done.last_relevance, 0.75);
	}

	#[test]
	fn low_relevance_broadens() {
		let Step::Continue { state, strategy } =
			step(RefinementState::new("login.ts only"), &scored(0.1), &LIMITS)
		else {
			panic!("Expected another iteration.");
		};

		assert_eq!(strategy, RefinementStrategy::Broaden);
		assert_eq!(state.current_query, broaden_query("login.ts only"));
		assert_eq!(state.iterations_used, 1);
	}

	#[test]
	fn medium_relevance_focuses() {
		let results = scored(0.5);
		let Step::Continue { state, strategy } = step(RefinementState::new("login"), &results, &LIMITS)
		else {
			panic!("Expected another iteration.");
		};

		assert_eq!(strategy, RefinementStrategy::Focus);
		assert_eq!(state.current_query, focus_query_based_on_results("login", &results));
	}

	#[test]
	fn spent_budget_stops_below_the_threshold() {
		let state = RefinementState {
			current_query: "q".to_string(),
			iterations_used: 2,
			last_relevance: 0.1,
		};
		let Step::Done(done) = step(state, &scored(0.2), &LIMITS) else {
			panic!("Expected the budget to stop the loop.");
		};

		assert_eq!(done.iterations_used, 2);
		assert_eq!(done.last_relevance, 0.2);
	}

	#[test]
	fn empty_results_count_as_zero_relevance() {
		let Step::Continue { state, strategy } = step(RefinementState::new("q"), &[], &LIMITS) else {
			panic!("Expected another iteration.");
		};

		assert_eq!(strategy, RefinementStrategy::Broaden);
		assert_eq!(state.last_relevance, 0.0);
	}

	#[test]
	fn zero_budget_never_refines() {
		let limits = RefinementLimits { max_refinements: 0, ..LIMITS };

		assert!(matches!(step(RefinementState::new("q"), &scored(0.1), &limits), Step::Done(_)));
	}
}
