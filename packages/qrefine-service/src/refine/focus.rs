use qrefine_domain::{SearchResult, extract_keywords, query_tokens};

/// Results mined for keywords.
pub const FOCUS_TOP_RESULTS: usize = 2;
/// Keywords appended per refinement.
pub const FOCUS_MAX_KEYWORDS: usize = 2;

/// Narrows a query with keywords from the top results that it does not already carry.
///
/// Returns the query unchanged when the results offer nothing new.
pub fn focus_query_based_on_results(query: &str, results: &[SearchResult]) -> String {
	let text = results
		.iter()
		.take(FOCUS_TOP_RESULTS)
		.filter_map(|result| result.payload.text())
		.collect::<Vec<_>>()
		.join(" ");

	if text.is_empty() {
		return query.to_string();
	}

	let present = query_tokens(query);
	let additions = extract_keywords(&text)
		.into_iter()
		.filter(|keyword| !present.contains(keyword))
		.take(FOCUS_MAX_KEYWORDS)
		.collect::<Vec<_>>();

	if additions.is_empty() {
		return query.to_string();
	}

	super::append_terms(query, &additions.join(" "))
}

#[cfg(test)]
mod tests {
	use qrefine_domain::{CommitInfo, FileChunk, ResultPayload};

	use super::*;

	fn chunk(content: &str) -> SearchResult {
		SearchResult::new(
			"chunk",
			0.5,
			ResultPayload::FileChunk(FileChunk {
				filepath: "src/auth/login.ts".to_string(),
				content_chunk: content.to_string(),
				..FileChunk::default()
			}),
		)
	}

	#[test]
	fn empty_results_leave_the_query_unchanged() {
		assert_eq!(focus_query_based_on_results("login flow", &[]), "login flow");
	}

	#[test]
	fn appends_new_keywords_in_result_order() {
		let results = vec![chunk("The token is refreshed before validation")];

		assert_eq!(focus_query_based_on_results("login", &results), "login token refreshed");
	}

	#[test]
	fn skips_keywords_the_query_already_has() {
		let results = vec![chunk("Login token refresh")];

		assert_eq!(focus_query_based_on_results("login token", &results), "login token refresh");
	}

	#[test]
	fn only_the_top_results_are_mined() {
		let results = vec![chunk("alpha"), chunk("beta"), chunk("gamma delta")];

		assert_eq!(focus_query_based_on_results("q", &results), "q alpha beta");
	}

	#[test]
	fn mines_commit_messages() {
		let results = vec![SearchResult::new(
			"commit",
			0.4,
			ResultPayload::CommitInfo(CommitInfo {
				commit_message: "Retry session refresh".to_string(),
				..CommitInfo::default()
			}),
		)];

		assert_eq!(focus_query_based_on_results("session", &results), "session retry refresh");
	}

	#[test]
	fn unknown_payloads_contribute_nothing() {
		let results = vec![SearchResult::new("x", 0.5, ResultPayload::Unknown)];

		assert_eq!(focus_query_based_on_results("login", &results), "login");
	}
}
