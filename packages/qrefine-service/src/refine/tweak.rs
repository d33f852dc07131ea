use std::collections::HashSet;

use qrefine_domain::{SearchResult, file_extension, leading_directory, query_tokens};

/// Directory names too common to narrow a search.
pub const GENERIC_DIRECTORIES: &[&str] = &[
	"src", "lib", "app", "dist", "build", "out", "target", "node_modules", "test", "tests", ".", "..",
];

/// Nudges a query toward the location of the best result.
///
/// The file extension is preferred; the leading directory is used only when the extension is
/// already present. Commit and unknown payloads carry no location and leave the query as is.
pub fn tweak_query(query: &str, results: &[SearchResult]) -> String {
	let Some(filepath) = results.first().and_then(|result| result.payload.filepath()) else {
		return query.to_string();
	};
	let present = query_tokens(query);

	if let Some(extension) = file_extension(filepath)
		&& lacks(&present, extension)
	{
		return super::append_terms(query, extension);
	}
	if let Some(directory) = leading_directory(filepath)
		&& !is_generic_directory(directory)
		&& lacks(&present, directory)
	{
		return super::append_terms(query, &format!("in {directory}"));
	}

	query.to_string()
}

pub fn is_generic_directory(directory: &str) -> bool {
	GENERIC_DIRECTORIES.iter().any(|generic| generic.eq_ignore_ascii_case(directory))
}

// A term made only of separators is never worth appending.
fn lacks(present: &HashSet<String>, term: &str) -> bool {
	let tokens = query_tokens(term);

	!tokens.is_empty() && !tokens.is_subset(present)
}

#[cfg(test)]
mod tests {
	use qrefine_domain::{CommitInfo, FileChunk, ResultPayload};

	use super::*;

	fn located(filepath: &str) -> Vec<SearchResult> {
		vec![SearchResult::new(
			"chunk",
			0.8,
			ResultPayload::FileChunk(FileChunk {
				filepath: filepath.to_string(),
				content_chunk: "export function login".to_string(),
				..FileChunk::default()
			}),
		)]
	}

	#[test]
	fn appends_missing_extension() {
		assert_eq!(
			tweak_query("search login function", &located("src/auth/login.ts")),
			"search login function ts"
		);
	}

	#[test]
	fn generic_directory_is_not_appended() {
		assert_eq!(
			tweak_query("search login function ts", &located("src/auth/login.ts")),
			"search login function ts"
		);
	}

	#[test]
	fn extension_inside_a_file_name_counts_as_present() {
		assert_eq!(
			tweak_query("search login.ts function", &located("src/auth/login.ts")),
			"search login.ts function"
		);
	}

	#[test]
	fn appends_specific_directory_once_extension_is_present() {
		assert_eq!(tweak_query("login rs", &located("handlers/login.rs")), "login rs in handlers");
		assert_eq!(
			tweak_query("login rs in handlers", &located("handlers/login.rs")),
			"login rs in handlers"
		);
	}

	#[test]
	fn generic_directories_match_case_insensitively() {
		assert!(is_generic_directory("Src"));
		assert!(is_generic_directory("node_modules"));
		assert!(is_generic_directory(".."));
		assert!(!is_generic_directory("handlers"));
	}

	#[test]
	fn results_without_location_leave_the_query_unchanged() {
		let commit = vec![SearchResult::new(
			"commit",
			0.9,
			ResultPayload::CommitInfo(CommitInfo {
				commit_message: "Fix login".to_string(),
				..CommitInfo::default()
			}),
		)];

		assert_eq!(tweak_query("login", &commit), "login");
		assert_eq!(tweak_query("login", &[]), "login");
		assert_eq!(tweak_query("login", &located("Makefile")), "login");
	}

	#[test]
	fn parent_directory_markers_are_skipped() {
		assert_eq!(tweak_query("login ts", &located("../auth/login.ts")), "login ts");
	}

	#[test]
	fn specific_directories_settle_after_two_passes() {
		let results = located("handlers/login.rs");
		let once = tweak_query("login", &results);
		let twice = tweak_query(&once, &results);

		assert_eq!(once, "login rs");
		assert_eq!(twice, "login rs in handlers");
		assert_eq!(tweak_query(&twice, &results), twice);
	}

	#[test]
	fn repeated_tweaks_settle() {
		let results = located("src/auth/login.ts");
		let once = tweak_query("search login function", &results);

		assert_eq!(tweak_query(&once, &results), once);
	}
}
