use std::sync::LazyLock;

use regex::Regex;

use qrefine_domain::text;

/// Replacement when nothing survives broadening.
pub const FALLBACK_QUERY: &str = "general code context";
/// Appended when broadening leaves too few words to search on.
pub const PADDING_TERMS: &str = "implementation code";
pub const MIN_BROADENED_WORDS: usize = 2;

static QUALIFIERS: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)\b(?:exact|exactly|specific|specifically|only|precise|precisely)\b")
		.expect("qualifier pattern is valid")
});
static EXTENSIONS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\.[A-Za-z0-9]{1,4}\b").expect("extension pattern is valid"));

/// Widens a query by dropping file extensions and restrictive qualifiers.
///
/// Never returns an empty string.
pub fn broaden_query(query: &str) -> String {
	let stripped = EXTENSIONS.replace_all(query, " ");
	let stripped = QUALIFIERS.replace_all(&stripped, " ");
	let broadened = text::normalize(&stripped);

	if broadened.is_empty() {
		return FALLBACK_QUERY.to_string();
	}
	if text::word_count(&broadened) < MIN_BROADENED_WORDS {
		return format!("{broadened} {PADDING_TERMS}");
	}

	broadened
}
