/// Strips control characters, collapses whitespace runs to a single space, and trims.
///
/// Whitespace control characters (tab, newline, carriage return) separate words, so they are
/// folded into spaces rather than dropped.
pub fn normalize(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	let mut pending_space = false;

	for ch in text.chars() {
		if ch.is_whitespace() {
			pending_space = true;

			continue;
		}
		if ch.is_control() {
			continue;
		}
		if pending_space && !out.is_empty() {
			out.push(' ');
		}

		pending_space = false;

		out.push(ch);
	}

	out
}

/// Counts whitespace-separated words.
pub fn word_count(text: &str) -> usize {
	text.split_whitespace().count()
}
