//! Scored search results and the payload kinds a backend can attach to them.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
	pub id: String,
	/// Similarity in `[0, 1]`; higher is more relevant. Absent means zero.
	#[serde(default)]
	pub score: f32,
	pub payload: ResultPayload,
}

/// One nearest-neighbour request against a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
	pub vector: Vec<f32>,
	pub limit: u32,
	/// Restricts results to these file locations when non-empty.
	pub filepaths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultPayload {
	FileChunk(FileChunk),
	CommitInfo(CommitInfo),
	#[serde(other)]
	Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileChunk {
	pub filepath: String,
	pub content_chunk: String,
	#[serde(default)]
	pub chunk_index: u32,
	#[serde(default)]
	pub total_chunks: u32,
	#[serde(default)]
	pub last_modified: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitInfo {
	pub commit_id: String,
	pub commit_message: String,
	#[serde(default)]
	pub author: String,
	#[serde(default)]
	pub date: String,
	#[serde(default)]
	pub changed_files: Vec<String>,
	#[serde(default)]
	pub parent_ids: Vec<String>,
}

impl SearchResult {
	pub fn new(id: impl Into<String>, score: f32, payload: ResultPayload) -> Self {
		Self { id: id.into(), score, payload }
	}

	/// Score usable for threshold decisions. Non-finite scores count as zero.
	pub fn relevance(&self) -> f32 {
		if self.score.is_finite() { self.score } else { 0.0 }
	}
}

impl ResultPayload {
	/// The field mined for keywords, if this kind carries one.
	pub fn text(&self) -> Option<&str> {
		let text = match self {
			Self::FileChunk(chunk) => chunk.content_chunk.as_str(),
			Self::CommitInfo(commit) => commit.commit_message.as_str(),
			Self::Unknown => return None,
		};

		if text.trim().is_empty() { None } else { Some(text) }
	}

	/// File location of the result. Only file chunks are located.
	pub fn filepath(&self) -> Option<&str> {
		match self {
			Self::FileChunk(chunk) if !chunk.filepath.trim().is_empty() =>
				Some(chunk.filepath.as_str()),
			Self::FileChunk(_) | Self::CommitInfo(_) | Self::Unknown => None,
		}
	}
}

/// Relevance of a result sequence: the first result's score, or zero when there is none.
pub fn top_relevance(results: &[SearchResult]) -> f32 {
	results.first().map(SearchResult::relevance).unwrap_or(0.0)
}

pub fn file_extension(filepath: &str) -> Option<&str> {
	Path::new(filepath).extension().and_then(|ext| ext.to_str()).filter(|ext| !ext.is_empty())
}

/// Leading directory component of a location, ignoring root and `./` prefixes.
///
/// `src/auth/login.ts` yields `src`; a bare file name yields nothing.
pub fn leading_directory(filepath: &str) -> Option<&str> {
	let trimmed = filepath.trim().trim_start_matches("./").trim_start_matches('/');
	let mut parts = trimmed.split(['/', '\\']).filter(|part| !part.is_empty());
	let first = parts.next()?;

	parts.next().map(|_| first)
}
