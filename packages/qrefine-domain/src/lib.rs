pub mod keywords;
pub mod result;
pub mod text;

pub use keywords::{STOPWORDS, extract_keywords, query_tokens};
pub use result::{
	CommitInfo, FileChunk, ResultPayload, SearchQuery, SearchResult, file_extension,
	leading_directory, top_relevance,
};
