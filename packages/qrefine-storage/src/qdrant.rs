pub const DENSE_VECTOR_NAME: &str = "dense";
pub const FILEPATH_FIELD: &str = "filepath";

use qdrant_client::qdrant::{
	Condition, Filter, PointId, Query, QueryPointsBuilder, ScoredPoint, point_id::PointIdOptions,
};

use crate::{Error, Result, payload};
use qrefine_domain::{SearchQuery, SearchResult};

pub struct QdrantStore {
	pub client: qdrant_client::Qdrant,
	pub vector_dim: u32,
}
impl QdrantStore {
	pub fn new(cfg: &qrefine_config::Qdrant) -> Result<Self> {
		let client = qdrant_client::Qdrant::from_url(&cfg.url).build()?;

		Ok(Self { client, vector_dim: cfg.vector_dim })
	}

	/// Nearest neighbours of `query.vector` in `collection`, best first.
	pub async fn search(&self, collection: &str, query: &SearchQuery) -> Result<Vec<SearchResult>> {
		if query.vector.len() != self.vector_dim as usize {
			return Err(Error::InvalidArgument(format!(
				"Query vector has {} dimensions; collection expects {}.",
				query.vector.len(),
				self.vector_dim
			)));
		}

		let mut search = QueryPointsBuilder::new(collection)
			.query(Query::new_nearest(query.vector.clone()))
			.using(DENSE_VECTOR_NAME)
			.limit(query.limit as u64)
			.with_payload(true);

		if let Some(filter) = filepath_filter(&query.filepaths) {
			search = search.filter(filter);
		}

		let response = self.client.query(search).await?;

		Ok(response.result.into_iter().map(scored_point_to_result).collect())
	}
}

/// Restricts a search to the given file locations. No paths means no restriction.
pub fn filepath_filter(filepaths: &[String]) -> Option<Filter> {
	if filepaths.is_empty() {
		return None;
	}

	Some(Filter::must([Condition::matches(FILEPATH_FIELD, filepaths.to_vec())]))
}

pub fn scored_point_to_result(point: ScoredPoint) -> SearchResult {
	let id = point.id.as_ref().map(point_id_to_string).unwrap_or_default();
	let payload = payload::decode_payload(&point.payload);

	SearchResult { id, score: point.score, payload }
}

fn point_id_to_string(point_id: &PointId) -> String {
	match &point_id.point_id_options {
		Some(PointIdOptions::Uuid(id)) => id.clone(),
		Some(PointIdOptions::Num(id)) => id.to_string(),
		None => String::new(),
	}
}
