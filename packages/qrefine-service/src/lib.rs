pub mod refine;
pub mod search;

mod error;

pub use error::{Error, Result};
pub use refine::{RefinementStrategy, refine_query, select_strategy};
pub use search::{
	RefinementLimits, RefinementState, SearchRefinementRequest, SearchRefinementResponse, Step,
	step,
};

use std::{future::Future, pin::Pin, sync::Arc};

use qrefine_config::{Config, EmbeddingProviderConfig};
use qrefine_domain::{SearchQuery, SearchResult};
use qrefine_providers::embedding;
use qrefine_storage::qdrant::QdrantStore;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>>;
}

/// Vector similarity search over a named collection. Results come back best first.
pub trait SearchBackend
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		collection: &'a str,
		query: &'a SearchQuery,
	) -> BoxFuture<'a, Result<Vec<SearchResult>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
}

pub struct RefinementService {
	pub cfg: Config,
	pub backend: Arc<dyn SearchBackend>,
	pub providers: Providers,
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move { Ok(embedding::embed(cfg, texts).await?) })
	}
}

impl SearchBackend for QdrantStore {
	fn search<'a>(
		&'a self,
		collection: &'a str,
		query: &'a SearchQuery,
	) -> BoxFuture<'a, Result<Vec<SearchResult>>> {
		Box::pin(async move { Ok(QdrantStore::search(self, collection, query).await?) })
	}
}

impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingProvider>) -> Self {
		Self { embedding }
	}
}

impl Default for Providers {
	fn default() -> Self {
		Self { embedding: Arc::new(DefaultProviders) }
	}
}

impl RefinementService {
	pub fn new(cfg: Config, qdrant: QdrantStore) -> Self {
		Self { cfg, backend: Arc::new(qdrant), providers: Providers::default() }
	}

	pub fn with_backend(cfg: Config, backend: Arc<dyn SearchBackend>, providers: Providers) -> Self {
		Self { cfg, backend, providers }
	}
}
