use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub qdrant: Qdrant,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Qdrant {
	pub url: String,
	/// Collection every refinement search runs against.
	pub collection: String,
	pub vector_dim: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
	/// Extra attempts after a failed embedding call. Zero surfaces the first failure.
	#[serde(default)]
	pub max_retries: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	#[serde(default = "default_limit")]
	pub default_limit: u32,
	#[serde(default = "default_max_refinement_iterations")]
	pub max_refinement_iterations: u32,
	/// Top score at or above which the loop stops refining.
	#[serde(default = "default_relevance_threshold")]
	pub default_relevance_threshold: f32,
}

impl Default for Search {
	fn default() -> Self {
		Self {
			default_limit: default_limit(),
			max_refinement_iterations: default_max_refinement_iterations(),
			default_relevance_threshold: default_relevance_threshold(),
		}
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_limit() -> u32 {
	10
}

fn default_max_refinement_iterations() -> u32 {
	2
}

fn default_relevance_threshold() -> f32 {
	0.75
}
