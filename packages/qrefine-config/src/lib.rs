mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, EmbeddingProviderConfig, Providers, Qdrant, Search, Service, Storage};

use std::{fs, path::Path};

use figment::{
	Figment,
	providers::{Env, Format, Toml},
};

/// Prefix for environment overrides. Nested keys use `__`, e.g. `QREFINE_SEARCH__DEFAULT_LIMIT`.
pub const ENV_PREFIX: &str = "QREFINE_";

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = Figment::new()
		.merge(Toml::string(&raw))
		.merge(Env::prefixed(ENV_PREFIX).split("__"))
		.extract()
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: Box::new(err) })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.storage.qdrant.url.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.url must be non-empty.".to_string(),
		});
	}
	if cfg.storage.qdrant.collection.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.collection must be non-empty.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions != cfg.storage.qdrant.vector_dim {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must match storage.qdrant.vector_dim."
				.to_string(),
		});
	}
	if cfg.providers.embedding.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "Provider embedding api_key must be non-empty.".to_string(),
		});
	}
	if cfg.search.default_limit == 0 {
		return Err(Error::Validation {
			message: "search.default_limit must be greater than zero.".to_string(),
		});
	}

	let threshold = cfg.search.default_relevance_threshold;

	if !threshold.is_finite() {
		return Err(Error::Validation {
			message: "search.default_relevance_threshold must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&threshold) {
		return Err(Error::Validation {
			message: "search.default_relevance_threshold must be in the range 0.0-1.0."
				.to_string(),
		});
	}

	for (key, value) in &cfg.providers.embedding.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("providers.embedding.default_headers.{key} must be a string."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let qdrant = &mut cfg.storage.qdrant;

	qdrant.collection = qdrant.collection.trim().to_string();
	qdrant.url = qdrant.url.trim().trim_end_matches('/').to_string();

	let embedding = &mut cfg.providers.embedding;

	embedding.api_base = embedding.api_base.trim().trim_end_matches('/').to_string();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
