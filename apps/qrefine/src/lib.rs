use std::path::PathBuf;

use clap::Parser;

use qrefine_service::{RefinementService, SearchRefinementRequest};
use qrefine_storage::qdrant::QdrantStore;

#[derive(Debug, Parser)]
#[command(
	version = qrefine_cli::VERSION,
	rename_all = "kebab",
	styles = qrefine_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[arg(long, short = 'q', value_name = "TEXT")]
	pub query: String,
	/// Restrict results to this file location. Repeatable.
	#[arg(long = "filepath", value_name = "PATH")]
	pub filepaths: Vec<String>,
	#[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
	pub limit: Option<u32>,
	#[arg(long, value_name = "N")]
	pub max_refinements: Option<u32>,
	#[arg(long, value_name = "SCORE", value_parser = parse_threshold)]
	pub threshold: Option<f32>,
}

impl Args {
	pub fn request(&self) -> SearchRefinementRequest {
		SearchRefinementRequest {
			query: self.query.clone(),
			filepaths: self.filepaths.clone(),
			limit: self.limit,
			max_refinements: self.max_refinements,
			relevance_threshold: self.threshold,
		}
	}
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = qrefine_config::load(&args.config)?;

	qrefine_cli::init_tracing(&config.service.log_level);

	let qdrant = QdrantStore::new(&config.storage.qdrant)?;

	tracing::info!(
		collection = %config.storage.qdrant.collection,
		url = %config.storage.qdrant.url,
		"Searching with refinement."
	);

	let service = RefinementService::new(config, qdrant);
	let response = service.search_with_refinement(args.request()).await?;

	println!("{}", serde_json::to_string_pretty(&response)?);

	Ok(())
}

fn parse_threshold(raw: &str) -> Result<f32, String> {
	let value = raw.parse::<f32>().map_err(|err| err.to_string())?;

	if !value.is_finite() || !(0.0..=1.0).contains(&value) {
		return Err("threshold must be within 0.0-1.0".to_string());
	}

	Ok(value)
}
