mod error;

pub use error::{Error, Result};

use std::{collections::HashMap, env, time::Duration};

use qdrant_client::{
	Payload, Qdrant,
	qdrant::{
		CreateCollectionBuilder, Distance, PointStruct, UpsertPointsBuilder, Vector,
		VectorParamsBuilder, VectorsConfigBuilder,
	},
};
use serde_json::Value;
use tokio::time;
use uuid::Uuid;

/// Named dense vector used by test collections. Mirrors the storage layer's vector name.
pub const DENSE_VECTOR_NAME: &str = "dense";

pub struct TestPoint {
	pub vector: Vec<f32>,
	pub payload: Value,
}

/// A throwaway Qdrant collection, deleted by [`TestCollection::cleanup`].
pub struct TestCollection {
	client: Qdrant,
	name: String,
	vector_dim: u64,
}
impl TestCollection {
	pub async fn new(qdrant_url: &str, prefix: &str, vector_dim: u64) -> Result<Self> {
		let client = Qdrant::from_url(qdrant_url)
			.build()
			.map_err(|err| Error::Message(format!("Failed to build Qdrant client: {err}.")))?;
		let name = format!("{prefix}_{}", Uuid::new_v4().simple());
		let max_attempts = 6;
		let mut backoff = Duration::from_millis(100);

		for attempt in 1..=max_attempts {
			let mut vectors_config = VectorsConfigBuilder::default();

			vectors_config.add_named_vector_params(
				DENSE_VECTOR_NAME,
				VectorParamsBuilder::new(vector_dim, Distance::Cosine),
			);

			let builder =
				CreateCollectionBuilder::new(name.clone()).vectors_config(vectors_config);

			match client.create_collection(builder).await {
				Ok(_) => break,
				Err(err) if attempt == max_attempts => {
					return Err(Error::Message(format!(
						"Failed to create Qdrant collection {name:?} after {attempt} attempts: {err}."
					)));
				},
				Err(_) => {
					time::sleep(backoff).await;

					backoff = backoff.saturating_mul(2).min(Duration::from_secs(2));
				},
			}
		}

		Ok(Self { client, name, vector_dim })
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub async fn seed(&self, points: Vec<TestPoint>) -> Result<()> {
		let mut structs = Vec::with_capacity(points.len());

		for point in points {
			if point.vector.len() as u64 != self.vector_dim {
				return Err(Error::Message(format!(
					"Test point has {} dimensions; collection expects {}.",
					point.vector.len(),
					self.vector_dim
				)));
			}

			let Value::Object(fields) = point.payload else {
				return Err(Error::Message("Test point payload must be a JSON object.".to_string()));
			};
			let mut payload = Payload::new();

			for (key, value) in fields {
				payload.insert(key, value);
			}

			let mut vectors = HashMap::new();

			vectors.insert(DENSE_VECTOR_NAME.to_string(), Vector::from(point.vector));
			structs.push(PointStruct::new(Uuid::new_v4().to_string(), vectors, payload));
		}

		self.client
			.upsert_points(UpsertPointsBuilder::new(self.name.clone(), structs).wait(true))
			.await?;

		Ok(())
	}

	pub async fn cleanup(self) -> Result<()> {
		time::timeout(Duration::from_secs(10), self.client.delete_collection(self.name.clone()))
			.await
			.map_err(|_| Error::Message("Qdrant delete_collection timed out.".to_string()))??;

		Ok(())
	}
}

pub fn env_qdrant_url() -> Option<String> {
	env::var("QREFINE_QDRANT_URL").ok()
}
