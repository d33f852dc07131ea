pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Embedding request failed: {0}")]
	Http(#[from] reqwest::Error),
	#[error("Invalid default header name: {0}")]
	InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error("Invalid header value: {0}")]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("Invalid embedding provider config: {message}")]
	InvalidConfig { message: String },
	#[error("Invalid embedding response: {message}")]
	InvalidResponse { message: String },
}
