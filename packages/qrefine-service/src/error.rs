pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Backend error: {message}")]
	Backend { message: String },
}
impl From<qrefine_providers::Error> for Error {
	fn from(err: qrefine_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<qrefine_storage::Error> for Error {
	fn from(err: qrefine_storage::Error) -> Self {
		match err {
			qrefine_storage::Error::InvalidArgument(message) => Self::Backend { message },
			qrefine_storage::Error::Qdrant(inner) => Self::Backend { message: inner.to_string() },
		}
	}
}
