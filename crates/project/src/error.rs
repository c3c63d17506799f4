//! Error types for the project client.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors surfaced by [`crate::ProjectClient`].
#[derive(Debug, Error)]
pub enum ApiError {
	/// The request's cancellation token fired.
	#[error("request cancelled")]
	Cancelled,

	/// The transport failed before a response body was produced.
	#[error("transport error: {0}")]
	Transport(#[source] TransportError),

	/// The envelope carried a non-zero code.
	#[error("api error {code}: {msg}")]
	Status {
		/// Envelope code.
		code: i32,
		/// Envelope message.
		msg: String,
	},

	/// A successful envelope without a `data` payload.
	#[error("response carried no data")]
	MissingData,

	/// The body did not match the expected shape.
	#[error("malformed response: {0}")]
	Decode(#[from] serde_json::Error),
}

impl From<TransportError> for ApiError {
	fn from(error: TransportError) -> Self {
		match error {
			TransportError::Cancelled => Self::Cancelled,
			other => Self::Transport(other),
		}
	}
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;
