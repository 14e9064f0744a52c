use std::time::Duration;

use thiserror::Error;

/// A list request that could not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
	/// Connection, DNS or I/O failure.
	#[error("network error: {0}")]
	Network(String),

	/// The request did not complete in time.
	#[error("request timed out after {0:?}")]
	Timeout(Duration),

	/// The server answered with a non-success HTTP status.
	#[error("server returned status {status}: {body}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, possibly empty.
		body: String,
	},

	/// The response body was not valid JSON.
	#[error("invalid response body: {0}")]
	Decode(String),

	/// The endpoint URL could not be built.
	#[error("invalid endpoint url: {0}")]
	InvalidUrl(String),
}
