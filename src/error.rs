//! Verifier-level error types shared across configuration, transport, and verification.
//!
//! An authentication rejection is never an error: it is a
//! [`VerificationResult`](crate::verifier::VerificationResult) with `ok == false`. Errors only
//! describe a verifier that cannot be built ([`ConfigError`]) or a login endpoint that could
//! not be reached or understood ([`TransportError`]).

// self
use crate::{_prelude::*, auth::BypassListError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The login endpoint could not be reached or returned an unreadable response.
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Configuration and validation failures raised while building a verifier.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than `http` or `https`.
	#[error("Base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Base URL that failed validation.
		url: String,
	},
	/// Login path is empty, absolute, or resolves outside the base URL.
	#[error("Login path must be a non-empty path below the base URL: `{path}`.")]
	InvalidLoginPath {
		/// Login path that failed validation.
		path: String,
	},
	/// Login path could not be joined onto the base URL.
	#[error("Login endpoint could not be resolved against the base URL.")]
	EndpointJoin {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Bypass allow-list failed validation.
	#[error("Bypass allow-list is invalid.")]
	InvalidBypass(#[from] BypassListError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures; distinct from an authentication rejection.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the login endpoint.")]
	Network {
		/// HTTP status code, when the failure happened after the status line arrived.
		status: Option<u16>,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying HTTP client gave up waiting for the login endpoint.
	#[error("Request timed out while calling the login endpoint.")]
	Timeout {
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying HTTP client refused to build the outbound request.
	#[error("Login request could not be constructed by the transport.")]
	InvalidRequest {
		/// Transport-specific builder error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the login endpoint.")]
	Io(#[from] std::io::Error),
	/// Login request body could not be serialized.
	#[error("Login request body could not be encoded as JSON.")]
	RequestEncode {
		/// Serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Login endpoint responded with a body that is not valid JSON.
	#[error("Login endpoint returned malformed JSON (HTTP {status}).")]
	MalformedResponse {
		/// HTTP status code of the response.
		status: u16,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { status: None, source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Timeout { status: None, source: Box::new(src) }
	}

	/// Wraps a transport-specific request builder error.
	pub fn invalid_request(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::InvalidRequest { source: Box::new(src) }
	}

	/// Attaches the HTTP status observed before the failure, where the variant carries one.
	pub fn with_status(mut self, observed: Option<u16>) -> Self {
		if let Self::Network { status, .. } | Self::Timeout { status, .. } = &mut self {
			*status = status.or(observed);
		}

		self
	}

	/// Returns the HTTP status code associated with the failure, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Network { status, .. } | Self::Timeout { status, .. } => *status,
			Self::MalformedResponse { status, .. } => Some(*status),
			Self::InvalidRequest { .. } | Self::Io(_) | Self::RequestEncode { .. } => None,
		}
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::io::{Error as IoError, ErrorKind};
	// self
	use super::*;

	#[test]
	fn transport_error_converts_into_crate_error_with_source() {
		let transport = TransportError::Io(IoError::new(ErrorKind::ConnectionReset, "reset"));
		let error: Error = transport.into();

		assert!(matches!(error, Error::Transport(TransportError::Io(_))));

		let source = StdError::source(&error)
			.expect("Transparent transport error should expose the I/O error as its source.");

		assert_eq!(source.to_string(), "reset");
	}

	#[test]
	fn with_status_keeps_the_first_observed_status() {
		let error = TransportError::network(IoError::other("connection closed"))
			.with_status(Some(502))
			.with_status(Some(200));

		assert_eq!(error.status(), Some(502));

		let error = TransportError::Io(IoError::other("broken pipe")).with_status(Some(500));

		assert_eq!(error.status(), None);
	}

	#[test]
	fn malformed_response_reports_status() {
		let mut deserializer = serde_json::Deserializer::from_slice(b"<html>");
		let source = serde_path_to_error::deserialize::<_, serde_json::Value>(&mut deserializer)
			.expect_err("HTML must not parse as JSON.");
		let error = TransportError::MalformedResponse { status: 502, source };

		assert_eq!(error.status(), Some(502));
		assert_eq!(error.to_string(), "Login endpoint returned malformed JSON (HTTP 502).");
	}
}
