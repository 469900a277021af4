//! Opaque login endpoint payload and body decoding.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, error::TransportError};

/// JSON body returned by the login endpoint, kept exactly as received.
///
/// Only [`message`](Self::message) feeds the verification outcome; everything else is carried
/// through untouched in [`VerificationResult::raw`](crate::verifier::VerificationResult::raw).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemotePayload(Value);
impl RemotePayload {
	/// Wraps an already-decoded JSON value.
	pub fn new(value: Value) -> Self {
		Self(value)
	}

	/// Returns the `message` member when the payload is an object holding a non-empty string.
	pub fn message(&self) -> Option<&str> {
		self.string_member("message")
	}

	/// Returns the `detail` member used by FastAPI-style rejections
	/// (`{"detail": "Invalid username or password"}`).
	pub fn detail(&self) -> Option<&str> {
		self.string_member("detail")
	}

	/// Borrows the underlying JSON value.
	pub fn as_value(&self) -> &Value {
		&self.0
	}

	/// Consumes the payload, returning the underlying JSON value.
	pub fn into_value(self) -> Value {
		self.0
	}

	fn string_member(&self, key: &str) -> Option<&str> {
		self.0.get(key).and_then(Value::as_str).filter(|value| !value.is_empty())
	}
}
impl From<Value> for RemotePayload {
	fn from(value: Value) -> Self {
		Self(value)
	}
}

/// Decodes a login response body.
///
/// Empty bodies, whitespace-only bodies, and a literal JSON `null` all mean "no payload".
/// Anything else must be exactly one valid JSON value.
pub(crate) fn decode_body(
	status: u16,
	body: &[u8],
) -> Result<Option<RemotePayload>, TransportError> {
	if body.iter().all(u8::is_ascii_whitespace) {
		return Ok(None);
	}

	let mut deserializer = serde_json::Deserializer::from_slice(body);
	let value: Value = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| TransportError::MalformedResponse { status, source })?;

	// Only whitespace may follow the first JSON value.
	deserializer.end().map_err(|err| TransportError::MalformedResponse {
		status,
		source: serde_path_to_error::Error::new(serde_path_to_error::Track::new().path(), err),
	})?;

	Ok(match value {
		Value::Null => None,
		value => Some(RemotePayload(value)),
	})
}
