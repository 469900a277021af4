//! Normalized verification outcome.

// self
use crate::{_prelude::*, verifier::RemotePayload};

/// Message the login endpoint sends on success, and the message reported for bypass grants.
pub const LOGIN_SUCCESSFUL: &str = "Login successful";
/// Message reported when a rejection carries no message of its own.
pub const LOGIN_FAILED: &str = "Login failed";

const HTTP_OK: u16 = 200;

/// Uniform result of one verification, whichever path produced it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VerificationResult {
	/// `true` iff authentication succeeded.
	pub ok: bool,
	/// Human-readable outcome; never empty.
	pub message: String,
	/// Unmodified login endpoint payload; `None` on the bypass path or when no body was sent.
	pub raw: Option<RemotePayload>,
}
impl VerificationResult {
	/// Result granted by the bypass allow-list.
	pub fn bypassed() -> Self {
		Self { ok: true, message: LOGIN_SUCCESSFUL.into(), raw: None }
	}

	/// Normalizes a login endpoint response.
	///
	/// Success requires both HTTP 200 and a `message` equal to [`LOGIN_SUCCESSFUL`]; either
	/// condition alone is a rejection. The endpoint's own message is reported verbatim when
	/// present.
	pub fn from_remote(status: u16, data: Option<RemotePayload>) -> Self {
		let remote_message = data.as_ref().and_then(RemotePayload::message);
		let ok = status == HTTP_OK && remote_message == Some(LOGIN_SUCCESSFUL);
		let message = match remote_message {
			Some(message) => message.to_owned(),
			None if ok => LOGIN_SUCCESSFUL.to_owned(),
			None => LOGIN_FAILED.to_owned(),
		};

		Self { ok, message, raw: data }
	}
}
