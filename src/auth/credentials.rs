//! Username/password pair submitted for one verification call.

// self
use crate::{_prelude::*, auth::CredentialSecret};

/// Credential pair checked by [`CredentialVerifier::verify`].
///
/// Values are compared and transmitted exactly as given: no trimming, no case folding, and no
/// emptiness checks. Deciding whether an empty username is acceptable belongs to the remote
/// service.
///
/// [`CredentialVerifier::verify`]: crate::verifier::CredentialVerifier::verify
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
	/// Account identifier (often an email address).
	pub username: String,
	/// Account password.
	pub password: CredentialSecret,
}
impl Credentials {
	/// Creates a credential pair.
	pub fn new(username: impl Into<String>, password: impl Into<CredentialSecret>) -> Self {
		Self { username: username.into(), password: password.into() }
	}

	/// Borrows the pair as the JSON body posted to the login endpoint.
	pub fn login_request(&self) -> LoginRequest<'_> {
		LoginRequest { username: &self.username, password: self.password.expose() }
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("username", &self.username)
			.field("password", &self.password)
			.finish()
	}
}

/// Wire body of the login request: `{"username": "...", "password": "..."}`.
#[derive(Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoginRequest<'a> {
	/// Account identifier.
	pub username: &'a str,
	/// Plain-text password, as the login endpoint expects it.
	pub password: &'a str,
}
impl Debug for LoginRequest<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginRequest")
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.finish()
	}
}
