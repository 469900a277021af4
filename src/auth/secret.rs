//! Password wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Redacted password wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialSecret(String);
impl CredentialSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner password. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the wrapped password is the empty string.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl From<&str> for CredentialSecret {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl From<String> for CredentialSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl Debug for CredentialSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("CredentialSecret").field(&"<redacted>").finish()
	}
}
impl Display for CredentialSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = CredentialSecret::new("hunter2");

		assert_eq!(format!("{secret:?}"), "CredentialSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
		assert_eq!(secret.expose(), "hunter2");
	}

	#[test]
	fn secret_serializes_as_plain_string() {
		let secret: CredentialSecret =
			serde_json::from_str("\"hunter2\"").expect("Secret should deserialize from a string.");

		assert_eq!(secret.expose(), "hunter2");
		assert_eq!(
			serde_json::to_string(&secret).expect("Secret should serialize."),
			"\"hunter2\""
		);
	}
}
