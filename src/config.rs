//! Verifier configuration: where the login endpoint lives and who may bypass it.
//!
//! [`VerifierConfig`] is plain data that deserializes from any serde format (JSON, TOML, env
//! adapters), or is assembled with [`VerifierConfigBuilder`]. Validation runs in
//! [`VerifierConfigBuilder::build`] and again when a verifier is constructed, so a
//! deserialized configuration is never trusted blindly.

/// Builder API for assembling verifier configurations.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, auth::BypassList, error::ConfigError};

/// Login path used when the configuration does not name one.
pub const DEFAULT_LOGIN_PATH: &str = "users/login";

/// Immutable configuration consumed by
/// [`CredentialVerifier`](crate::verifier::CredentialVerifier).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VerifierConfig {
	/// Base URL of the authentication service (`https://auth.example.com/api`).
	pub base_url: Url,
	/// Path of the login endpoint, relative to [`base_url`](Self::base_url).
	#[serde(default = "default_login_path")]
	pub login_path: String,
	/// Accounts granted a local bypass; empty disables the bypass path.
	#[serde(default)]
	pub bypass: BypassList,
}
impl VerifierConfig {
	/// Creates a new builder for the provided base URL.
	pub fn builder(base_url: Url) -> VerifierConfigBuilder {
		VerifierConfigBuilder::new(base_url)
	}

	/// Validates the configuration and resolves the absolute login endpoint.
	///
	/// The base URL is treated as a directory, so `https://host/api` joined with `users/login`
	/// yields `https://host/api/users/login`. The resolved endpoint must stay on the base URL's
	/// origin and below its directory.
	pub fn login_endpoint(&self) -> Result<Url, ConfigError> {
		validate_base_url(&self.base_url)?;
		validate_login_path(&self.login_path)?;

		let mut base = self.base_url.clone();

		if !base.path().ends_with('/') {
			let directory = format!("{}/", base.path());

			base.set_path(&directory);
		}

		let endpoint =
			base.join(&self.login_path).map_err(|source| ConfigError::EndpointJoin { source })?;

		if endpoint.origin() != base.origin() || !endpoint.path().starts_with(base.path()) {
			return Err(ConfigError::InvalidLoginPath { path: self.login_path.clone() });
		}

		Ok(endpoint)
	}

	/// Validates invariants for the configuration.
	pub(crate) fn validate(&self) -> Result<(), ConfigError> {
		self.login_endpoint().map(|_| ())
	}
}

fn default_login_path() -> String {
	DEFAULT_LOGIN_PATH.into()
}

fn validate_base_url(url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"http" | "https" if !url.cannot_be_a_base() => Ok(()),
		_ => Err(ConfigError::UnsupportedScheme { url: url.to_string() }),
	}
}

fn validate_login_path(path: &str) -> Result<(), ConfigError> {
	// Anything that parses on its own carries a scheme and would replace the base URL.
	let absolute = path.starts_with('/') || path.contains("://") || Url::parse(path).is_ok();

	if path.trim().is_empty() || absolute {
		Err(ConfigError::InvalidLoginPath { path: path.into() })
	} else {
		Ok(())
	}
}
