// self
use crate::{
	_prelude::*,
	auth::{BypassList, CredentialSecret},
	config::{DEFAULT_LOGIN_PATH, VerifierConfig},
	error::ConfigError,
};

/// Builder for [`VerifierConfig`] values.
#[derive(Debug)]
pub struct VerifierConfigBuilder {
	/// Base URL of the authentication service.
	pub base_url: Url,
	/// Login path relative to the base URL.
	pub login_path: String,
	/// Accounts granted a local bypass.
	pub bypass: BypassList,
	pending_accounts: Vec<(String, CredentialSecret)>,
}
impl VerifierConfigBuilder {
	/// Creates a new builder seeded with the provided base URL.
	pub fn new(base_url: Url) -> Self {
		Self {
			base_url,
			login_path: DEFAULT_LOGIN_PATH.into(),
			bypass: BypassList::default(),
			pending_accounts: Vec::new(),
		}
	}

	/// Parses `base_url` and seeds a new builder with it.
	pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
		let base_url =
			Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		Ok(Self::new(base_url))
	}

	/// Overrides the login path (defaults to `users/login`).
	pub fn login_path(mut self, path: impl Into<String>) -> Self {
		self.login_path = path.into();

		self
	}

	/// Replaces the bypass allow-list.
	pub fn bypass(mut self, bypass: BypassList) -> Self {
		self.bypass = bypass;

		self
	}

	/// Adds one privileged account; validated in [`build`](Self::build).
	pub fn bypass_account(
		mut self,
		username: impl Into<String>,
		password: impl Into<CredentialSecret>,
	) -> Self {
		self.pending_accounts.push((username.into(), password.into()));

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<VerifierConfig, ConfigError> {
		let mut bypass = self.bypass;

		for (username, password) in self.pending_accounts {
			bypass = bypass.with_account(username, password)?;
		}

		let config = VerifierConfig { base_url: self.base_url, login_path: self.login_path, bypass };

		config.validate()?;

		Ok(config)
	}
}
