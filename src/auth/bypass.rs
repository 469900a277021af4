//! Allow-list of privileged accounts that skip remote verification.
//!
//! The list is injected at construction time through
//! [`VerifierConfig`](crate::config::VerifierConfig), so a deployment can audit exactly which
//! accounts bypass the login endpoint, or disable the bypass entirely by leaving it empty.
//! Matching is exact string equality on both fields: case-sensitive and without trimming.

// std
use std::collections::HashSet;
// self
use crate::{
	_prelude::*,
	auth::{CredentialSecret, Credentials},
};

/// Error returned when bypass allow-list validation fails.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum BypassListError {
	/// An entry has an empty username.
	#[error("Bypass account #{index} has an empty username.")]
	EmptyUsername {
		/// Position of the offending entry.
		index: usize,
	},
	/// An entry has an empty password.
	#[error("Bypass account `{username}` has an empty password.")]
	EmptyPassword {
		/// Username of the offending entry.
		username: String,
	},
	/// The same username appears more than once.
	#[error("Bypass account `{username}` is listed more than once.")]
	DuplicateUsername {
		/// Username that was repeated.
		username: String,
	},
}

/// Privileged account granted a local bypass.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct BypassAccount {
	/// Exact username that must be presented.
	pub username: String,
	/// Exact password that must be presented.
	pub password: CredentialSecret,
}
impl BypassAccount {
	/// Creates a new allow-list entry.
	pub fn new(username: impl Into<String>, password: impl Into<CredentialSecret>) -> Self {
		Self { username: username.into(), password: password.into() }
	}

	fn matches(&self, credentials: &Credentials) -> bool {
		self.username == credentials.username && self.password == credentials.password
	}
}

/// Validated allow-list consulted before every remote verification.
///
/// [`BypassList::default`] is empty, which disables the bypass path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<BypassAccount>")]
pub struct BypassList(Vec<BypassAccount>);
impl BypassList {
	/// Returns an empty list; every credential pair takes the remote path.
	pub fn disabled() -> Self {
		Self::default()
	}

	/// Builds a list after validating every entry.
	pub fn new<I>(accounts: I) -> Result<Self, BypassListError>
	where
		I: IntoIterator<Item = BypassAccount>,
	{
		let accounts = accounts.into_iter().collect::<Vec<_>>();

		validate_accounts(&accounts)?;

		Ok(Self(accounts))
	}

	/// Appends one account, re-validating the list.
	pub fn with_account(
		mut self,
		username: impl Into<String>,
		password: impl Into<CredentialSecret>,
	) -> Result<Self, BypassListError> {
		self.0.push(BypassAccount::new(username, password));

		validate_accounts(&self.0)?;

		Ok(self)
	}

	/// Returns `true` when `credentials` exactly match one of the listed accounts.
	pub fn matches(&self, credentials: &Credentials) -> bool {
		self.0.iter().any(|account| account.matches(credentials))
	}

	/// Lists the usernames granted a bypass, in configuration order.
	pub fn usernames(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|account| account.username.as_str())
	}

	/// Returns `true` when the bypass path is disabled.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Number of privileged accounts.
	pub fn len(&self) -> usize {
		self.0.len()
	}
}
impl TryFrom<Vec<BypassAccount>> for BypassList {
	type Error = BypassListError;

	fn try_from(accounts: Vec<BypassAccount>) -> Result<Self, Self::Error> {
		Self::new(accounts)
	}
}

fn validate_accounts(accounts: &[BypassAccount]) -> Result<(), BypassListError> {
	let mut seen = HashSet::with_capacity(accounts.len());

	for (index, account) in accounts.iter().enumerate() {
		if account.username.is_empty() {
			return Err(BypassListError::EmptyUsername { index });
		}
		if account.password.is_empty() {
			return Err(BypassListError::EmptyPassword { username: account.username.clone() });
		}
		if !seen.insert(account.username.as_str()) {
			return Err(BypassListError::DuplicateUsername { username: account.username.clone() });
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const ADMIN: &str = "admin@example.com";
	const ADMIN_PASSWORD: &str = "admin@123";

	fn admin_list() -> BypassList {
		BypassList::disabled()
			.with_account(ADMIN, ADMIN_PASSWORD)
			.expect("Admin bypass fixture should be valid.")
	}

	#[test]
	fn matches_only_the_exact_pair() {
		let list = admin_list();

		assert!(list.matches(&Credentials::new(ADMIN, ADMIN_PASSWORD)));
		assert!(!list.matches(&Credentials::new("Admin@example.com", ADMIN_PASSWORD)));
		assert!(!list.matches(&Credentials::new(ADMIN, "admin@1234")));
		assert!(!list.matches(&Credentials::new(format!(" {ADMIN}"), ADMIN_PASSWORD)));
		assert!(!list.matches(&Credentials::new(ADMIN, format!("{ADMIN_PASSWORD} "))));
		assert!(!list.matches(&Credentials::new(ADMIN_PASSWORD, ADMIN)));
	}

	#[test]
	fn disabled_list_never_matches() {
		let list = BypassList::disabled();

		assert!(list.is_empty());
		assert!(!list.matches(&Credentials::new(ADMIN, ADMIN_PASSWORD)));
		assert!(!list.matches(&Credentials::new("", "")));
	}

	#[test]
	fn validation_rejects_empty_and_duplicate_entries() {
		assert_eq!(
			BypassList::new([BypassAccount::new("", "secret")]),
			Err(BypassListError::EmptyUsername { index: 0 })
		);
		assert_eq!(
			BypassList::new([BypassAccount::new(ADMIN, "")]),
			Err(BypassListError::EmptyPassword { username: ADMIN.into() })
		);
		assert_eq!(
			admin_list().with_account(ADMIN, "another-secret"),
			Err(BypassListError::DuplicateUsername { username: ADMIN.into() })
		);
	}

	#[test]
	fn deserialize_validates_entries() {
		let list: BypassList = serde_json::from_str(
			r#"[{"username":"admin@example.com","password":"admin@123"},{"username":"ops","password":"ops-pass"}]"#,
		)
		.expect("Valid bypass list should deserialize.");

		assert_eq!(list.len(), 2);
		assert_eq!(list.usernames().collect::<Vec<_>>(), [ADMIN, "ops"]);
		assert!(serde_json::from_str::<BypassList>(r#"[{"username":"","password":"x"}]"#).is_err());
	}

	#[test]
	fn debug_output_lists_usernames_without_passwords() {
		let rendered = format!("{:?}", admin_list());

		assert!(rendered.contains(ADMIN));
		assert!(!rendered.contains(ADMIN_PASSWORD));
	}
}
