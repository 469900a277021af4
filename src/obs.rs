//! Optional observability helpers for verification calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to run every verification inside a span named
//!   `credential_verifier.verify` with a `path` field (bypass/remote) plus the `username`
//!   (bypass) or login `endpoint` (remote). The login endpoint status is logged at `debug`, and
//!   a `warn` audit event fires whenever a bypass account is granted access. Passwords are never
//!   recorded.
//! - Enable `metrics` to increment the `credential_verifier_verify_total` counter for every
//!   attempt/acceptance/rejection/failure, labeled by `path` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Verification paths observed by the verifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerifyPath {
	/// Local allow-list grant; no network I/O.
	Bypass,
	/// Delegation to the login endpoint.
	Remote,
}
impl VerifyPath {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			VerifyPath::Bypass => "bypass",
			VerifyPath::Remote => "remote",
		}
	}
}
impl Display for VerifyPath {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerifyOutcome {
	/// Entry to [`CredentialVerifier::verify`](crate::verifier::CredentialVerifier::verify).
	Attempt,
	/// Credentials were accepted.
	Accepted,
	/// Credentials were rejected (`ok == false`).
	Rejected,
	/// Transport failure propagated back to the caller.
	Failure,
}
impl VerifyOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			VerifyOutcome::Attempt => "attempt",
			VerifyOutcome::Accepted => "accepted",
			VerifyOutcome::Rejected => "rejected",
			VerifyOutcome::Failure => "failure",
		}
	}
}
impl Display for VerifyOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn labels_are_stable() {
		assert_eq!(VerifyPath::Bypass.to_string(), "bypass");
		assert_eq!(VerifyPath::Remote.to_string(), "remote");
		assert_eq!(VerifyOutcome::Attempt.to_string(), "attempt");
		assert_eq!(VerifyOutcome::Accepted.to_string(), "accepted");
		assert_eq!(VerifyOutcome::Rejected.to_string(), "rejected");
		assert_eq!(VerifyOutcome::Failure.to_string(), "failure");
	}
}
