//! Credential verification client: check a username/password pair against a remote login
//! endpoint, short-circuit audited bypass accounts, and get back one normalized result shape.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod verifier;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::BypassList,
		config::VerifierConfig,
		http::ReqwestHttpClient,
		verifier::{CredentialVerifier, ReqwestTransportErrorMapper},
	};

	/// Verifier type alias used by reqwest-backed integration tests.
	pub type ReqwestTestVerifier =
		CredentialVerifier<ReqwestHttpClient, ReqwestTransportErrorMapper>;

	/// Builds a reqwest HTTP client that ignores proxy environment variables so requests always
	/// reach the local `httpmock` server.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.no_proxy()
			.build()
			.expect("Failed to build proxy-free Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`CredentialVerifier`] pointed at `base_url` with the provided bypass list and
	/// the reqwest transport used across integration tests.
	pub fn build_reqwest_test_verifier(base_url: &str, bypass: BypassList) -> ReqwestTestVerifier {
		let base_url = Url::parse(base_url).expect("Test base URL should parse successfully.");
		let config = VerifierConfig::builder(base_url)
			.bypass(bypass)
			.build()
			.expect("Test verifier configuration should be valid.");

		CredentialVerifier::with_http_client(
			config,
			test_reqwest_http_client(),
			Arc::new(ReqwestTransportErrorMapper),
		)
		.expect("Test verifier should build successfully.")
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
