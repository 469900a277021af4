//! Credential verification: bypass allow-list first, login endpoint otherwise.
//!
//! [`CredentialVerifier::verify`] is a two-branch decision with no memory between calls. A
//! pair listed in the configured [`BypassList`] resolves immediately with
//! [`VerificationResult::bypassed`]; every other pair is posted once to the login endpoint and
//! the response is normalized by [`VerificationResult::from_remote`]. Transport failures are
//! returned as [`TransportError`] and are never folded into an `ok == false` result, so callers
//! can tell "credentials wrong" apart from "server unreachable".

mod payload;
mod result;

pub use payload::*;
pub use result::*;

// self
use crate::{
	_prelude::*,
	auth::{BypassList, Credentials},
	config::VerifierConfig,
	error::TransportError,
	http::{LoginHttpClient, ResponseMetadata, ResponseMetadataSlot, TransportRequest},
	obs::{self, VerifyOutcome, VerifyPath, VerifySpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Verifier specialized for the crate's default reqwest transport stack.
pub type ReqwestVerifier = CredentialVerifier<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Maps transport-specific failures into the crate's [`TransportError`].
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an error emitted by the transport, using any metadata captured before it failed.
	fn map_transport_error(
		&self,
		metadata: Option<&ResponseMetadata>,
		error: E,
	) -> TransportError;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		meta: Option<&ResponseMetadata>,
		err: ReqwestError,
	) -> TransportError {
		let status = meta.and_then(|value| value.status).or_else(|| reqwest_status(&err));

		if err.is_builder() {
			return TransportError::invalid_request(err);
		}
		if err.is_timeout() {
			return TransportError::timeout(err).with_status(status);
		}

		TransportError::network(err).with_status(status)
	}
}

/// Verifies credential pairs against one login endpoint.
///
/// The verifier holds only immutable configuration and shared collaborators, so a single
/// instance can serve any number of concurrent [`verify`](Self::verify) calls.
#[derive(Clone)]
pub struct CredentialVerifier<C, M>
where
	C: ?Sized + LoginHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every remote verification.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Accounts granted a local bypass.
	pub bypass: BypassList,
	login_endpoint: Url,
}
impl<C, M> CredentialVerifier<C, M>
where
	C: ?Sized + LoginHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a verifier that reuses the caller-provided transport + mapper pair.
	///
	/// Fails with [`ConfigError`](crate::error::ConfigError) when the configuration does not
	/// validate or the login endpoint cannot be resolved.
	pub fn with_http_client(
		config: VerifierConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		let login_endpoint = config.login_endpoint()?;

		Ok(Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			bypass: config.bypass,
			login_endpoint,
		})
	}

	/// Resolved URL every remote verification is posted to.
	pub fn login_endpoint(&self) -> &Url {
		&self.login_endpoint
	}

	/// Decides whether `credentials` authenticate.
	///
	/// Allow-listed pairs resolve locally without touching the transport. Every other pair
	/// issues exactly one request; a response that arrives, whatever its status, becomes a
	/// [`VerificationResult`], while a request that fails becomes a [`TransportError`].
	pub async fn verify(
		&self,
		credentials: &Credentials,
	) -> Result<VerificationResult, TransportError> {
		if self.bypass.matches(credentials) {
			let granted = VerifySpan::bypass(&credentials.username).in_scope(|| {
				obs::record_verification(VerifyPath::Bypass, VerifyOutcome::Attempt);
				obs::audit_bypass_grant();
				obs::record_verification(VerifyPath::Bypass, VerifyOutcome::Accepted);

				VerificationResult::bypassed()
			});

			return Ok(granted);
		}

		const PATH: VerifyPath = VerifyPath::Remote;

		let span = VerifySpan::remote(&self.login_endpoint);

		obs::record_verification(PATH, VerifyOutcome::Attempt);

		let result = span.instrument(self.verify_remote(credentials)).await;

		match &result {
			Ok(verification) if verification.ok =>
				obs::record_verification(PATH, VerifyOutcome::Accepted),
			Ok(_) => obs::record_verification(PATH, VerifyOutcome::Rejected),
			Err(_) => obs::record_verification(PATH, VerifyOutcome::Failure),
		}

		result
	}

	async fn verify_remote(
		&self,
		credentials: &Credentials,
	) -> Result<VerificationResult, TransportError> {
		let body = serde_json::to_vec(&credentials.login_request())
			.map_err(|source| TransportError::RequestEncode { source })?;
		let request = TransportRequest::new(self.login_endpoint.clone(), body);
		let meta = ResponseMetadataSlot::default();
		let response =
			self.http_client.post_json(request, meta.clone()).await.map_err(|err| {
				self.transport_mapper.map_transport_error(meta.take().as_ref(), err)
			})?;
		let data = decode_body(response.status, &response.body)?;
		let verification = VerificationResult::from_remote(response.status, data);

		obs::trace_remote_response(response.status, verification.ok);

		Ok(verification)
	}
}
#[cfg(feature = "reqwest")]
impl CredentialVerifier<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a verifier backed by a default reqwest client.
	///
	/// Use [`CredentialVerifier::with_http_client`] with
	/// [`ReqwestHttpClient::with_client`] to control timeouts, proxies, or TLS.
	pub fn new(config: VerifierConfig) -> Result<Self> {
		Self::with_http_client(
			config,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Debug for CredentialVerifier<C, M>
where
	C: ?Sized + LoginHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialVerifier")
			.field("login_endpoint", &self.login_endpoint.as_str())
			.field("bypass_accounts", &self.bypass.usernames().collect::<Vec<_>>())
			.finish()
	}
}

#[cfg(feature = "reqwest")]
fn reqwest_status(err: &ReqwestError) -> Option<u16> {
	err.status().map(|code| code.as_u16())
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;

	fn config(bypass: BypassList) -> VerifierConfig {
		let base_url =
			Url::parse("https://auth.example.com/api").expect("Base URL fixture should parse.");

		VerifierConfig::builder(base_url)
			.bypass(bypass)
			.build()
			.expect("Verifier configuration fixture should be valid.")
	}

	#[test]
	fn new_resolves_login_endpoint() {
		let verifier = <ReqwestVerifier>::new(config(BypassList::disabled()))
			.expect("Verifier should build from a valid configuration.");

		assert_eq!(verifier.login_endpoint().as_str(), "https://auth.example.com/api/users/login");
	}

	#[test]
	fn debug_lists_bypass_usernames_only() {
		let bypass = BypassList::disabled()
			.with_account("admin@example.com", "admin@123")
			.expect("Bypass fixture should be valid.");
		let verifier = <ReqwestVerifier>::new(config(bypass))
			.expect("Verifier should build from a valid configuration.");
		let rendered = format!("{verifier:?}");

		assert!(rendered.contains("admin@example.com"));
		assert!(!rendered.contains("admin@123"));
	}

	#[tokio::test]
	async fn bypass_resolves_without_network() {
		let bypass = BypassList::disabled()
			.with_account("admin@example.com", "admin@123")
			.expect("Bypass fixture should be valid.");
		// Nothing listens on the discard port.
		let config = VerifierConfig::builder(
			Url::parse("http://127.0.0.1:9/").expect("Discard endpoint should parse."),
		)
		.bypass(bypass)
		.build()
		.expect("Verifier configuration fixture should be valid.");
		let verifier =
			<ReqwestVerifier>::new(config).expect("Verifier should build from a valid config.");
		let result = verifier
			.verify(&Credentials::new("admin@example.com", "admin@123"))
			.await
			.expect("Bypass verification must not fail.");

		assert_eq!(result, VerificationResult::bypassed());
	}

	#[cfg(feature = "metrics")]
	#[test]
	fn metrics_count_bypass_grants_and_transport_failures() {
		// std
		use std::net::TcpListener;
		// self
		use crate::{_preludet::build_reqwest_test_verifier, obs::recorder::CountingRecorder};

		let port = {
			let listener =
				TcpListener::bind("127.0.0.1:0").expect("Failed to reserve a local port.");

			listener.local_addr().expect("Reserved listener should expose its address.").port()
		};
		let bypass = BypassList::disabled()
			.with_account("admin@example.com", "admin@123")
			.expect("Bypass fixture should be valid.");
		let verifier = build_reqwest_test_verifier(&format!("http://127.0.0.1:{port}/"), bypass);
		let runtime = tokio::runtime::Builder::new_current_thread()
			.enable_all()
			.build()
			.expect("Failed to build a current-thread runtime.");
		let recorder = CountingRecorder::default();

		metrics::with_local_recorder(&recorder, || {
			runtime.block_on(async {
				verifier
					.verify(&Credentials::new("admin@example.com", "admin@123"))
					.await
					.expect("Bypass verification must not fail.");
				verifier
					.verify(&Credentials::new("admin@example.com", "admin@1234"))
					.await
					.expect_err("A refused connection must surface as a transport error.");
			})
		});

		assert_eq!(recorder.verifications(VerifyPath::Bypass, VerifyOutcome::Attempt), 1);
		assert_eq!(recorder.verifications(VerifyPath::Bypass, VerifyOutcome::Accepted), 1);
		assert_eq!(recorder.verifications(VerifyPath::Remote, VerifyOutcome::Attempt), 1);
		assert_eq!(recorder.verifications(VerifyPath::Remote, VerifyOutcome::Failure), 1);
		assert_eq!(recorder.verifications(VerifyPath::Remote, VerifyOutcome::Accepted), 0);
	}

	#[test]
	fn reqwest_builder_errors_map_to_invalid_request() {
		let err = ReqwestClient::new()
			.post("not a url")
			.build()
			.expect_err("Relative URLs must fail to build.");
		let mapped = ReqwestTransportErrorMapper.map_transport_error(None, err);

		assert!(matches!(mapped, TransportError::InvalidRequest { .. }));
	}
}
