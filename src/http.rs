//! Transport primitives for login requests.
//!
//! The module exposes [`LoginHttpClient`] alongside [`ResponseMetadata`] and
//! [`ResponseMetadataSlot`] so downstream crates can plug in their own HTTP stack (axios-style
//! wrappers with interceptors, test doubles, service meshes) while the verifier keeps a single
//! normalization path. Implementations call [`ResponseMetadataSlot::take`] before dispatching
//! a request and [`ResponseMetadataSlot::store`] once the HTTP status is known, so
//! [`TransportErrorMapper`](crate::verifier::TransportErrorMapper) can attach that status to
//! failures raised while the body is still streaming.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{ACCEPT, CONTENT_TYPE};
// self
use crate::_prelude::*;

/// Boxed future returned by [`LoginHttpClient::post_json`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<TransportResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of posting a JSON login request.
///
/// The trait is the verifier's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so one transport can back many verifiers (typically behind
/// `Arc<T>`), and the returned future must be `Send` so verification can hop executors.
///
/// Retries, timeouts, proxies, and cancellation all belong to the implementation; the verifier
/// issues exactly one call per remote verification and never retries it.
pub trait LoginHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Posts `request.body` as `application/json` to `request.url`.
	///
	/// # Metadata Contract
	///
	/// - Call [`ResponseMetadataSlot::take`] before submitting the request so stale information
	///   never leaks into the new invocation.
	/// - Once the status line arrives, save it with [`ResponseMetadataSlot::store`], before the
	///   body is read.
	/// - Return the status and raw body bytes untouched; the verifier decodes the JSON itself.
	fn post_json(
		&self,
		request: TransportRequest,
		slot: ResponseMetadataSlot,
	) -> TransportFuture<'_, Self::TransportError>;
}

/// Outbound login request handed to a [`LoginHttpClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct TransportRequest {
	/// Fully resolved login endpoint.
	pub url: Url,
	/// Serialized JSON body (`{"username": .., "password": ..}`).
	pub body: Vec<u8>,
}
impl TransportRequest {
	/// Creates a new request.
	pub fn new(url: Url, body: Vec<u8>) -> Self {
		Self { url, body }
	}
}
impl Debug for TransportRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TransportRequest")
			.field("url", &self.url.as_str())
			.field("body_len", &self.body.len())
			.finish()
	}
}

/// Raw response returned by a [`LoginHttpClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw body bytes; empty when the endpoint sent no body.
	pub body: Vec<u8>,
}
impl TransportResponse {
	/// Creates a new response.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}
}

/// Captures metadata from the most recent HTTP response for downstream error mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
	/// HTTP status code returned by the login endpoint, if available.
	pub status: Option<u16>,
}

/// Thread-safe slot for sharing [`ResponseMetadata`] between transport and error layers.
///
/// The verifier creates a fresh slot for each remote verification and reads it only when the
/// transport fails.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadataSlot(Arc<Mutex<Option<ResponseMetadata>>>);
impl ResponseMetadataSlot {
	/// Stores new metadata for the current request.
	pub fn store(&self, meta: ResponseMetadata) {
		*self.0.lock() = Some(meta);
	}

	/// Returns the captured metadata, if any, consuming it from the slot.
	pub fn take(&self) -> Option<ResponseMetadata> {
		self.0.lock().take()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Configure timeouts, proxies, and TLS on the wrapped client; the verifier adds none of its
/// own. Dropping the verification future aborts the in-flight request.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl LoginHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn post_json(
		&self,
		request: TransportRequest,
		slot: ResponseMetadataSlot,
	) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			slot.take();

			let response = client
				.post(request.url)
				.header(CONTENT_TYPE, "application/json")
				.header(ACCEPT, "application/json")
				.body(request.body)
				.send()
				.await?;
			let status = response.status().as_u16();

			slot.store(ResponseMetadata { status: Some(status) });

			let body = response.bytes().await?.to_vec();

			Ok(TransportResponse { status, body })
		})
	}
}
