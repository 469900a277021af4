// self
use crate::_prelude::*;
#[cfg(feature = "tracing")] use crate::obs::VerifyPath;

/// Future returned by [`VerifySpan::instrument`].
#[cfg(feature = "tracing")]
pub type InstrumentedVerify<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`VerifySpan::instrument`]; the input future itself without tracing.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedVerify<F> = F;

/// Span covering one verification call.
///
/// The span is named `credential_verifier.verify`. Bypass spans carry the privileged
/// `username`; remote spans carry the login `endpoint`. Passwords are never recorded.
#[derive(Clone, Debug)]
pub struct VerifySpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl VerifySpan {
	/// Span for a bypass grant.
	pub fn bypass(username: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"credential_verifier.verify",
				path = VerifyPath::Bypass.as_str(),
				username
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = username;

			Self {}
		}
	}

	/// Span for a call to the login endpoint.
	pub fn remote(endpoint: &Url) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"credential_verifier.verify",
				path = VerifyPath::Remote.as_str(),
				endpoint = endpoint.as_str()
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = endpoint;

			Self {}
		}
	}

	/// Runs a synchronous section inside the span.
	pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(f)
		}
		#[cfg(not(feature = "tracing"))]
		{
			f()
		}
	}

	/// Attaches the span to a future so it is entered on every poll.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedVerify<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits the `warn` audit event for a bypass grant; the enclosing bypass span names the account.
pub fn audit_bypass_grant() {
	#[cfg(feature = "tracing")]
	tracing::warn!("Privileged account bypassed remote verification.");
}

/// Logs the status and outcome of a login endpoint response.
pub fn trace_remote_response(status: u16, ok: bool) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(status, ok, "Login endpoint responded.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (status, ok);
	}
}
