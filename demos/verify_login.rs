//! Demonstrates verifying credentials with the default reqwest transport, including a locally
//! allow-listed operator account that never reaches the login endpoint.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use credential_verifier::{
	auth::{BypassList, Credentials},
	config::VerifierConfig,
	http::ReqwestHttpClient,
	reqwest::Client,
	verifier::{ReqwestTransportErrorMapper, ReqwestVerifier},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/users/login").json_body(serde_json::json!({
				"username": "ada@example.com",
				"password": "analytical-engine",
			}));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"status\":true,\"message\":\"Login successful\"}");
		})
		.await;
	let rejection_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/users/login").json_body(serde_json::json!({
				"username": "ada@example.com",
				"password": "difference-engine",
			}));
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"detail\":\"Invalid username or password\"}");
		})
		.await;
	let bypass = BypassList::disabled().with_account("operator@example.com", "local-only")?;
	let config =
		VerifierConfig::builder(Url::parse(&server.url("/api"))?).bypass(bypass).build()?;
	let http_client = ReqwestHttpClient::with_client(Client::builder().no_proxy().build()?);
	let verifier = ReqwestVerifier::with_http_client(
		config,
		http_client,
		Arc::new(ReqwestTransportErrorMapper),
	)?;

	println!("Posting logins to {}.", verifier.login_endpoint());

	for credentials in [
		Credentials::new("ada@example.com", "analytical-engine"),
		Credentials::new("ada@example.com", "difference-engine"),
		Credentials::new("operator@example.com", "local-only"),
	] {
		let result = verifier.verify(&credentials).await?;

		println!("{}: ok={} message={:?}.", credentials.username, result.ok, result.message);
	}

	login_mock.assert_async().await;
	rejection_mock.assert_async().await;

	Ok(())
}
