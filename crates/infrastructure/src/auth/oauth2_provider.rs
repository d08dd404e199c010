//! `OAuth2` token endpoint client.
//!
//! Exchanges an authorization code for a bearer token with one
//! form-encoded POST. Nothing is retried.

use async_trait::async_trait;
use reqwest::Client;
use resumer_application::ports::TokenEndpoint;
use resumer_domain::{AuthError, AuthorizationCode, BearerToken, ProviderSettings, provider_error_in};
use serde::Deserialize;
use tracing::debug;

/// Content-Type for form-urlencoded data.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Successful token response; only the access token is used.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Token endpoint client for the authorization code grant.
pub struct OAuth2TokenClient {
    http_client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl OAuth2TokenClient {
    /// Creates a client for the configured provider.
    ///
    /// # Errors
    /// Returns `Network` if the HTTP client cannot be built.
    pub fn new(provider: &ProviderSettings) -> Result<Self, AuthError> {
        let http_client = Client::builder()
            .user_agent(provider.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::Network(e.to_string()))?;
        Ok(Self::with_client(http_client, provider))
    }

    /// Creates a client around an existing reqwest client.
    #[must_use]
    pub fn with_client(http_client: Client, provider: &ProviderSettings) -> Self {
        Self {
            http_client,
            token_url: provider.token_url.clone(),
            client_id: provider.client_id.clone(),
            client_secret: provider.client_secret.clone(),
        }
    }

    fn form_body(&self, code: &str, redirect_uri: &str) -> Result<String, AuthError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];
        serde_urlencoded::to_string(params)
            .map_err(|e| AuthError::TokenExchange(format!("Failed to encode form: {e}")))
    }
}

/// Reads the token out of a token endpoint body.
///
/// An error document wins over the status code.
fn parse_token_response(status: u16, body: &[u8]) -> Result<BearerToken, AuthError> {
    if let Some(message) = provider_error_in(body) {
        return Err(AuthError::TokenExchange(message));
    }
    let response: TokenResponse = serde_json::from_slice(body).map_err(|e| {
        AuthError::TokenExchange(format!("unreadable token response (status {status}): {e}"))
    })?;
    response
        .access_token
        .as_deref()
        .and_then(BearerToken::parse)
        .ok_or_else(|| {
            AuthError::TokenExchange(format!("response without access_token (status {status})"))
        })
}

#[async_trait]
impl TokenEndpoint for OAuth2TokenClient {
    async fn exchange_code(
        &self,
        code: AuthorizationCode,
        redirect_uri: &str,
    ) -> Result<BearerToken, AuthError> {
        let body = self.form_body(&code.into_inner(), redirect_uri)?;

        let response = self
            .http_client
            .post(&self.token_url)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e: reqwest::Error| AuthError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        debug!(status, "Token endpoint answered");

        let bytes = response
            .bytes()
            .await
            .map_err(|e: reqwest::Error| AuthError::Network(format!("Failed to read token response: {e}")))?;

        parse_token_response(status, &bytes)
    }
}
