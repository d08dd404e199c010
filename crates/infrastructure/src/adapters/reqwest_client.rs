//! Resume API client using reqwest.
//!
//! This adapter implements the `ResumeApi` port against the provider's REST
//! API. Every request carries the configured `User-Agent` and the bearer token.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use resumer_application::ports::ResumeApi;
use resumer_domain::{
    ApiError, BearerToken, ProviderSettings, PublishOutcome, PublishSettings, ResumeList,
    provider_error_in,
};
use tracing::debug;
use url::Url;

/// Resume API client.
pub struct ReqwestResumeApi {
    client: Client,
    base_url: Url,
    publish: PublishSettings,
}

impl ReqwestResumeApi {
    /// Creates a client for the configured provider.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the client cannot be built.
    pub fn new(provider: &ProviderSettings, publish: PublishSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(provider.user_agent.as_str())
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::with_client(client, &provider.api_base_url, publish)
    }

    /// Creates a client around an existing reqwest client.
    ///
    /// # Errors
    /// Returns `InvalidResponse` if `base_url` cannot be parsed.
    pub fn with_client(
        client: Client,
        base_url: &str,
        publish: PublishSettings,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidResponse(format!("invalid API base URL {base_url}: {e}")))?;
        Ok(Self {
            client,
            base_url,
            publish,
        })
    }

    /// Joins `path` onto the base URL, keeping any base path prefix.
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}{path}", self.base_url.path().trim_end_matches('/'));
        url.set_path(&joined);
        url
    }

    /// `POST {base}/resumes/{id}/publish?locale=..&host=..`.
    fn publish_url(&self, resume_id: &str) -> Url {
        let mut url = self.endpoint(&format!("/resumes/{resume_id}/publish"));
        url.query_pairs_mut()
            .append_pair("locale", &self.publish.locale)
            .append_pair("host", &self.publish.host);
        url
    }

    /// Maps reqwest errors to `ApiError`.
    fn map_error(error: &reqwest::Error) -> ApiError {
        if error.is_timeout() {
            return ApiError::Network(format!("request timed out: {error}"));
        }
        if error.is_connect() {
            let host = error
                .url()
                .and_then(|u| u.host_str().map(String::from))
                .unwrap_or_else(|| "unknown".to_string());
            return ApiError::Network(format!("cannot connect to {host}: {error}"));
        }
        if error.is_decode() {
            return ApiError::InvalidResponse(error.to_string());
        }
        ApiError::Network(error.to_string())
    }
}

/// Decodes the listing body. Error documents win over the status code.
fn interpret_listing_response(status: StatusCode, body: &[u8]) -> Result<ResumeList, ApiError> {
    if let Some(message) = provider_error_in(body) {
        return Err(ApiError::Provider(message));
    }
    if !status.is_success() {
        return Err(ApiError::InvalidResponse(format!(
            "unexpected status {status} for resume listing"
        )));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Classifies a publish response.
///
/// An error document is an error whatever the status; otherwise 204 means
/// published and any other status means not published.
fn interpret_publish_response(status: StatusCode, body: &[u8]) -> Result<PublishOutcome, ApiError> {
    if let Some(message) = provider_error_in(body) {
        return Err(ApiError::Provider(message));
    }
    Ok(PublishOutcome::from_status(status.as_u16()))
}

#[async_trait]
impl ResumeApi for ReqwestResumeApi {
    async fn list_my_resumes(&self, token: &BearerToken) -> Result<ResumeList, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/resumes/mine"))
            .header(reqwest::header::AUTHORIZATION, token.authorization_header())
            .send()
            .await
            .map_err(|e| Self::map_error(&e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| Self::map_error(&e))?;
        debug!(status = status.as_u16(), bytes = body.len(), "Resume listing received");

        interpret_listing_response(status, &body)
    }

    async fn republish_resume(
        &self,
        token: &BearerToken,
        resume_id: &str,
    ) -> Result<PublishOutcome, ApiError> {
        let response = self
            .client
            .post(self.publish_url(resume_id))
            .header(reqwest::header::AUTHORIZATION, token.authorization_header())
            .send()
            .await
            .map_err(|e| Self::map_error(&e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| Self::map_error(&e))?;
        debug!(resume = %resume_id, status = status.as_u16(), "Publish answered");

        interpret_publish_response(status, &body)
    }
}
