//! Resume API port

use async_trait::async_trait;
use resumer_domain::{ApiError, BearerToken, PublishOutcome, ResumeList};

/// Port for the provider's resume endpoints.
///
/// Every call is attempted once; nothing is retried or deduplicated.
#[async_trait]
pub trait ResumeApi: Send + Sync {
    /// Lists the caller's resumes in provider order.
    ///
    /// # Errors
    /// `Provider` for an error document, `Network` or `InvalidResponse` otherwise.
    async fn list_my_resumes(&self, token: &BearerToken) -> Result<ResumeList, ApiError>;

    /// Bumps the publication date of one resume.
    ///
    /// # Returns
    /// `Published` for 204, `NotPublished` for any other non-error response.
    ///
    /// # Errors
    /// `Provider` whenever the body is an error document, regardless of status.
    async fn republish_resume(
        &self,
        token: &BearerToken,
        resume_id: &str,
    ) -> Result<PublishOutcome, ApiError>;
}
