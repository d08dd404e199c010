//! Token endpoint port

use async_trait::async_trait;
use resumer_domain::{AuthError, AuthorizationCode, BearerToken};

/// Port for exchanging an authorization code for a bearer token.
#[async_trait]
pub trait TokenEndpoint: Send + Sync {
    /// Exchanges `code`, which is consumed, for an access token.
    ///
    /// `redirect_uri` must be the URI the code was issued for.
    ///
    /// # Errors
    /// `TokenExchange` for an error document or a missing token, `Network`
    /// for transport failures.
    async fn exchange_code(
        &self,
        code: AuthorizationCode,
        redirect_uri: &str,
    ) -> Result<BearerToken, AuthError>;
}
