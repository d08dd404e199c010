//! Redirect listener port

use async_trait::async_trait;
use resumer_domain::{AuthError, AuthState, AuthorizationCode};

/// Port for receiving the provider's OAuth redirect on a local socket.
#[async_trait]
pub trait RedirectListener: Send + Sync {
    /// Finds the first free port at or above `preferred`.
    ///
    /// # Errors
    /// Returns `Bind` when the port range is exhausted.
    async fn allocate_port(&self, preferred: u16) -> Result<u16, AuthError>;

    /// Accepts exactly one redirect on `port` and validates it against
    /// `expected_state`.
    ///
    /// The browser always receives a reply page, whatever the outcome.
    ///
    /// # Errors
    /// `Bind`, `MalformedRedirect`, `AuthorizationDenied` or `StateMismatch`.
    async fn await_redirect(
        &self,
        expected_state: &AuthState,
        port: u16,
    ) -> Result<AuthorizationCode, AuthError>;
}
