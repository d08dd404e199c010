//! Credential store port
//!
//! Defines the interface for bearer token persistence between runs.

use async_trait::async_trait;
use resumer_domain::BearerToken;

/// Errors that can occur while loading or saving a token.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Repository trait for the persisted bearer token.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads the stored token.
    ///
    /// # Returns
    /// `None` if nothing usable is stored.
    async fn load(&self) -> Result<Option<BearerToken>, CredentialError>;

    /// Replaces the stored token.
    ///
    /// # Errors
    /// Returns an error if the token cannot be written.
    async fn save(&self, token: &BearerToken) -> Result<(), CredentialError>;

    /// Human-readable location of the store, used in hints.
    fn location(&self) -> String;
}
