//! Bearer token acquisition.
//!
//! Precedence: a token supplied by the caller (command line or environment),
//! then the credential store, then a fresh browser authorization whose token
//! is written back to the store.

use std::fmt;

use resumer_domain::BearerToken;
use tracing::{info, warn};

use super::AuthorizationFlow;
use crate::ports::{CredentialStore, TokenEndpoint};
use crate::ApplicationResult;

/// Where the token used for a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrigin {
    /// Passed on the command line.
    CommandLine,
    /// Read from the process environment.
    Environment,
    /// Loaded from the credential store.
    Stored,
    /// Obtained just now through the authorization flow.
    Authorized,
}

impl fmt::Display for TokenOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::CommandLine => "command line",
            Self::Environment => "environment",
            Self::Stored => "credential store",
            Self::Authorized => "authorization",
        };
        f.write_str(text)
    }
}

/// A token together with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredToken {
    /// The bearer token; read-only for the rest of the run.
    pub token: BearerToken,
    /// Where it came from.
    pub origin: TokenOrigin,
}

/// Resolves the bearer token for a run.
pub struct AcquireToken<S, A, T> {
    store: S,
    flow: A,
    endpoint: T,
}

impl<S, A, T> AcquireToken<S, A, T>
where
    S: CredentialStore,
    A: AuthorizationFlow,
    T: TokenEndpoint,
{
    /// Creates the use case.
    pub const fn new(store: S, flow: A, endpoint: T) -> Self {
        Self {
            store,
            flow,
            endpoint,
        }
    }

    /// Returns the supplied token, the stored one, or a freshly authorized one.
    ///
    /// # Errors
    /// Fails if the store cannot be read, or if authorization or the code
    /// exchange fails. A token that cannot be saved is still returned.
    pub async fn execute(&self, supplied: Option<AcquiredToken>) -> ApplicationResult<AcquiredToken> {
        if let Some(acquired) = supplied {
            info!(origin = %acquired.origin, token = %acquired.token.preview(), "Using supplied bearer token");
            return Ok(acquired);
        }

        if let Some(token) = self.store.load().await? {
            info!(location = %self.store.location(), token = %token.preview(), "Using stored bearer token");
            return Ok(AcquiredToken {
                token,
                origin: TokenOrigin::Stored,
            });
        }

        info!("No bearer token available, starting authorization");
        let grant = self.flow.authorize().await?;
        let token = self
            .endpoint
            .exchange_code(grant.code, &grant.redirect_uri)
            .await?;
        info!(token = %token.preview(), "Bearer token obtained");

        match self.store.save(&token).await {
            Ok(()) => info!(location = %self.store.location(), "Bearer token saved"),
            Err(e) => warn!(error = %e, location = %self.store.location(), "Failed to save bearer token"),
        }

        Ok(AcquiredToken {
            token,
            origin: TokenOrigin::Authorized,
        })
    }
}
