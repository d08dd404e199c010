//! Authorization values and errors

use std::fmt;

use rand::Rng;
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Number of random bytes behind a generated [`AuthState`].
const STATE_ENTROPY_BYTES: usize = 32;

/// Characters of a secret shown in log previews.
const PREVIEW_CHARS: usize = 8;

/// Anti-forgery `state` value for a single authorization attempt.
///
/// Generated from the thread-local CSPRNG and hex-encoded. A new value is
/// created for every flow and is never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthState(String);

impl AuthState {
    /// Generates a fresh state token.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; STATE_ENTROPY_BYTES];
        rand::rng().fill(&mut bytes);
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Wraps a known state value (used by tests and callers that replay a URL).
    #[must_use]
    pub fn from_value(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the state as sent in the authorization URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares a received `state` parameter in constant time.
    #[must_use]
    pub fn matches(&self, received: &str) -> bool {
        self.0.as_bytes().ct_eq(received.as_bytes()).into()
    }
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthState").field(&preview(&self.0)).finish()
    }
}

/// Authorization code delivered to the redirect listener.
///
/// Not `Clone`; the token exchange consumes it.
#[derive(PartialEq, Eq)]
pub struct AuthorizationCode(String);

impl AuthorizationCode {
    /// Wraps a raw code value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a copy with percent-escapes decoded.
    ///
    /// Codes that are not valid percent-encoded UTF-8 are returned unchanged.
    #[must_use]
    pub fn percent_decoded(self) -> Self {
        match urlencoding::decode(&self.0) {
            Ok(decoded) => Self(decoded.into_owned()),
            Err(_) => self,
        }
    }

    /// Consumes the code, returning the raw string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AuthorizationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthorizationCode").field(&preview(&self.0)).finish()
    }
}

/// Bearer access token for the provider API.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a token value, trimming surrounding whitespace.
    ///
    /// Returns `None` for blank input.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the raw token.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Returns a short preview that is safe to log.
    #[must_use]
    pub fn preview(&self) -> String {
        preview(&self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&self.preview()).finish()
    }
}

/// First few characters of a secret followed by an ellipsis.
fn preview(secret: &str) -> String {
    if secret.chars().count() > PREVIEW_CHARS + 4 {
        let head: String = secret.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        "*".repeat(secret.chars().count())
    }
}

/// Failures while obtaining a bearer token.
///
/// Every variant is terminal for the current flow: retrying means starting a
/// new authorization with a new state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The redirect listener could not bind its port.
    #[error("cannot listen for the OAuth redirect on port {port}: {message}")]
    Bind {
        /// Port that was requested.
        port: u16,
        /// Underlying I/O error.
        message: String,
    },

    /// The redirect request was not a `GET /?...` request with usable parameters.
    #[error("malformed OAuth redirect request: {0}")]
    MalformedRedirect(String),

    /// The provider redirected back with an `error` parameter.
    #[error("authorization denied by provider: {0}")]
    AuthorizationDenied(String),

    /// The `state` parameter did not match the one sent with the request.
    #[error("OAuth state parameter mismatch")]
    StateMismatch,

    /// The token endpoint answered with an error document.
    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    /// Transport failure talking to the provider or the browser socket.
    #[error("network error: {0}")]
    Network(String),

    /// No redirect arrived within the configured wait.
    #[error("no OAuth redirect received within {seconds}s")]
    TimedOut {
        /// Configured wait in seconds.
        seconds: u64,
    },
}
