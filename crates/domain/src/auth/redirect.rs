//! OAuth redirect request parsing.
//!
//! The provider sends the browser back to `http://<host>:<port>/?code=..&state=..`
//! (or `?error=..`). Only the request line of that single GET is inspected;
//! headers and any body are ignored.

use std::collections::BTreeMap;

use super::types::{AuthError, AuthState, AuthorizationCode};

/// Upper bound on the bytes read from the redirect connection.
pub const MAX_REDIRECT_REQUEST_BYTES: usize = 2048;

/// Query parameters carried by the redirect request.
///
/// Values are kept exactly as received (still percent-encoded). When a name
/// repeats, the last value wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallbackParams(BTreeMap<String, String>);

impl CallbackParams {
    /// Splits a raw query string on `&` and then on the first `=` of each pair.
    ///
    /// Empty segments are skipped; a segment without `=` maps to an empty value.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (key.to_string(), value.to_string())
            })
            .collect();
        Self(params)
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Number of distinct parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the query carried no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What the provider reported through the redirect.
#[derive(Debug, PartialEq, Eq)]
pub enum RedirectCallback {
    /// The user approved access (or at least no `error` was sent).
    Granted {
        /// The authorization code, if present.
        code: Option<AuthorizationCode>,
        /// The echoed `state`, if present.
        state: Option<String>,
    },
    /// The provider reported an error, e.g. `access_denied`.
    Denied {
        /// Value of the `error` parameter.
        error: String,
        /// Value of `error_description`, when sent.
        description: Option<String>,
    },
}

impl RedirectCallback {
    /// Classifies parsed parameters. An `error` parameter always wins over a code.
    #[must_use]
    pub fn from_params(mut params: CallbackParams) -> Self {
        if let Some(error) = params.0.remove("error") {
            return Self::Denied {
                error,
                description: params.0.remove("error_description"),
            };
        }
        Self::Granted {
            code: params
                .0
                .remove("code")
                .filter(|code| !code.is_empty())
                .map(AuthorizationCode::new),
            state: params.0.remove("state"),
        }
    }

    /// Checks the callback against the state sent with the authorization URL.
    ///
    /// Order: provider error, then state, then presence of the code.
    ///
    /// # Errors
    /// `AuthorizationDenied`, `StateMismatch` (a missing state included), or
    /// `MalformedRedirect` when no code was sent.
    pub fn verify(self, expected: &AuthState) -> Result<AuthorizationCode, AuthError> {
        match self {
            Self::Denied { error, .. } => Err(AuthError::AuthorizationDenied(error)),
            Self::Granted { code, state } => {
                if !state.as_deref().is_some_and(|s| expected.matches(s)) {
                    return Err(AuthError::StateMismatch);
                }
                code.ok_or_else(|| {
                    AuthError::MalformedRedirect("redirect carries neither code nor error".into())
                })
            }
        }
    }
}

/// Extracts the query parameters from the first line of a raw HTTP request.
///
/// The line must read `GET /?<query> HTTP/<version>`.
///
/// # Errors
/// Returns `MalformedRedirect` when the request line does not have that shape.
pub fn parse_redirect_request(raw: &[u8]) -> Result<CallbackParams, AuthError> {
    let line_end = raw.iter().position(|&b| b == b'\n').unwrap_or(raw.len());
    let line = String::from_utf8_lossy(&raw[..line_end]);
    let line = line.trim_end_matches('\r');

    let mut tokens = line.split_ascii_whitespace();
    let (Some(method), Some(target), Some(version), None) =
        (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(malformed("expected `GET /?... HTTP/1.1` request line"));
    };

    if method != "GET" {
        return Err(malformed(format!("unexpected method {method}")));
    }
    if !version.starts_with("HTTP/") {
        return Err(malformed(format!("unexpected protocol {version}")));
    }
    let Some(query) = target.strip_prefix("/?") else {
        return Err(malformed(format!("unexpected target {target}")));
    };

    Ok(CallbackParams::from_query(query))
}

fn malformed(message: impl Into<String>) -> AuthError {
    AuthError::MalformedRedirect(message.into())
}
