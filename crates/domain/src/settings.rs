//! Runtime settings
//!
//! Every component receives the part of [`Settings`] it needs when it is
//! constructed; nothing reads configuration from global state.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::auth::AuthState;
use crate::error::{DomainError, DomainResult};

/// Placeholder shipped instead of real client credentials.
const UNSET_CREDENTIAL: &str = "_";

/// Complete settings for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// OAuth client and API endpoints.
    pub provider: ProviderSettings,
    /// Where the provider redirects the browser.
    pub redirect: RedirectSettings,
    /// Parameters sent with every publish call.
    pub publish: PublishSettings,
    /// Plaintext file holding the bearer token between runs.
    pub token_file: PathBuf,
}

impl Settings {
    /// Default token file name, relative to the working directory.
    pub const DEFAULT_TOKEN_FILE: &'static str = "HHResumeUpdater.token";
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: ProviderSettings::default(),
            redirect: RedirectSettings::default(),
            publish: PublishSettings::default(),
            token_file: PathBuf::from(Self::DEFAULT_TOKEN_FILE),
        }
    }
}

/// OAuth client registration and provider endpoints.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Registered application id.
    pub client_id: String,
    /// Registered application secret.
    pub client_secret: String,
    /// `User-Agent` sent with every provider request.
    pub user_agent: String,
    /// Authorization URL template with `{client_id}`, `{state}` and
    /// `{redirect_uri}` placeholders.
    pub authorize_url: String,
    /// Token endpoint.
    pub token_url: String,
    /// Base URL of the REST API.
    pub api_base_url: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            client_id: UNSET_CREDENTIAL.to_string(),
            client_secret: UNSET_CREDENTIAL.to_string(),
            user_agent: concat!("resumer/", env!("CARGO_PKG_VERSION")).to_string(),
            authorize_url: "https://hh.ru/oauth/authorize?response_type=code&client_id={client_id}&state={state}&redirect_uri={redirect_uri}".to_string(),
            token_url: "https://api.hh.ru/token".to_string(),
            api_base_url: "https://api.hh.ru".to_string(),
        }
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl ProviderSettings {
    /// Fills the authorization URL template.
    ///
    /// The redirect URI is percent-encoded with no safe characters.
    #[must_use]
    pub fn authorization_url(&self, state: &AuthState, redirect_uri: &str) -> String {
        self.authorize_url
            .replace("{client_id}", &self.client_id)
            .replace("{state}", state.as_str())
            .replace("{redirect_uri}", &urlencoding::encode(redirect_uri))
    }

    /// Checks that real client credentials are configured.
    ///
    /// # Errors
    /// Returns `InvalidSettings` if the id or secret is blank or still `_`.
    pub fn ensure_client_credentials(&self) -> DomainResult<()> {
        for (name, value) in [
            ("provider.client_id", &self.client_id),
            ("provider.client_secret", &self.client_secret),
        ] {
            let value = value.trim();
            if value.is_empty() || value == UNSET_CREDENTIAL {
                return Err(DomainError::InvalidSettings(format!("{name} is not configured")));
            }
        }
        if !self.authorize_url.contains("{state}") || !self.authorize_url.contains("{redirect_uri}") {
            return Err(DomainError::InvalidSettings(
                "provider.authorize_url must contain {state} and {redirect_uri}".to_string(),
            ));
        }
        Ok(())
    }
}

/// Host and preferred port of the local redirect listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectSettings {
    /// Host registered as the redirect target.
    pub host: String,
    /// Preferred port; the first free port at or above it is used for loopback hosts.
    pub port: u16,
}

impl Default for RedirectSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8008,
        }
    }
}

impl RedirectSettings {
    /// Returns true if the host names the local machine.
    #[must_use]
    pub fn is_loopback(&self) -> bool {
        matches!(self.host.as_str(), "127.0.0.1" | "localhost" | "::1" | "[::1]")
    }

    /// Redirect URI for the given port, e.g. `http://127.0.0.1:8008/`.
    #[must_use]
    pub fn uri(&self, port: u16) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("http://[{}]:{port}/", self.host)
        } else {
            format!("http://{}:{port}/", self.host)
        }
    }
}

/// Query parameters of the publish endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishSettings {
    /// Site locale, e.g. `RU`.
    pub locale: String,
    /// Site host, e.g. `hh.ru`.
    pub host: String,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            locale: "RU".to_string(),
            host: "hh.ru".to_string(),
        }
    }
}
