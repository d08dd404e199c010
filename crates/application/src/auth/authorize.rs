//! Browser-based authorization code flow.

use std::time::Duration;

use async_trait::async_trait;
use resumer_domain::{AuthError, AuthState, AuthorizationCode, ProviderSettings, RedirectSettings};
use tracing::{debug, info, warn};

use crate::ports::{BrowserLauncher, LinkPresenter, RedirectListener};
use crate::ApplicationResult;

/// Authorization code together with the redirect URI it was issued for.
///
/// The token endpoint requires the same URI, and with port allocation it may
/// differ from the configured one.
#[derive(Debug)]
pub struct AuthorizationGrant {
    /// Percent-decoded authorization code.
    pub code: AuthorizationCode,
    /// Redirect URI sent with the authorization request.
    pub redirect_uri: String,
}

/// Something that can obtain an authorization code from the user.
#[async_trait]
pub trait AuthorizationFlow: Send + Sync {
    /// Runs one complete authorization attempt with a fresh state.
    ///
    /// # Errors
    /// Any failure is terminal for this attempt.
    async fn authorize(&self) -> ApplicationResult<AuthorizationGrant>;
}

/// Drives the provider's authorization page and the local redirect listener.
pub struct AuthorizeUser<L, B, P> {
    listener: L,
    browser: Option<B>,
    presenter: P,
    provider: ProviderSettings,
    redirect: RedirectSettings,
    timeout: Option<Duration>,
}

impl<L: RedirectListener, B: BrowserLauncher, P: LinkPresenter> AuthorizeUser<L, B, P> {
    /// Creates the flow.
    ///
    /// The authorization link always goes to `presenter`; with `browser` set
    /// it is opened as well.
    pub const fn new(
        listener: L,
        browser: Option<B>,
        presenter: P,
        provider: ProviderSettings,
        redirect: RedirectSettings,
    ) -> Self {
        Self {
            listener,
            browser,
            presenter,
            provider,
            redirect,
            timeout: None,
        }
    }

    /// Gives up waiting for the redirect after `timeout`.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Runs the flow.
    ///
    /// # Errors
    /// Fails if credentials are not configured, the listener cannot bind, or
    /// the redirect is malformed, denied, forged or late.
    pub async fn execute(&self) -> ApplicationResult<AuthorizationGrant> {
        self.provider.ensure_client_credentials()?;

        let port = if self.redirect.is_loopback() {
            self.listener.allocate_port(self.redirect.port).await?
        } else {
            self.redirect.port
        };
        if port != self.redirect.port {
            info!(preferred = self.redirect.port, port, "Preferred redirect port is busy");
        }

        let state = AuthState::generate();
        let redirect_uri = self.redirect.uri(port);
        let url = self.provider.authorization_url(&state, &redirect_uri);

        self.present(&url);

        let code = self.wait_for_code(&state, port).await?.percent_decoded();
        debug!(code = ?code, "Authorization code received");

        Ok(AuthorizationGrant { code, redirect_uri })
    }

    fn present(&self, url: &str) {
        if let Some(browser) = &self.browser
            && let Err(e) = browser.open(url)
        {
            warn!(error = %e, "Failed to open browser");
        }
        self.presenter.present(url);
        info!("Authorization link presented");
    }

    async fn wait_for_code(&self, state: &AuthState, port: u16) -> Result<AuthorizationCode, AuthError> {
        let wait = self.listener.await_redirect(state, port);
        match self.timeout {
            None => wait.await,
            Some(limit) => tokio::time::timeout(limit, wait)
                .await
                .map_err(|_| AuthError::TimedOut {
                    seconds: limit.as_secs(),
                })?,
        }
    }
}

#[async_trait]
impl<L: RedirectListener, B: BrowserLauncher, P: LinkPresenter> AuthorizationFlow
    for AuthorizeUser<L, B, P>
{
    async fn authorize(&self) -> ApplicationResult<AuthorizationGrant> {
        self.execute().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ApplicationError;
    use crate::ports::BrowserError;
    use std::sync::{Arc, Mutex};

    /// Listener double that records what it was asked and replays a scripted result.
    #[derive(Clone)]
    struct ScriptedListener {
        busy_ports: u16,
        reply: Arc<Mutex<Option<Result<&'static str, AuthError>>>>,
        seen: Arc<Mutex<Vec<(String, u16)>>>,
        hang: bool,
    }

    impl ScriptedListener {
        fn replying(reply: Result<&'static str, AuthError>) -> Self {
            Self {
                busy_ports: 0,
                reply: Arc::new(Mutex::new(Some(reply))),
                seen: Arc::new(Mutex::new(Vec::new())),
                hang: false,
            }
        }
    }

    #[async_trait]
    impl RedirectListener for ScriptedListener {
        async fn allocate_port(&self, preferred: u16) -> Result<u16, AuthError> {
            Ok(preferred + self.busy_ports)
        }

        async fn await_redirect(
            &self,
            expected_state: &AuthState,
            port: u16,
        ) -> Result<AuthorizationCode, AuthError> {
            self.seen
                .lock()
                .unwrap()
                .push((expected_state.as_str().to_string(), port));
            if self.hang {
                std::future::pending::<()>().await;
            }
            let reply = self.reply.lock().unwrap().take().expect("single redirect");
            reply.map(AuthorizationCode::new)
        }
    }

    #[derive(Clone, Default)]
    struct RecordingBrowser {
        opened: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl BrowserLauncher for RecordingBrowser {
        fn open(&self, url: &str) -> Result<(), BrowserError> {
            self.opened.lock().unwrap().push(url.to_string());
            if self.fail {
                Err(BrowserError("no display".into()))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Clone, Default)]
    struct RecordingPresenter {
        shown: Arc<Mutex<Vec<String>>>,
    }

    impl LinkPresenter for RecordingPresenter {
        fn present(&self, url: &str) {
            self.shown.lock().unwrap().push(url.to_string());
        }
    }

    fn provider() -> ProviderSettings {
        ProviderSettings {
            client_id: "CID".into(),
            client_secret: "SECRET".into(),
            ..ProviderSettings::default()
        }
    }

    #[tokio::test]
    async fn test_flow_uses_allocated_port_and_fresh_state() {
        let mut listener = ScriptedListener::replying(Ok("AB%2FC"));
        listener.busy_ports = 2;
        let browser = RecordingBrowser::default();
        let flow = AuthorizeUser::new(
            listener.clone(),
            Some(browser.clone()),
            RecordingPresenter::default(),
            provider(),
            RedirectSettings::default(),
        );

        let grant = flow.execute().await.unwrap();

        assert_eq!(grant.code.as_str(), "AB/C");
        assert_eq!(grant.redirect_uri, "http://127.0.0.1:8010/");

        let seen = listener.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 1);
        let (state, port) = &seen[0];
        assert_eq!(*port, 8010);

        let opened = browser.opened.lock().unwrap().clone();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].contains(&format!("state={state}")));
        assert!(opened[0].contains("client_id=CID"));
        assert!(opened[0].contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8010%2F"));
    }

    #[tokio::test]
    async fn test_browser_failure_is_not_fatal() {
        let listener = ScriptedListener::replying(Ok("CODE"));
        let browser = RecordingBrowser {
            fail: true,
            ..RecordingBrowser::default()
        };
        let presenter = RecordingPresenter::default();
        let flow = AuthorizeUser::new(
            listener,
            Some(browser),
            presenter.clone(),
            provider(),
            RedirectSettings::default(),
        );
        assert_eq!(flow.execute().await.unwrap().code.as_str(), "CODE");
        assert_eq!(presenter.shown.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_link_is_presented_without_browser() {
        let listener = ScriptedListener::replying(Ok("CODE"));
        let presenter = RecordingPresenter::default();
        let flow = AuthorizeUser::<_, RecordingBrowser, _>::new(
            listener.clone(),
            None,
            presenter.clone(),
            provider(),
            RedirectSettings::default(),
        );

        flow.execute().await.unwrap();

        let shown = presenter.shown.lock().unwrap().clone();
        let (state, _) = listener.seen.lock().unwrap()[0].clone();
        assert_eq!(shown.len(), 1);
        assert!(shown[0].starts_with("https://hh.ru/oauth/authorize?"));
        assert!(shown[0].contains(&format!("state={state}")));
        assert!(shown[0].contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8008%2F"));
    }

    #[tokio::test]
    async fn test_listener_errors_are_returned_verbatim() {
        let listener = ScriptedListener::replying(Err(AuthError::StateMismatch));
        let flow = AuthorizeUser::<_, RecordingBrowser, _>::new(
            listener,
            None,
            RecordingPresenter::default(),
            provider(),
            RedirectSettings::default(),
        );
        let err = flow.execute().await.unwrap_err();
        assert!(matches!(err, ApplicationError::Auth(AuthError::StateMismatch)));
    }

    #[tokio::test]
    async fn test_remote_redirect_host_skips_port_probe() {
        let mut listener = ScriptedListener::replying(Ok("CODE"));
        listener.busy_ports = 5;
        let redirect = RedirectSettings {
            host: "callback.example.org".into(),
            port: 443,
        };
        let flow = AuthorizeUser::<_, RecordingBrowser, _>::new(
            listener.clone(),
            None,
            RecordingPresenter::default(),
            provider(),
            redirect,
        );
        let grant = flow.execute().await.unwrap();
        assert_eq!(grant.redirect_uri, "http://callback.example.org:443/");
        assert_eq!(listener.seen.lock().unwrap()[0].1, 443);
    }

    #[tokio::test]
    async fn test_unconfigured_client_is_rejected_before_listening() {
        let listener = ScriptedListener::replying(Ok("CODE"));
        let flow = AuthorizeUser::<_, RecordingBrowser, _>::new(
            listener.clone(),
            None,
            RecordingPresenter::default(),
            ProviderSettings::default(),
            RedirectSettings::default(),
        );
        assert!(matches!(flow.execute().await, Err(ApplicationError::Domain(_))));
        assert!(listener.seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_bounds_the_wait() {
        let mut listener = ScriptedListener::replying(Ok("CODE"));
        listener.hang = true;
        let flow = AuthorizeUser::<_, RecordingBrowser, _>::new(
            listener,
            None,
            RecordingPresenter::default(),
            provider(),
            RedirectSettings::default(),
        )
        .with_timeout(Duration::from_secs(30));
        let err = flow.execute().await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Auth(AuthError::TimedOut { seconds: 30 })
        ));
    }
}
