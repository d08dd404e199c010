//! One-shot loopback listener for the OAuth redirect.
//!
//! The provider sends the browser to `http://<host>:<port>/?code=..&state=..`.
//! Exactly one connection is accepted per flow; whatever it carries, the
//! browser gets a `200 OK` page and the socket is closed.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use async_trait::async_trait;
use resumer_application::ports::RedirectListener;
use resumer_domain::auth::MAX_REDIRECT_REQUEST_BYTES;
use resumer_domain::{
    AuthError, AuthState, AuthorizationCode, RedirectCallback, RedirectSettings,
    parse_redirect_request,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tracing::{debug, info, warn};

const SUCCESS_HTML: &str = "<html><body><h1>Authorization complete</h1><p>You may close this window.</p></body></html>";

/// Redirect listener on a plain tokio TCP socket.
#[derive(Debug, Clone)]
pub struct TcpRedirectListener {
    bind_ip: IpAddr,
}

impl TcpRedirectListener {
    /// Creates a listener for the configured redirect host.
    ///
    /// An IP literal binds that address. `localhost` and any other host name
    /// bind IPv4 loopback; the redirect then has to be forwarded there.
    #[must_use]
    pub fn new(redirect: &RedirectSettings) -> Self {
        let host = redirect.host.trim_start_matches('[').trim_end_matches(']');
        let bind_ip = match host.parse::<IpAddr>() {
            Ok(ip) => ip,
            Err(_) => {
                if host != "localhost" {
                    warn!(host = %host, "Redirect host is not an IP address; listening on loopback");
                }
                IpAddr::V4(Ipv4Addr::LOCALHOST)
            }
        };
        if bind_ip.is_unspecified() {
            warn!(address = %bind_ip, "Redirect listener will accept connections on every interface");
        }
        Self { bind_ip }
    }

    fn probe_ip(&self) -> IpAddr {
        if self.bind_ip.is_unspecified() {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.bind_ip
        }
    }

    /// Binds with `SO_REUSEADDR` and a backlog of one.
    fn bind(&self, port: u16) -> Result<TcpListener, AuthError> {
        let bind_error = |e: std::io::Error| AuthError::Bind {
            port,
            message: e.to_string(),
        };
        let socket = match self.bind_ip {
            IpAddr::V4(_) => TcpSocket::new_v4(),
            IpAddr::V6(_) => TcpSocket::new_v6(),
        }
        .map_err(bind_error)?;
        socket.set_reuseaddr(true).map_err(bind_error)?;
        socket
            .bind(SocketAddr::new(self.bind_ip, port))
            .map_err(bind_error)?;
        socket.listen(1).map_err(bind_error)
    }
}

#[async_trait]
impl RedirectListener for TcpRedirectListener {
    async fn allocate_port(&self, preferred: u16) -> Result<u16, AuthError> {
        let ip = self.probe_ip();
        let mut port = preferred;
        // A successful connect means something is already listening there.
        while TcpStream::connect((ip, port)).await.is_ok() {
            debug!(port, "Port is busy");
            port = port.checked_add(1).ok_or_else(|| AuthError::Bind {
                port: preferred,
                message: "no free port left above the preferred one".to_string(),
            })?;
        }
        Ok(port)
    }

    async fn await_redirect(
        &self,
        expected_state: &AuthState,
        port: u16,
    ) -> Result<AuthorizationCode, AuthError> {
        let listener = self.bind(port)?;
        info!(address = %SocketAddr::new(self.bind_ip, port), "Waiting for the OAuth redirect");

        let accepted = listener.accept().await;
        drop(listener);
        let (mut stream, peer) = accepted.map_err(|e| AuthError::Network(e.to_string()))?;
        debug!(peer = %peer, "Redirect connection accepted");

        let mut buffer = vec![0u8; MAX_REDIRECT_REQUEST_BYTES];
        let outcome = match stream.read(&mut buffer).await {
            Ok(read) => handle_request(&buffer[..read], expected_state),
            Err(e) => Err(AuthError::Network(e.to_string())),
        };

        reply(&mut stream, &outcome).await;
        outcome
    }
}

fn handle_request(raw: &[u8], expected_state: &AuthState) -> Result<AuthorizationCode, AuthError> {
    let callback = RedirectCallback::from_params(parse_redirect_request(raw)?);
    if let RedirectCallback::Denied {
        error,
        description: Some(description),
    } = &callback
    {
        warn!(error = %error, description = %description, "Provider reported an error");
    }
    callback.verify(expected_state)
}

async fn reply(stream: &mut TcpStream, outcome: &Result<AuthorizationCode, AuthError>) {
    let body = render_page(outcome);
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    if let Err(e) = stream.write_all(response.as_bytes()).await {
        debug!(error = %e, "Failed to write redirect reply");
    }
    if let Err(e) = stream.shutdown().await {
        debug!(error = %e, "Failed to close redirect connection");
    }
}

/// Reply page. The authorization code itself is never echoed.
fn render_page(outcome: &Result<AuthorizationCode, AuthError>) -> String {
    match outcome {
        Ok(_) => SUCCESS_HTML.to_string(),
        Err(e) => format!(
            "<html><body><h1>Authorization failed</h1><p>{}</p><p>Return to the terminal for details.</p></body></html>",
            html_escape(&e.to_string())
        ),
    }
}

fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
