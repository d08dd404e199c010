//! Canned-response HTTP server for provider tests.
#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A request as it arrived on the wire.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// e.g. `POST /token HTTP/1.1`
    pub request_line: String,
    /// Header block, lowercased.
    pub headers: String,
    pub body: String,
}

impl RecordedRequest {
    pub fn method(&self) -> &str {
        self.request_line.split_whitespace().next().unwrap_or_default()
    }

    /// Target including the query string.
    pub fn target(&self) -> &str {
        self.request_line.split_whitespace().nth(1).unwrap_or_default()
    }

    pub fn path(&self) -> &str {
        self.target().split('?').next().unwrap_or_default()
    }
}

/// Fixed answer for one method and path.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub method: &'static str,
    pub path: &'static str,
    pub status: u16,
    pub body: &'static str,
}

impl Route {
    pub const fn new(method: &'static str, path: &'static str, status: u16, body: &'static str) -> Self {
        Self {
            method,
            path,
            status,
            body,
        }
    }
}

/// Serves `routes` on a loopback port until the test ends.
pub struct CannedServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl CannedServer {
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let request = read_request(&mut stream).await;
                let (status, body) = routes
                    .iter()
                    .find(|r| r.method == request.method() && r.path == request.path())
                    .map_or((404, r#"{"errors": [{"type": "not_found"}]}"#), |r| {
                        (r.status, r.body)
                    });
                recorded.lock().unwrap().push(request);
                stream.write_all(response(status, body).as_bytes()).await.ok();
                stream.shutdown().await.ok();
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn response(status: u16, body: &str) -> String {
    if status == 204 {
        return "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n".to_string();
    }
    format!(
        "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

async fn read_request(stream: &mut TcpStream) -> RecordedRequest {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let read = stream.read(&mut chunk).await.unwrap();
        if read == 0 {
            break raw.len();
        }
        raw.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8_lossy(&raw[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while raw.len() < header_end + content_length {
        let read = stream.read(&mut chunk).await.unwrap();
        if read == 0 {
            break;
        }
        raw.extend_from_slice(&chunk[..read]);
    }

    let (request_line, headers) = head.split_once("\r\n").unwrap_or((head.as_str(), ""));
    RecordedRequest {
        request_line: request_line.to_string(),
        headers: headers.to_lowercase(),
        body: String::from_utf8_lossy(&raw[header_end..]).to_string(),
    }
}
