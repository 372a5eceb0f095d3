//! Minimal HTTP control plane on a local port.
//!
//! Every request is recorded; the response comes from a handler that sees
//! the method, the API path and the JSON body.

use std::sync::{Arc, Mutex};

use fuzzctl_sdk::{BackendConfig, FuzzClient};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path below `/api/`, e.g. `jobs`
    pub path: String,
    pub body: Value,
}

impl Recorded {
    pub fn is(&self, method: &str, path: &str) -> bool {
        self.method == method && self.path == path
    }
}

pub struct StubServer {
    endpoint: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    /// Start serving; `handler` returns the status code and JSON body
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&Recorded) -> (u16, Value) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handler = Arc::new(handler);
        let log = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let request = match read_request(&mut stream).await {
                    Some(request) => request,
                    None => continue,
                };
                let (status, body) = (handler.as_ref())(&request);
                log.lock().unwrap().push(request);
                write_response(&mut stream, status, &body).await;
            }
        });

        Self { endpoint, requests }
    }

    pub fn client(&self) -> FuzzClient {
        FuzzClient::new(BackendConfig::new(self.endpoint.as_str()).with_access_token("token"))
            .unwrap()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn read_request(stream: &mut TcpStream) -> Option<Recorded> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.trim_start_matches("/api/").to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let raw_body = &buf[header_end..header_end + content_length];
    let body = serde_json::from_slice(raw_body).unwrap_or(Value::Null);

    Some(Recorded { method, path, body })
}

async fn write_response(stream: &mut TcpStream, status: u16, body: &Value) {
    let body = body.to_string();
    let response = format!(
        "HTTP/1.1 {} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}
