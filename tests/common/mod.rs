//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use edge_gateway::config::{GatewayConfig, OriginConfig};
use edge_gateway::lifecycle::startup::build_gateway;
use edge_gateway::{Gateway, GatewayServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Canned response served by the mock backend.
#[derive(Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: &'static str,
}

impl MockResponse {
    pub fn ok(body: &'static str) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body,
        }
    }

    #[allow(dead_code)]
    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    #[allow(dead_code)]
    pub fn header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }
}

/// Request lines (e.g. `GET /app.js HTTP/1.1`) seen by a mock backend.
pub type SeenRequests = Arc<Mutex<Vec<String>>>;

/// Start a mock backend that answers every request with the same response.
pub async fn start_mock_backend(response: MockResponse) -> (SocketAddr, SeenRequests) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen: SeenRequests = Arc::new(Mutex::new(Vec::new()));
    let seen_by_backend = seen.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let response = response.clone();
            let seen = seen_by_backend.clone();
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&chunk[..n]),
                    }
                    if head.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let head = String::from_utf8_lossy(&head);
                if let Some(line) = head.lines().next() {
                    seen.lock().unwrap().push(line.to_string());
                }

                let status_text = match response.status {
                    200 => "200 OK",
                    404 => "404 Not Found",
                    500 => "500 Internal Server Error",
                    503 => "503 Service Unavailable",
                    _ => "200 OK",
                };
                let extra: String = response
                    .headers
                    .iter()
                    .map(|(name, value)| format!("{}: {}\r\n", name, value))
                    .collect();
                let response_str = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n{}",
                    status_text,
                    response.body.len(),
                    extra,
                    response.body
                );
                let _ = socket.write_all(response_str.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, seen)
}

/// A gateway server running on an ephemeral port.
pub struct RunningGateway {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl RunningGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Serve the given gateway on 127.0.0.1 with default settings.
pub async fn start_gateway(gateway: Gateway) -> RunningGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = GatewayServer::new(&GatewayConfig::default(), gateway);
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    RunningGateway {
        addr,
        shutdown,
        handle,
    }
}

/// Serve a gateway whose origin is the upstream at `upstream`.
#[allow(dead_code)]
pub async fn start_gateway_for_upstream(upstream: SocketAddr) -> RunningGateway {
    let config = GatewayConfig {
        origin: Some(OriginConfig::Http {
            url: format!("http://{}", upstream).parse().unwrap(),
        }),
        ..GatewayConfig::default()
    };
    start_gateway(build_gateway(&config)).await
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
