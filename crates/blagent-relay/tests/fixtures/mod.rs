use std::net::SocketAddr;
use std::time::Duration;

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use blagent_relay::{RelayConfig, RetryConfig};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_APP_ID: &str = "test-app";
pub const COMPLETION_PATH: &str = "/api/v1/apps/test-app/completion";

/// Retry config with short delays so tests stay fast.
pub fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 5,
        base_delay: Duration::from_millis(50),
        endpoint_ceiling: Duration::from_secs(10),
    }
}

pub fn test_config(endpoints: Vec<String>) -> RelayConfig {
    RelayConfig::new(TEST_API_KEY, TEST_APP_ID)
        .with_endpoints(endpoints)
        .with_retry(fast_retry())
}

pub fn completion_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), COMPLETION_PATH)
}

/// Mock a successful completion response.
pub async fn mock_completion_success(server: &MockServer, reply: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(COMPLETION_PATH))
        .and(header("authorization", format!("Bearer {}", TEST_API_KEY)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": { "text": reply },
            "request_id": "req-test-1",
            "usage": { "input_tokens": 3, "output_tokens": 5 }
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Mock an HTTP error status from the upstream.
pub async fn mock_completion_status(server: &MockServer, status: u16, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(COMPLETION_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string("upstream unhappy"))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Mock a 200 whose body is missing the reply text.
pub async fn mock_completion_malformed(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(COMPLETION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "output": {} })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Minimal upstream that drops the first `failures` connections on the floor
/// (the client sees a reset/closed connection) and then serves a valid
/// completion response. wiremock cannot produce connection-level failures,
/// so this one is hand-rolled.
pub async fn flaky_upstream(failures: usize, reply: &str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = json!({ "output": { "text": reply } }).to_string();

    tokio::spawn(async move {
        let mut seen = 0usize;
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            seen += 1;
            if seen <= failures {
                drop(socket);
                continue;
            }

            let mut buf = vec![0u8; 64 * 1024];
            let mut total = 0;
            loop {
                match socket.read(&mut buf[total..]).await {
                    Ok(0) => break,
                    Ok(n) => {
                        total += n;
                        if request_complete(&buf[..total]) {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    addr
}

/// True once the buffer holds the full request head plus the declared body.
fn request_complete(bytes: &[u8]) -> bool {
    let Some(headers_end) = find_subslice(bytes, b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&bytes[..headers_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    bytes.len() >= headers_end + 4 + content_length
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
