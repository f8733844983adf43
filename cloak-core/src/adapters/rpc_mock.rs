//! Mock JSON-RPC node for testing
//!
//! Serves `eth_chainId` over plain HTTP so the provider can be
//! exercised without a real node:
//! - `eth_chainId` returns the configured chain id as a hex quantity
//! - anything else returns JSON-RPC error -32601

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use serde_json::{json, Value as JsonValue};

/// Mock node for testing
pub struct MockRpcServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<AtomicUsize>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

#[derive(Debug, Clone)]
pub struct MockRpcConfig {
    pub chain_id: u64,
    /// Respond to every request with this HTTP status
    pub fail_status: Option<u16>,
}

impl Default for MockRpcConfig {
    fn default() -> Self {
        Self {
            chain_id: 31337,
            fail_status: None,
        }
    }
}

impl MockRpcServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockRpcConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(AtomicUsize::new(0));

        // Non-blocking so the accept loop can observe shutdown
        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let requests_clone = requests.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let counter = requests_clone.clone();
                        thread::spawn(move || {
                            counter.fetch_add(1, Ordering::SeqCst);
                            handle_connection(stream, &cfg);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Number of HTTP requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockRpcServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockRpcConfig) {
    let _ = stream.set_nonblocking(false);
    let body = match read_request_body(&mut stream) {
        Some(body) => body,
        None => {
            send_response(&mut stream, 400, "Bad Request", r#"{"error": "Invalid request"}"#);
            return;
        }
    };

    if let Some(status) = config.fail_status {
        send_response(&mut stream, status, "Error", r#"{"error": "unavailable"}"#);
        return;
    }

    let request: JsonValue = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(_) => {
            send_response(&mut stream, 400, "Bad Request", r#"{"error": "Invalid JSON"}"#);
            return;
        }
    };

    let id = request.get("id").cloned().unwrap_or(JsonValue::Null);
    let method = request.get("method").and_then(|m| m.as_str()).unwrap_or("");

    let response = match method {
        "eth_chainId" => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": format!("0x{:x}", config.chain_id),
        }),
        _ => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32601, "message": format!("the method {} does not exist", method) },
        }),
    };

    send_response(&mut stream, 200, "OK", &response.to_string());
}

/// Read headers, then exactly Content-Length bytes of body
fn read_request_body(stream: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buffer[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buffer.len() < header_end + content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }

    Some(buffer[header_end..].to_vec())
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_server_starts() {
        let server = MockRpcServer::start(MockRpcConfig::default()).unwrap();
        assert!(server.base_url().starts_with("http://127.0.0.1:"));
        assert_eq!(server.request_count(), 0);
    }
}
