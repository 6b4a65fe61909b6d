/**
 * ============================================================================
 * TEST COLLECTOR STUB
 * ============================================================================
 *
 * PURPOSE: Minimal in-process HTTP endpoint for transmission tests
 *
 * Accepts connections on an ephemeral port, parses one request per
 * connection, answers with a fixed status after an optional randomized
 * delay, and records what it saw. The delay simulates variable network
 * latency so tests can assert that frame assignment survives out-of-order
 * completion.
 *
 * ============================================================================
 */

use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// One request as observed by the stub collector
pub(crate) struct ReceivedRequest {
    pub method: String,
    pub path: String,
    pub body: serde_json::Value,
}

/**
 * Spawn the stub collector
 * Responds with `status` to every request, sleeping up to `max_delay_ms`
 * first. Returns the bound address and a receiver of recorded requests.
 */
pub(crate) async fn spawn_collector(
    status: u16,
    max_delay_ms: u64,
) -> (SocketAddr, mpsc::UnboundedReceiver<ReceivedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub collector");
    let addr = listener.local_addr().expect("stub collector address");
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(connection) => connection,
                Err(_) => break,
            };
            let tx = tx.clone();
            tokio::spawn(async move {
                handle_connection(stream, status, max_delay_ms, tx).await;
            });
        }
    });

    (addr, rx)
}

async fn handle_connection(
    mut stream: TcpStream,
    status: u16,
    max_delay_ms: u64,
    tx: mpsc::UnboundedSender<ReceivedRequest>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    let mut header_end = None;
    let mut content_length = 0usize;

    // Read until the headers and the declared body are complete
    loop {
        let n = match stream.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(_) => return,
        };
        buf.extend_from_slice(&chunk[..n]);

        if header_end.is_none() {
            if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
                header_end = Some(pos + 4);
                content_length = parse_content_length(&buf[..pos]);
            }
        }

        if let Some(end) = header_end {
            if buf.len() >= end + content_length {
                break;
            }
        }
    }

    let Some(end) = header_end else { return };

    let head = String::from_utf8_lossy(&buf[..end]).to_string();
    let mut request_line = head.split_whitespace();
    let method = request_line.next().unwrap_or("").to_string();
    let path = request_line.next().unwrap_or("").to_string();
    let body = serde_json::from_slice(&buf[end..end + content_length])
        .unwrap_or(serde_json::Value::Null);

    if max_delay_ms > 0 {
        let delay = rand::random::<u64>() % max_delay_ms;
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let reason = if (200..300).contains(&status) {
        "OK"
    } else {
        "ERROR"
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        status, reason
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;

    // Recorded after the response so arrival order reflects completion order
    let _ = tx.send(ReceivedRequest { method, path, body });
}

fn parse_content_length(head: &[u8]) -> usize {
    String::from_utf8_lossy(head)
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
