//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use gatehouse::config::SiteConfig;
use gatehouse::db::DatabaseConfig;
use gatehouse::{HttpServer, Shutdown};

/// Last raw request seen by a mock backend.
pub type Captured = Arc<Mutex<Option<String>>>;

/// Start a programmable mock backend with async support.
///
/// The whole request is read before `f` runs, and its text is stored in the
/// returned [`Captured`].
pub async fn start_programmable_backend<F, Fut>(addr: SocketAddr, f: F) -> Captured
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let f = Arc::new(f);
    let captured: Captured = Arc::new(Mutex::new(None));
    let seen = captured.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        *seen.lock().unwrap() = Some(request);

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            401 => "401 Unauthorized",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    captured
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// A pipeline response carrying one execute result.
pub fn pipeline_rows(rows: serde_json::Value) -> String {
    serde_json::json!({
        "baton": null,
        "base_url": null,
        "results": [
            { "type": "ok", "response": { "type": "execute", "result": {
                "cols": [
                    { "name": "id", "decltype": "INTEGER" },
                    { "name": "name", "decltype": "TEXT" },
                    { "name": "created_at", "decltype": "DATE" }
                ],
                "rows": rows,
                "affected_row_count": 0,
                "last_insert_rowid": null
            } } },
            { "type": "ok", "response": { "type": "close" } }
        ]
    })
    .to_string()
}

/// A pipeline response whose statement failed.
pub fn pipeline_error(message: &str) -> String {
    serde_json::json!({
        "baton": null,
        "base_url": null,
        "results": [
            { "type": "error", "error": { "message": message, "code": "SQLITE_UNKNOWN" } },
            { "type": "error", "error": { "message": "previous request failed" } }
        ]
    })
    .to_string()
}

/// Start the site server on `addr` and wait until it accepts connections.
pub async fn start_server(
    addr: SocketAddr,
    mut config: SiteConfig,
    database: Option<DatabaseConfig>,
) -> Shutdown {
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, database);
    let listener = TcpListener::bind(addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown
}

/// HTTP client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
