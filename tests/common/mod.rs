//! Common test utilities for booru-dl integration tests

#![allow(dead_code)]

use booru_dl::Config;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the mock listing is served from
pub const LISTING_PATH: &str = "/index.php";

/// Mount `body` as the JSON listing
pub async fn mount_listing(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a media file at `media_path` returning `bytes`
pub async fn mount_media(server: &MockServer, media_path: &str, bytes: &[u8]) {
    Mock::given(method("GET"))
        .and(path(media_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.to_vec()))
        .mount(server)
        .await;
}

/// Mount a failing media file at `media_path`
pub async fn mount_media_status(server: &MockServer, media_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(media_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// A post record pointing at `media_path` on the mock server
pub fn post(server: &MockServer, media_path: &str) -> Value {
    json!({ "file_url": format!("{}{}", server.uri(), media_path) })
}

/// Config pointing at the mock listing with a fresh destination inside `temp_dir`
pub fn test_config(server: &MockServer, temp_dir: &TempDir) -> Config {
    Config::new(
        format!("{}{}", server.uri(), LISTING_PATH),
        temp_dir.path().join("images"),
    )
}

/// Sorted file names in `dir`, or empty if it does not exist
pub fn files_in(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Destination directory used by [`test_config`]
pub fn destination(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("images")
}

/// Serve one response that announces `declared` body bytes, sends `body`, then hangs up
///
/// Returns the address to point a media URL at.
pub async fn spawn_truncated_server(body: &'static [u8], declared: usize) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;

        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: {declared}\r\n\r\n"
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(body).await.unwrap();
        socket.flush().await.unwrap();
        // Dropping the socket closes the connection short of `declared`
    });

    addr
}

/// In-memory log sink for asserting on what a run reports
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Route INFO and above on this thread into the capture until the guard drops
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Everything logged so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Number of log lines at `level` (e.g. "WARN")
    pub fn lines_at(&self, level: &str) -> usize {
        self.contents()
            .lines()
            .filter(|line| line.split_whitespace().any(|word| word == level))
            .count()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
