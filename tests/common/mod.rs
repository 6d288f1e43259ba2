#![allow(dead_code)]

use std::{
    net::SocketAddr,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use stockbook::api::{self, AppState};
use stockbook_core::{FixedClock, Inventory, MemoryStore};
use stockbook_storage_json::JsonTableStore;
use tempfile::TempDir;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn at(date: &str, time: &str) -> NaiveDateTime {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid date");
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S")
        .expect("valid time")
}

/// Inventory over a JSON store in a fresh directory, clock pinned to 2024-03-15 10:00.
pub fn json_inventory() -> (Arc<Inventory>, Arc<FixedClock>) {
    let store = JsonTableStore::new(temp_base().join("data")).expect("create json store");
    let clock = Arc::new(FixedClock::new(at("2024-03-15", "10:00:00")));
    let inventory = Arc::new(Inventory::new(Arc::new(store), clock.clone()));
    (inventory, clock)
}

pub fn unavailable_inventory() -> Arc<Inventory> {
    let store = MemoryStore::new();
    store.set_unavailable(true);
    let clock = FixedClock::new(at("2024-03-15", "10:00:00"));
    Arc::new(Inventory::new(Arc::new(store), Arc::new(clock)))
}

pub async fn spawn_server(inventory: Arc<Inventory>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(api::serve(
        listener,
        AppState::new(inventory),
        std::future::pending(),
    ));
    addr
}

/// Raw HTTP/1.1 request; returns status, head and body.
pub async fn send(
    addr: SocketAddr,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> (u16, String, String) {
    let mut stream = TcpStream::connect(addr).await.expect("connect");
    let mut request = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    if let Some(body) = body {
        request.push_str("Content-Type: application/json\r\n");
        request.push_str(&format!("Content-Length: {}\r\n\r\n{body}", body.len()));
    } else {
        request.push_str("\r\n");
    }
    stream
        .write_all(request.as_bytes())
        .await
        .expect("write request");

    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.expect("read response");
    let (head, body) = raw.split_once("\r\n\r\n").unwrap_or((raw.as_str(), ""));
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse().ok())
        .unwrap_or(0);
    (status, head.to_string(), body.to_string())
}

pub async fn get_json(addr: SocketAddr, path: &str) -> (u16, serde_json::Value) {
    let (status, _, body) = send(addr, "GET", path, None).await;
    (status, serde_json::from_str(&body).expect("json body"))
}

pub async fn send_json(
    addr: SocketAddr,
    method: &str,
    path: &str,
    body: serde_json::Value,
) -> (u16, serde_json::Value) {
    let text = body.to_string();
    let (status, _, body) = send(addr, method, path, Some(&text)).await;
    (status, serde_json::from_str(&body).expect("json body"))
}
