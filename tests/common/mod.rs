//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio_tungstenite::{accept_async, tungstenite::protocol::Message};
use topic_relay::config::RelayConfig;
use topic_relay::http::HttpServer;
use topic_relay::lifecycle::Shutdown;

/// A websocket server standing in for rosbridge.
#[allow(dead_code)]
pub struct MockBridge {
    pub addr: SocketAddr,
    /// Every request message received, parsed as JSON.
    pub requests: Arc<Mutex<Vec<Value>>>,
    /// Close frames received from clients.
    pub closes: Arc<AtomicUsize>,
    /// Connections that have ended, with or without a close handshake.
    pub disconnects: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockBridge {
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn disconnect_count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }
}

/// Start a mock bridge that answers each call with `reply`, or stays silent
/// when `reply` is `None`.
#[allow(dead_code)]
pub async fn start_mock_rosbridge(reply: Option<String>) -> MockBridge {
    start_scripted_rosbridge(reply.map(Message::text).into_iter().collect(), false).await
}

/// Start a mock bridge that sends `frames` in order after each request. With
/// `hang_up` set it then drops the TCP connection without a close handshake.
#[allow(dead_code)]
pub async fn start_scripted_rosbridge(frames: Vec<Message>, hang_up: bool) -> MockBridge {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let closes = Arc::new(AtomicUsize::new(0));
    let disconnects = Arc::new(AtomicUsize::new(0));

    let seen = requests.clone();
    let closed = closes.clone();
    let ended = disconnects.clone();
    tokio::spawn(async move {
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let frames = frames.clone();
            let seen = seen.clone();
            let closed = closed.clone();
            let ended = ended.clone();

            tokio::spawn(async move {
                let mut ws = match accept_async(stream).await {
                    Ok(ws) => ws,
                    Err(_) => return,
                };

                if let Some(Ok(Message::Text(text))) = ws.next().await {
                    if let Ok(value) = serde_json::from_str::<Value>(text.as_str()) {
                        seen.lock().unwrap().push(value);
                    }
                }

                for frame in frames {
                    if ws.send(frame).await.is_err() {
                        ended.fetch_add(1, Ordering::SeqCst);
                        return;
                    }
                }

                if !hang_up {
                    while let Some(Ok(message)) = ws.next().await {
                        if let Message::Close(_) = message {
                            closed.fetch_add(1, Ordering::SeqCst);
                            break;
                        }
                    }
                }
                drop(ws);
                ended.fetch_add(1, Ordering::SeqCst);
            });
        }
    });

    MockBridge {
        addr,
        requests,
        closes,
        disconnects,
    }
}

/// Relay configuration pointing at `ip:port` with short bridge timeouts.
#[allow(dead_code)]
pub fn relay_config(ip: &str, port: u16) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.robot.ip = ip.to_string();
    config.robot.rosbridge_port = port;
    config.timeouts.connect_secs = 1;
    config.timeouts.response_secs = 1;
    config.timeouts.request_secs = 10;
    config
}

/// Start a relay on an ephemeral port. Trigger the returned handle to stop it.
#[allow(dead_code)]
pub async fn start_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

#[allow(dead_code)]
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Poll `condition` until it holds or two seconds pass.
#[allow(dead_code)]
pub async fn eventually<F>(condition: F) -> bool
where
    F: Fn() -> bool,
{
    for _ in 0..40 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    false
}
