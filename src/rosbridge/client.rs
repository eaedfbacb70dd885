//! Rosbridge websocket client.
//!
//! # Responsibilities
//! - Open a fresh websocket to the bridge for every call
//! - Send one `call_service` request and wait for its single reply
//! - Bound both the connect and the reply wait with timeouts
//! - Close the connection on every path once it is open

use std::time::{Duration, Instant};

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{
    connect_async, tungstenite::protocol::Message, MaybeTlsStream, WebSocketStream,
};
use url::Url;

use crate::config::{RobotConfig, TimeoutConfig};
use crate::observability::metrics;
use crate::rosbridge::types::{
    extract_topics, RosbridgeError, RosbridgeResult, ServiceCall, TOPICS_SERVICE,
};

/// Number of response characters echoed into debug logs.
const LOGGED_RESPONSE_CHARS: usize = 500;

type BridgeStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Client for a single robot's rosbridge server.
///
/// Holds no connection; each call dials, exchanges one message pair and hangs
/// up, so the client is cheap to clone into request handlers.
#[derive(Debug, Clone)]
pub struct RosbridgeClient {
    url: String,
    connect_timeout: Duration,
    response_timeout: Duration,
}

impl RosbridgeClient {
    /// Create a client for the configured robot.
    pub fn new(robot: &RobotConfig, timeouts: &TimeoutConfig) -> Self {
        Self {
            url: robot.rosbridge_url(),
            connect_timeout: Duration::from_secs(timeouts.connect_secs),
            response_timeout: Duration::from_secs(timeouts.response_secs),
        }
    }

    /// Bridge URL this client dials.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Ask the bridge for every published topic via `/rosapi/topics`.
    pub async fn fetch_topics(&self) -> RosbridgeResult<Vec<String>> {
        let start = Instant::now();
        let result = self
            .call_service(TOPICS_SERVICE, json!({}))
            .await
            .and_then(extract_topics);

        match &result {
            Ok(topics) => tracing::debug!(url = %self.url, count = topics.len(), "Topics found"),
            Err(e) => tracing::error!(url = %self.url, error = %e, "Topic fetch failed"),
        }
        metrics::record_rosbridge_call(result.is_ok(), start);

        result
    }

    /// Invoke a rosbridge service and return the raw JSON reply.
    pub async fn call_service(&self, service: &str, args: Value) -> RosbridgeResult<Value> {
        let mut ws = self.connect().await?;

        let outcome = self.exchange(&mut ws, &ServiceCall::new(service, args)).await;

        if let Err(e) = ws.close(None).await {
            tracing::debug!(url = %self.url, error = %e, "Close handshake failed");
        }
        tracing::debug!(url = %self.url, "Connection closed");

        outcome
    }

    async fn connect(&self) -> RosbridgeResult<BridgeStream> {
        let url = Url::parse(&self.url).map_err(|e| RosbridgeError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;

        tracing::debug!(url = %url, "Connecting to rosbridge");

        match timeout(self.connect_timeout, connect_async(url.as_str())).await {
            Ok(Ok((ws, _response))) => {
                tracing::debug!(url = %url, "Connection established");
                Ok(ws)
            }
            Ok(Err(e)) => Err(RosbridgeError::Connect(e.to_string())),
            Err(_) => Err(RosbridgeError::ConnectTimeout(self.connect_timeout.as_secs())),
        }
    }

    async fn exchange(
        &self,
        ws: &mut BridgeStream,
        call: &ServiceCall<'_>,
    ) -> RosbridgeResult<Value> {
        let payload =
            serde_json::to_string(call).map_err(|e| RosbridgeError::Send(e.to_string()))?;

        ws.send(Message::text(payload.clone()))
            .await
            .map_err(|e| RosbridgeError::Send(e.to_string()))?;
        tracing::debug!(service = call.service, payload = %payload, "Request sent");

        let raw = match timeout(self.response_timeout, next_data_message(ws)).await {
            Ok(received) => received?,
            Err(_) => return Err(RosbridgeError::ResponseTimeout(self.response_timeout.as_secs())),
        };
        tracing::debug!(
            response = %raw.chars().take(LOGGED_RESPONSE_CHARS).collect::<String>(),
            "Response received"
        );

        serde_json::from_str(&raw).map_err(|e| RosbridgeError::Decode(e.to_string()))
    }
}

/// Wait for the next text or binary frame, skipping control frames.
async fn next_data_message(ws: &mut BridgeStream) -> RosbridgeResult<String> {
    loop {
        let message = ws
            .next()
            .await
            .ok_or(RosbridgeError::ConnectionClosed)?
            .map_err(|e| RosbridgeError::Receive(e.to_string()))?;

        match message {
            Message::Text(text) => return Ok(text.as_str().to_owned()),
            Message::Binary(data) => {
                return String::from_utf8(data.to_vec())
                    .map_err(|e| RosbridgeError::Decode(e.to_string()));
            }
            Message::Close(_) => return Err(RosbridgeError::ConnectionClosed),
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
        }
    }
}
