//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Defaults reproduce the relay's built-in constants, so an empty file (or no
//! file at all) yields a working configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the topic relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Robot and rosbridge endpoint.
    pub robot: RobotConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Location of the robot's rosbridge server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Robot host address on the local network.
    pub ip: String,

    /// Port rosbridge listens on.
    pub rosbridge_port: u16,
}

impl RobotConfig {
    /// Websocket URL of the bridge, `ws://{ip}:{port}`.
    pub fn rosbridge_url(&self) -> String {
        format!("ws://{}:{}", self.ip, self.rosbridge_port)
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            ip: "192.168.0.137".to_string(),
            rosbridge_port: 9090,
        }
    }
}

/// Timeout configuration for the bridge round trip.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Websocket connect + handshake timeout in seconds.
    pub connect_secs: u64,

    /// Time allowed for the bridge to answer a service call, in seconds.
    pub response_secs: u64,

    /// Total time for an inbound HTTP request in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            response_secs: 10,
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9100".to_string(),
        }
    }
}
