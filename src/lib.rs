//! Topic relay library: serves a robot's rosbridge topic list over HTTP.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rosbridge;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use rosbridge::RosbridgeClient;
