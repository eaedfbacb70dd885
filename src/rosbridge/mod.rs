//! Rosbridge integration subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → client.rs (dial ws://robot:port, send call_service, await one reply, close)
//!     → types.rs (validate reply shape, map failures to RosbridgeError)
//!     → TopicListing { topics, error } back to the handler
//! ```
//!
//! # Design Decisions
//! - One connection per call: no pooling, no retries
//! - Every failure is folded into an error message, never an HTTP status

pub mod client;
pub mod types;

pub use client::RosbridgeClient;
pub use types::{RosbridgeError, RosbridgeResult, ServiceCall, TopicListing, TOPICS_SERVICE};
