//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Check that addresses parse before anything binds to them
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RelayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("robot.ip must not be empty")]
    EmptyRobotIp,

    #[error("robot.rosbridge_port must be non-zero")]
    ZeroRosbridgePort,

    #[error("{field} '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("timeouts.request_secs ({request}) must exceed connect_secs + response_secs ({bridge})")]
    RequestTimeoutTooShort { request: u64, bridge: u64 },
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.robot.ip.trim().is_empty() {
        errors.push(ValidationError::EmptyRobotIp);
    }
    if config.robot.rosbridge_port == 0 {
        errors.push(ValidationError::ZeroRosbridgePort);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let timeouts = &config.timeouts;
    if timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.connect_secs"));
    }
    if timeouts.response_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.response_secs"));
    }
    let bridge = timeouts.connect_secs.saturating_add(timeouts.response_secs);
    if timeouts.request_secs <= bridge {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request: timeouts.request_secs,
            bridge,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
