//! Rosbridge wire types and error definitions.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Service that lists every topic currently published on the robot.
pub const TOPICS_SERVICE: &str = "/rosapi/topics";

/// Outbound `call_service` operation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceCall<'a> {
    pub op: &'static str,
    pub service: &'a str,
    pub args: Value,
}

impl<'a> ServiceCall<'a> {
    pub fn new(service: &'a str, args: Value) -> Self {
        Self {
            op: "call_service",
            service,
            args,
        }
    }
}

/// Errors that can occur while talking to rosbridge.
///
/// Everything except [`RosbridgeError::UnexpectedResponse`] counts as a
/// connection failure and renders with the same prefix.
#[derive(Debug, Error)]
pub enum RosbridgeError {
    #[error("Ошибка подключения к rosbridge: invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Ошибка подключения к rosbridge: {0}")]
    Connect(String),

    #[error("Ошибка подключения к rosbridge: connection timed out after {0} seconds")]
    ConnectTimeout(u64),

    #[error("Ошибка подключения к rosbridge: failed to send request: {0}")]
    Send(String),

    #[error("Ошибка подключения к rosbridge: failed to receive response: {0}")]
    Receive(String),

    #[error("Ошибка подключения к rosbridge: no response within {0} seconds")]
    ResponseTimeout(u64),

    #[error("Ошибка подключения к rosbridge: connection closed before a response arrived")]
    ConnectionClosed,

    #[error("Ошибка подключения к rosbridge: malformed response: {0}")]
    Decode(String),

    #[error("Неверный формат ответа rosbridge: {0}")]
    UnexpectedResponse(Value),
}

/// Result type for rosbridge operations.
pub type RosbridgeResult<T> = Result<T, RosbridgeError>;

/// Pull `values.topics` out of a `/rosapi/topics` reply.
///
/// The array must hold only strings; anything else is reported together with
/// the whole reply.
pub fn extract_topics(response: Value) -> RosbridgeResult<Vec<String>> {
    let topics = response
        .get("values")
        .and_then(|values| values.get("topics"))
        .and_then(Value::as_array)
        .and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
        });

    match topics {
        Some(topics) => Ok(topics),
        None => Err(RosbridgeError::UnexpectedResponse(response)),
    }
}

/// Outcome of one topic fetch as shown to HTTP clients.
///
/// Built only from a fetch result, so an error always comes with an empty
/// topic list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicListing {
    pub topics: Vec<String>,
    pub error: Option<String>,
}

impl TopicListing {
    pub fn count(&self) -> usize {
        self.topics.len()
    }
}

impl From<RosbridgeResult<Vec<String>>> for TopicListing {
    fn from(result: RosbridgeResult<Vec<String>>) -> Self {
        match result {
            Ok(topics) => Self {
                topics,
                error: None,
            },
            Err(e) => Self {
                topics: Vec::new(),
                error: Some(e.to_string()),
            },
        }
    }
}
