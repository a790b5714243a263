//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types from the api-rpc crate.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Command message sent to the bridge
#[derive(Debug, Clone, Serialize)]
pub struct CommandRequest {
    pub topic: String,
    pub payload: Value,
}

impl CommandRequest {
    pub fn new(topic: impl Into<String>, socket: Socket) -> Self {
        Self {
            topic: topic.into(),
            payload: socket.into(),
        }
    }
}

/// Outlet selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Socket {
    All,
    Outlet(u32),
}

impl From<Socket> for Value {
    fn from(socket: Socket) -> Self {
        match socket {
            Socket::All => Value::String("all".to_string()),
            Socket::Outlet(n) => Value::from(n),
        }
    }
}

/// Result topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Ok,
    Error,
}

/// Result message returned by the bridge
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandResponse {
    pub topic: Outcome,
    pub payload: Value,
}

impl CommandResponse {
    /// Outlet states of an `OK` response
    pub fn states(&self) -> Option<Vec<bool>> {
        match self.topic {
            Outcome::Ok => serde_json::from_value(self.payload.clone()).ok(),
            Outcome::Error => None,
        }
    }

    /// Message of an `ERROR` response
    pub fn error_message(&self) -> Option<&str> {
        match self.topic {
            Outcome::Error => self.payload.as_str(),
            Outcome::Ok => None,
        }
    }
}

/// Status indicator shown by the bridge
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Indicator {
    pub fill: String,
    pub shape: String,
    pub text: String,
}

/// Response from device.info.v1
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceInfoResponse {
    pub device_id: String,
    pub ready: bool,
    pub max_sockets: Option<u32>,
    pub indicator: Option<Indicator>,
    pub version: String,
    pub uptime_seconds: i64,
}
