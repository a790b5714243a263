// Command / Result message shapes exchanged with the host

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel payload addressing every outlet
pub const ALL_SOCKETS: &str = "all";

/// Inbound request: `{ topic: "ON"|"OFF"|"STATUS"|<other>, payload: <n>|"all" }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandMessage {
    pub topic: String,
    #[serde(default)]
    pub payload: Value,
}

impl CommandMessage {
    pub fn new(topic: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}

/// Abstract verbs understood by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    On,
    Off,
    Status,
}

impl Action {
    /// Topics are matched case-sensitively
    pub fn from_topic(topic: &str) -> Result<Self> {
        match topic {
            "ON" => Ok(Action::On),
            "OFF" => Ok(Action::Off),
            "STATUS" => Ok(Action::Status),
            other => Err(DomainError::UnrecognizedCommand(other.to_string())),
        }
    }
}

/// Outlet addressed by a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketSelector {
    All,
    Outlet(u32),
    /// Not an outlet number, but not above the maximum either: passed to the
    /// tool unchanged so it can report the problem itself
    Verbatim(String),
}

impl SocketSelector {
    /// Interpret a message payload against the device's outlet count
    ///
    /// Only numeric values above `max_sockets` and payloads that are neither
    /// a number nor a string are rejected here.
    pub fn validate(payload: &Value, max_sockets: u32) -> Result<Self> {
        let (text, value) = match payload {
            Value::String(s) if s == ALL_SOCKETS => return Ok(SocketSelector::All),
            Value::String(s) => (s.clone(), s.trim().parse::<f64>().ok()),
            Value::Number(n) => (n.to_string(), n.as_f64()),
            _ => return Err(DomainError::InvalidSocket { max: max_sockets }),
        };

        match value {
            Some(v) if v > f64::from(max_sockets) => {
                Err(DomainError::InvalidSocket { max: max_sockets })
            }
            Some(v) if v >= 1.0 && v.fract() == 0.0 => Ok(SocketSelector::Outlet(v as u32)),
            _ => Ok(SocketSelector::Verbatim(text)),
        }
    }
}

impl std::fmt::Display for SocketSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SocketSelector::All => write!(f, "{}", ALL_SOCKETS),
            SocketSelector::Outlet(n) => write!(f, "{}", n),
            SocketSelector::Verbatim(raw) => f.write_str(raw),
        }
    }
}

/// Result topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Ok,
    Error,
}

/// Result payload: outlet states on success, a message on failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultPayload {
    States(Vec<bool>),
    Message(String),
}

/// Outbound response: `{ topic: "OK"|"ERROR", payload: <bool array>|<string> }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMessage {
    pub topic: Outcome,
    pub payload: ResultPayload,
}

impl ResultMessage {
    pub fn ok(states: Vec<bool>) -> Self {
        Self {
            topic: Outcome::Ok,
            payload: ResultPayload::States(states),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            topic: Outcome::Error,
            payload: ResultPayload::Message(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.topic == Outcome::Ok
    }
}

impl From<DomainError> for ResultMessage {
    fn from(err: DomainError) -> Self {
        ResultMessage::error(err.to_string())
    }
}
