// Status indicator exposed to the host

use crate::domain::device::DeviceId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorFill {
    Red,
    Green,
    Yellow,
    Blue,
    Grey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorShape {
    Dot,
    Ring,
}

/// Visible status badge: `{ fill, shape, text }`. The cleared state is `None`
/// at the holder, never an empty struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusIndicator {
    pub fill: IndicatorFill,
    pub shape: IndicatorShape,
    pub text: String,
}

/// Persistent faults shown on the indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceFault {
    /// Probe exited non-zero
    DeviceNotFound(DeviceId),
    /// Tool executable missing
    ToolNotFound(String),
    /// Tool executable present but not runnable
    ToolNotRunnable(String),
}

impl std::fmt::Display for DeviceFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceFault::DeviceNotFound(id) => write!(f, "device #{} not found", id),
            DeviceFault::ToolNotFound(program) => write!(f, "{} not found", program),
            DeviceFault::ToolNotRunnable(program) => write!(f, "cannot run {}", program),
        }
    }
}

impl DeviceFault {
    pub fn indicator(&self) -> StatusIndicator {
        StatusIndicator {
            fill: IndicatorFill::Red,
            shape: IndicatorShape::Dot,
            text: self.to_string(),
        }
    }
}
