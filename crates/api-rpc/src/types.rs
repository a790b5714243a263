//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results.

use gembird_core::domain::StatusIndicator;
use serde::{Deserialize, Serialize};

pub use gembird_core::domain::{CommandMessage as CommandRequest, ResultMessage as CommandResponse};

/// device.info.v1 - Describe the device behind this bridge
#[derive(Debug, Default, Deserialize)]
pub struct DeviceInfoRequest {
    // No parameters needed
}

#[derive(Debug, Clone, Serialize)]
pub struct DeviceInfoResponse {
    pub device_id: String,
    pub ready: bool,
    pub max_sockets: Option<u32>,
    pub indicator: Option<StatusIndicator>,
    pub version: String,
    pub uptime_seconds: i64,
}
