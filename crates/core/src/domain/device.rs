// Device Domain Model

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Device index as passed to the tool's `-d` flag
pub type DeviceId = String;

/// Substring of the probe output that identifies the 4-outlet model
pub const QUAD_MODEL_MARKER: &str = "4-socket SiS-PM";

/// Supported power strip models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocketModel {
    Single,
    Quad,
}

impl SocketModel {
    /// Detect the model from the probe's standard output.
    ///
    /// Anything that does not carry the 4-socket marker is the only other
    /// supported model, the single-outlet one.
    pub fn from_probe_output(stdout: &str) -> Self {
        if stdout.contains(QUAD_MODEL_MARKER) {
            SocketModel::Quad
        } else {
            SocketModel::Single
        }
    }

    pub fn max_sockets(&self) -> u32 {
        match self {
            SocketModel::Single => 1,
            SocketModel::Quad => 4,
        }
    }
}

/// Probe lifecycle of a device handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProbeState {
    Pending,
    Ready(SocketModel),
    Failed,
}

impl std::fmt::Display for ProbeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeState::Pending => write!(f, "PENDING"),
            ProbeState::Ready(_) => write!(f, "READY"),
            ProbeState::Failed => write!(f, "FAILED"),
        }
    }
}

/// One physical power strip
///
/// Created at startup in `Pending`, moved exactly once by the probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceHandle {
    pub device_id: DeviceId,
    pub state: ProbeState,
}

impl DeviceHandle {
    pub fn new(device_id: impl Into<DeviceId>) -> Self {
        Self {
            device_id: device_id.into(),
            state: ProbeState::Pending,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ProbeState::Ready(_))
    }

    /// Outlet count, known only after a successful probe
    pub fn max_sockets(&self) -> Option<u32> {
        match self.state {
            ProbeState::Ready(model) => Some(model.max_sockets()),
            _ => None,
        }
    }

    /// Transition PENDING -> READY
    pub fn mark_ready(&mut self, model: SocketModel) -> Result<()> {
        self.transition(ProbeState::Ready(model))
    }

    /// Transition PENDING -> FAILED (permanent for this handle)
    pub fn mark_failed(&mut self) -> Result<()> {
        self.transition(ProbeState::Failed)
    }

    fn transition(&mut self, to: ProbeState) -> Result<()> {
        if self.state != ProbeState::Pending {
            return Err(DomainError::InvalidStateTransition {
                from: self.state.to_string(),
                to: to.to_string(),
            });
        }
        self.state = to;
        Ok(())
    }
}
