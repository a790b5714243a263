// Domain Layer - Pure business logic and entities

pub mod device;
pub mod error;
pub mod indicator;
pub mod message;
pub mod tool_command;

// Re-exports
pub use device::{DeviceHandle, DeviceId, ProbeState, SocketModel, QUAD_MODEL_MARKER};
pub use error::DomainError;
pub use indicator::{DeviceFault, IndicatorFill, IndicatorShape, StatusIndicator};
pub use message::{
    Action, CommandMessage, Outcome, ResultMessage, ResultPayload, SocketSelector, ALL_SOCKETS,
};
pub use tool_command::ToolCommand;
