// Application Layer - Use Cases and Business Logic

pub mod controller;
pub mod status_parser;
pub mod worker;

// Re-exports
pub use controller::{ControllerConfig, DeviceSnapshot, SocketController};
pub use status_parser::{OutletPower, StatusReport};
pub use worker::{device_queue, shutdown_channel, DeviceQueue, DeviceWorker, ShutdownSender, ShutdownToken};
