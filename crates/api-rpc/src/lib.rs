//! JSON-RPC API Layer
//!
//! Exposes the socket controller to hosts over JSON-RPC 2.0.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::{RpcServer, RpcServerConfig, DEFAULT_RPC_PORT};
