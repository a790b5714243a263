//! JSON-RPC Server
//!
//! Implements the JSON-RPC 2.0 server over TCP (localhost).

use crate::handler::RpcHandler;
use crate::types::{CommandRequest, DeviceInfoRequest};
use gembird_core::application::DeviceQueue;
use gembird_core::port::IdProvider;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
pub const DEFAULT_RPC_PORT: u16 = 9531;

/// Method names
pub mod method {
    pub const COMMAND: &str = "socket.command.v1";
    pub const DEVICE_INFO: &str = "device.info.v1";
}

/// RPC Server Configuration
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(
        config: RpcServerConfig,
        queue: DeviceQueue,
        id_provider: Arc<dyn IdProvider>,
    ) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(queue, id_provider)),
        }
    }

    /// Start the JSON-RPC server
    ///
    /// Returns the bound address (port 0 picks a free port) and the handle
    /// used to stop it.
    pub async fn start(self) -> Result<(SocketAddr, ServerHandle), String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;
        let local_addr = server
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        let mut module = RpcModule::new(());

        // Register methods
        let handler = self.handler.clone();
        module
            .register_async_method(method::COMMAND, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: CommandRequest = params.parse()?;
                    handler.command(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method(method::DEVICE_INFO, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: DeviceInfoRequest = if params.is_object() {
                        params.parse()?
                    } else {
                        DeviceInfoRequest::default()
                    };
                    handler.device_info(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        info!(addr = %local_addr, "JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok((local_addr, handle))
    }
}
