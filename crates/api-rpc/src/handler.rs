//! RPC Method Handlers
//!
//! Implements the business logic for each JSON-RPC method.

use crate::error::to_rpc_error;
use crate::types::{CommandRequest, CommandResponse, DeviceInfoRequest, DeviceInfoResponse};
use gembird_core::application::DeviceQueue;
use gembird_core::port::IdProvider;
use jsonrpsee::types::ErrorObjectOwned;
use std::sync::Arc;
use tracing::info;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    queue: DeviceQueue,
    id_provider: Arc<dyn IdProvider>,
    start_time: std::time::Instant,
}

impl RpcHandler {
    pub fn new(queue: DeviceQueue, id_provider: Arc<dyn IdProvider>) -> Self {
        Self {
            queue,
            id_provider,
            start_time: std::time::Instant::now(),
        }
    }

    /// socket.command.v1
    pub async fn command(
        &self,
        params: CommandRequest,
    ) -> Result<CommandResponse, ErrorObjectOwned> {
        let request_id = self.id_provider.generate_id();
        info!(
            request_id = %request_id,
            topic = %params.topic,
            payload = %params.payload,
            "Command received"
        );

        self.queue
            .submit(request_id, params)
            .await
            .map_err(to_rpc_error)
    }

    /// device.info.v1
    pub async fn device_info(
        &self,
        _params: DeviceInfoRequest,
    ) -> Result<DeviceInfoResponse, ErrorObjectOwned> {
        let snapshot = self.queue.snapshot();

        Ok(DeviceInfoResponse {
            device_id: snapshot.device_id,
            ready: snapshot.ready,
            max_sockets: snapshot.max_sockets,
            indicator: snapshot.indicator,
            version: gembird_core::VERSION.to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs() as i64,
        })
    }
}
