//! Gembird Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{CommandRequest, CommandResponse, DeviceInfoResponse, Socket};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use std::time::Duration;

/// A command is two tool runs on a USB device; this is generous
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Gembird bridge client
///
/// # Example
///
/// ```no_run
/// use gembird_sdk::{GembirdClient, Socket};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GembirdClient::connect("http://127.0.0.1:9531").await?;
/// let response = client.on(Socket::Outlet(2)).await?;
/// println!("{:?}", response.states());
/// # Ok(())
/// # }
/// ```
pub struct GembirdClient {
    client: HttpClient,
}

impl GembirdClient {
    /// Connect to the bridge
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9531`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(REQUEST_TIMEOUT)
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Send a raw command message
    pub async fn command(&self, request: CommandRequest) -> Result<CommandResponse> {
        let mut params = ObjectParams::new();
        params.insert("topic", &request.topic)?;
        params.insert("payload", &request.payload)?;

        let response: CommandResponse = self.client.request("socket.command.v1", params).await?;
        Ok(response)
    }

    pub async fn on(&self, socket: Socket) -> Result<CommandResponse> {
        self.command(CommandRequest::new("ON", socket)).await
    }

    pub async fn off(&self, socket: Socket) -> Result<CommandResponse> {
        self.command(CommandRequest::new("OFF", socket)).await
    }

    pub async fn status(&self, socket: Socket) -> Result<CommandResponse> {
        self.command(CommandRequest::new("STATUS", socket)).await
    }

    /// Device readiness, outlet count and indicator
    pub async fn info(&self) -> Result<DeviceInfoResponse> {
        let response: DeviceInfoResponse = self
            .client
            .request("device.info.v1", ObjectParams::new())
            .await?;
        Ok(response)
    }
}
