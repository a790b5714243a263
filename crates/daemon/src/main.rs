//! Gembird Bridge - Main Entry Point
//! Probes one power strip and serves commands for it over JSON-RPC

mod config;
mod telemetry;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

// Import workspace crates
use config::{DaemonConfig, LogFormat};
use gembird_api_rpc::{RpcServer, RpcServerConfig};
use gembird_core::application::worker::constants::GRACEFUL_SHUTDOWN_TIMEOUT;
use gembird_core::application::{
    device_queue, shutdown_channel, ControllerConfig, SocketController,
};
use gembird_core::port::id_provider::UuidProvider;
use gembird_core::port::time_provider::SystemTimeProvider;
use gembird_infra_system::SispmctlRunner;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = DaemonConfig::from_env().context("Failed to load configuration")?;

    // 2. Initialize logging
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("gembird=info"))
        .context("Failed to create env filter")?;

    // Guard flushes buffered lines on drop; hold it until exit
    let (writer, _log_guard) = match &config.log_dir {
        Some(dir) => tracing_appender::non_blocking(tracing_appender::rolling::daily(
            dir,
            "gembird-bridge.log",
        )),
        None => tracing_appender::non_blocking(std::io::stdout()),
    };
    let ansi = config.log_dir.is_none();

    let (otel, telemetry_status) = telemetry::otel_layer::<Registry>();
    let subscriber = tracing_subscriber::registry().with(otel).with(env_filter);
    match config.log_format {
        LogFormat::Json => subscriber
            .with(fmt::layer().json().with_writer(writer))
            .init(),
        LogFormat::Pretty => subscriber
            .with(fmt::layer().pretty().with_ansi(ansi).with_writer(writer))
            .init(),
    }

    info!("Gembird Bridge v{} starting...", VERSION);
    telemetry_status.log();

    info!(
        device_id = %config.device_id,
        tool = %config.tool_path.display(),
        debug = config.debug,
        "Configuration loaded"
    );

    // 3. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let id_provider = Arc::new(UuidProvider);

    let runner = Arc::new(
        SispmctlRunner::new(config.tool_path.clone(), time_provider).with_debug(config.debug),
    );
    let controller = SocketController::new(
        ControllerConfig::new(config.device_id.clone()).with_debug(config.debug),
        runner,
    );

    // 4. Start device worker (probe, then command queue)
    let (queue, worker) = device_queue(controller, config.queue_capacity);
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let worker_handle = tokio::spawn(worker.run(shutdown_rx));

    // 5. Start JSON-RPC server
    info!("Starting JSON-RPC server...");
    let rpc_config = RpcServerConfig {
        host: config.rpc_host.clone(),
        port: config.rpc_port,
    };
    let (rpc_addr, rpc_handle) = RpcServer::new(rpc_config, queue, id_provider)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(addr = %rpc_addr, "System ready. Waiting for commands...");
    info!("Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown
    shutdown_tx.shutdown();
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    if tokio::time::timeout(GRACEFUL_SHUTDOWN_TIMEOUT, worker_handle)
        .await
        .is_err()
    {
        tracing::warn!("Device worker did not stop in time");
    }
    telemetry::shutdown();

    info!("Shutdown complete.");

    Ok(())
}
