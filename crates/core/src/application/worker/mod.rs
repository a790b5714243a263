// Device Worker - single in-flight command chain per device

pub mod constants;
mod shutdown;

pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

use crate::application::controller::{DeviceSnapshot, SocketController};
use crate::domain::{CommandMessage, ResultMessage};
use crate::error::{AppError, Result};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{info, info_span, warn, Instrument};

struct QueuedCommand {
    request_id: String,
    message: CommandMessage,
    reply: oneshot::Sender<Result<ResultMessage>>,
}

/// Cloneable handle used by hosts to submit commands to a device
#[derive(Clone)]
pub struct DeviceQueue {
    tx: mpsc::Sender<QueuedCommand>,
    snapshot: watch::Receiver<DeviceSnapshot>,
}

impl DeviceQueue {
    /// Enqueue a command and wait for its result
    ///
    /// Commands are processed strictly in submission order, after the probe.
    pub async fn submit(
        &self,
        request_id: impl Into<String>,
        message: CommandMessage,
    ) -> Result<ResultMessage> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(QueuedCommand {
                request_id: request_id.into(),
                message,
                reply,
            })
            .await
            .map_err(|_| AppError::Unavailable("device worker stopped".to_string()))?;

        response
            .await
            .map_err(|_| AppError::Unavailable("device worker dropped the command".to_string()))?
    }

    /// Latest published device state
    pub fn snapshot(&self) -> DeviceSnapshot {
        self.snapshot.borrow().clone()
    }
}

/// Owns the controller; runs the probe, then drains the queue one command at a time
pub struct DeviceWorker {
    controller: SocketController,
    rx: mpsc::Receiver<QueuedCommand>,
}

/// Create the queue handle and its worker
pub fn device_queue(controller: SocketController, capacity: usize) -> (DeviceQueue, DeviceWorker) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let snapshot = controller.subscribe();
    (
        DeviceQueue { tx, snapshot },
        DeviceWorker { controller, rx },
    )
}

impl DeviceWorker {
    /// Run worker loop with graceful shutdown support
    pub async fn run(mut self, mut shutdown: ShutdownToken) {
        let device_id = self.controller.device().device_id.clone();
        info!(device_id = %device_id, "Device worker started");

        tokio::select! {
            ready = self.controller.initialize() => {
                info!(device_id = %device_id, ready = ready, "Device probe finished");
            }
            _ = shutdown.wait() => {
                info!(device_id = %device_id, "Device worker interrupted during probe");
                return;
            }
        }

        loop {
            if shutdown.is_shutdown() {
                break;
            }

            let queued = tokio::select! {
                queued = self.rx.recv() => queued,
                _ = shutdown.wait() => {
                    info!(device_id = %device_id, "Device worker shutting down");
                    break;
                }
            };

            let Some(queued) = queued else {
                // Every DeviceQueue handle is gone
                break;
            };

            let span = info_span!(
                "command",
                request_id = %queued.request_id,
                topic = %queued.message.topic
            );
            let result = self
                .controller
                .handle_command(&queued.message)
                .instrument(span)
                .await;

            if queued.reply.send(result).is_err() {
                warn!(
                    request_id = %queued.request_id,
                    "Requester went away before the result was delivered"
                );
            }
        }

        info!(device_id = %device_id, "Device worker stopped");
    }
}
