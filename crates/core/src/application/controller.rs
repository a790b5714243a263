// Socket Controller - probe, dispatch, status report

use crate::application::status_parser::StatusReport;
use crate::domain::error::Result as DomainResult;
use crate::domain::{
    Action, CommandMessage, DeviceFault, DeviceHandle, DeviceId, DomainError, ResultMessage,
    SocketModel, SocketSelector, StatusIndicator, ToolCommand,
};
use crate::error::Result;
use crate::port::{ToolError, ToolOutput, ToolRunner};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Construction-time settings of one controller
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub device_id: DeviceId,
    /// Log every tool invocation and its captured output
    pub debug: bool,
}

impl ControllerConfig {
    pub fn new(device_id: impl Into<DeviceId>) -> Self {
        Self {
            device_id: device_id.into(),
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Read-only view of the device published to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub device_id: DeviceId,
    pub ready: bool,
    pub max_sockets: Option<u32>,
    /// `None` when the indicator is clear
    pub indicator: Option<StatusIndicator>,
}

/// Adapter between host command messages and the control utility
pub struct SocketController {
    config: ControllerConfig,
    device: DeviceHandle,
    runner: Arc<dyn ToolRunner>,
    state_tx: watch::Sender<DeviceSnapshot>,
}

impl SocketController {
    pub fn new(config: ControllerConfig, runner: Arc<dyn ToolRunner>) -> Self {
        let device = DeviceHandle::new(config.device_id.clone());
        let (state_tx, _) = watch::channel(DeviceSnapshot {
            device_id: device.device_id.clone(),
            ready: false,
            max_sockets: None,
            indicator: None,
        });
        Self {
            config,
            device,
            runner,
            state_tx,
        }
    }

    pub fn device(&self) -> &DeviceHandle {
        &self.device
    }

    pub fn snapshot(&self) -> DeviceSnapshot {
        self.state_tx.borrow().clone()
    }

    /// Follow snapshot updates from another task
    pub fn subscribe(&self) -> watch::Receiver<DeviceSnapshot> {
        self.state_tx.subscribe()
    }

    /// Probe the device once and record its model
    ///
    /// Returns whether the device is ready. A failed probe is final.
    pub async fn initialize(&mut self) -> bool {
        if self.device.state != crate::domain::ProbeState::Pending {
            warn!(device_id = %self.device.device_id, "Device already probed, skipping");
            return self.device.is_ready();
        }

        let device_id = self.device.device_id.clone();
        let outcome = match self.invoke(ToolCommand::Probe).await {
            Ok(output) if output.success() => {
                let model = SocketModel::from_probe_output(&output.stdout);
                info!(
                    device_id = %device_id,
                    max_sockets = model.max_sockets(),
                    "Found device #{} with {} socket(s)",
                    device_id,
                    model.max_sockets()
                );
                self.device.mark_ready(model)
            }
            Ok(output) => {
                error!(
                    device_id = %device_id,
                    exit_code = ?output.exit_code,
                    stderr = %output.stderr,
                    "{} returned {:?}: {}",
                    self.runner.program(),
                    output.exit_code,
                    output.stderr
                );
                let fault = DeviceFault::DeviceNotFound(device_id.clone());
                error!(device_id = %device_id, "{}", fault);
                self.set_fault(&fault);
                self.device.mark_failed()
            }
            // Fault already recorded by invoke()
            Err(_) => self.device.mark_failed(),
        };

        if let Err(e) = outcome {
            warn!(device_id = %device_id, error = %e, "Probe result not applied");
        }

        let ready = self.device.is_ready();
        let max_sockets = self.device.max_sockets();
        self.state_tx.send_modify(|snapshot| {
            snapshot.ready = ready;
            snapshot.max_sockets = max_sockets;
            if ready {
                snapshot.indicator = None;
            }
        });

        ready
    }

    /// Handle one command message
    ///
    /// Validation failures and non-zero tool exits come back as `ERROR`
    /// result messages. `Err` means the tool could not be run at all: the
    /// fault is on the indicator and no result message exists.
    pub async fn handle_command(&self, message: &CommandMessage) -> Result<ResultMessage> {
        let (action, selector, max_sockets) = match self.validate(message) {
            Ok(validated) => validated,
            Err(e) => {
                debug!(topic = %message.topic, reason = %e, "Command rejected");
                return Ok(e.into());
            }
        };

        let output = self
            .invoke(ToolCommand::for_action(action, selector.clone()))
            .await?;
        if !output.success() {
            return Ok(ResultMessage::error(output.stderr));
        }

        let status = self.invoke(ToolCommand::QueryAll).await?;
        if !status.success() {
            return Ok(ResultMessage::error(status.stderr));
        }

        let states = StatusReport::parse(&status.stdout).states(max_sockets);
        info!(
            device_id = %self.device.device_id,
            topic = %message.topic,
            socket = %selector,
            states = ?states,
            "Command completed"
        );
        Ok(ResultMessage::ok(states))
    }

    /// Readiness, then socket range, then action
    fn validate(&self, message: &CommandMessage) -> DomainResult<(Action, SocketSelector, u32)> {
        let max_sockets = self.device.max_sockets().ok_or(DomainError::NotReady)?;
        let selector = SocketSelector::validate(&message.payload, max_sockets)?;
        let action = Action::from_topic(&message.topic)?;
        Ok((action, selector, max_sockets))
    }

    async fn invoke(&self, command: ToolCommand) -> std::result::Result<ToolOutput, ToolError> {
        let args = command.args(&self.device.device_id);
        if self.config.debug {
            debug!(args = ?args, "calling {}", self.runner.program());
        }

        match self.runner.run(&args).await {
            Ok(output) => {
                if self.config.debug {
                    debug!(
                        exit_code = ?output.exit_code,
                        duration_ms = output.duration_ms,
                        stdout = %output.stdout,
                        stderr = %output.stderr,
                        "{} finished",
                        self.runner.program()
                    );
                }
                Ok(output)
            }
            Err(e) => {
                error!(device_id = %self.device.device_id, error = %e, "Tool invocation failed");
                match &e {
                    ToolError::NotFound { program } => {
                        self.set_fault(&DeviceFault::ToolNotFound(program.clone()))
                    }
                    ToolError::NotRunnable { program } => {
                        self.set_fault(&DeviceFault::ToolNotRunnable(program.clone()))
                    }
                    ToolError::SpawnFailed(_) | ToolError::IoError(_) => {}
                }
                Err(e)
            }
        }
    }

    fn set_fault(&self, fault: &DeviceFault) {
        let indicator = fault.indicator();
        self.state_tx
            .send_modify(|snapshot| snapshot.indicator = Some(indicator));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IndicatorFill, Outcome};
    use crate::port::tool_runner::mocks::MockToolRunner;
    use crate::AppError;
    use serde_json::json;

    const QUAD_PROBE: &str = "Gembird #0\ndevice type:      4-socket SiS-PM\n";
    const SINGLE_PROBE: &str = "Gembird #0\ndevice type:      1-socket mSiS-PM\n";

    fn controller(runner: &MockToolRunner) -> SocketController {
        SocketController::new(ControllerConfig::new("0"), Arc::new(runner.clone()))
    }

    async fn ready_controller(runner: &MockToolRunner, probe: &str) -> SocketController {
        runner.push_output(0, probe, "");
        let mut controller = controller(runner);
        assert!(controller.initialize().await);
        controller
    }

    #[tokio::test]
    async fn test_probe_detects_quad_model() {
        let runner = MockToolRunner::new();
        let controller = ready_controller(&runner, QUAD_PROBE).await;

        assert_eq!(controller.device().max_sockets(), Some(4));
        assert_eq!(runner.calls(), vec![vec!["-d", "0", "-s"]]);

        let snapshot = controller.snapshot();
        assert!(snapshot.ready);
        assert_eq!(snapshot.max_sockets, Some(4));
        assert_eq!(snapshot.indicator, None);
    }

    #[tokio::test]
    async fn test_probe_defaults_to_single_model() {
        let runner = MockToolRunner::new();
        let controller = ready_controller(&runner, SINGLE_PROBE).await;
        assert_eq!(controller.device().max_sockets(), Some(1));
    }

    #[tokio::test]
    async fn test_probe_failure_rejects_commands() {
        let runner = MockToolRunner::new();
        runner.push_output(1, "", "No GEMBIRD SiS-PM found");

        let mut controller = controller(&runner);
        assert!(!controller.initialize().await);

        let indicator = controller.snapshot().indicator.unwrap();
        assert_eq!(indicator.fill, IndicatorFill::Red);
        assert_eq!(indicator.text, "device #0 not found");

        for topic in ["ON", "OFF", "STATUS", "FOO"] {
            let result = controller
                .handle_command(&CommandMessage::new(topic, 1))
                .await
                .unwrap();
            assert_eq!(result, ResultMessage::error("node not ready"));
        }
        assert_eq!(runner.call_count(), 1);

        // No second probe
        assert!(!controller.initialize().await);
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_tool_during_probe() {
        let runner = MockToolRunner::new();
        runner.push_error(ToolError::NotFound {
            program: "sispmctl".to_string(),
        });

        let mut controller = controller(&runner);
        assert!(!controller.initialize().await);

        let snapshot = controller.snapshot();
        assert!(!snapshot.ready);
        assert_eq!(snapshot.indicator.unwrap().text, "sispmctl not found");
    }

    #[tokio::test]
    async fn test_invalid_socket_skips_tool() {
        let runner = MockToolRunner::new();
        let controller = ready_controller(&runner, QUAD_PROBE).await;

        let result = controller
            .handle_command(&CommandMessage::new("ON", 5))
            .await
            .unwrap();
        assert_eq!(result, ResultMessage::error("invalid socket number (max 4)"));
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_socket_checked_before_action() {
        let runner = MockToolRunner::new();
        let controller = ready_controller(&runner, SINGLE_PROBE).await;

        let result = controller
            .handle_command(&CommandMessage::new("FOO", 3))
            .await
            .unwrap();
        assert_eq!(result, ResultMessage::error("invalid socket number (max 1)"));
    }

    #[tokio::test]
    async fn test_unrecognized_command() {
        let runner = MockToolRunner::new();
        let controller = ready_controller(&runner, QUAD_PROBE).await;

        let result = controller
            .handle_command(&CommandMessage::new("FOO", "all"))
            .await
            .unwrap();
        assert_eq!(result, ResultMessage::error("command 'FOO' not recognized"));
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_switch_on_reports_states() {
        let runner = MockToolRunner::new();
        let controller = ready_controller(&runner, QUAD_PROBE).await;

        runner.push_output(0, "Switched outlet 2 on\n", "");
        runner.push_output(
            0,
            "Status of outlet 1:\toff\nStatus of outlet 2:\ton\n\
             Status of outlet 3:\toff\nStatus of outlet 4:\toff\n",
            "",
        );

        let result = controller
            .handle_command(&CommandMessage::new("ON", 2))
            .await
            .unwrap();
        assert_eq!(result.topic, Outcome::Ok);
        assert_eq!(result, ResultMessage::ok(vec![false, true, false, false]));

        let calls = runner.calls();
        assert_eq!(calls[1], vec!["-d", "0", "-o", "2"]);
        assert_eq!(calls[2], vec!["-d", "0", "-g", "all"]);
    }

    #[tokio::test]
    async fn test_status_uses_query_flag() {
        let runner = MockToolRunner::new();
        let controller = ready_controller(&runner, SINGLE_PROBE).await;

        runner.push_output(0, "Status of outlet 1:\ton\n", "");
        runner.push_output(0, "Status of outlet 1:\ton\n", "");

        let result = controller
            .handle_command(&CommandMessage::new("STATUS", "all"))
            .await
            .unwrap();
        assert_eq!(result, ResultMessage::ok(vec![true]));
        assert_eq!(runner.calls()[1], vec!["-d", "0", "-q", "all"]);
    }

    #[tokio::test]
    async fn test_action_failure_skips_status_query() {
        let runner = MockToolRunner::new();
        let controller = ready_controller(&runner, QUAD_PROBE).await;

        runner.push_output(1, "", "permission denied");

        let result = controller
            .handle_command(&CommandMessage::new("OFF", 1))
            .await
            .unwrap();
        assert_eq!(result, ResultMessage::error("permission denied"));
        assert_eq!(runner.call_count(), 2);
    }

    #[tokio::test]
    async fn test_status_query_failure() {
        let runner = MockToolRunner::new();
        let controller = ready_controller(&runner, QUAD_PROBE).await;

        runner.push_output(0, "", "");
        runner.push_output(2, "", "usb transfer failed");

        let result = controller
            .handle_command(&CommandMessage::new("ON", "all"))
            .await
            .unwrap();
        assert_eq!(result, ResultMessage::error("usb transfer failed"));
    }

    #[tokio::test]
    async fn test_unrunnable_tool_suppresses_result() {
        let runner = MockToolRunner::new();
        let controller = ready_controller(&runner, QUAD_PROBE).await;

        runner.push_error(ToolError::NotRunnable {
            program: "sispmctl".to_string(),
        });

        let result = controller
            .handle_command(&CommandMessage::new("ON", 1))
            .await;
        assert!(matches!(result, Err(AppError::Tool(ToolError::NotRunnable { .. }))));

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.indicator.unwrap().text, "cannot run sispmctl");
        // Readiness is a probe outcome only
        assert!(snapshot.ready);
    }

    #[tokio::test]
    async fn test_numeric_string_payload() {
        let runner = MockToolRunner::new();
        let controller = ready_controller(&runner, QUAD_PROBE).await;

        runner.push_output(0, "", "");
        runner.push_output(0, "Status of outlet 3: on\n", "");

        let result = controller
            .handle_command(&CommandMessage::new("ON", json!("3")))
            .await
            .unwrap();
        assert_eq!(result, ResultMessage::ok(vec![false, false, true, false]));
        assert_eq!(runner.calls()[1], vec!["-d", "0", "-o", "3"]);
    }

    #[tokio::test]
    async fn test_zero_socket_left_to_tool() {
        let runner = MockToolRunner::new();
        let controller = ready_controller(&runner, QUAD_PROBE).await;

        runner.push_output(2, "", "Invalid outlet number given: 0\n");

        let result = controller
            .handle_command(&CommandMessage::new("OFF", 0))
            .await
            .unwrap();
        assert_eq!(result, ResultMessage::error("Invalid outlet number given: 0\n"));
        assert_eq!(runner.calls()[1], vec!["-d", "0", "-f", "0"]);
    }

    #[tokio::test]
    async fn test_spawn_failure_leaves_indicator_clear() {
        let runner = MockToolRunner::new();
        let controller = ready_controller(&runner, QUAD_PROBE).await;

        runner.push_error(ToolError::SpawnFailed("resource temporarily unavailable".to_string()));

        let result = controller
            .handle_command(&CommandMessage::new("ON", 1))
            .await;
        assert!(matches!(result, Err(AppError::Tool(ToolError::SpawnFailed(_)))));

        let snapshot = controller.snapshot();
        assert!(snapshot.indicator.is_none());
        assert!(snapshot.ready);
        // No status query after the failed spawn
        assert_eq!(runner.call_count(), 2);
    }
}
