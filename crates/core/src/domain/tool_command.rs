// Tool invocations and their command-line flags

use crate::domain::message::{Action, SocketSelector};

/// One invocation of the control utility
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCommand {
    /// `-s`: summary of the device, used to detect the model
    Probe,
    /// `-o <socket>`
    SwitchOn(SocketSelector),
    /// `-f <socket>`
    SwitchOff(SocketSelector),
    /// `-q <socket>`
    Query(SocketSelector),
    /// `-g all`: status of every outlet
    QueryAll,
}

impl ToolCommand {
    pub fn for_action(action: Action, selector: SocketSelector) -> Self {
        match action {
            Action::On => ToolCommand::SwitchOn(selector),
            Action::Off => ToolCommand::SwitchOff(selector),
            Action::Status => ToolCommand::Query(selector),
        }
    }

    /// Full argument list, always starting with the device selection
    pub fn args(&self, device_id: &str) -> Vec<String> {
        let mut args = vec!["-d".to_string(), device_id.to_string()];
        match self {
            ToolCommand::Probe => args.push("-s".to_string()),
            ToolCommand::SwitchOn(sel) => args.extend(["-o".to_string(), sel.to_string()]),
            ToolCommand::SwitchOff(sel) => args.extend(["-f".to_string(), sel.to_string()]),
            ToolCommand::Query(sel) => args.extend(["-q".to_string(), sel.to_string()]),
            ToolCommand::QueryAll => args.extend(["-g".to_string(), "all".to_string()]),
        }
        args
    }
}
