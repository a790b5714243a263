// Domain Error Types
//
// Display strings of the command-level variants are the exact payloads of
// ERROR result messages.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not ready")]
    NotReady,

    #[error("invalid socket number (max {max})")]
    InvalidSocket { max: u32 },

    #[error("command '{0}' not recognized")]
    UnrecognizedCommand(String),

    #[error("Invalid device state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },
}

pub type Result<T> = std::result::Result<T, DomainError>;
