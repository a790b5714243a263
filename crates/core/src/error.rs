// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Tool error: {0}")]
    Tool(#[from] crate::port::ToolError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Device fault: {0}")]
    Fault(String),

    #[error("Device queue unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
