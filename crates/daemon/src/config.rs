//! Daemon configuration from environment variables

use anyhow::{bail, Context, Result};
use gembird_api_rpc::DEFAULT_RPC_PORT;
use gembird_core::application::worker::constants::DEFAULT_QUEUE_CAPACITY;
use gembird_infra_system::DEFAULT_PROGRAM;
use std::path::PathBuf;

const DEFAULT_DEVICE_ID: &str = "0";
const DEFAULT_RPC_HOST: &str = "127.0.0.1";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Production: JSON structured logging
    Json,
    /// Development: pretty formatting with colors
    Pretty,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub device_id: String,
    pub tool_path: PathBuf,
    pub debug: bool,
    pub rpc_host: String,
    pub rpc_port: u16,
    pub queue_capacity: usize,
    pub log_format: LogFormat,
    /// Daily rolling log files go here instead of stdout
    pub log_dir: Option<PathBuf>,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let device_id = lookup("GEMBIRD_DEVICE_ID")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_DEVICE_ID.to_string());
        if device_id.is_empty() {
            bail!("GEMBIRD_DEVICE_ID must not be empty");
        }

        let tool_path = lookup("GEMBIRD_TOOL_PATH")
            .map(|s| shellexpand::tilde(&s).into_owned())
            .unwrap_or_else(|| DEFAULT_PROGRAM.to_string())
            .into();

        let debug = match lookup("GEMBIRD_DEBUG") {
            Some(value) => parse_bool(&value).context("Invalid GEMBIRD_DEBUG")?,
            None => false,
        };

        let rpc_host = lookup("GEMBIRD_RPC_HOST").unwrap_or_else(|| DEFAULT_RPC_HOST.to_string());

        let rpc_port = match lookup("GEMBIRD_RPC_PORT") {
            Some(value) => value
                .parse()
                .with_context(|| format!("Invalid GEMBIRD_RPC_PORT: {}", value))?,
            None => DEFAULT_RPC_PORT,
        };

        let queue_capacity = match lookup("GEMBIRD_QUEUE_CAPACITY") {
            Some(value) => value
                .parse::<usize>()
                .with_context(|| format!("Invalid GEMBIRD_QUEUE_CAPACITY: {}", value))?,
            None => DEFAULT_QUEUE_CAPACITY,
        };
        if queue_capacity == 0 {
            bail!("GEMBIRD_QUEUE_CAPACITY must be at least 1");
        }

        let log_format = match lookup("GEMBIRD_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let log_dir = lookup("GEMBIRD_LOG_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(|s| PathBuf::from(shellexpand::tilde(&s).into_owned()));

        Ok(Self {
            device_id,
            tool_path,
            debug,
            rpc_host,
            rpc_port,
            queue_capacity,
            log_format,
            log_dir,
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("expected a boolean, got '{}'", other),
    }
}
