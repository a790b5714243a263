//! Gembird CLI - Command-line interface for the Gembird socket bridge

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9531";

#[derive(Parser)]
#[command(name = "gembird")]
#[command(about = "Gembird power strip CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "GEMBIRD_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Switch an outlet on
    On {
        /// Outlet number or "all"
        socket: String,
    },

    /// Switch an outlet off
    Off {
        /// Outlet number or "all"
        socket: String,
    },

    /// Show outlet states
    Status {
        /// Outlet number or "all"
        #[arg(default_value = "all")]
        socket: String,
    },

    /// Send a raw command message
    Send {
        /// Message topic (ON, OFF, STATUS)
        topic: String,

        /// Message payload (outlet number or "all")
        payload: String,
    },

    /// Show device information
    Info,
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize)]
struct CommandResult {
    topic: String,
    payload: Value,
}

#[derive(Tabled)]
struct OutletRow {
    outlet: u32,
    state: String,
}

async fn call_rpc(url: &str, method: &str, params: Value) -> Result<Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to bridge")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

/// Outlet numbers travel as JSON numbers, everything else as strings
fn socket_payload(socket: &str) -> Value {
    match socket.parse::<u64>() {
        Ok(n) => json!(n),
        Err(_) => json!(socket),
    }
}

async fn send_command(url: &str, topic: &str, socket: &str) -> Result<()> {
    let params = json!({
        "topic": topic,
        "payload": socket_payload(socket),
    });

    let result: CommandResult = serde_json::from_value(call_rpc(url, "socket.command.v1", params).await?)
        .context("Unexpected command result")?;

    if result.topic != "OK" {
        let message = result
            .payload
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| result.payload.to_string());
        println!("{} {}", "✗".red().bold(), message.red());
        anyhow::bail!("command {} failed", topic);
    }

    let states: Vec<bool> =
        serde_json::from_value(result.payload).context("Unexpected outlet states")?;
    let rows: Vec<OutletRow> = states
        .iter()
        .enumerate()
        .map(|(i, on)| OutletRow {
            outlet: i as u32 + 1,
            state: if *on { "on".to_string() } else { "off".to_string() },
        })
        .collect();

    println!("{}", format!("✓ {} {}", topic, socket).green().bold());
    println!();
    println!("{}", Table::new(rows));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::On { socket } => send_command(&cli.rpc_url, "ON", &socket).await?,

        Commands::Off { socket } => send_command(&cli.rpc_url, "OFF", &socket).await?,

        Commands::Status { socket } => send_command(&cli.rpc_url, "STATUS", &socket).await?,

        Commands::Send { topic, payload } => send_command(&cli.rpc_url, &topic, &payload).await?,

        Commands::Info => {
            println!("{}", "Device Info".cyan().bold());
            println!();

            match call_rpc(&cli.rpc_url, "device.info.v1", json!({})).await {
                Ok(info) => {
                    println!("  {} {}", "RPC URL:".bold(), cli.rpc_url);
                    println!("  {} #{}", "Device:".bold(), info["device_id"].as_str().unwrap_or("?"));

                    if info["ready"].as_bool().unwrap_or(false) {
                        println!("  {} {}", "Status:".bold(), "READY".green());
                        println!("  {} {}", "Sockets:".bold(), info["max_sockets"]);
                    } else {
                        println!("  {} {}", "Status:".bold(), "NOT READY".red());
                    }

                    if let Some(text) = info["indicator"]["text"].as_str() {
                        println!("  {} {} {}", "Indicator:".bold(), "●".red(), text.red());
                    }

                    println!();
                    println!("  {} {}", "Version:".bold(), info["version"].as_str().unwrap_or("?"));
                    println!("  {} {} seconds", "Uptime:".bold(), info["uptime_seconds"]);
                }
                Err(e) => {
                    println!("  {} {}", "Status:".bold(), "OFFLINE".red());
                    println!("  {} {}", "Error:".bold(), e);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_payload() {
        assert_eq!(socket_payload("3"), json!(3));
        assert_eq!(socket_payload("all"), json!("all"));
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["gembird", "on", "2"]).unwrap();
        assert!(matches!(cli.command, Commands::On { socket } if socket == "2"));

        let cli = Cli::try_parse_from(["gembird", "status"]).unwrap();
        assert!(matches!(cli.command, Commands::Status { socket } if socket == "all"));
    }
}
