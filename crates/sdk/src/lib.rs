//! Gembird SDK - Rust Client Library
//!
//! Provides a convenient client for the Gembird socket bridge daemon.
//!
//! # Example
//!
//! ```no_run
//! use gembird_sdk::{GembirdClient, Socket};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GembirdClient::connect("http://127.0.0.1:9531").await?;
//!
//!     let response = client.status(Socket::All).await?;
//!     match response.states() {
//!         Some(states) => println!("Outlets: {:?}", states),
//!         None => println!("Error: {:?}", response.error_message()),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::GembirdClient;
pub use error::{Result, SdkError};
pub use types::{
    CommandRequest, CommandResponse, DeviceInfoResponse, Indicator, Outcome, Socket,
};
