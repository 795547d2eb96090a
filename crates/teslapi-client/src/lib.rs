//! Owner API client library
//!
//! Provides a typed HTTP client for the vehicle owner REST API: OAuth token
//! handling, vehicle state reads, remote commands and telemetry streaming.
//!
//! # Example
//!
//! ```rust,no_run
//! use teslapi_client::{ClientConfig, TeslaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TeslaClient::new(ClientConfig::from_env()?)?.with_token("access-token");
//!
//!     // First vehicle on the account
//!     let summary = client.vehicle_at(0).await?;
//!     let vehicle = client.vehicle(summary["id"].as_str().unwrap_or_default());
//!
//!     vehicle.wake_up().await?;
//!     vehicle.set_charge_limit(80).await?;
//!     let charge = vehicle.charge_state().await?;
//!     println!("{}", charge["response"]["battery_level"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! Every command goes through the same request path; the command table
//! lives in [`teslapi_core::commands`]:
//!
//! ```rust,ignore
//! use serde_json::json;
//!
//! let result = vehicle.execute_named("set_temps", &[json!(21), json!(22)]).await?;
//! ```
//!
//! # Testing
//!
//! The `testing` module runs a mock owner API on a local port:
//!
//! ```rust,ignore
//! use teslapi_client::testing::TestServer;
//!
//! let server = TestServer::start(router).await?;
//! let vehicles = server.client.vehicles().await?;
//! ```

mod client;
pub mod config;
mod error;
mod gateway;
pub mod streaming;
pub mod testing;
mod vehicle;

pub use client::TeslaClient;
pub use config::{ClientConfig, ClientIdentity, CommandMethod, ConfigError};
pub use error::{Result, TeslaClientError};
pub use gateway::Gateway;
pub use vehicle::Vehicle;

// Re-export streaming types for convenience
pub use streaming::{StreamError, TelemetryRecord, TelemetryStream};

// Re-export core types for convenience
pub use teslapi_core as core;
pub use teslapi_core::{CarType, TokenResponse, VehicleModelInfo};
