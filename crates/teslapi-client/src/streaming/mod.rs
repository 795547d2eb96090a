//! Telemetry streaming
//!
//! The streaming endpoint answers a long-lived GET with one CSV line per
//! sample: the timestamp in milliseconds followed by the requested columns.
//!
//! # Example
//!
//! ```no_run
//! use futures::StreamExt;
//! use teslapi_client::TeslaClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TeslaClient::from_env()?.with_token("access-token");
//! let vehicle = client.vehicle("1234567890");
//!
//! let mut stream = vehicle
//!     .stream("owner@example.com", "vehicle-stream-token", &["speed", "soc"])
//!     .await?;
//!
//! while let Some(record) = stream.next().await {
//!     match record {
//!         Ok(record) => println!("{} speed={:?}", record.timestamp, record.get_f64("speed")),
//!         Err(e) => {
//!             eprintln!("Stream error: {}", e);
//!             break;
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod parser;
mod stream;
mod types;

pub use parser::LineParser;
pub use stream::{for_each_chunk, stream_url, TelemetryStream};
pub use types::{StreamError, StreamResult, TelemetryRecord};
