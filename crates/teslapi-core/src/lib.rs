//! teslapi-core - Core types for the vehicle owner API
//!
//! This crate holds everything that does not need a network connection:
//! decoding a VIN into model attributes, resolving the paint colour from
//! option codes, the numeric limits applied before commands are sent, and
//! the static table describing every remote command.

pub mod commands;
pub mod error;
pub mod limits;
pub mod models;
pub mod paint;
pub mod vin;

pub use commands::{CommandSpec, Endpoint, ParamKind, ParamSpec, COMMANDS};
pub use error::{CoreError, CoreResult};
pub use limits::clamp;
pub use models::*;
pub use paint::paint_color;
pub use vin::{CarType, VehicleModelInfo};
