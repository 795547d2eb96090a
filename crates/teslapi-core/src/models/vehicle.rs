//! Vehicle state kinds and named argument values

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Typed `data_request/{kind}` read endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    VehicleConfig,
    VehicleState,
    ClimateState,
    ChargeState,
    DriveState,
    GuiSettings,
}

impl StateKind {
    pub const ALL: [StateKind; 6] = [
        StateKind::VehicleConfig,
        StateKind::VehicleState,
        StateKind::ClimateState,
        StateKind::ChargeState,
        StateKind::DriveState,
        StateKind::GuiSettings,
    ];

    /// Path segment for this state kind
    pub fn as_str(&self) -> &'static str {
        match self {
            StateKind::VehicleConfig => "vehicle_config",
            StateKind::VehicleState => "vehicle_state",
            StateKind::ClimateState => "climate_state",
            StateKind::ChargeState => "charge_state",
            StateKind::DriveState => "drive_state",
            StateKind::GuiSettings => "gui_settings",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|k| {
                k.as_str() == normalized || k.as_str().trim_end_matches("_state") == normalized
            })
            .ok_or_else(|| format!("unknown state kind: {}", s))
    }
}

pub const FRONT_TRUNK: &str = "front";
pub const REAR_TRUNK: &str = "rear";

pub const SUNROOF_VENT: &str = "vent";
pub const SUNROOF_CLOSED: &str = "close";
pub const SUNROOF_MOVE: &str = "move";

pub const WINDOW_VENT: &str = "vent";
pub const WINDOW_CLOSE: &str = "close";

pub const SEAT_DRIVER: i64 = 0;
pub const SEAT_PASSENGER: i64 = 1;
pub const SEAT_REAR_LEFT: i64 = 2;
pub const SEAT_REAR_CENTER: i64 = 4;
pub const SEAT_REAR_RIGHT: i64 = 5;
