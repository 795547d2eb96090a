//! The static command table

use super::{CommandSpec, Endpoint, Literal, ParamKind, ParamSpec, Requirement, Shape};
use crate::limits::{CHARGE_RANGE, CHARGE_STORAGE, TEMP_HI, TEMP_LO};

macro_rules! param {
    ($key:literal, $kind:ident) => {
        ParamSpec {
            key: $key,
            kind: ParamKind::$kind,
            requirement: Requirement::Required,
            range: None,
        }
    };
    ($key:literal, $kind:ident, default $value:expr) => {
        ParamSpec {
            key: $key,
            kind: ParamKind::$kind,
            requirement: Requirement::Default($value),
            range: None,
        }
    };
    ($key:literal, $kind:ident, optional) => {
        ParamSpec {
            key: $key,
            kind: ParamKind::$kind,
            requirement: Requirement::Optional,
            range: None,
        }
    };
    ($key:literal, $kind:ident, range $lo:expr, $hi:expr) => {
        ParamSpec {
            key: $key,
            kind: ParamKind::$kind,
            requirement: Requirement::Required,
            range: Some(($lo, $hi)),
        }
    };
}

const BASE: CommandSpec = CommandSpec {
    name: "",
    endpoint: Endpoint::Command(""),
    params: &[],
    fixed: &[],
    shape: Shape::Flat,
    summary: "",
};

const CHARGE_LIMIT_RANGE: (f64, f64) = (CHARGE_STORAGE as f64, CHARGE_RANGE as f64);

/// Every remote command understood by the client
pub static COMMANDS: &[CommandSpec] = &[
    // Wake / alerts
    CommandSpec {
        name: "wake_up",
        endpoint: Endpoint::Vehicle("wake_up"),
        summary: "Wake the vehicle from sleep",
        ..BASE
    },
    CommandSpec {
        name: "honk_horn",
        endpoint: Endpoint::Command("honk_horn"),
        summary: "Honk the horn",
        ..BASE
    },
    CommandSpec {
        name: "flash_lights",
        endpoint: Endpoint::Command("flash_lights"),
        summary: "Flash the headlights",
        ..BASE
    },
    // Charging
    CommandSpec {
        name: "start_charge",
        endpoint: Endpoint::Command("charge_start"),
        summary: "Start charging",
        ..BASE
    },
    CommandSpec {
        name: "stop_charge",
        endpoint: Endpoint::Command("charge_stop"),
        summary: "Stop charging",
        ..BASE
    },
    CommandSpec {
        name: "open_charge_port",
        endpoint: Endpoint::Command("charge_port_door_open"),
        summary: "Open the charge port door",
        ..BASE
    },
    CommandSpec {
        name: "close_charge_port",
        endpoint: Endpoint::Command("charge_port_door_close"),
        summary: "Close the charge port door",
        ..BASE
    },
    CommandSpec {
        name: "charge_standard",
        endpoint: Endpoint::Command("charge_standard"),
        summary: "Set the charge limit to the standard level",
        ..BASE
    },
    CommandSpec {
        name: "charge_max_range",
        endpoint: Endpoint::Command("charge_max_range"),
        summary: "Set the charge limit to maximum range",
        ..BASE
    },
    CommandSpec {
        name: "set_charge_limit",
        endpoint: Endpoint::Command("set_charge_limit"),
        params: &[param!("percent", Int, range CHARGE_LIMIT_RANGE.0, CHARGE_LIMIT_RANGE.1)],
        summary: "Set the charge limit percent (50-100)",
        ..BASE
    },
    CommandSpec {
        name: "set_charging_amps",
        endpoint: Endpoint::Command("set_charging_amps"),
        params: &[param!("charging_amps", Int)],
        summary: "Set the charging current in amps",
        ..BASE
    },
    CommandSpec {
        name: "scheduled_charging",
        endpoint: Endpoint::Command("set_scheduled_charging"),
        params: &[
            param!("enable", Bool),
            param!("time", Int, default Literal::Int(0)),
        ],
        summary: "Schedule charging at minutes after midnight",
        ..BASE
    },
    CommandSpec {
        name: "scheduled_departure",
        endpoint: Endpoint::Command("set_scheduled_departure"),
        params: &[
            param!("enable", Bool),
            param!("departure_time", Int),
            param!("preconditioning_enabled", Bool, default Literal::Bool(false)),
            param!("preconditioning_weekdays_only", Bool, default Literal::Bool(false)),
            param!("off_peak_charging_enabled", Bool, default Literal::Bool(false)),
            param!("off_peak_charging_weekdays_only", Bool, default Literal::Bool(false)),
            param!("end_off_peak_time", Int, default Literal::Int(0)),
        ],
        summary: "Schedule departure, preconditioning and off-peak charging",
        ..BASE
    },
    // Doors and trunks
    CommandSpec {
        name: "door_lock",
        endpoint: Endpoint::Command("door_lock"),
        summary: "Lock the doors",
        ..BASE
    },
    CommandSpec {
        name: "door_unlock",
        endpoint: Endpoint::Command("door_unlock"),
        summary: "Unlock the doors",
        ..BASE
    },
    CommandSpec {
        name: "open_trunk",
        endpoint: Endpoint::Command("actuate_trunk"),
        params: &[param!("which_trunk", Text)],
        summary: "Open or close the front or rear trunk",
        ..BASE
    },
    // Climate
    CommandSpec {
        name: "climate_start",
        endpoint: Endpoint::Command("auto_conditioning_start"),
        summary: "Start climate conditioning",
        ..BASE
    },
    CommandSpec {
        name: "climate_stop",
        endpoint: Endpoint::Command("auto_conditioning_stop"),
        summary: "Stop climate conditioning",
        ..BASE
    },
    CommandSpec {
        name: "set_temps",
        endpoint: Endpoint::Command("set_temps"),
        params: &[
            param!("driver_temp", Float, range TEMP_LO, TEMP_HI),
            param!("passenger_temp", Float, range TEMP_LO, TEMP_HI),
        ],
        summary: "Set driver and passenger temperatures in °C (15-28)",
        ..BASE
    },
    CommandSpec {
        name: "max_defrost",
        endpoint: Endpoint::Command("set_preconditioning_max"),
        params: &[param!("on", Bool)],
        summary: "Toggle maximum defrost",
        ..BASE
    },
    CommandSpec {
        name: "seat_heater",
        endpoint: Endpoint::Command("remote_seat_heater_request"),
        params: &[param!("heater", Int), param!("level", Int)],
        summary: "Set a seat heater level (seat position, level 0-3)",
        ..BASE
    },
    CommandSpec {
        name: "seat_cooler",
        endpoint: Endpoint::Command("remote_seat_cooler_request"),
        params: &[param!("seat_position", Int), param!("seat_cooler_level", Int)],
        summary: "Set a seat cooler level",
        ..BASE
    },
    CommandSpec {
        name: "auto_seat_climate",
        endpoint: Endpoint::Command("remote_auto_seat_climate_request"),
        params: &[param!("auto_seat_position", Int), param!("auto_climate_on", Bool)],
        summary: "Toggle automatic seat climate for a seat",
        ..BASE
    },
    CommandSpec {
        name: "steering_heater",
        endpoint: Endpoint::Command("remote_steering_wheel_heater_request"),
        params: &[param!("on", Bool)],
        summary: "Toggle the steering wheel heater",
        ..BASE
    },
    CommandSpec {
        name: "auto_steering_heater",
        endpoint: Endpoint::Command("remote_auto_steering_wheel_heat_climate_request"),
        params: &[param!("on", Bool)],
        summary: "Toggle automatic steering wheel heating",
        ..BASE
    },
    CommandSpec {
        name: "set_bioweapon_mode",
        endpoint: Endpoint::Command("set_bioweapon_mode"),
        params: &[
            param!("on", Bool),
            param!("manual_override", Bool, default Literal::Bool(false)),
        ],
        summary: "Toggle bioweapon defense mode",
        ..BASE
    },
    CommandSpec {
        name: "set_cabin_overheat_protection",
        endpoint: Endpoint::Command("set_cabin_overheat_protection"),
        params: &[
            param!("on", Bool),
            param!("fan_only", Bool, default Literal::Bool(false)),
        ],
        summary: "Toggle cabin overheat protection",
        ..BASE
    },
    CommandSpec {
        name: "set_climate_keeper_mode",
        endpoint: Endpoint::Command("set_climate_keeper_mode"),
        params: &[param!("climate_keeper_mode", Int)],
        summary: "Set climate keeper mode (0 off, 1 keep, 2 dog, 3 camp)",
        ..BASE
    },
    // Sunroof and windows
    CommandSpec {
        name: "sun_roof_control",
        endpoint: Endpoint::Command("sun_roof_control"),
        params: &[param!("state", Text)],
        summary: "Vent or close the sunroof",
        ..BASE
    },
    CommandSpec {
        name: "sun_roof_move",
        endpoint: Endpoint::Command("sun_roof_control"),
        params: &[param!("percent", Int)],
        fixed: &[("state", Literal::Text("move"))],
        summary: "Move the sunroof to an open percentage",
        ..BASE
    },
    CommandSpec {
        name: "window_control",
        endpoint: Endpoint::Command("window_control"),
        params: &[
            param!("command", Text),
            param!("lat", Float, default Literal::Float(0.0)),
            param!("lon", Float, default Literal::Float(0.0)),
        ],
        summary: "Vent or close all windows",
        ..BASE
    },
    // Security
    CommandSpec {
        name: "set_sentry_mode",
        endpoint: Endpoint::Command("set_sentry_mode"),
        params: &[param!("on", Bool)],
        summary: "Toggle sentry mode",
        ..BASE
    },
    CommandSpec {
        name: "set_valet_mode",
        endpoint: Endpoint::Command("set_valet_mode"),
        params: &[param!("on", Bool), param!("password", Text, optional)],
        summary: "Toggle valet mode with an optional PIN",
        ..BASE
    },
    CommandSpec {
        name: "reset_valet_pin",
        endpoint: Endpoint::Command("reset_valet_pin"),
        summary: "Clear the valet PIN",
        ..BASE
    },
    CommandSpec {
        name: "remote_start",
        endpoint: Endpoint::Command("remote_start_drive"),
        params: &[param!("password", Text, optional)],
        summary: "Enable keyless driving",
        ..BASE
    },
    CommandSpec {
        name: "set_vehicle_name",
        endpoint: Endpoint::Command("set_vehicle_name"),
        params: &[param!("vehicle_name", Text)],
        summary: "Rename the vehicle",
        ..BASE
    },
    CommandSpec {
        name: "guest_mode",
        endpoint: Endpoint::Command("guest_mode"),
        params: &[param!("enable", Bool)],
        summary: "Toggle guest mode",
        ..BASE
    },
    CommandSpec {
        name: "speed_limit_activate",
        endpoint: Endpoint::Command("speed_limit_activate"),
        params: &[param!("pin", Text)],
        summary: "Activate speed limit mode",
        ..BASE
    },
    CommandSpec {
        name: "speed_limit_deactivate",
        endpoint: Endpoint::Command("speed_limit_deactivate"),
        params: &[param!("pin", Text)],
        summary: "Deactivate speed limit mode",
        ..BASE
    },
    CommandSpec {
        name: "speed_limit_clear_pin",
        endpoint: Endpoint::Command("speed_limit_clear_pin"),
        params: &[param!("pin", Text)],
        summary: "Clear the speed limit PIN",
        ..BASE
    },
    CommandSpec {
        name: "speed_limit_set_limit",
        endpoint: Endpoint::Command("speed_limit_set_limit"),
        params: &[param!("limit_mph", Int)],
        summary: "Set the speed limit in mph",
        ..BASE
    },
    // Media
    CommandSpec {
        name: "media_toggle_playback",
        endpoint: Endpoint::Command("media_toggle_playback"),
        summary: "Toggle media playback",
        ..BASE
    },
    CommandSpec {
        name: "media_next_track",
        endpoint: Endpoint::Command("media_next_track"),
        summary: "Skip to the next track",
        ..BASE
    },
    CommandSpec {
        name: "media_prev_track",
        endpoint: Endpoint::Command("media_prev_track"),
        summary: "Go back to the previous track",
        ..BASE
    },
    CommandSpec {
        name: "media_next_fav",
        endpoint: Endpoint::Command("media_next_fav"),
        summary: "Skip to the next favourite",
        ..BASE
    },
    CommandSpec {
        name: "media_prev_fav",
        endpoint: Endpoint::Command("media_prev_fav"),
        summary: "Go back to the previous favourite",
        ..BASE
    },
    CommandSpec {
        name: "media_volume_up",
        endpoint: Endpoint::Command("media_volume_up"),
        summary: "Turn the volume up",
        ..BASE
    },
    CommandSpec {
        name: "media_volume_down",
        endpoint: Endpoint::Command("media_volume_down"),
        summary: "Turn the volume down",
        ..BASE
    },
    CommandSpec {
        name: "adjust_volume",
        endpoint: Endpoint::Command("adjust_volume"),
        params: &[param!("volume", Float)],
        summary: "Set the media volume",
        ..BASE
    },
    CommandSpec {
        name: "remote_boombox",
        endpoint: Endpoint::Command("remote_boombox"),
        params: &[param!("sound", Int)],
        summary: "Play a sound from the external speaker",
        ..BASE
    },
    // Navigation, homelink, calendar
    CommandSpec {
        name: "navigation_request",
        endpoint: Endpoint::Command("navigation_request"),
        params: &[
            param!("subject", Text),
            param!("text", Text),
            param!("locale", Text, default Literal::Text("en-US")),
        ],
        shape: Shape::ShareIntent,
        summary: "Send a destination to the navigation system",
        ..BASE
    },
    CommandSpec {
        name: "homelink",
        endpoint: Endpoint::Command("trigger_homelink"),
        params: &[param!("lat", Float), param!("lon", Float), param!("token", Text)],
        summary: "Trigger the nearest HomeLink device",
        ..BASE
    },
    CommandSpec {
        name: "calendar",
        endpoint: Endpoint::Command("upcoming_calendar_entries"),
        params: &[param!("calendar_data", Json)],
        summary: "Upload upcoming calendar entries",
        ..BASE
    },
    // Software updates
    CommandSpec {
        name: "schedule_software_update",
        endpoint: Endpoint::Command("schedule_software_update"),
        params: &[param!("offset_sec", Int, default Literal::Int(0))],
        summary: "Schedule a pending software update after an offset in seconds",
        ..BASE
    },
    CommandSpec {
        name: "cancel_software_update",
        endpoint: Endpoint::Command("cancel_software_update"),
        summary: "Cancel a scheduled software update",
        ..BASE
    },
];
