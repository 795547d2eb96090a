//! Remote command table
//!
//! Every remote command is a row of [`COMMANDS`]: an operation name, the
//! endpoint it targets, the positional parameters it accepts and any fixed
//! fields it always sends. A client executes a command by looking up its
//! row and calling [`CommandSpec::build_payload`]; there is a single HTTP
//! code path for all of them.
//!
//! ```
//! use serde_json::json;
//! use teslapi_core::commands;
//!
//! let spec = commands::find("set_charge_limit").unwrap();
//! let payload = spec.build_payload(&[json!(30)]).unwrap();
//! assert_eq!(payload, Some(json!({"percent": 50})));
//! ```

mod table;

use std::fmt;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::limits::clamp;

pub use table::COMMANDS;

/// Where a command is sent, relative to a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `api/1/vehicles/{id}/command/{name}`
    Command(&'static str),
    /// `api/1/vehicles/{id}/{name}`
    Vehicle(&'static str),
}

impl Endpoint {
    /// Final path segment
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Command(name) | Endpoint::Vehicle(name) => name,
        }
    }

    /// Path relative to the portal base URL
    pub fn path(&self, vehicle_id: &str) -> String {
        match self {
            Endpoint::Command(name) => format!("api/1/vehicles/{}/command/{}", vehicle_id, name),
            Endpoint::Vehicle(name) => format!("api/1/vehicles/{}/{}", vehicle_id, name),
        }
    }
}

/// Declared type of a command parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    Int,
    Float,
    Text,
    /// Arbitrary JSON, sent as given
    Json,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamKind::Bool => "bool",
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::Text => "text",
            ParamKind::Json => "json",
        };
        f.write_str(name)
    }
}

/// A constant value usable in a static table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(&'static str),
}

impl Literal {
    pub fn to_value(&self) -> Value {
        match *self {
            Literal::Bool(b) => Value::Bool(b),
            Literal::Int(i) => Value::from(i),
            Literal::Float(f) => Value::from(f),
            Literal::Text(s) => Value::from(s),
        }
    }
}

/// Whether a parameter has to be supplied
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Requirement {
    Required,
    /// Sent with this value when not supplied
    Default(Literal),
    /// Left out of the payload when not supplied
    Optional,
}

/// One positional parameter of a command
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub key: &'static str,
    pub kind: ParamKind,
    pub requirement: Requirement,
    /// Inclusive bounds applied to numeric values before sending
    pub range: Option<(f64, f64)>,
}

/// Post-processing applied to the collected payload map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Parameters are sent as a flat object
    Flat,
    /// `subject`/`text`/`locale` are wrapped into a share-intent request
    ShareIntent,
}

/// A row of the command table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandSpec {
    /// Operation name, used for lookup
    pub name: &'static str,
    pub endpoint: Endpoint,
    pub params: &'static [ParamSpec],
    /// Fields sent with every invocation
    pub fixed: &'static [(&'static str, Literal)],
    pub shape: Shape,
    pub summary: &'static str,
}

impl CommandSpec {
    /// Path relative to the portal base URL
    pub fn path(&self, vehicle_id: &str) -> String {
        self.endpoint.path(vehicle_id)
    }

    /// Whether the command sends a payload at all
    pub fn has_payload(&self) -> bool {
        !self.params.is_empty() || !self.fixed.is_empty()
    }

    /// Usage string such as `set_temps <driver_temp:float> <passenger_temp:float>`
    pub fn usage(&self) -> String {
        let mut usage = self.name.to_string();
        for param in self.params {
            let arg = match param.requirement {
                Requirement::Required => format!(" <{}:{}>", param.key, param.kind),
                _ => format!(" [{}:{}]", param.key, param.kind),
            };
            usage.push_str(&arg);
        }
        usage
    }

    /// Build the payload from positional arguments.
    ///
    /// `Value::Null` counts as "not supplied". Numeric arguments are clamped
    /// to the parameter's range. Returns `None` for commands without any
    /// parameters or fixed fields.
    pub fn build_payload(&self, args: &[Value]) -> CoreResult<Option<Value>> {
        if args.len() > self.params.len() {
            return Err(CoreError::TooManyArguments {
                command: self.name,
                expected: self.params.len(),
                actual: args.len(),
            });
        }

        if !self.has_payload() {
            return Ok(None);
        }

        let mut map = Map::new();
        for (key, literal) in self.fixed {
            map.insert((*key).to_string(), literal.to_value());
        }

        for (index, param) in self.params.iter().enumerate() {
            let supplied = args.get(index).filter(|v| !v.is_null()).cloned();
            let raw = match (supplied, param.requirement) {
                (Some(value), _) => value,
                (None, Requirement::Default(literal)) => literal.to_value(),
                (None, Requirement::Optional) => continue,
                (None, Requirement::Required) => {
                    return Err(CoreError::MissingArgument {
                        command: self.name,
                        param: param.key,
                    })
                }
            };
            map.insert(param.key.to_string(), self.coerce(param, raw)?);
        }

        Ok(Some(self.apply_shape(map)))
    }

    /// Build the payload from textual arguments (as typed on a command line)
    pub fn build_payload_from_strs<S: AsRef<str>>(&self, args: &[S]) -> CoreResult<Option<Value>> {
        let values: Vec<Value> = args
            .iter()
            .map(|s| Value::String(s.as_ref().to_string()))
            .collect();
        self.build_payload(&values)
    }

    fn coerce(&self, param: &ParamSpec, value: Value) -> CoreResult<Value> {
        let invalid = |reason: String| CoreError::InvalidArgument {
            command: self.name,
            param: param.key,
            reason,
        };

        match param.kind {
            ParamKind::Bool => match &value {
                Value::Bool(b) => Ok(Value::Bool(*b)),
                Value::Number(n) => Ok(Value::Bool(n.as_f64().unwrap_or(0.0) != 0.0)),
                Value::String(s) => parse_bool(s)
                    .map(Value::Bool)
                    .ok_or_else(|| invalid(format!("expected a boolean, got '{}'", s))),
                other => Err(invalid(format!("expected a boolean, got {}", other))),
            },
            ParamKind::Int => {
                let parsed = match &value {
                    Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
                    Value::String(s) => {
                        let s = s.trim();
                        s.parse::<i64>()
                            .ok()
                            .or_else(|| s.parse::<f64>().ok().and_then(integral))
                    }
                    _ => None,
                };
                let int = parsed
                    .ok_or_else(|| invalid(format!("expected an integer, got {}", value)))?;
                let int = match param.range {
                    Some((lo, hi)) => {
                        let clamped = clamp(int, lo as i64, hi as i64);
                        if clamped != int {
                            debug!(
                                "{}: {} clamped from {} to {}",
                                self.name, param.key, int, clamped
                            );
                        }
                        clamped
                    }
                    None => int,
                };
                Ok(Value::from(int))
            }
            ParamKind::Float => {
                let parsed = match &value {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok(),
                    _ => None,
                };
                let float = parsed
                    .filter(|f| f.is_finite())
                    .ok_or_else(|| invalid(format!("expected a number, got {}", value)))?;
                let float = match param.range {
                    Some((lo, hi)) => {
                        let clamped = clamp(float, lo, hi);
                        if clamped != float {
                            debug!(
                                "{}: {} clamped from {} to {}",
                                self.name, param.key, float, clamped
                            );
                        }
                        clamped
                    }
                    None => float,
                };
                Ok(Value::from(float))
            }
            ParamKind::Text => match value {
                Value::String(s) => Ok(Value::String(s)),
                Value::Number(n) => Ok(Value::String(n.to_string())),
                Value::Bool(b) => Ok(Value::String(b.to_string())),
                other => Err(invalid(format!("expected text, got {}", other))),
            },
            ParamKind::Json => match value {
                Value::String(s) => Ok(serde_json::from_str(&s).unwrap_or(Value::String(s))),
                other => Ok(other),
            },
        }
    }

    fn apply_shape(&self, mut map: Map<String, Value>) -> Value {
        match self.shape {
            Shape::Flat => Value::Object(map),
            Shape::ShareIntent => {
                let subject = take_str(&mut map, "subject");
                let text = take_str(&mut map, "text");
                let locale = map.remove("locale").unwrap_or_else(|| Value::from("en-US"));
                let mut value = Map::new();
                value.insert(
                    "android.intent.extra.TEXT".to_string(),
                    Value::String(format!("{}\n{}", subject, text)),
                );
                map.insert("type".to_string(), Value::from("share_ext_content_raw"));
                map.insert("value".to_string(), Value::Object(value));
                map.insert("locale".to_string(), locale);
                map.insert(
                    "timestamp_ms".to_string(),
                    Value::String(chrono::Utc::now().timestamp_millis().to_string()),
                );
                Value::Object(map)
            }
        }
    }
}

fn take_str(map: &mut Map<String, Value>, key: &str) -> String {
    match map.remove(key) {
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
}

/// Look up a command by operation name, falling back to the endpoint name.
///
/// Names are matched case-insensitively and `-` is treated as `_`, so
/// `charge-start`, `start_charge` and `CHARGE_START` all resolve.
pub fn find(name: &str) -> CoreResult<&'static CommandSpec> {
    let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
    COMMANDS
        .iter()
        .find(|c| c.name == normalized)
        .or_else(|| COMMANDS.iter().find(|c| c.endpoint.name() == normalized))
        .ok_or_else(|| CoreError::UnknownCommand(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let mut seen = HashSet::new();
        for command in COMMANDS {
            assert!(seen.insert(command.name), "duplicate command {}", command.name);
        }
    }

    #[test]
    fn test_lookup_by_name_and_endpoint() {
        assert_eq!(find("start_charge").unwrap().endpoint, Endpoint::Command("charge_start"));
        assert_eq!(find("charge_start").unwrap().name, "start_charge");
        assert_eq!(find("Honk-Horn").unwrap().name, "honk_horn");
        assert!(matches!(find("self_destruct"), Err(CoreError::UnknownCommand(_))));
    }

    #[test]
    fn test_command_without_payload() {
        let spec = find("start_charge").unwrap();
        assert_eq!(spec.build_payload(&[]).unwrap(), None);
        assert_eq!(spec.path("42"), "api/1/vehicles/42/command/charge_start");
    }

    #[test]
    fn test_wake_up_path() {
        assert_eq!(find("wake_up").unwrap().path("42"), "api/1/vehicles/42/wake_up");
    }

    #[test]
    fn test_charge_limit_clamped() {
        let spec = find("set_charge_limit").unwrap();
        assert_eq!(spec.build_payload(&[json!(30)]).unwrap(), Some(json!({"percent": 50})));
        assert_eq!(spec.build_payload(&[json!(150)]).unwrap(), Some(json!({"percent": 100})));
        assert_eq!(spec.build_payload(&[json!(75)]).unwrap(), Some(json!({"percent": 75})));
    }

    #[test]
    fn test_temperatures_clamped() {
        let spec = find("set_temps").unwrap();
        let payload = spec.build_payload(&[json!(10), json!(30)]).unwrap();
        assert_eq!(payload, Some(json!({"driver_temp": 15.0, "passenger_temp": 28.0})));
    }

    #[test]
    fn test_seat_heater_payload() {
        let spec = find("seat_heater").unwrap();
        assert_eq!(spec.endpoint.name(), "remote_seat_heater_request");
        let payload = spec.build_payload_from_strs(&["0", "3"]).unwrap();
        assert_eq!(payload, Some(json!({"heater": 0, "level": 3})));
    }

    #[test]
    fn test_fixed_fields() {
        let spec = find("sun_roof_move").unwrap();
        let payload = spec.build_payload(&[json!(40)]).unwrap();
        assert_eq!(payload, Some(json!({"state": "move", "percent": 40})));
    }

    #[test]
    fn test_defaults_and_optionals() {
        let valet = find("set_valet_mode").unwrap();
        assert_eq!(valet.build_payload(&[json!(true)]).unwrap(), Some(json!({"on": true})));
        assert_eq!(
            valet.build_payload_from_strs(&["on", "1234"]).unwrap(),
            Some(json!({"on": true, "password": "1234"}))
        );

        let update = find("schedule_software_update").unwrap();
        assert_eq!(update.build_payload(&[]).unwrap(), Some(json!({"offset_sec": 0})));
    }

    #[test]
    fn test_missing_and_extra_arguments() {
        let spec = find("set_charge_limit").unwrap();
        assert_eq!(
            spec.build_payload(&[]),
            Err(CoreError::MissingArgument {
                command: "set_charge_limit",
                param: "percent"
            })
        );
        assert!(matches!(
            spec.build_payload(&[json!(80), json!(1)]),
            Err(CoreError::TooManyArguments { expected: 1, actual: 2, .. })
        ));
        assert!(matches!(
            find("honk_horn").unwrap().build_payload(&[json!(1)]),
            Err(CoreError::TooManyArguments { .. })
        ));
    }

    #[test]
    fn test_invalid_arguments() {
        let spec = find("set_sentry_mode").unwrap();
        assert!(matches!(
            spec.build_payload_from_strs(&["maybe"]),
            Err(CoreError::InvalidArgument { param: "on", .. })
        ));
        let spec = find("set_charge_limit").unwrap();
        assert!(spec.build_payload_from_strs(&["eighty"]).is_err());
        assert!(spec.build_payload(&[json!(80.5)]).is_err());
    }

    #[test]
    fn test_share_intent_shape() {
        let spec = find("navigation_request").unwrap();
        let payload = spec
            .build_payload(&[json!("Dinner"), json!("1 Infinite Loop")])
            .unwrap()
            .unwrap();
        assert_eq!(payload["type"], "share_ext_content_raw");
        assert_eq!(payload["value"]["android.intent.extra.TEXT"], "Dinner\n1 Infinite Loop");
        assert_eq!(payload["locale"], "en-US");
        assert!(payload["timestamp_ms"].as_str().unwrap().parse::<i64>().is_ok());
        assert!(payload.get("subject").is_none());
    }

    #[test]
    fn test_json_parameter() {
        let spec = find("calendar").unwrap();
        let payload = spec.build_payload_from_strs(&[r#"{"entries":[]}"#]).unwrap();
        assert_eq!(payload, Some(json!({"calendar_data": {"entries": []}})));
    }

    #[test]
    fn test_usage() {
        assert_eq!(
            find("set_valet_mode").unwrap().usage(),
            "set_valet_mode <on:bool> [password:text]"
        );
    }
}
