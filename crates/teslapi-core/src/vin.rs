//! VIN decoding
//!
//! A VIN is read positionally (0-indexed):
//! - position 3: model family
//! - position 7: drivetrain / motor code
//! - position 9: model-year character
//!
//! The year is computed as `2010 + (pos9 - 'A')` with no correction for the
//! letters the VIN standard skips, so out-of-range characters yield
//! out-of-range years.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Minimum VIN length needed to read every attribute position
pub const MIN_VIN_LEN: usize = 10;

const MODEL_POS: usize = 3;
const DRIVETRAIN_POS: usize = 7;
const YEAR_POS: usize = 9;

/// Drivetrain codes that indicate an all-wheel-drive vehicle
const AWD_CODES: [u8; 3] = [b'2', b'4', b'B'];

const DEFAULT_YEAR: i32 = 2012;
const YEAR_BASE: i32 = 2010;

/// Vehicle model family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CarType {
    #[default]
    #[serde(rename = "Model S")]
    ModelS,
    #[serde(rename = "Model 3")]
    Model3,
    #[serde(rename = "Model X")]
    ModelX,
    #[serde(rename = "Model Y")]
    ModelY,
}

impl CarType {
    /// Human-readable model name
    pub fn as_str(&self) -> &'static str {
        match self {
            CarType::ModelS => "Model S",
            CarType::Model3 => "Model 3",
            CarType::ModelX => "Model X",
            CarType::ModelY => "Model Y",
        }
    }

    /// Map the model-family character; unknown characters yield `None`
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            b'S' => Some(CarType::ModelS),
            b'3' => Some(CarType::Model3),
            b'X' => Some(CarType::ModelX),
            b'Y' => Some(CarType::ModelY),
            _ => None,
        }
    }
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes decoded from a VIN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleModelInfo {
    #[serde(rename = "carType")]
    pub car_type: CarType,
    pub awd: bool,
    pub year: i32,
}

impl Default for VehicleModelInfo {
    fn default() -> Self {
        Self {
            car_type: CarType::ModelS,
            awd: false,
            year: DEFAULT_YEAR,
        }
    }
}

impl VehicleModelInfo {
    /// Decode a VIN.
    ///
    /// An absent or empty VIN yields the default record. A VIN that is
    /// present but shorter than [`MIN_VIN_LEN`] is rejected instead of being
    /// read out of bounds, as is one with non-ASCII characters.
    pub fn decode(vin: Option<&str>) -> CoreResult<Self> {
        let vin = match vin {
            Some(v) if !v.is_empty() => v,
            _ => return Ok(Self::default()),
        };
        if !vin.is_ascii() {
            return Err(CoreError::VinNotAscii(vin.to_string()));
        }
        let vin = vin.as_bytes();

        if vin.len() < MIN_VIN_LEN {
            return Err(CoreError::VinTooShort {
                expected: MIN_VIN_LEN,
                actual: vin.len(),
            });
        }

        let car_type = CarType::from_code(vin[MODEL_POS]).unwrap_or_default();
        let awd = AWD_CODES.contains(&vin[DRIVETRAIN_POS]);
        let year = YEAR_BASE + (i32::from(vin[YEAR_POS]) - i32::from(b'A'));

        Ok(Self {
            car_type,
            awd,
            year,
        })
    }

    /// Decode the `vin` field of a vehicle JSON object
    pub fn from_vehicle(vehicle: &serde_json::Value) -> CoreResult<Self> {
        Self::decode(get_vin(vehicle))
    }
}

/// Read the `vin` field of a vehicle JSON object
pub fn get_vin(vehicle: &serde_json::Value) -> Option<&str> {
    vehicle.get("vin").and_then(|v| v.as_str())
}

/// Last six characters of a VIN (the production serial number)
pub fn short_vin(vin: &str) -> Option<&str> {
    let start = vin.len().checked_sub(6)?;
    vin.get(start..)
}

/// Short VIN of a vehicle JSON object
pub fn get_short_vin(vehicle: &serde_json::Value) -> Option<&str> {
    get_vin(vehicle).and_then(short_vin)
}

/// Model name of a vehicle JSON object
pub fn get_model(vehicle: &serde_json::Value) -> CoreResult<CarType> {
    VehicleModelInfo::from_vehicle(vehicle).map(|info| info.car_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("5YJS", CarType::ModelS)]
    #[case("5YJ3", CarType::Model3)]
    #[case("5YJX", CarType::ModelX)]
    #[case("5YJY", CarType::ModelY)]
    #[case("5YJR", CarType::ModelS)]
    #[case("5YJz", CarType::ModelS)]
    fn test_model_family(#[case] prefix: &str, #[case] expected: CarType) {
        let vin = format!("{}E1EA1LF000001", prefix);
        let info = VehicleModelInfo::decode(Some(&vin)).unwrap();
        assert_eq!(info.car_type, expected);
    }

    #[rstest]
    #[case('2', true)]
    #[case('4', true)]
    #[case('B', true)]
    #[case('1', false)]
    #[case('A', false)]
    #[case('E', false)]
    fn test_awd_flag(#[case] code: char, #[case] awd: bool) {
        let vin = format!("5YJ3E1E{}1LF000001", code);
        let info = VehicleModelInfo::decode(Some(&vin)).unwrap();
        assert_eq!(info.awd, awd);
    }

    #[rstest]
    #[case('A', 2010)]
    #[case('C', 2012)]
    #[case('L', 2021)]
    #[case('P', 2025)]
    fn test_model_year(#[case] code: char, #[case] year: i32) {
        let vin = format!("5YJ3E1EA1{}F000001", code);
        let info = VehicleModelInfo::decode(Some(&vin)).unwrap();
        assert_eq!(info.year, year);
    }

    #[test]
    fn test_year_not_bounds_checked() {
        // '0' sorts before 'A'
        let info = VehicleModelInfo::decode(Some("5YJSA1E210F000001")).unwrap();
        assert_eq!(info.year, 2010 + (b'0' as i32 - b'A' as i32));
    }

    #[test]
    fn test_absent_identifier_defaults() {
        let expected = VehicleModelInfo {
            car_type: CarType::ModelS,
            awd: false,
            year: 2012,
        };
        assert_eq!(VehicleModelInfo::decode(None).unwrap(), expected);
        assert_eq!(VehicleModelInfo::decode(Some("")).unwrap(), expected);
        assert_eq!(
            VehicleModelInfo::from_vehicle(&json!({"id": 1})).unwrap(),
            expected
        );
    }

    #[test]
    fn test_short_vin_rejected() {
        let err = VehicleModelInfo::decode(Some("5YJ3E1")).unwrap_err();
        assert_eq!(
            err,
            CoreError::VinTooShort {
                expected: MIN_VIN_LEN,
                actual: 6
            }
        );
    }

    #[test]
    fn test_non_ascii_vin_rejected() {
        let err = VehicleModelInfo::decode(Some("5YJ3éE7B2LF123456")).unwrap_err();
        assert_eq!(err, CoreError::VinNotAscii("5YJ3éE7B2LF123456".to_string()));
    }

    #[test]
    fn test_full_decode_from_vehicle() {
        let vehicle = json!({"vin": "5YJ3E7EB2LF123456", "id_s": "1"});
        let info = VehicleModelInfo::from_vehicle(&vehicle).unwrap();
        assert_eq!(info.car_type, CarType::Model3);
        assert!(info.awd);
        assert_eq!(info.year, 2021);
        assert_eq!(get_model(&vehicle).unwrap().to_string(), "Model 3");
    }

    #[test]
    fn test_short_vin() {
        assert_eq!(short_vin("5YJ3E7EB2LF123456"), Some("123456"));
        assert_eq!(short_vin("12345"), None);
        assert_eq!(
            get_short_vin(&json!({"vin": "5YJ3E7EB2LF123456"})),
            Some("123456")
        );
        assert_eq!(get_short_vin(&json!({})), None);
    }

    #[test]
    fn test_serialized_shape() {
        let info = VehicleModelInfo::default();
        assert_eq!(
            serde_json::to_value(info).unwrap(),
            json!({"carType": "Model S", "awd": false, "year": 2012})
        );
    }
}
