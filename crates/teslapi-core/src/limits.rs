//! Numeric limits applied to command arguments

/// Charge limit for long-term storage (percent)
pub const CHARGE_STORAGE: i64 = 50;
/// Daily charge limit (percent)
pub const CHARGE_DAILY: i64 = 70;
/// Standard charge limit (percent)
pub const CHARGE_STANDARD: i64 = 90;
/// Maximum range charge limit (percent)
pub const CHARGE_RANGE: i64 = 100;

/// Lowest settable cabin temperature (°C)
pub const TEMP_LO: f64 = 15.0;
/// Highest settable cabin temperature (°C)
pub const TEMP_HI: f64 = 28.0;

/// Two-sided clamp into `[lo, hi]`
pub fn clamp<T: PartialOrd>(value: T, lo: T, hi: T) -> T {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Clamp a charge limit into `[CHARGE_STORAGE, CHARGE_RANGE]`
pub fn clamp_charge_limit(percent: i64) -> i64 {
    clamp(percent, CHARGE_STORAGE, CHARGE_RANGE)
}

/// Clamp a temperature into `[TEMP_LO, TEMP_HI]`
pub fn clamp_temperature(celsius: f64) -> f64 {
    clamp(celsius, TEMP_LO, TEMP_HI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(30, 50, 100), 50);
        assert_eq!(clamp(150, 50, 100), 100);
        assert_eq!(clamp(75, 50, 100), 75);
        assert_eq!(clamp(50, 50, 100), 50);
        assert_eq!(clamp(100, 50, 100), 100);
    }

    #[test]
    fn test_charge_limit() {
        assert_eq!(clamp_charge_limit(30), CHARGE_STORAGE);
        assert_eq!(clamp_charge_limit(CHARGE_DAILY), 70);
        assert_eq!(clamp_charge_limit(101), CHARGE_RANGE);
    }

    #[test]
    fn test_temperature() {
        assert_eq!(clamp_temperature(10.0), 15.0);
        assert_eq!(clamp_temperature(30.0), 28.0);
        assert_eq!(clamp_temperature(21.5), 21.5);
        assert_eq!(clamp_temperature(15.0), 15.0);
        assert_eq!(clamp_temperature(28.0), 28.0);
    }
}
