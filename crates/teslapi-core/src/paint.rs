//! Paint colour lookup from option codes

/// Colour used when no known paint code is present
pub const DEFAULT_PAINT: &str = "black";

/// Known paint option codes and their colour names
pub const PAINT_CODES: [(&str, &str); 14] = [
    ("PBCW", "solid white"),
    ("PBSB", "solid black"),
    ("PMAB", "anza brown"),
    ("PMBL", "obsidian black"),
    ("PMMB", "monterey blue"),
    ("PMMR", "multi-coat red"),
    ("PMNG", "steel grey"),
    ("PMSG", "sequoia green"),
    ("PMSS", "san simeon silver"),
    ("PPMR", "multi-coat red"),
    ("PPSB", "deep blue"),
    ("PPSR", "signature red"),
    ("PPSW", "pearl white"),
    ("PPTI", "titanium"),
];

/// Resolve the paint colour from an option-code string.
///
/// The string is scanned left to right and the earliest known code wins,
/// so `"PPSW,PBSB"` is pearl white.
pub fn paint_color(option_codes: &str) -> &'static str {
    PAINT_CODES
        .iter()
        .filter_map(|(code, name)| option_codes.find(code).map(|pos| (pos, *name)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, name)| name)
        .unwrap_or(DEFAULT_PAINT)
}

/// Paint colour of a vehicle JSON object (`option_codes` field)
pub fn get_paint_color(vehicle: &serde_json::Value) -> &'static str {
    vehicle
        .get("option_codes")
        .and_then(|v| v.as_str())
        .map(paint_color)
        .unwrap_or(DEFAULT_PAINT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("PBCW", "solid white")]
    #[case("PBSB", "solid black")]
    #[case("PMAB", "anza brown")]
    #[case("PMBL", "obsidian black")]
    #[case("PMMB", "monterey blue")]
    #[case("PMMR", "multi-coat red")]
    #[case("PMNG", "steel grey")]
    #[case("PMSG", "sequoia green")]
    #[case("PMSS", "san simeon silver")]
    #[case("PPMR", "multi-coat red")]
    #[case("PPSB", "deep blue")]
    #[case("PPSR", "signature red")]
    #[case("PPSW", "pearl white")]
    #[case("PPTI", "titanium")]
    fn test_every_paint_code(#[case] code: &str, #[case] name: &str) {
        assert_eq!(paint_color(&format!("AD15,MDL3,{},W39B", code)), name);
        assert!(PAINT_CODES.contains(&(code, name)));
    }

    #[test]
    fn test_known_code() {
        assert_eq!(paint_color("AD15,MDL3,PPSW,W39B"), "pearl white");
        assert_eq!(paint_color("PMNG"), "steel grey");
    }

    #[test]
    fn test_unknown_codes_default_black() {
        assert_eq!(paint_color("AD15,MDL3,W39B"), "black");
        assert_eq!(paint_color(""), "black");
    }

    #[test]
    fn test_leftmost_code_wins() {
        assert_eq!(paint_color("PBSB,PPSW"), "solid black");
        assert_eq!(paint_color("PPSW,PBSB"), "pearl white");
    }

    #[test]
    fn test_from_vehicle() {
        assert_eq!(
            get_paint_color(&json!({"option_codes": "MS04,PPSR,RENA"})),
            "signature red"
        );
        assert_eq!(get_paint_color(&json!({"vin": "x"})), "black");
    }
}
