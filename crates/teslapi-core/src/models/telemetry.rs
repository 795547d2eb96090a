//! Telemetry streaming columns

/// Columns requested when the caller does not choose any
pub const DEFAULT_COLUMNS: [&str; 12] = [
    "speed",
    "odometer",
    "soc",
    "elevation",
    "est_heading",
    "est_lat",
    "est_lng",
    "power",
    "shift_state",
    "range",
    "est_range",
    "heading",
];

/// Comma-joined column list for the `values` query parameter
pub fn columns_query<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}
