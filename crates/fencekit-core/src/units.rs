//! Length formatting and angle helpers.

/// Formats a length in feet with one decimal, e.g. `"12.5 ft"`.
pub fn format_feet(feet: f64) -> String {
    format!("{:.1} ft", feet)
}

/// Normalizes an angle in degrees into `[0, 360)`.
///
/// Non-finite input maps to `0.0`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let d = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}
