//! Physical constants and tolerant numeric parsing
//!
//! Every value that enters the engine passes through one of the parsers
//! here first. They never fail: anything unparsable, non-finite or negative
//! collapses to a caller-supplied default so the engine only ever sees
//! finite, non-negative numbers.

/// Standard gravitational acceleration (m/s²)
pub const GRAVITY: f64 = 9.80665;

/// Conversion constant relating N·m × RPM to kW (P[kW] = T × n / 9550)
pub const POWER_CONSTANT: f64 = 9550.0;

/// Watts per kilowatt, applied after [`POWER_CONSTANT`]
pub const WATTS_PER_KW: f64 = 1000.0;

/// Unit suffixes used by the motor catalog columns
pub mod suffix {
    pub const WATTS: &str = "W";
    pub const KILOGRAMS: &str = "Kg";
    pub const NEWTON_METERS: &str = "Nm";
    pub const MILLIMETERS: &str = "mm";
}

/// Parse text as a non-negative finite float, falling back to `default`
///
/// Leading and trailing whitespace is ignored.
pub fn parse_nonnegative_float(text: &str, default: f64) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => default,
    }
}

/// Parse text as a non-negative integer, falling back to `default`
///
/// Fractional text such as `"50.5"` is rejected; `"50.0"` is accepted since
/// YAML round-trips integral floats that way.
pub fn parse_nonnegative_int(text: &str, default: u32) -> u32 {
    let trimmed = text.trim();
    if let Ok(v) = trimmed.parse::<u32>() {
        return v;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => {
            v as u32
        }
        _ => default,
    }
}

/// Normalize an already-numeric value the same way the text parsers do
pub fn nonnegative_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        default
    }
}

/// Parse a catalog cell that may carry a unit suffix (e.g. `"500W"`, `"2.5Kg"`)
///
/// The unit is removed wherever it appears, ignoring case, before parsing.
/// Empty or unparsable cells yield 0.0. Negative values are kept as-is: the
/// catalog is trusted data, unlike user input.
pub fn parse_with_unit(value: &str, unit: Option<&str>) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let cleaned = match unit {
        Some(unit) if !unit.is_empty() => remove_ignore_case(trimmed, unit),
        _ => trimmed.to_string(),
    };

    match cleaned.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

fn remove_ignore_case(haystack: &str, needle: &str) -> String {
    let lower_hay = haystack.to_ascii_lowercase();
    let lower_needle = needle.to_ascii_lowercase();

    let mut out = String::with_capacity(haystack.len());
    let mut cursor = 0;
    while let Some(pos) = lower_hay[cursor..].find(&lower_needle) {
        out.push_str(&haystack[cursor..cursor + pos]);
        cursor += pos + lower_needle.len();
    }
    out.push_str(&haystack[cursor..]);
    out
}

/// Weight (N) of a solid cylinder of the given density, radius and length
pub fn cylinder_weight(density: f64, radius: f64, length: f64) -> f64 {
    GRAVITY * density * std::f64::consts::PI * radius.powi(2) * length
}

/// Shaft power (W) for a torque at the motor shaft and a motor speed
pub fn shaft_power(torque_nm: f64, rpm: u32) -> f64 {
    if rpm == 0 {
        return 0.0;
    }
    torque_nm * rpm as f64 * WATTS_PER_KW / POWER_CONSTANT
}
