//! Shared helper functions for CLI commands

/// Format a float with a fixed number of decimal places
///
/// Negative zero prints as zero.
pub fn format_float(value: f64, precision: usize) -> String {
    let s = format!("{:.*}", precision, value);
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
