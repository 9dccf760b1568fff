//! Output formatting utilities

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat) -> OutputFormat {
    match format {
        OutputFormat::Auto => OutputFormat::Table,
        other => other,
    }
}

/// Print a value as JSON or YAML; other formats are the caller's job
///
/// Returns `false` when the format is not a serialization format.
pub fn print_serialized<T: Serialize>(value: &T, format: OutputFormat) -> Result<bool> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
            Ok(true)
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(value).into_diagnostic()?);
            Ok(true)
        }
        _ => Ok(false),
    }
}
