//! YAML errors rendered as miette diagnostics with the offending span

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error("failed to read {}", path.display())]
    #[diagnostic(code(armsizer::yaml::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(YamlSyntaxError),
}

/// A YAML document that does not parse or does not match the expected shape
#[derive(Debug, Error, Diagnostic)]
#[error("invalid YAML: {message}")]
#[diagnostic(
    code(armsizer::yaml::syntax),
    help("check indentation and that every numeric field holds a number or a quoted string")
)]
pub struct YamlSyntaxError {
    pub message: String,

    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: Option<SourceSpan>,
}

impl YamlSyntaxError {
    pub fn from_serde_error(err: &serde_yml::Error, content: &str, filename: &str) -> Self {
        let span = err.location().map(|loc| {
            let offset = loc.index().min(content.len());
            // Point at one character, or nothing at end of input
            let len = usize::from(offset < content.len());
            SourceSpan::from((offset, len))
        });

        Self {
            message: err.to_string(),
            src: NamedSource::new(filename, content.to_string()),
            span,
        }
    }
}
