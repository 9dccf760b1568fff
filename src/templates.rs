//! Embedded starter files written by `armsizer init`

use rust_embed::Embed;
use thiserror::Error;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Stock arm design
pub const DESIGN_TEMPLATE: &str = "design.yaml";

/// Sample motor catalog
pub const CATALOG_TEMPLATE: &str = "motors.csv";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template not found: {0}")]
    NotFound(String),

    #[error("template {0} is not valid UTF-8")]
    Encoding(String),
}

/// Contents of an embedded template
pub fn get(name: &str) -> Result<String, TemplateError> {
    let file = EmbeddedTemplates::get(name).ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
    std::str::from_utf8(&file.data)
        .map(str::to_string)
        .map_err(|_| TemplateError::Encoding(name.to_string()))
}

pub fn design() -> Result<String, TemplateError> {
    get(DESIGN_TEMPLATE)
}

pub fn catalog() -> Result<String, TemplateError> {
    get(CATALOG_TEMPLATE)
}
