//! Layered configuration
//!
//! Later layers override earlier ones, key by key:
//!
//! 1. built-in defaults
//! 2. user config (`config.yaml` in the platform config directory)
//! 3. project config (`.armsizer.yaml` in the working directory)
//! 4. environment and command-line flags, applied by the CLI

use directories::ProjectDirs;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the per-project config
pub const PROJECT_CONFIG_FILE: &str = ".armsizer.yaml";

/// Catalog looked up in the working directory when nothing else is configured
pub const DEFAULT_CATALOG: &str = "motors.csv";

/// Decimal places in tables and CSV exports
pub const DEFAULT_PRECISION: usize = 3;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    #[diagnostic(code(armsizer::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}", path.display())]
    #[diagnostic(
        code(armsizer::config::parse),
        help("supported keys are `catalog` (path) and `precision` (integer)")
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },
}

/// User-tunable settings; `None` means "not set at this layer"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<usize>,
}

impl Config {
    /// Load user and project layers from their standard locations
    ///
    /// A broken config file is reported with a warning and skipped, so a
    /// typo in `~/.config` never blocks a calculation.
    pub fn load() -> Self {
        let user = Self::user_config_path();
        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        Self::load_layers(user.as_deref().into_iter().chain([project.as_path()]))
    }

    /// Merge the given files in order, skipping missing or broken ones
    pub fn load_layers<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Self {
        paths
            .into_iter()
            .fold(Self::default(), |config, path| match Self::from_file(path) {
                Ok(Some(layer)) => config.merge(layer),
                Ok(None) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                    config
                }
            })
    }

    /// Read one config file; `Ok(None)` if it does not exist
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Some(Self::default()));
        }
        let config = serde_yml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config layer");
        Ok(Some(config))
    }

    /// Path of the user config file, if the platform has a config directory
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "armsizer").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Overlay `other` on top of `self`
    pub fn merge(self, other: Config) -> Config {
        Config {
            catalog: other.catalog.or(self.catalog),
            precision: other.precision.or(self.precision),
        }
    }

    /// Override the catalog path (env var or `--catalog`)
    pub fn with_catalog(mut self, catalog: Option<PathBuf>) -> Self {
        if catalog.is_some() {
            self.catalog = catalog;
        }
        self
    }

    /// Override the precision (`--precision`)
    pub fn with_precision(mut self, precision: Option<usize>) -> Self {
        if precision.is_some() {
            self.precision = precision;
        }
        self
    }

    /// Effective catalog path
    pub fn catalog(&self) -> PathBuf {
        self.catalog
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG))
    }

    /// Effective number of decimal places
    pub fn precision(&self) -> usize {
        self.precision.unwrap_or(DEFAULT_PRECISION)
    }
}
