//! Motor catalog - loading purchasable motors from a CSV sheet
//!
//! The catalog is an external spreadsheet export, so the loader is lenient
//! about everything it reasonably can be: header names are matched after
//! trimming and lowercasing, numeric cells may carry unit suffixes, and a cell
//! that still fails to parse becomes 0.0 instead of rejecting the row.
//!
//! Only structural problems (unreadable file, missing required columns) are
//! errors. Callers on the calculation path use [`MotorCatalog::load_or_unavailable`],
//! which turns those into an empty catalog that selects nothing.

use miette::Diagnostic;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::units::{parse_with_unit, suffix};
use crate::entities::motor::MotorRecord;

/// Errors raised while reading a catalog file
#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("motor catalog not found: {}", path.display())]
    #[diagnostic(
        code(armsizer::catalog::not_found),
        help("pass --catalog <FILE>, set ARMSIZER_CATALOG, or add `catalog:` to .armsizer.yaml")
    )]
    NotFound { path: PathBuf },

    #[error("failed to read motor catalog {origin}")]
    #[diagnostic(code(armsizer::catalog::io))]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed motor catalog {origin}")]
    #[diagnostic(code(armsizer::catalog::csv))]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("motor catalog {origin} is missing columns: {}", missing.join(", "))]
    #[diagnostic(
        code(armsizer::catalog::missing_columns),
        help("header names are matched ignoring case and surrounding spaces")
    )]
    MissingColumns { origin: String, missing: Vec<String> },
}

/// Header names of the catalog sheet, in normalized form
mod column {
    pub const POWER: &str = "power rating (watts)";
    pub const WEIGHT: &str = "weight (kg)";
    pub const RATED_RPM: &str = "rated rpm";
    pub const RATED_TORQUE: &str = "rated torque";
    pub const INPUT_VOLTAGE: &str = "input voltage";
    pub const VOLTAGE_TYPE: &str = "voltage type";
    pub const MODEL: &str = "model";
    pub const FLANGE: &str = "flange size";
    pub const COMPANY: &str = "company name";
    pub const LINK: &str = "link";
    pub const PRICE: &str = "prices";

    pub const REQUIRED: &[&str] = &[
        POWER,
        WEIGHT,
        RATED_RPM,
        RATED_TORQUE,
        INPUT_VOLTAGE,
        VOLTAGE_TYPE,
        MODEL,
        FLANGE,
        COMPANY,
        LINK,
    ];
}

/// Normalize a header cell: strip BOM and whitespace, lowercase
fn normalize_column_name(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Positions of the catalog columns within a record
struct ColumnMap {
    power: usize,
    weight: usize,
    rated_rpm: usize,
    rated_torque: usize,
    input_voltage: usize,
    voltage_type: usize,
    model: usize,
    flange: usize,
    company: usize,
    link: usize,
    price: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord, origin: &str) -> Result<Self, CatalogError> {
        let names: Vec<String> = headers.iter().map(normalize_column_name).collect();
        let find = |wanted: &str| names.iter().position(|n| n == wanted);

        let missing: Vec<String> = column::REQUIRED
            .iter()
            .filter(|c| find(**c).is_none())
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(CatalogError::MissingColumns {
                origin: origin.to_string(),
                missing,
            });
        }

        // Every required column was found above
        let idx = |wanted: &str| find(wanted).unwrap_or_default();
        Ok(Self {
            power: idx(column::POWER),
            weight: idx(column::WEIGHT),
            rated_rpm: idx(column::RATED_RPM),
            rated_torque: idx(column::RATED_TORQUE),
            input_voltage: idx(column::INPUT_VOLTAGE),
            voltage_type: idx(column::VOLTAGE_TYPE),
            model: idx(column::MODEL),
            flange: idx(column::FLANGE),
            company: idx(column::COMPANY),
            link: idx(column::LINK),
            price: find(column::PRICE),
        })
    }

    fn parse_row(&self, row: &csv::StringRecord) -> MotorRecord {
        let cell = |i: usize| row.get(i).unwrap_or("");
        let text = |i: usize| cell(i).trim().to_string();

        MotorRecord {
            power_rating_w: parse_with_unit(cell(self.power), Some(suffix::WATTS)),
            weight_kg: parse_with_unit(cell(self.weight), Some(suffix::KILOGRAMS)),
            rated_rpm: parse_with_unit(cell(self.rated_rpm), None),
            rated_torque_nm: parse_with_unit(cell(self.rated_torque), Some(suffix::NEWTON_METERS)),
            input_voltage: parse_with_unit(cell(self.input_voltage), None),
            voltage_type: text(self.voltage_type),
            model_name: text(self.model),
            flange_size_mm: parse_with_unit(cell(self.flange), Some(suffix::MILLIMETERS)),
            company_name: text(self.company),
            price: self
                .price
                .map(|i| parse_with_unit(cell(i), None))
                .unwrap_or(0.0),
            reference_link: text(self.link),
        }
    }
}

/// An immutable, fully parsed motor catalog
#[derive(Debug, Clone, Default)]
pub struct MotorCatalog {
    records: Vec<MotorRecord>,
    source: Option<PathBuf>,
    unavailable: Option<String>,
}

impl MotorCatalog {
    /// Build a catalog from records already in memory
    pub fn from_records(records: Vec<MotorRecord>) -> Self {
        Self {
            records,
            source: None,
            unavailable: None,
        }
    }

    /// An empty catalog standing in for one that could not be loaded
    ///
    /// Selecting against it always yields the placeholder; `reason` is kept
    /// for diagnostics.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            source: None,
            unavailable: Some(reason.into()),
        }
    }

    /// Parse a catalog from any CSV reader
    pub fn from_reader<R: Read>(reader: R, origin: &str) -> Result<Self, CatalogError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let headers = rdr.headers().map_err(|e| CatalogError::Csv {
            origin: origin.to_string(),
            source: e,
        })?;
        let columns = ColumnMap::from_headers(headers, origin)?;

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row.map_err(|e| CatalogError::Csv {
                origin: origin.to_string(),
                source: e,
            })?;
            // Spreadsheet exports often end with blank lines
            if row.iter().all(|c| c.trim().is_empty()) {
                continue;
            }
            records.push(columns.parse_row(&row));
        }

        tracing::debug!(origin, count = records.len(), "loaded motor catalog");
        Ok(Self::from_records(records))
    }

    /// Load a catalog from a CSV file
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let origin = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|e| CatalogError::Io {
            origin: origin.clone(),
            source: e,
        })?;

        let mut catalog = Self::from_reader(file, &origin)?;
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Load a catalog, degrading to an unavailable catalog on any error
    ///
    /// The failure is logged so a run that selects only placeholders can be
    /// traced back to its cause.
    pub fn load_or_unavailable(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(error = %e, "motor catalog unavailable; all selections will be N/A");
                Self::unavailable(e.to_string())
            }
        }
    }

    /// All records in file order
    pub fn records(&self) -> &[MotorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// File this catalog was read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Why the catalog is unusable, if it is
    pub fn unavailable_reason(&self) -> Option<&str> {
        self.unavailable.as_deref()
    }
}
