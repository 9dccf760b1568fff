//! Core module - units, catalog, selection and load propagation

pub mod catalog;
pub mod config;
pub mod load;
pub mod selector;
pub mod units;

pub use catalog::{CatalogError, MotorCatalog};
pub use config::{Config, ConfigError};
pub use load::{
    compute_all, ArmReport, JointLoad, JointResult, TorqueBreakdown, Variant, VariantSummary,
};
pub use selector::MotorSelector;
