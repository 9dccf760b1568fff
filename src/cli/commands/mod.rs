//! CLI command implementations

pub mod calc;
pub mod catalog;
pub mod completions;
pub mod init;
pub mod select;
