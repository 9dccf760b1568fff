//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod export;
pub mod helpers;
pub mod output;
pub mod report;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat};
