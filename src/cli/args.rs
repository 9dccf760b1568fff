//! Command-line arguments

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::calc::CalcArgs;
use crate::cli::commands::catalog::CatalogArgs;
use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::init::InitArgs;
use crate::cli::commands::select::SelectArgs;
use crate::core::Config;

#[derive(Parser, Debug)]
#[command(name = "armsizer")]
#[command(author, version, about = "Static torque, power and motor sizing for 6-DOF arms")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter arm design (and optionally a sample catalog)
    Init(InitArgs),

    /// Compute joint loads and select motors for a design
    Calc(CalcArgs),

    /// Select one motor for a given torque and power
    Select(SelectArgs),

    /// List the motors in the catalog
    Catalog(CatalogArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Motor catalog CSV (overrides config files)
    #[arg(long, global = true, env = "ARMSIZER_CATALOG", value_name = "CSV")]
    pub catalog: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output: OutputFormat,

    /// Decimal places in tables and CSV output
    #[arg(long, global = true, value_name = "N")]
    pub precision: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalOpts {
    /// Config files overlaid with the flags given on this invocation
    pub fn config(&self) -> Config {
        Config::load()
            .with_catalog(self.catalog.clone())
            .with_precision(self.precision)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tables on a terminal
    #[default]
    Auto,
    Table,
    Json,
    Yaml,
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Auto => write!(f, "auto"),
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "armsizer", "calc", "arm.yaml", "--catalog", "m.csv", "-o", "json", "--precision", "2", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.global.catalog, Some(PathBuf::from("m.csv")));
        assert_eq!(cli.global.output, OutputFormat::Json);
        assert_eq!(cli.global.precision, Some(2));
        assert_eq!(cli.global.verbose, 2);
        assert!(matches!(cli.command, Commands::Calc(_)));
    }
}
