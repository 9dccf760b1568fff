//! `armsizer calc` command - joint loads and motor selection for a design

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::export::{export_report_csv, write_report_csv};
use crate::cli::helpers::format_float;
use crate::cli::output::{effective_format, print_serialized};
use crate::cli::report::{breakdown_section, standard_sections};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::catalog::MotorCatalog;
use crate::core::load::{compute_all, ArmReport, Variant};
use crate::entities::arm::{ArmDesign, BaseJointPolicy};
use crate::yaml::parse_yaml_file;

#[derive(clap::Args, Debug)]
pub struct CalcArgs {
    /// Arm design file (YAML)
    pub design: PathBuf,

    /// Also write the results to a CSV file
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Show where each joint's torque comes from
    #[arg(long)]
    pub debug: bool,

    /// Override the design's base joint policy
    #[arg(long, value_enum)]
    pub base_joint: Option<BaseJointArg>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum BaseJointArg {
    FirstPrinciples,
    InheritNext,
}

impl From<BaseJointArg> for BaseJointPolicy {
    fn from(arg: BaseJointArg) -> Self {
        match arg {
            BaseJointArg::FirstPrinciples => BaseJointPolicy::FirstPrinciples,
            BaseJointArg::InheritNext => BaseJointPolicy::InheritNext,
        }
    }
}

/// Run the calc command
pub fn run(args: CalcArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.config();
    let precision = config.precision();

    let design: ArmDesign = parse_yaml_file(&args.design)?;
    let mut spec = design.to_spec()?;
    if let Some(policy) = args.base_joint {
        spec = spec.with_base_joint(policy.into());
    }

    let catalog = MotorCatalog::load_or_unavailable(&config.catalog());
    let report = compute_all(&spec, &catalog);

    if let Some(path) = &args.export {
        export_report_csv(&report, precision, path).into_diagnostic()?;
    }

    let format = effective_format(global.output);
    if print_serialized(&report, format)? {
        return Ok(());
    }
    if format == OutputFormat::Csv {
        write_report_csv(&report, precision, std::io::stdout().lock()).into_diagnostic()?;
        return Ok(());
    }

    print_tables(&report, &catalog, precision, args.debug);
    if let Some(path) = &args.export {
        println!(
            "{} Exported results to {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }
    Ok(())
}

fn print_tables(report: &ArmReport, catalog: &MotorCatalog, precision: usize, debug: bool) {
    if !report.title.is_empty() {
        println!("{}", style(&report.title).bold());
    }
    if let Some(reason) = catalog.unavailable_reason() {
        println!(
            "{} Motor catalog unavailable ({}); selections show N/A",
            style("!").yellow(),
            reason
        );
    }
    println!();

    for section in standard_sections(report, precision) {
        println!("{}", style(&section.title).bold());
        println!("{}", section.render());
        println!();
    }

    if debug {
        for variant in [Variant::Normal, Variant::SafetyFactor] {
            let section = breakdown_section(report, variant, precision);
            println!("{}", style(&section.title).bold());
            println!("{}", section.render());
            println!();
        }
    }

    for variant in [Variant::Normal, Variant::SafetyFactor] {
        let summary = report.summary(variant);
        let label = match variant {
            Variant::Normal => "Motors",
            Variant::SafetyFactor => "Motors with SF",
        };
        println!(
            "{}: {} kg total, ${} total",
            label,
            format_float(summary.motor_mass, precision),
            format_float(summary.price, 2)
        );
        if summary.unresolved > 0 {
            println!(
                "   {} {} joint(s) without a suitable motor",
                style("!").yellow(),
                summary.unresolved
            );
        }
    }
}
