//! `armsizer catalog` command - list catalog motors

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::helpers::{format_float, truncate_str};
use crate::cli::output::{effective_format, print_serialized};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::catalog::MotorCatalog;
use crate::entities::motor::MotorRecord;

#[derive(clap::Args, Debug)]
pub struct CatalogArgs {
    /// Only motors rated for at least this power (W)
    #[arg(long, value_name = "W")]
    pub min_power: Option<f64>,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

/// Run the catalog command
pub fn run(args: CatalogArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.config();
    let precision = config.precision();
    let path = config.catalog();
    let catalog = MotorCatalog::from_path(&path)?;

    let motors: Vec<&MotorRecord> = catalog
        .records()
        .iter()
        .filter(|m| args.min_power.map_or(true, |min| m.power_rating_w >= min))
        .take(args.limit.unwrap_or(usize::MAX))
        .collect();

    let format = effective_format(global.output);
    if print_serialized(&motors, format)? {
        return Ok(());
    }
    if format == OutputFormat::Csv {
        let mut wtr = csv::Writer::from_writer(std::io::stdout().lock());
        for motor in &motors {
            wtr.serialize(motor).into_diagnostic()?;
        }
        wtr.flush().into_diagnostic()?;
        return Ok(());
    }

    if motors.is_empty() {
        println!("No motors found.");
        return Ok(());
    }

    let f = |v: f64| format_float(v, precision);
    let mut builder = Builder::default();
    builder.push_record([
        "MODEL", "COMPANY", "POWER (W)", "TORQUE (N·m)", "RPM", "WEIGHT (kg)", "FLANGE (mm)", "VOLTAGE", "PRICE",
    ]);
    for m in &motors {
        builder.push_record([
            truncate_str(&m.model_name, 24),
            truncate_str(&m.company_name, 20),
            f(m.power_rating_w),
            f(m.rated_torque_nm),
            format_float(m.rated_rpm, 0),
            f(m.weight_kg),
            format_float(m.flange_size_mm, 0),
            format!("{} {}", format_float(m.input_voltage, 0), m.voltage_type),
            format_float(m.price, 2),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{}", table);

    println!(
        "{} of {} motor(s) from {}",
        style(motors.len()).cyan(),
        catalog.len(),
        style(catalog.source().unwrap_or(&path).display()).dim()
    );
    Ok(())
}
