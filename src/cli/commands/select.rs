//! `armsizer select` command - one motor for a given requirement

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::format_float;
use crate::cli::output::{effective_format, print_serialized};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::catalog::MotorCatalog;
use crate::core::selector::MotorSelector;
use crate::entities::arm::JOINT_COUNT;
use crate::entities::motor::MotorSelection;

#[derive(clap::Args, Debug)]
pub struct SelectArgs {
    /// Required torque at the motor (N·m)
    #[arg(long)]
    pub torque: f64,

    /// Required shaft power (W)
    #[arg(long)]
    pub power: f64,

    /// Joint number, used for the motor label
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=JOINT_COUNT as i64))]
    pub joint: u8,
}

/// Run the select command
pub fn run(args: SelectArgs, global: &GlobalOpts) -> Result<()> {
    let config = global.config();
    let precision = config.precision();
    let catalog = MotorCatalog::from_path(&config.catalog())?;

    let selection = catalog.select(args.joint as usize, args.torque, args.power);

    let format = effective_format(global.output);
    if print_serialized(&selection, format)? {
        return Ok(());
    }
    if format == OutputFormat::Csv {
        let mut wtr = csv::Writer::from_writer(std::io::stdout().lock());
        wtr.serialize(&selection).into_diagnostic()?;
        wtr.flush().into_diagnostic()?;
        return Ok(());
    }

    print_selection(&selection, args.torque, args.power, precision);
    Ok(())
}

fn print_selection(sel: &MotorSelection, torque: f64, power: f64, precision: usize) {
    let f = |v: f64| format_float(v, precision);
    if sel.is_placeholder() {
        println!(
            "{} No motor found for {} with torque {} N·m and power {} W",
            style("!").yellow(),
            sel.motor_label,
            f(torque),
            f(power)
        );
        return;
    }

    println!(
        "{} {}: {} ({})",
        style("✓").green(),
        sel.motor_label,
        style(&sel.model_name).cyan(),
        sel.company_name
    );
    println!("   Power rating:  {} W", f(sel.power_rating));
    println!("   Rated torque:  {} N·m", f(sel.rated_torque));
    println!("   Rated speed:   {} rpm", f(sel.rated_rpm));
    println!("   Weight:        {} kg", f(sel.motor_weight));
    println!("   Flange:        {} mm", f(sel.flange_size));
    println!("   Supply:        {} V {}", f(sel.input_voltage), sel.voltage_type);
    println!("   Price:         ${}", format_float(sel.price, 2));
    if !sel.reference_link.is_empty() {
        println!("   {}", style(&sel.reference_link).dim());
    }
}
