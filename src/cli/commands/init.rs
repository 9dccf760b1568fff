//! `armsizer init` command - write a starter design and catalog

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::core::config::DEFAULT_CATALOG;
use crate::templates;

/// File name used when PATH is a directory
const DEFAULT_DESIGN_FILE: &str = "arm.yaml";

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Design file to create, or a directory to create `arm.yaml` in
    #[arg(default_value = DEFAULT_DESIGN_FILE)]
    pub path: PathBuf,

    /// Overwrite files that already exist
    #[arg(long)]
    pub force: bool,

    /// Also write a sample motor catalog next to the design
    #[arg(long)]
    pub with_catalog: bool,
}

fn write_new(path: &Path, content: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(miette::miette!(
            help = "use --force to overwrite",
            "{} already exists",
            path.display()
        ));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    fs::write(path, content).into_diagnostic()
}

/// Run the init command
pub fn run(args: InitArgs, _global: &GlobalOpts) -> Result<()> {
    let design_path = if args.path.is_dir() {
        args.path.join(DEFAULT_DESIGN_FILE)
    } else {
        args.path.clone()
    };
    let catalog_path = design_path
        .parent()
        .map_or_else(|| PathBuf::from(DEFAULT_CATALOG), |dir| dir.join(DEFAULT_CATALOG));

    let design = templates::design().map_err(|e| miette::miette!("{}", e))?;
    let catalog = if args.with_catalog {
        Some(templates::catalog().map_err(|e| miette::miette!("{}", e))?)
    } else {
        None
    };

    // Check both targets before writing either
    if !args.force {
        if let Some(existing) = [Some(&design_path), catalog.as_ref().map(|_| &catalog_path)]
            .into_iter()
            .flatten()
            .find(|p| p.exists())
        {
            return Err(miette::miette!(
                help = "use --force to overwrite",
                "{} already exists",
                existing.display()
            ));
        }
    }

    write_new(&design_path, &design, args.force)?;
    println!(
        "{} Created design {}",
        style("✓").green(),
        style(design_path.display()).cyan()
    );

    if let Some(content) = catalog {
        write_new(&catalog_path, &content, args.force)?;
        println!(
            "{} Created catalog {}",
            style("✓").green(),
            style(catalog_path.display()).cyan()
        );
    }

    println!(
        "   Next: {}",
        style(format!("armsizer calc {}", design_path.display())).dim()
    );
    Ok(())
}
