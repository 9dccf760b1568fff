use armsizer::cli::{Cli, Commands};
use clap::Parser;
use miette::Result;
use std::io::IsTerminal;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    setup_tracing(cli.global.verbose);

    match cli.command {
        Commands::Init(args) => armsizer::cli::commands::init::run(args, &cli.global),
        Commands::Calc(args) => armsizer::cli::commands::calc::run(args, &cli.global),
        Commands::Select(args) => armsizer::cli::commands::select::run(args, &cli.global),
        Commands::Catalog(args) => armsizer::cli::commands::catalog::run(args, &cli.global),
        Commands::Completions(args) => armsizer::cli::commands::completions::run(args),
    }
}

/// Log to stderr; a valid `RUST_LOG` replaces the `-v` level
fn setup_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .compact()
        .init();
}
