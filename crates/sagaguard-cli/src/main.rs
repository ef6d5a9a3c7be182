//! sagaguard CLI: static validation of saga marker contracts.
//!
//! This binary provides the `sagaguard` command with subcommands for checking
//! a type graph, planning and applying fixes, and browsing the rule registry.
//! See `sagaguard --help` for usage.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stdout; logs stay on stderr.
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();

    let formatter: Box<dyn sagaguard_output::OutputFormatter> = if cli.json {
        Box::new(sagaguard_output::json::JsonFormatter)
    } else {
        Box::new(sagaguard_output::human::HumanFormatter)
    };

    let exit_code = match cli.command {
        Commands::Check {
            graph,
            strict,
            suppress,
            parallel,
        } => commands::check::run(
            &*formatter,
            cli.verbose,
            &cli.config,
            &graph,
            strict,
            suppress,
            parallel,
        ),
        Commands::Fix {
            graph,
            apply,
            output,
        } => commands::fix::run(&*formatter, cli.verbose, &cli.config, &graph, apply, output),
        Commands::Rules => commands::rules::run(&*formatter),
        Commands::Explain { code } => {
            commands::explain::run(&*formatter, cli.verbose, &cli.config, code)
        }
    };

    std::process::exit(exit_code);
}
