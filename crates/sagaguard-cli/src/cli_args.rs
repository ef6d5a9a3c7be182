use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sagaguard_core::config::DEFAULT_CONFIG_DIR;

#[derive(Parser, Debug)]
#[command(
    name = "sagaguard",
    version,
    about = "Static validation of saga marker contracts"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Directory holding sagaguard.json
    #[arg(
        long,
        global = true,
        env = "SAGAGUARD_CONFIG_DIR",
        default_value = DEFAULT_CONFIG_DIR
    )]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Validate a type graph and report diagnostics
    Check {
        /// Type graph JSON document
        graph: PathBuf,
        /// Exit non-zero on any diagnostic, suppressed ones included
        #[arg(long)]
        strict: bool,
        /// Suppress a rule code (repeatable)
        #[arg(long)]
        suppress: Vec<String>,
        /// Validate types on the rayon pool
        #[arg(long)]
        parallel: bool,
    },

    /// Show fix plans, optionally applying them
    Fix {
        /// Type graph JSON document
        graph: PathBuf,
        /// Write the fixed graph and re-validate
        #[arg(long)]
        apply: bool,
        /// Where to write the fixed graph (default: overwrite GRAPH)
        #[arg(long, requires = "apply")]
        output: Option<PathBuf>,
    },

    /// List every rule
    Rules,

    /// Describe a rule
    Explain {
        /// Rule code (e.g., RULE-SAGA-CLASS)
        code: String,
    },
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
