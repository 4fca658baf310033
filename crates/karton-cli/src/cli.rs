//! CLI argument definitions for Karton.
//!
//! Uses `clap` derive macros to define the full command surface. Each
//! command corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "karton",
    version,
    about = "A packaging tool for payment-enabled application modules",
    long_about = "Karton merges dependency archives into a single application bundle, \
                  resolving duplicate-resource conflicts with a declarative exclude policy."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Karton project
    New {
        /// Project name
        name: String,
    },

    /// Initialize Karton in an existing directory
    Init,

    /// Merge dependency archives and emit the application bundle
    Bundle {
        /// Build type (e.g. debug, release)
        #[arg(short, long)]
        build_type: Option<String>,
        /// Output bundle path (defaults to build/bundles/)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Suppress non-error output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Report unresolved resource conflicts without writing a bundle
    Check,

    /// List the resolved dependency archive set
    Archives,

    /// Manage packaging exclude patterns
    Exclude {
        #[command(subcommand)]
        action: ExcludeAction,
    },

    /// Remove build artifacts
    Clean,
}

#[derive(Subcommand, Debug)]
pub enum ExcludeAction {
    /// Add an exclude pattern
    Add { pattern: String },
    /// Remove an exclude pattern
    Remove { pattern: String },
    /// List configured exclude patterns
    List,
}

pub fn parse() -> Cli {
    Cli::parse()
}
