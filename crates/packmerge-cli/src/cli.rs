//! CLI argument definitions for packmerge.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "packmerge",
    version,
    about = "Deterministic Android packaging with glob-based conflict rules",
    long_about = "packmerge flattens directories and .aar/.jar archives into a single package, \
                  resolving files claimed by several inputs with pick-first and merge rules \
                  declared in Packmerge.toml."
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
    /// Collect inputs, resolve conflicts and write the package
    Package {
        /// Build type (e.g., debug, release)
        #[arg(short, long, default_value = "debug")]
        build_type: String,
        /// Shorthand for --build-type release
        #[arg(long, conflicts_with = "build_type")]
        release: bool,
    },

    /// Validate Packmerge.toml and report packaging conflicts
    Check {
        /// Build type (e.g., debug, release)
        #[arg(short, long, default_value = "debug")]
        build_type: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove written packages
    Clean {
        /// Only remove the package of this build type
        #[arg(short, long)]
        build_type: Option<String>,
    },
}

/// Parse command-line arguments into a [`Cli`] struct.
pub fn parse() -> Cli {
    Cli::parse()
}
