//! Command-line argument definitions for the fsmaid CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input source, where charts are
//! written, the configuration file, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the fsmaid chart tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the C source file; the input extension may be left off
    #[arg(help = "Path to the input file, with or without its extension")]
    pub input: String,

    /// Directory receiving one chart per state machine
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
