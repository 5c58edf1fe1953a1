//! Command-line argument definitions for the Taxograph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the taxonomy diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input taxonomy JSON file
    #[arg(short, long, default_value = "taxonomy.json")]
    pub input: String,

    /// Path to the output image; the format follows the extension
    /// (svg, png, pdf, jpg, dot)
    #[arg(short, long, default_value = "taxonomy.png")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
