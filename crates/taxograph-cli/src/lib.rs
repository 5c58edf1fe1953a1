//! Taxograph CLI library
//!
//! This module contains the core CLI logic for the taxonomy diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::path::Path;

use log::info;

use taxograph::{DiagramBuilder, TaxographError};

/// Run the Taxograph CLI application
///
/// This function loads the taxonomy from the input file, renders it, and
/// writes the result to the output file in the format named by its
/// extension.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TaxographError` for:
/// - A missing input file
/// - Configuration loading errors
/// - Parsing errors
/// - Layout errors
/// - Rendering and export errors
pub fn run(args: &Args) -> Result<(), TaxographError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing taxonomy"
    );

    let input = Path::new(&args.input);
    if !input.exists() {
        return Err(TaxographError::InputNotFound(input.to_path_buf()));
    }

    let app_config = config::load_config(args.config.as_ref())?;

    let builder = DiagramBuilder::new(app_config)?;
    builder.render_file(input, Path::new(&args.output))?;

    info!(output_file = args.output; "Diagram exported successfully");
    Ok(())
}
