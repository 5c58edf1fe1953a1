//! Taxograph CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, info};

use taxograph_cli::{Args, error_adapter::to_reportables};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Taxograph");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = taxograph_cli::run(&args) {
        let reporter = miette::GraphicalReportHandler::new();

        // Render each diagnostic independently
        for reportable in to_reportables(&err) {
            let mut writer = String::new();
            match reporter.render_report(&mut writer, &reportable) {
                Ok(()) => eprint!("{writer}"),
                Err(_) => eprintln!("Error: {reportable}"),
            }
        }

        process::exit(1);
    }

    println!("Taxonomy graph saved to {}", args.output);
    info!("Completed successfully");
}
