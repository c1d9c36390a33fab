//! # openhub-scrape
//!
//! Reads a list of OpenHub project identifiers and prints one CSV row of
//! metadata per project whose tags match the requested pattern.
//!
//! The CSV document goes to stdout; progress and errors are logged to stderr,
//! so the output can be redirected to a file as is.
//!
//! ## Usage
//!
//! ```bash
//! # Every project listed in ./input/foss-projects.txt
//! openhub-scrape > projects.csv
//!
//! # Only projects tagged with something containing "java"
//! openhub-scrape -i my-projects.txt -t java > java.csv
//!
//! # Only the twelve core columns
//! openhub-scrape --schema basic > basic.csv
//! ```

use std::io;
use std::process::exit;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use openhub_scrape::{
    builder::RowBuilder,
    cli::Cli,
    client::HttpClient,
    config::{FileConfig, read_api_key},
    driver::{read_project_ids, run_batch},
    source::OpenHub,
};
use tracing::{Level, info};

/// Entry point for the openhub-scrape application.
///
/// Runs [`inner_main`] and, on failure, prints the error to stderr and exits
/// with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// 1. Parses command-line arguments
/// 2. Loads the persistent configuration file (if present)
/// 3. Reads the API key and the project list
/// 4. Processes every project and streams the CSV to stdout
///
/// # Errors
///
/// Fatal errors only: an unreadable project list, an invalid tag pattern or a
/// failure to write to stdout. A missing key file is logged and ends the run
/// before any request, with a success status. Per-project failures are logged
/// and summarised instead.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose() {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(io::stderr)
        .init();

    let file_config = match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            FileConfig::default()
        }
    };

    let Some(api_key) = read_api_key(&args.key_file(&file_config)) else {
        return Ok(());
    };
    let config = args.run_config(&file_config, api_key)?;
    let projects = read_project_ids(&args.input(&file_config))?;

    info!(
        projects = projects.len(),
        tag = config.tag_filter.as_str(),
        "starting batch"
    );

    let client = HttpClient::new(&args.user_agent(&file_config))
        .context("Failed to build the HTTP client")?;
    let builder = RowBuilder::new(OpenHub::new(client, &config), &config);

    let summary = run_batch(&builder, &projects, io::stdout().lock())?;

    eprintln!(
        "{} {} written, {} skipped, {} failed",
        "Done:".green().bold(),
        summary.written,
        summary.skipped,
        summary.failed()
    );

    if summary.failed() > 0 {
        eprintln!("{}", "Failed projects:".red());
        for failure in &summary.failures {
            eprintln!("  {} {}", failure.project.bright_white(), failure.message);
        }
    }

    Ok(())
}
