//! Binary entry point for moviedb.
//!
//! Starts the interactive movie catalog menu.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use moviedb::cli::{self, StdConsole};
use moviedb::config::{self, MovieDbConfig};
use moviedb::observability;
use moviedb::{CatalogService, JsonFileBackend, OmdbClient, SiteGenerator};
use std::path::PathBuf;
use std::process::ExitCode;

/// Environment variable naming the configuration file.
const CONFIG_PATH_ENV: &str = "MOVIEDB_CONFIG_PATH";

/// moviedb - manage a personal movie catalog from the terminal.
#[derive(Parser)]
#[command(name = "moviedb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Path to the catalog JSON file.
    #[arg(short, long)]
    data_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // .env first so its variables take part in config resolution
    let dotenv_path = config::load_dotenv();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_config(&config.logging, cli.verbose) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    if let Some(path) = dotenv_path {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }
    if config.omdb.api_key.is_none() {
        tracing::warn!(
            "No OMDb API key configured; set {} to add movies",
            config::API_KEY_ENV
        );
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "moviedb failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Resolves configuration: file, then environment, then flags.
fn load_config(cli: &Cli) -> moviedb::Result<MovieDbConfig> {
    let config = match &cli.config {
        Some(path) => MovieDbConfig::load_from_file(path)?,
        None => MovieDbConfig::load_default(),
    };
    let config = config.with_env_overrides();

    Ok(match &cli.data_file {
        Some(path) => config.with_data_file(path),
        None => config,
    })
}

/// Opens the catalog and runs the menu until the user exits.
fn run(config: &MovieDbConfig) -> moviedb::Result<()> {
    let backend = JsonFileBackend::with_create(&config.data_file)?;
    let provider = OmdbClient::new(&config.omdb);
    let service = CatalogService::new(backend, provider)
        .with_duplicate_check(config.features.duplicate_check);
    let generator = SiteGenerator::from_config(&config.site);

    tracing::info!(
        data_file = %config.data_file.display(),
        duplicate_check = config.features.duplicate_check.as_str(),
        "Starting movie catalog"
    );

    let mut console = StdConsole::new();
    cli::run_menu(&mut console, &service, &generator)
}
