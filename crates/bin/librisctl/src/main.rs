//! # librisctl — library administration from the command line
//!
//! Composition root that wires the REST adapter to the application services.
//!
//! ## Responsibilities
//! - Parse command-line arguments
//! - Load configuration (config file, env vars)
//! - Initialise tracing
//! - Construct the HTTP client (adapter) and hand it to the use-cases
//! - Print the result as JSON
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod cli;
mod commands;
mod config;

use std::process::ExitCode;

use clap::Parser;
use libris_app::ports::Route;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::commands::{ConsoleNavigator, Outcome};
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let client = config.api.build()?;
    tracing::debug!(base_url = %client.base_url(), entity = ?cli.entity, "dispatching");

    let outcome = match commands::dispatch(client, ConsoleNavigator, cli.entity, cli.action).await {
        Ok(outcome) => outcome,
        Err(err) => {
            report(&err);
            return Ok(ExitCode::FAILURE);
        }
    };

    match outcome {
        Outcome::Output(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Deleted => Ok(ExitCode::SUCCESS),
        Outcome::Navigated(Route::NotFound) => {
            eprintln!("error: not found");
            Ok(ExitCode::FAILURE)
        }
        Outcome::Navigated(Route::Back) => Ok(ExitCode::SUCCESS),
    }
}

/// Print an error with its chain of causes.
fn report(err: &dyn std::error::Error) {
    eprintln!("error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
