// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Switch on debug logging if _DEBUG=true
// 2. Parse command-line arguments using clap and build the site config
// 3. Scan the content directory (one task per file, one per link)
// 4. Print the report
// 5. Exit with proper code (0 = all good, 1 = broken links, 2 = error)
//
// Rust concepts used:
// - async/await: Because we check many files and links concurrently
// - Arc: Shares the read-only configuration with every task
// - Result<T, E>: For error handling
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - link extraction, resolution and validation
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - the shared site configuration
mod report; // src/report.rs - text and JSON output
mod scan; // src/scan/ - directory walk and per-document workers

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Action, Cli};
use log::debug;
use std::io::{self, Write};
use std::sync::Arc;

// The environment variable that turns on diagnostics
const DEBUG_ENV: &str = "_DEBUG";

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// _DEBUG=true -> debug level, anything else -> warnings only.
// RUST_LOG still wins when it is set.
fn init_logging() {
    let level = if std::env::var(DEBUG_ENV).is_ok_and(|v| v == "true") {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links (or unreadable files) found, or too many arguments
//   Err   = fatal error (bad arguments, unreadable content dir, ...)
async fn run() -> Result<i32> {
    let (config, json) = match Cli::parse().action()? {
        Action::Usage(code) => {
            Cli::command().print_long_help()?;
            return Ok(code);
        }
        Action::Run { config, json } => (config, json),
    };

    debug!("BaseURL.host: {:?}", config.base_url.host_str());
    debug!("BaseURL.path: {}", config.base_url.path());
    debug!("Content: {}", config.content_dir.display());
    debug!("Public: {}", config.public_dir.display());
    debug!("Check external: {}", config.check_external);

    // Fully built before the first task is spawned, read-only afterwards
    let checker = Arc::new(checker::Checker::new(config)?);
    let result = scan::scan_site(checker).await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let totals = if json {
        report::write_json(&mut out, &result.documents, &result.warnings)?
    } else {
        report::write_text(&mut out, &result.documents, &result.warnings)?
    };
    out.flush()?;

    if totals.is_clean() {
        Ok(0)
    } else {
        Ok(1)
    }
}
