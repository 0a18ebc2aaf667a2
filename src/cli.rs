// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
//   site-link-guard [OPTIONS] <baseURL> <contentDir> <publicDir>
//
// The positional arguments are all optional as far as clap is concerned,
// because the rules about HOW MANY were given are ours, not clap's:
//
//   0 arguments   -> print usage, exit 0
//   1 argument    -> error: content dir missing
//   2 arguments   -> error: public dir missing
//   3 arguments   -> run
//   4+ arguments  -> print usage, exit 1
//
// Cli::action() turns the parsed arguments into one of those outcomes.
// =============================================================================

use crate::config::{SiteConfig, DEFAULT_TIMEOUT_SECS};
use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "site-link-guard",
    version,
    about = "Check a static site's markdown links against its built output",
    long_about = "site-link-guard scans every .md file under <contentDir> for [text](target) links \
                  and reports the ones that point at paths missing from <publicDir>.",
    after_help = "Debug:   export _DEBUG=true\nExample: site-link-guard https://example.com/ content public"
)]
pub struct Cli {
    /// Base URL of the published site (e.g. https://example.com/)
    #[arg(value_name = "baseURL")]
    pub base_url: Option<String>,

    /// Markdown source directory (e.g. content)
    #[arg(value_name = "contentDir")]
    pub content_dir: Option<PathBuf>,

    /// Built site directory (e.g. public)
    #[arg(value_name = "publicDir")]
    pub public_dir: Option<PathBuf>,

    // Anything after the third positional; only here so we can count it
    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// Also request external links over HTTP (off by default)
    #[arg(long)]
    pub check_external: bool,

    /// Timeout in seconds for each external request
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Output results in JSON format instead of the text report
    #[arg(long)]
    pub json: bool,
}

// What main() should do with the parsed arguments
#[derive(Debug)]
pub enum Action {
    /// Print usage and exit with this code
    Usage(i32),
    /// Run a scan
    Run { config: SiteConfig, json: bool },
}

impl Cli {
    pub fn action(self) -> Result<Action> {
        let given = [
            self.base_url.is_some(),
            self.content_dir.is_some(),
            self.public_dir.is_some(),
        ]
        .iter()
        .filter(|given| **given)
        .count()
            + self.extra.len();

        match (given, self.base_url, self.content_dir, self.public_dir) {
            (0, ..) => Ok(Action::Usage(0)),
            (n, ..) if n > 3 => Ok(Action::Usage(1)),
            (_, Some(base_url), Some(content_dir), Some(public_dir)) => {
                let config = SiteConfig::new(&base_url, content_dir, public_dir)?
                    .with_external(self.check_external, Duration::from_secs(self.timeout));
                Ok(Action::Run {
                    config,
                    json: self.json,
                })
            }
            (_, _, None, _) => Err(anyhow!("Content dir missing")),
            (_, _, _, None) => Err(anyhow!("Public dir missing")),
            // Positionals fill in order, so a later one without an
            // earlier one cannot happen
            (_, None, ..) => Err(anyhow!("Base URL missing")),
        }
    }
}
