// src/config.rs
// =============================================================================
// The site configuration shared by every worker.
//
// Built once in main() before anything is spawned, then wrapped in an Arc
// and only ever read. No locks needed: nobody writes to it after startup.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

// Default per-request timeout for --check-external
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Root URL of the published site (scheme + host + path prefix)
    pub base_url: Url,
    /// Markdown source tree, e.g. `content/`
    pub content_dir: PathBuf,
    /// Built site tree, e.g. `public/`
    pub public_dir: PathBuf,
    /// Request external links over HTTP instead of skipping them
    pub check_external: bool,
    /// Per-request timeout for external checks
    pub timeout: Duration,
}

impl SiteConfig {
    /// Builds the configuration, parsing and validating the base URL
    pub fn new(base_url: &str, content_dir: impl Into<PathBuf>, public_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            content_dir: content_dir.into(),
            public_dir: public_dir.into(),
            check_external: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_external(mut self, check_external: bool, timeout: Duration) -> Self {
        self.check_external = check_external;
        self.timeout = timeout;
        self
    }
}

// The base URL must be absolute and carry a host, otherwise we cannot tell
// same-site links from external ones
fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Invalid base URL '{}'", raw))?;
    if url.host_str().is_none() {
        return Err(anyhow!("Base URL has no host: {}", raw));
    }
    Ok(url)
}
