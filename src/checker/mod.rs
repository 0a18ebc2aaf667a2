// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - extract: Finds [text](target) links in markdown source
// - resolve: Decides local vs external and maps local targets to paths
// - validate: Stat-style existence check for local paths
// - http: Optional HTTP check for external targets
// - verdict: The outcome of checking one link
//
// The Checker below glues resolve + validate + http together. One Checker
// is built at startup and shared (read-only, through an Arc) by every
// document and link task.
// =============================================================================

mod extract;
mod http;
mod resolve;
mod validate;
mod verdict;

pub use extract::{extract_links, Link};
pub use resolve::{resolve_target, Target};
pub use validate::path_exists;
pub use verdict::Verdict;

use crate::config::SiteConfig;
use anyhow::Result;
use log::debug;
use reqwest::Client;

pub struct Checker {
    config: SiteConfig,
    // Only built when external checking is on
    client: Option<Client>,
}

impl Checker {
    pub fn new(config: SiteConfig) -> Result<Self> {
        let client = if config.check_external {
            Some(http::build_client(config.timeout)?)
        } else {
            None
        };
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    // Checks one link target and returns its verdict
    //
    // Never fails: a malformed target, a failed stat or a dead host all
    // come back as failing verdicts so sibling links carry on
    pub async fn check_link(&self, raw: &str) -> Verdict {
        let target = match resolve_target(raw, &self.config.base_url, &self.config.public_dir) {
            Ok(target) => target,
            Err(e) => {
                debug!("check_link: {:?} unresolvable: {}", raw, e);
                return Verdict::Unresolvable {
                    reason: format!("Invalid URL: {}", e),
                };
            }
        };

        match target {
            Target::Local(path) => {
                let verdict = match path_exists(&path).await {
                    Ok(true) => Verdict::LocalValid,
                    Ok(false) => Verdict::LocalInvalid {
                        reason: "Not found".to_string(),
                        path,
                    },
                    Err(e) => Verdict::LocalInvalid {
                        reason: format!("Cannot check path: {}", e),
                        path,
                    },
                };
                debug!("check_link: {:?} (local) -> {:?}", raw, verdict);
                verdict
            }
            Target::External(url) => match &self.client {
                Some(client) => {
                    let verdict = http::check_external(client, &url).await;
                    debug!("check_link: {:?} (external) -> {:?}", raw, verdict);
                    verdict
                }
                None => {
                    debug!("check_link: {:?} (external, skipped)", raw);
                    Verdict::ExternalSkipped
                }
            },
        }
    }
}
