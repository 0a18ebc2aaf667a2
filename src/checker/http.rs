// src/checker/http.rs
// =============================================================================
// This module checks if external URLs are alive by making HTTP requests.
//
// Only used with --check-external. By default external links are skipped.
//
// Key functionality:
// - One plain GET per URL, client default redirect handling, no retries
// - Status >= 400 or a failed request means the link is broken
// - A per-request timeout so one slow host cannot stall the whole run
//
// Rust concepts:
// - async/await: For concurrent network I/O
// - Result<T, E>: For error handling
// =============================================================================

use super::Verdict;
use anyhow::Result;
use reqwest::Client;
use std::time::Duration;
use url::Url;

// Creates the HTTP client shared by every link task
//
// Client is cheap to clone (it's a reference counter internally) and
// reusing it gives us connection pooling across all links
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("site-link-guard/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

// Checks a single external URL
//
// Parameters:
//   client: reqwest HTTP client
//   url: the absolute URL to request
//
// Returns: ExternalValid or ExternalInvalid
pub async fn check_external(client: &Client, url: &Url) -> Verdict {
    match client.get(url.clone()).send().await {
        // We only need the status line, the body is dropped unread
        Ok(response) => analyze_status(response.status().as_u16()),
        Err(e) => Verdict::ExternalInvalid {
            reason: categorize_error(&e),
        },
    }
}

// HTTP status codes:
// - 100-399: reachable (redirects are already followed by the client)
// - 400-499: Client error (404 not found, etc.)
// - 500-599: Server error
fn analyze_status(status: u16) -> Verdict {
    if status >= 400 {
        Verdict::ExternalInvalid {
            reason: format!("HTTP {}", status),
        }
    } else {
        Verdict::ExternalValid { status }
    }
}

// Turns a reqwest error into a short message for the report
fn categorize_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_connect() {
        "Connection failed".to_string()
    } else {
        error.to_string()
    }
}
