// src/checker/resolve.rs
// =============================================================================
// This module decides where a link target points.
//
// Every target ends up as one of:
// - Local(path):   same site, so it must exist under the output root
// - External(url): another host, only checked when asked to
//
// The rules, in order:
// 1. "//host/path" (protocol-relative) gets an "https:" prefix
// 2. Parse as an absolute URL. Relative references ("/about/", "post.md",
//    "#top", "") have no scheme and are joined onto the base URL
// 3. No host, or the base URL's host  -> local, anything else -> external
// 4. Local targets: URL path (no query, no fragment), minus the base URL's
//    path prefix, percent-decoded, joined onto the output root
//
// We only test the literal path. A link to "/about/" is valid when
// "public/about/" exists; we do not go looking for "about/index.html".
// =============================================================================

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use url::{ParseError, Url};

// Where a link target resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Same site: the candidate path under the output root
    Local(PathBuf),
    /// Different host: the absolute URL to (maybe) request
    External(Url),
}

// Resolves a raw link target against the site's base URL and output root
//
// Parameters:
//   raw: the target exactly as written in the markdown
//   base_url: the configured base URL of the published site
//   public_dir: the output root (built site)
//
// Returns: Ok(Target) or the URL parse error for a malformed target.
// The caller scopes that error to this one link.
pub fn resolve_target(raw: &str, base_url: &Url, public_dir: &Path) -> Result<Target, ParseError> {
    let url = parse_target(raw, base_url)?;

    let is_local = match url.host_str() {
        None => true,
        Some(host) => Some(host) == base_url.host_str(),
    };

    if is_local {
        Ok(Target::Local(local_path(&url, base_url, public_dir)))
    } else {
        Ok(Target::External(url))
    }
}

// Turns the raw target into an absolute URL
fn parse_target(raw: &str, base_url: &Url) -> Result<Url, ParseError> {
    let prepared = if raw.starts_with("//") {
        format!("https:{}", raw)
    } else {
        raw.to_string()
    };

    match Url::parse(&prepared) {
        Ok(url) => Ok(url),
        // No scheme means a reference relative to the site itself
        Err(ParseError::RelativeUrlWithoutBase) => base_url.join(&prepared),
        Err(e) => Err(e),
    }
}

// Maps a local URL onto the output root
//
// Examples (base "https://example.com/blog/", output root "public"):
//   /blog/post/    -> public/post/
//   /blog/         -> public
//   /images/a.png  -> public/images/a.png  (outside the prefix, kept as-is)
fn local_path(url: &Url, base_url: &Url, public_dir: &Path) -> PathBuf {
    // "mailto:", "tel:", "data:" and friends have no hierarchical path,
    // so they land on the output root itself
    if url.cannot_be_a_base() {
        return public_dir.to_path_buf();
    }

    let path = url.path();
    let relative = strip_base_prefix(path, base_url.path());

    let decoded = percent_decode_str(relative).decode_utf8_lossy();
    let trimmed = decoded.trim_start_matches('/');

    if trimmed.is_empty() {
        public_dir.to_path_buf()
    } else {
        public_dir.join(trimmed)
    }
}

// Removes the base URL's path prefix, but only on a segment boundary:
// under "/blog", "/blog/post/" becomes "/post/" while "/blogroll/" stays
fn strip_base_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    if prefix == "/" {
        return path;
    }
    match path.strip_prefix(prefix) {
        Some(rest) if prefix.ends_with('/') || rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    }
}
