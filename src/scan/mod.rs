// src/scan/mod.rs
// =============================================================================
// The site scanner.
//
// 1. Walk the content root once and take a snapshot of the markdown files
// 2. Spawn one task per file (the document worker)
// 3. Wait until EVERY task is done, then hand back all documents
//
// Files that show up after the snapshot are not part of the run.
// =============================================================================

mod document;
mod walk;

pub use document::{Document, Failure};
pub use walk::{discover_markdown, Discovery};

use crate::checker::Checker;
use anyhow::Result;
use futures::future::join_all;
use log::{debug, warn};
use std::sync::Arc;

// The result of one scan
#[derive(Debug)]
pub struct SiteScan {
    /// One entry per discovered markdown file, in discovery order
    pub documents: Vec<Document>,
    /// Non-fatal traversal problems (skipped subtrees)
    pub warnings: Vec<String>,
}

// Scans the content root configured on the checker
pub async fn scan_site(checker: Arc<Checker>) -> Result<SiteScan> {
    let content_dir = checker.config().content_dir.clone();
    let Discovery { files, warnings } = discover_markdown(&content_dir).await?;
    debug!("scan: dispatching {} document worker(s)", files.len());

    let handles: Vec<_> = files
        .iter()
        .map(|path| tokio::spawn(Document::new(path.clone()).process(Arc::clone(&checker))))
        .collect();

    // Barrier: every worker finishes before we look at any result
    let documents = join_all(handles)
        .await
        .into_iter()
        .zip(files)
        .map(|(joined, path)| match joined {
            Ok(document) => document,
            Err(e) => {
                warn!("Worker for {} aborted: {}", path.display(), e);
                let mut document = Document::new(path);
                document.error = Some(format!("Worker aborted: {}", e));
                document
            }
        })
        .collect();

    Ok(SiteScan { documents, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;
    use std::path::Path;

    fn checker(content: &Path, public: &Path) -> Arc<Checker> {
        let config = SiteConfig::new("https://example.com/", content, public).unwrap();
        Arc::new(Checker::new(config).unwrap())
    }

    fn totals(scan: &SiteScan) -> (usize, usize, usize) {
        let links = scan.documents.iter().map(|d| d.links.len()).sum();
        let fails = scan.documents.iter().map(|d| d.failures.len()).sum();
        (scan.documents.len(), links, fails)
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content");
        let public = dir.path().join("public");
        fs::create_dir_all(&content).unwrap();
        fs::create_dir_all(&public).unwrap();
        fs::write(content.join("a.md"), "[x](/b.md)\n[y](//othersite.com/p)\n").unwrap();

        let scan = scan_site(checker(&content, &public)).await.unwrap();

        assert_eq!(totals(&scan), (1, 2, 1));
        let doc = &scan.documents[0];
        assert_eq!(doc.failures[0].link.target, "/b.md");
    }

    #[tokio::test]
    async fn test_rescan_gives_same_totals() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content");
        let public = dir.path().join("public");
        fs::create_dir_all(content.join("posts")).unwrap();
        fs::create_dir_all(public.join("posts/one")).unwrap();
        fs::write(content.join("_index.md"), "[one](/posts/one/) [two](/posts/two/)").unwrap();
        fs::write(content.join("posts/one.md"), "[home](/) [ext](https://rust-lang.org)").unwrap();
        fs::write(content.join("posts/two.md"), "no links").unwrap();

        let checker = checker(&content, &public);
        let first = scan_site(Arc::clone(&checker)).await.unwrap();
        let second = scan_site(checker).await.unwrap();

        assert_eq!(totals(&first), (3, 4, 1));
        assert_eq!(totals(&first), totals(&second));
    }

    #[tokio::test]
    async fn test_failures_are_subsequence_of_links() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content");
        fs::create_dir_all(&content).unwrap();
        fs::write(content.join("a.md"), "[1](/a) [2](/) [3](/c) [4](http://[bad)").unwrap();

        let scan = scan_site(checker(&content, dir.path())).await.unwrap();
        let doc = &scan.documents[0];

        let mut links = doc.links.iter();
        for failure in &doc.failures {
            assert!(links.any(|l| *l == failure.link), "failure out of order: {:?}", failure.link);
        }
        assert_eq!(doc.failures.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_content_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = scan_site(checker(&dir.path().join("nope"), dir.path())).await;
        assert!(result.is_err());
    }
}
