// src/scan/document.rs
// =============================================================================
// The document worker: everything that happens to one markdown file.
//
// Steps, in order:
// 1. Open the file
// 2. Read the whole content into a buffer
// 3. Close the handle
// 4. Extract links from the buffer
// 5. Drop the buffer (we never hold file contents for the whole run)
// 6. Check every link concurrently, one task per link
// 7. Collect failures in extraction order
//
// If step 1 or 2 fails (e.g. the file was deleted after discovery) the
// document is marked unreadable and the run goes on without it.
//
// Rust concepts:
// - tokio::spawn: Starts a task that runs concurrently with the others
// - JoinHandle: A handle we can await to get the task's result
// - join_all: Waits for ALL handles and returns results in handle order
// =============================================================================

use crate::checker::{extract_links, Checker, Link, Verdict};
use futures::future::join_all;
use log::{debug, warn};
use serde::Serialize;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;

// One link that did not pass, with the reason why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub link: Link,
    pub verdict: Verdict,
}

// One markdown file under test
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub path: PathBuf,
    /// Every extracted link, in source order
    pub links: Vec<Link>,
    /// The failing subset of `links`, same relative order
    pub failures: Vec<Failure>,
    /// Set when the file could not be read; links/failures are then empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            links: Vec::new(),
            failures: Vec::new(),
            error: None,
        }
    }

    // Runs the whole worker pipeline for this document
    pub async fn process(mut self, checker: Arc<Checker>) -> Self {
        debug!("document: {}", self.path.display());

        let content = match read_document(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Cannot read {}: {}", self.path.display(), e);
                self.error = Some(e.to_string());
                return self;
            }
        };

        self.links = extract_links(&content);
        drop(content);
        debug!("document: {} has {} link(s)", self.path.display(), self.links.len());

        let verdicts = check_all(&self.links, |link| {
            let checker = Arc::clone(&checker);
            async move { checker.check_link(&link.target).await }
        })
        .await;

        self.failures = self
            .links
            .iter()
            .zip(verdicts)
            .filter(|(_, verdict)| verdict.is_failure())
            .map(|(link, verdict)| Failure {
                link: link.clone(),
                verdict,
            })
            .collect();

        for failure in &self.failures {
            debug!(
                "document: {} [x] {} ({})",
                self.path.display(),
                failure.link.target,
                failure.verdict.reason()
            );
        }

        self
    }
}

// Open, read, close
//
// Dropping `file` closes the handle. There is no fallible close on a
// tokio File, so nothing can go wrong after the read succeeded.
async fn read_document(path: &Path) -> std::io::Result<String> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf).await?;
    drop(file);

    // Markdown should be UTF-8; a stray invalid byte should not hide the
    // links around it
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

// Spawns one task per link and waits for all of them
//
// Parameters:
//   links: the links to check
//   check: builds the future that checks one link
//
// Returns: one Verdict per link, at the same index as its link.
// join_all keeps handle order, so completion order never leaks into the
// result. A link task that panics turns into a failure for that link only.
pub(crate) async fn check_all<F, Fut>(links: &[Link], check: F) -> Vec<Verdict>
where
    F: Fn(Link) -> Fut,
    Fut: Future<Output = Verdict> + Send + 'static,
{
    let handles: Vec<_> = links
        .iter()
        .map(|link| tokio::spawn(check(link.clone())))
        .collect();

    join_all(handles)
        .await
        .into_iter()
        .map(|joined| match joined {
            Ok(verdict) => verdict,
            Err(e) => Verdict::Unresolvable {
                reason: format!("Link check aborted: {}", e),
            },
        })
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why spawn a task per link instead of a simple loop?
//    - Each check waits on the filesystem (or the network)
//    - Spawned tasks wait in parallel, so one slow link does not hold up
//      the others
//
// 2. Why join_all instead of pushing results into a shared Vec?
//    - Tasks finish in any order; a shared Vec would record that order
//    - join_all returns results in the order the handles were created,
//      which is the order the links appear in the file
//    - No Mutex needed: each task owns its own result until the join
//
// 3. What is a JoinError?
//    - What you get from awaiting a JoinHandle whose task panicked
//    - We turn it into a failing verdict for that one link
//
// 4. Why `mut self` in process()?
//    - The worker takes ownership of the Document, fills it in and hands
//      it back; nobody else can see it half-done
// -----------------------------------------------------------------------------
