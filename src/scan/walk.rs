// src/scan/walk.rs
// =============================================================================
// Finds every markdown file under the content root.
//
// How it works:
// 1. Start with the content root on a stack
// 2. Pop a directory, read its entries, sort them by name
// 3. Subdirectories go back on the stack, ".md" files go in the result
// 4. Repeat until the stack is empty
//
// Pushing subdirectories in reverse order means we pop them in name order.
// Result: a directory's own files (by name), then each subdirectory in
// name order, depth-first. Same input tree, same order, on every platform.
//
// Errors:
// - Content root unreadable: fatal, there is nothing to check
// - A subdirectory unreadable: logged as a warning and skipped
// =============================================================================

use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};

// Everything the walk found
#[derive(Debug, Default)]
pub struct Discovery {
    /// Markdown files, in traversal order
    pub files: Vec<PathBuf>,
    /// Subtrees that were skipped, with the reason
    pub warnings: Vec<String>,
}

// Is this a markdown file name? (".md", any letter case)
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

// Walks the content root and lists every markdown file
pub async fn discover_markdown(root: &Path) -> Result<Discovery> {
    let mut discovery = Discovery::default();

    // The root itself must be readable
    let root_entries = read_sorted(root)
        .await
        .with_context(|| format!("Cannot read content dir '{}'", root.display()))?;

    let mut stack = Vec::new();
    push_entries(root_entries, &mut stack, &mut discovery).await;

    while let Some(dir) = stack.pop() {
        match read_sorted(&dir).await {
            Ok(entries) => push_entries(entries, &mut stack, &mut discovery).await,
            Err(e) => {
                warn!("Skipping {}: {}", dir.display(), e);
                discovery.warnings.push(format!("{}: {}", dir.display(), e));
            }
        }
    }

    debug!("walk: {} markdown file(s) under {}", discovery.files.len(), root.display());
    Ok(discovery)
}

// Reads one directory and returns its entries sorted by file name
async fn read_sorted(dir: &Path) -> std::io::Result<Vec<tokio::fs::DirEntry>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        entries.push(entry);
    }
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}

// Sorts one directory's entries into "descend later" and "markdown file"
//
// Files are recorded right away; subdirectories go on the stack, last
// first, so the next pop is the alphabetically first one
async fn push_entries(entries: Vec<tokio::fs::DirEntry>, stack: &mut Vec<PathBuf>, discovery: &mut Discovery) {
    let mut subdirs = Vec::new();

    for entry in entries {
        let path = entry.path();
        let file_type = match entry.file_type().await {
            Ok(file_type) => file_type,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                discovery.warnings.push(format!("{}: {}", path.display(), e));
                continue;
            }
        };

        if file_type.is_dir() {
            subdirs.push(path);
        } else if is_markdown(&path) && is_file(&path, file_type).await {
            discovery.files.push(path);
        }
    }

    stack.extend(subdirs.into_iter().rev());
}

// Regular files count, and so do symlinks pointing at one.
// Symlinked directories are not followed (no cycles to worry about).
async fn is_file(path: &Path, file_type: std::fs::FileType) -> bool {
    if file_type.is_file() {
        return true;
    }
    if file_type.is_symlink() {
        return tokio::fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false);
    }
    false
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Vec as a stack instead of a recursive function?
//    - Recursive async functions need boxing (Box::pin) in Rust
//    - A plain loop over a stack does the same walk without it
//
// 2. What does .is_some_and() do?
//    - Some(x) with a matching x -> true, anything else -> false
//    - Handy for "has an extension AND it is md"
//
// 3. Why file_type() and not metadata()?
//    - file_type() does not follow symlinks, so we can spot them
//    - We only follow a symlink (with metadata()) to see if it is a file
// -----------------------------------------------------------------------------
