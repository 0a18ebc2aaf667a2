// src/checker/validate.rs
// =============================================================================
// Existence check for local link targets.
//
// We only ask the filesystem for metadata (a stat call). That works for
// files and directories and does not need read permission on the file
// itself. "Not found" is a normal answer; every other error (permission
// denied on a parent directory, I/O failure, ...) goes back to the caller.
// =============================================================================

use std::io;
use std::path::Path;

// Checks whether a path exists
//
// Returns:
//   Ok(true)  = exists (file or directory)
//   Ok(false) = missing
//   Err(e)    = the check itself failed
pub async fn path_exists(path: &Path) -> io::Result<bool> {
    match tokio::fs::metadata(path).await {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_existing_file_and_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.html"), "<p>hi</p>").unwrap();

        assert!(path_exists(&dir.path().join("a.html")).await.unwrap());
        assert!(path_exists(dir.path()).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!path_exists(&dir.path().join("nope")).await.unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_used_as_directory_is_an_error() {
        // "a.html/child" fails with NotADirectory, which is not NotFound
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.html"), "").unwrap();

        let result = path_exists(&dir.path().join("a.html").join("child")).await;
        assert!(result.is_err());
    }
}
