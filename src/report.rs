// src/report.rs
// =============================================================================
// Turns the finished scan into output.
//
// Two formats:
// - Text (default): per-file blocks, then totals
// - JSON (--json): the same data, machine readable
//
// Text layout per file:
//
//   File: content/a.md
//   Link: 2
//   Fail: 1
//   [x] /b.md
//
//   ---
//
// The "Fail", "[x]", blank and "---" lines only show up for files that
// have failures. A file we could not read prints "Error: ..." instead.
// Skipped subtrees are listed as "Warning: ..." lines before the totals.
//
// Nothing here touches the scan results; writing is the only side effect.
// =============================================================================

use crate::scan::Document;
use serde::Serialize;
use std::io::{self, Write};

// Run-wide counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub files: usize,
    pub links: usize,
    pub failures: usize,
    /// Documents that could not be read at all
    pub unreadable: usize,
}

impl Totals {
    pub fn from_documents(documents: &[Document]) -> Self {
        Totals {
            files: documents.len(),
            links: documents.iter().map(|d| d.links.len()).sum(),
            failures: documents.iter().map(|d| d.failures.len()).sum(),
            unreadable: documents.iter().filter(|d| d.error.is_some()).count(),
        }
    }

    /// True when nothing is broken and every file was read
    pub fn is_clean(&self) -> bool {
        self.failures == 0 && self.unreadable == 0
    }
}

// Writes the human-readable report
pub fn write_text<W: Write>(out: &mut W, documents: &[Document], warnings: &[String]) -> io::Result<Totals> {
    for doc in documents {
        writeln!(out, "File: {}", doc.path.display())?;

        if let Some(error) = &doc.error {
            writeln!(out, "Error: {}", error)?;
            writeln!(out)?;
            writeln!(out, "---")?;
            continue;
        }

        writeln!(out, "Link: {}", doc.links.len())?;
        if !doc.failures.is_empty() {
            writeln!(out, "Fail: {}", doc.failures.len())?;
            for failure in &doc.failures {
                writeln!(out, "[x] {}", failure.link.target)?;
            }
            writeln!(out)?;
            writeln!(out, "---")?;
        }
    }

    for warning in warnings {
        writeln!(out, "Warning: {}", warning)?;
    }

    let totals = Totals::from_documents(documents);
    writeln!(out, "Total File: {}", totals.files)?;
    writeln!(out, "Total Link: {}", totals.links)?;
    writeln!(out, "Total Fail: {}", totals.failures)?;
    Ok(totals)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    documents: &'a [Document],
    warnings: &'a [String],
    totals: Totals,
}

// Writes the JSON report
pub fn write_json<W: Write>(out: &mut W, documents: &[Document], warnings: &[String]) -> anyhow::Result<Totals> {
    let totals = Totals::from_documents(documents);
    let report = JsonReport {
        documents,
        warnings,
        totals,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{Link, Verdict};
    use crate::scan::Failure;
    use std::path::PathBuf;

    fn link(target: &str) -> Link {
        Link {
            full: format!("[t]({})", target),
            text: "t".to_string(),
            target: target.to_string(),
        }
    }

    fn sample() -> Vec<Document> {
        let mut a = Document::new("content/a.md");
        a.links = vec![link("/b.md"), link("//othersite.com/p")];
        a.failures = vec![Failure {
            link: link("/b.md"),
            verdict: Verdict::LocalInvalid {
                path: PathBuf::from("public/b.md"),
                reason: "Not found".to_string(),
            },
        }];

        let mut clean = Document::new("content/clean.md");
        clean.links = vec![link("/")];

        vec![a, clean]
    }

    #[test]
    fn test_text_report_layout() {
        let mut out = Vec::new();
        let totals = write_text(&mut out, &sample(), &[]).unwrap();

        let expected = "\
File: content/a.md
Link: 2
Fail: 1
[x] /b.md

---
File: content/clean.md
Link: 1
Total File: 2
Total Link: 3
Total Fail: 1
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
        assert_eq!(totals, Totals { files: 2, links: 3, failures: 1, unreadable: 0 });
        assert!(!totals.is_clean());
    }

    #[test]
    fn test_unreadable_document_in_text_report() {
        let mut doc = Document::new("content/gone.md");
        doc.error = Some("No such file or directory".to_string());

        let mut out = Vec::new();
        let totals = write_text(&mut out, &[doc], &[]).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("File: content/gone.md\nError: No such file or directory\n\n---\n"));
        assert_eq!(totals.unreadable, 1);
        assert!(!totals.is_clean());
    }

    #[test]
    fn test_empty_run() {
        let mut out = Vec::new();
        let totals = write_text(&mut out, &[], &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Total File: 0\nTotal Link: 0\nTotal Fail: 0\n");
        assert!(totals.is_clean());
    }

    #[test]
    fn test_skipped_subtrees_listed_before_totals() {
        let warnings = vec!["content/private: Permission denied (os error 13)".to_string()];

        let mut out = Vec::new();
        write_text(&mut out, &[], &warnings).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Warning: content/private: Permission denied (os error 13)\nTotal File: 0\nTotal Link: 0\nTotal Fail: 0\n"
        );
    }

    #[test]
    fn test_json_report() {
        let mut out = Vec::new();
        write_json(&mut out, &sample(), &[]).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["totals"]["failures"], 1);
        assert_eq!(value["documents"][0]["failures"][0]["link"]["target"], "/b.md");
        assert_eq!(value["documents"][0]["failures"][0]["verdict"]["verdict"], "local_invalid");
        assert!(value["documents"][1].get("error").is_none());
    }
}
