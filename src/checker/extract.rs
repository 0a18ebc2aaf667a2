// src/checker/extract.rs
// =============================================================================
// This module extracts links from Markdown source text.
//
// We deliberately do NOT parse the markdown. A single regular expression
// finds every `[display](target)` occurrence in one left-to-right pass:
//
//   \[([^\[]*)\]\(([^(]*)\)
//      ^^^^^^^     ^^^^^^
//      display     target
//
// Known limitation: the display text may not contain `[` and the target
// may not contain `(`. So `[a [b] c](/x)` only matches `[b] c](/x)`.
// That is how the pattern behaves and we leave it that way.
//
// Rust concepts:
// - LazyLock: A value that is built the first time it is used
// - Iterators: captures_iter() walks all matches in order
// =============================================================================

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// The link pattern, compiled once for the whole process
// Regex::new only fails on an invalid pattern, and this one is a constant
static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[]*)\]\(([^(]*)\)").unwrap());

// One markdown link occurrence
//
// Immutable once extracted; the worker hands clones to the link tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// The whole match, e.g. `[About](/about/)`
    pub full: String,
    /// The display text between the square brackets
    pub text: String,
    /// The raw target between the parentheses, exactly as written
    pub target: String,
}

// Extracts every markdown link from a text buffer
//
// Parameters:
//   content: the markdown source (borrowed as &str)
//
// Returns: Vec<Link> in the order the links appear in the text
//
// Example:
//   "See [Rust](https://www.rust-lang.org) and [about](/about/)"
//   -> targets ["https://www.rust-lang.org", "/about/"]
pub fn extract_links(content: &str) -> Vec<Link> {
    LINK_REGEX
        .captures_iter(content)
        .map(|caps| Link {
            full: caps[0].to_string(),
            text: caps[1].to_string(),
            target: caps[2].to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(content: &str) -> Vec<String> {
        extract_links(content).into_iter().map(|l| l.target).collect()
    }

    #[test]
    fn test_extract_simple_link() {
        let links = extract_links("Check out [Rust](https://www.rust-lang.org)!");
        assert_eq!(
            links,
            vec![Link {
                full: "[Rust](https://www.rust-lang.org)".to_string(),
                text: "Rust".to_string(),
                target: "https://www.rust-lang.org".to_string(),
            }]
        );
    }

    #[test]
    fn test_links_keep_source_order() {
        let markdown = r#"
# Resources

- [Docs](/docs/)
- [x](/b.md) and [y](//othersite.com/p)
- [Empty]()
        "#;
        assert_eq!(targets(markdown), vec!["/docs/", "/b.md", "//othersite.com/p", ""]);
    }

    #[test]
    fn test_no_links_is_empty() {
        assert!(extract_links("").is_empty());
        assert!(extract_links("plain text with [brackets] and (parens)").is_empty());
    }

    #[test]
    fn test_image_links_are_matched_too() {
        // The leading ! is outside the pattern, so images are checked like links
        assert_eq!(targets("![logo](/images/logo.png)"), vec!["/images/logo.png"]);
    }

    #[test]
    fn test_nested_bracket_cuts_display_text() {
        let links = extract_links("[a [b] c](/x)");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "b] c");
        assert_eq!(links[0].target, "/x");
    }

    #[test]
    fn test_links_spanning_lines() {
        // Neither character class excludes newlines
        let links = extract_links("[multi\nline](/ml/)");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "multi\nline");
    }
}
