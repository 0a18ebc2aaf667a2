// src/checker/verdict.rs
// =============================================================================
// The outcome of checking one link.
//
// Every link ends up with exactly one Verdict. Only the "broken" ones are
// recorded as failures on their document; the rest are implied by their
// absence from the failure list.
// =============================================================================

use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Same site, and the path exists under the output root
    LocalValid,
    /// Same site, but the path is missing (or could not be checked)
    LocalInvalid { path: PathBuf, reason: String },
    /// Another host, and external checking is switched off
    ExternalSkipped,
    /// Another host that answered with a status below 400
    ExternalValid { status: u16 },
    /// Another host that failed to answer, or answered >= 400
    ExternalInvalid { reason: String },
    /// The target is not a URL we can make sense of
    Unresolvable { reason: String },
}

impl Verdict {
    /// True when this link belongs in the document's failure list
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Verdict::LocalInvalid { .. } | Verdict::ExternalInvalid { .. } | Verdict::Unresolvable { .. }
        )
    }

    /// Short human-readable explanation, empty for passing links
    pub fn reason(&self) -> &str {
        match self {
            Verdict::LocalInvalid { reason, .. }
            | Verdict::ExternalInvalid { reason }
            | Verdict::Unresolvable { reason } => reason,
            _ => "",
        }
    }
}
