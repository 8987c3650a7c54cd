//! Line attribution data transfer objects.
//!
//! An `Attribution` is the answer to "who last touched this line": author,
//! relative date, and commit subject, exactly as git formats them. Uncommitted
//! lines and failed lookups share one sentinel value on purpose; editor
//! integrations key off its message text.

use serde::{Deserialize, Serialize};

/// Message shown for lines git cannot attribute (uncommitted or lookup failure).
pub const NOT_COMMITTED: &str = "Not Committed Yet";

/// Who last modified a line, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    /// Author name (`%an`)
    pub author: String,
    /// Relative date (`%ar`), e.g. "2 days ago"
    pub relative_date: String,
    /// Commit subject (`%s`)
    pub message: String,
}

impl Attribution {
    pub fn new(
        author: impl Into<String>,
        relative_date: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            relative_date: relative_date.into(),
            message: message.into(),
        }
    }

    /// Placeholder for uncommitted lines and for lookups git refused.
    pub fn sentinel() -> Self {
        Self::new("?", "?", NOT_COMMITTED)
    }

    /// Fallback when `git show` output did not have the expected shape:
    /// unknown author/date, raw output preserved as the message.
    pub fn raw_fallback(raw: impl Into<String>) -> Self {
        Self::new("?", "?", raw)
    }
}

/// Response for a blame lookup on one line of a file.
#[derive(Debug, Serialize)]
pub struct BlameResponse {
    /// Path of the file, as the client sent it
    pub path: String,
    /// Line number (1-indexed)
    pub line: u32,
    /// The attribution, or `null` when the lookup was suppressed or git had
    /// no data for the line
    pub attribution: Option<Attribution>,
}
