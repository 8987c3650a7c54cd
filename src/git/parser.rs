//! Parsing of raw `git blame` / `git show` text output.
//!
//! Two tiny contracts:
//! - `commit_hash`: first whitespace token of a `git blame -c` line.
//! - `parse_attribution`: split one `git show --format="%an | %ar | %s"` line
//!   on the literal `" | "` delimiter into author, relative date, and subject.
//!
//! Commit subjects may themselves contain `|`, so only the first two
//! delimiters separate fields; everything after them belongs to the message.

use crate::models::Attribution;

/// Placeholder hash git prints for uncommitted lines under `blame -c`.
pub const ZERO_HASH: &str = "00000000";

/// Delimiter used in the `git show` format string.
const FIELD_SEP: &str = " | ";

/// Errors from attribution parsing. Never escapes the lookup service; callers
/// substitute a fallback or sentinel attribution.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Output looked like a git error message, not formatted commit data.
    GitFailure,
    /// Fewer than two delimiters found.
    Malformed,
}

/// Extract the commit hash from the first line of `git blame -c` output.
///
/// Returns `None` for blank input.
pub fn commit_hash(blame_line: &str) -> Option<&str> {
    blame_line.split_whitespace().next()
}

/// Parse one line of `git show <hash> --format="%an | %ar | %s"` output.
///
/// Any output containing `fatal` is a captured git error (bad object, not a
/// repository, ...) and fails as `GitFailure` before shape checks run.
pub fn parse_attribution(line: &str) -> Result<Attribution, ParseError> {
    if line.contains("fatal") {
        return Err(ParseError::GitFailure);
    }

    let mut parts = line.splitn(3, FIELD_SEP);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(author), Some(relative_date), Some(message)) => {
            Ok(Attribution::new(author, relative_date, message))
        }
        _ => Err(ParseError::Malformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_three_fields() {
        let attr = parse_attribution("Jane Doe | 2 days ago | Fix bug").unwrap();
        assert_eq!(attr.author, "Jane Doe");
        assert_eq!(attr.relative_date, "2 days ago");
        assert_eq!(attr.message, "Fix bug");
    }

    #[test]
    fn message_keeps_extra_pipes() {
        let attr = parse_attribution("Jane Doe | 2 days ago | Fix bug | extra").unwrap();
        assert_eq!(attr.author, "Jane Doe");
        assert_eq!(attr.relative_date, "2 days ago");
        assert_eq!(attr.message, "Fix bug | extra");
    }

    #[test]
    fn too_few_delimiters_is_malformed() {
        assert_eq!(
            parse_attribution("garbage-no-delimiters"),
            Err(ParseError::Malformed)
        );
        assert_eq!(
            parse_attribution("only one | delimiter"),
            Err(ParseError::Malformed)
        );
    }

    #[test]
    fn fatal_output_is_git_failure() {
        assert_eq!(
            parse_attribution("fatal: bad object deadbeef"),
            Err(ParseError::GitFailure)
        );
        // Detection wins even when the shape would otherwise parse
        assert_eq!(
            parse_attribution("fatal | something | else"),
            Err(ParseError::GitFailure)
        );
    }

    #[test]
    fn hash_is_first_token() {
        assert_eq!(
            commit_hash("3f2a91bc (src/lib.rs  Jane Doe  2024-01-01 1) fn main() {"),
            Some("3f2a91bc")
        );
        assert_eq!(commit_hash("00000000 (Not Committed Yet ..."), Some(ZERO_HASH));
        assert_eq!(commit_hash(""), None);
        assert_eq!(commit_hash("   "), None);
    }
}
