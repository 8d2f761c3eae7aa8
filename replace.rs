//! Literal find-and-replace over a file's text content.
//!
//! [`find_and_replace`] reads the whole file, substitutes every
//! non-overlapping occurrence of a literal search string left-to-right, and
//! writes the full result back to the same file. The rewrite happens even
//! when nothing matched; the return value reports whether any replacement
//! occurred.
//!
//! Matching is ordinal (locale-agnostic), case-sensitive or
//! case-insensitive per [`MatchCase`].

use crate::error::{FilexError, Result};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Case handling for the literal search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCase {
    Sensitive,
    Insensitive,
}

/// Replaces all occurrences of `old` with `new` in the file's text content.
///
/// Returns `true` if any replacement was made. Empty search or replacement
/// strings and empty file content are argument errors.
pub async fn find_and_replace(
    path: impl AsRef<Path>,
    old: &str,
    new: &str,
    case: MatchCase,
) -> Result<bool> {
    let path = path.as_ref();

    if old.is_empty() {
        return Err(FilexError::invalid_argument(
            "search string cannot be empty",
        ));
    }
    if new.is_empty() {
        return Err(FilexError::invalid_argument(
            "replacement string cannot be empty",
        ));
    }

    let contents = fs::read_to_string(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            FilexError::not_found(format!("file '{}' does not exist", path.display()))
        }
        _ => FilexError::io(format!("reading {}: {e}", path.display())),
    })?;

    if contents.is_empty() {
        return Err(FilexError::invalid_argument(
            "file content cannot be empty",
        ));
    }

    let (result, changed) = match case {
        MatchCase::Sensitive => {
            if contents.contains(old) {
                (contents.replace(old, new), true)
            } else {
                (contents, false)
            }
        }
        MatchCase::Insensitive => replace_ignore_case(&contents, old, new),
    };

    debug!(file = %path.display(), changed, "rewriting file after find-and-replace");

    // Full rewrite happens whether or not anything matched.
    fs::write(path, result)
        .await
        .map_err(|e| FilexError::io(format!("writing {}: {e}", path.display())))?;

    Ok(changed)
}

fn replace_ignore_case(haystack: &str, old: &str, new: &str) -> (String, bool) {
    let mut out = String::with_capacity(haystack.len());
    let mut pos = 0;
    let mut changed = false;

    while let Some((start, end)) = find_ignore_case(haystack, old, pos) {
        out.push_str(&haystack[pos..start]);
        out.push_str(new);
        pos = end;
        changed = true;
    }
    out.push_str(&haystack[pos..]);

    (out, changed)
}

/// Finds the next caseless occurrence of `needle` at or after byte offset
/// `from`, returning the matched byte range.
fn find_ignore_case(haystack: &str, needle: &str, from: usize) -> Option<(usize, usize)> {
    let mut start = from;
    while start < haystack.len() {
        if !haystack.is_char_boundary(start) {
            start += 1;
            continue;
        }
        if let Some(len) = match_prefix_ignore_case(&haystack[start..], needle) {
            return Some((start, start + len));
        }
        start += 1;
    }
    None
}

/// Caseless ordinal prefix match: compares char by char through their
/// lowercase forms. Returns the matched prefix length in bytes.
fn match_prefix_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let mut chars = haystack.char_indices();
    for nc in needle.chars() {
        match chars.next() {
            Some((_, hc)) if hc.to_lowercase().eq(nc.to_lowercase()) => {}
            _ => return None,
        }
    }
    Some(chars.next().map(|(i, _)| i).unwrap_or(haystack.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[test]
    fn test_caseless_find() {
        assert_eq!(find_ignore_case("Hello World", "world", 0), Some((6, 11)));
        assert_eq!(find_ignore_case("aaa", "A", 1), Some((1, 2)));
        assert_eq!(find_ignore_case("abc", "d", 0), None);
    }

    #[test]
    fn test_caseless_replace_non_overlapping() {
        let (out, changed) = replace_ignore_case("aAaA", "aa", "x");
        assert_eq!(out, "xx");
        assert!(changed);
    }

    #[tokio::test]
    async fn test_case_sensitive_does_not_match_other_case() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("text.txt");
        std_fs::write(&path, "This IS text").expect("write");

        let changed = find_and_replace(&path, "is", "was", MatchCase::Sensitive)
            .await
            .expect("replace");
        assert!(!changed);
        assert_eq!(std_fs::read_to_string(&path).expect("read"), "This IS text");
    }

    #[tokio::test]
    async fn test_case_insensitive_matches_all_casings() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("text.txt");
        std_fs::write(&path, "This IS a test, is it not? Is so.").expect("write");

        let changed = find_and_replace(&path, "is", "XX", MatchCase::Insensitive)
            .await
            .expect("replace");
        assert!(changed);
        assert_eq!(
            std_fs::read_to_string(&path).expect("read"),
            "ThXX XX a test, XX it not? XX so."
        );
    }

    #[tokio::test]
    async fn test_empty_search_string_rejected() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("text.txt");
        std_fs::write(&path, "content").expect("write");

        let err = find_and_replace(&path, "", "x", MatchCase::Sensitive)
            .await
            .expect_err("empty search must fail");
        assert!(matches!(err, FilexError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_empty_file_content_rejected() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("empty.txt");
        std_fs::write(&path, "").expect("write");

        let err = find_and_replace(&path, "a", "b", MatchCase::Sensitive)
            .await
            .expect_err("empty content must fail");
        assert!(matches!(err, FilexError::InvalidArgument(_)));
    }
}
