//! File-owner lookup.
//!
//! Queries the owning principal of a file from the OS and resolves it to a
//! human-readable account name. If name resolution fails for a non-critical
//! reason (unreadable account database, unknown id), the raw numeric
//! identifier string is returned instead of an error.

use crate::error::{FilexError, Result};
use std::path::Path;
use tracing::debug;

/// Returns the account name owning `path`, falling back to the raw owner id
/// rendered as a string when the name cannot be resolved.
#[cfg(unix)]
pub fn file_owner(path: impl AsRef<Path>) -> Result<String> {
    use std::os::unix::fs::MetadataExt;

    let path = path.as_ref();
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            FilexError::not_found(format!("file '{}' does not exist", path.display()))
        }
        _ => FilexError::io(format!("reading metadata of {}: {e}", path.display())),
    })?;

    let uid = metadata.uid();
    match resolve_account_name(uid) {
        Some(name) => Ok(name),
        None => {
            debug!(uid, "owner name resolution failed; returning raw id");
            Ok(uid.to_string())
        }
    }
}

#[cfg(not(unix))]
pub fn file_owner(path: impl AsRef<Path>) -> Result<String> {
    let _ = path;
    Err(FilexError::out_of_range(
        "owner lookup is only supported on Unix targets",
    ))
}

/// Resolves a uid against the system account database. Returns `None` when
/// the database is unreadable or the uid has no entry.
#[cfg(unix)]
fn resolve_account_name(uid: u32) -> Option<String> {
    let passwd = std::fs::read_to_string("/etc/passwd").ok()?;
    for line in passwd.lines() {
        // name:password:uid:gid:gecos:home:shell
        let mut fields = line.split(':');
        let Some(name) = fields.next() else { continue };
        let Some(entry_uid) = fields.nth(1).and_then(|f| f.parse::<u32>().ok()) else {
            continue;
        };
        if entry_uid == uid {
            return Some(name.to_string());
        }
    }
    None
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_owner_of_temp_file_is_nonempty() {
        let f = tempfile::NamedTempFile::new().expect("temp file");
        let owner = file_owner(f.path()).expect("owner lookup");
        assert!(!owner.trim().is_empty());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = file_owner("/no/such/file/anywhere").expect_err("must fail");
        assert!(matches!(err, FilexError::NotFound(_)));
    }
}
