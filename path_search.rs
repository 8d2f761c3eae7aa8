//! Executable-search-path lookups.
//!
//! Searches the directories listed in the process's `PATH` environment
//! variable, in listed order, for a filename. The first existing match
//! wins. An unset `PATH` is treated as a no-match rather than an error.

use crate::error::{FilexError, Result};
use std::env;
use std::path::PathBuf;
use tracing::debug;

/// Returns the full path of the first `PATH` directory entry containing
/// `file_name`, or `None` if no directory does.
pub fn find_in_path(file_name: &str) -> Result<Option<PathBuf>> {
    if file_name.trim().is_empty() {
        return Err(FilexError::invalid_argument("file name cannot be empty"));
    }

    let Some(path_var) = env::var_os("PATH") else {
        debug!("PATH is not set; nothing to search");
        return Ok(None);
    };

    for dir in env::split_paths(&path_var) {
        let candidate = dir.join(file_name);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "found match in PATH");
            return Ok(Some(candidate));
        }
    }

    Ok(None)
}

/// Convenience variant of [`find_in_path`] reporting only existence.
pub fn exists_in_path(file_name: &str) -> Result<bool> {
    Ok(find_in_path(file_name)?.is_some())
}
