//! Hash-based file equality comparison.
//!
//! [`files_equal`] fingerprints both files concurrently and compares the
//! digests instead of diffing content byte-for-byte. The two hash
//! computations are independent (different files, independent result slots),
//! so the fork-join needs no locking; either completion order is valid.

use crate::error::{FilexError, Result};
use crate::hash::{compute_hash, HashAlgorithm};
use std::path::Path;
use tracing::debug;

/// Determines whether two files have identical content by comparing their
/// digests under the selected algorithm.
///
/// Preconditions are checked eagerly before any hashing starts: both files
/// must exist and the algorithm must not be [`HashAlgorithm::None`]. A
/// failure in either hash computation fails the whole comparison; an error
/// is never reported as "not equal".
pub async fn files_equal(
    file1: impl AsRef<Path>,
    file2: impl AsRef<Path>,
    algorithm: HashAlgorithm,
) -> Result<bool> {
    let file1 = file1.as_ref();
    let file2 = file2.as_ref();

    if file1.as_os_str().is_empty() {
        return Err(FilexError::invalid_argument("file1 path cannot be empty"));
    }

    if file2.as_os_str().is_empty() {
        return Err(FilexError::invalid_argument("file2 path cannot be empty"));
    }

    if !tokio::fs::try_exists(file1).await? {
        return Err(FilexError::not_found(format!(
            "file1 '{}' does not exist",
            file1.display()
        )));
    }

    if !tokio::fs::try_exists(file2).await? {
        return Err(FilexError::not_found(format!(
            "file2 '{}' does not exist",
            file2.display()
        )));
    }

    if algorithm == HashAlgorithm::None {
        return Err(FilexError::invalid_argument(
            "a hash algorithm is required to compare file equality",
        ));
    }

    debug!(
        file1 = %file1.display(),
        file2 = %file2.display(),
        algorithm = %algorithm,
        "comparing files by digest"
    );

    // Both computations run on the blocking pool; try_join drives them
    // concurrently and surfaces whichever failure occurs first.
    let (hash1, hash2) = tokio::try_join!(
        compute_hash(file1, algorithm),
        compute_hash(file2, algorithm)
    )?;

    // Rendering is always uppercase hex, but equality must not depend on it.
    Ok(hash1.eq_ignore_ascii_case(&hash2))
}
