//! File content hashing.
//!
//! This module provides [`compute_hash`] for streaming a file's entire byte
//! content through a selectable cryptographic digest ([`HashAlgorithm`]).
//!
//! Digests are rendered as uppercase hexadecimal, two characters per byte,
//! no separators. Files are read through a buffered reader so digest
//! computation never requires the whole file in memory.

use crate::error::{FilexError, Result};
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing::debug;

/// Read buffer size for streaming digest computation (64KB)
const READ_BUF_SIZE: usize = 64 * 1024;

/// Selects the digest algorithm used for hashing and file comparison.
///
/// `None` is an explicit sentinel marking "no algorithm chosen"; passing it
/// to any hashing operation is a usage error, never a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[value(skip)]
    None,
    Md5,
    Sha256,
    Sha512,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Md5 => write!(f, "MD5"),
            Self::Sha256 => write!(f, "SHA256"),
            Self::Sha512 => write!(f, "SHA512"),
        }
    }
}

impl HashAlgorithm {
    /// Digest output size in bytes (hex rendering is twice this length).
    /// `None` has no output size.
    pub fn output_size(&self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Md5 => Some(16),
            Self::Sha256 => Some(32),
            Self::Sha512 => Some(64),
        }
    }
}

/// Computes the selected digest over the file's full byte content.
///
/// The file is read sequentially start to end; the digest is returned as
/// uppercase hex. Read-only: the file is never modified.
pub async fn compute_hash(path: impl AsRef<Path>, algorithm: HashAlgorithm) -> Result<String> {
    let path = path.as_ref().to_path_buf();
    debug!(file = %path.display(), algorithm = %algorithm, "computing file digest");
    tokio::task::spawn_blocking(move || compute_hash_sync(&path, algorithm))
        .await
        .map_err(|e| FilexError::io(format!("hash task panicked: {e}")))?
}

/// Blocking form of [`compute_hash`], used directly by the comparison path
/// and from `spawn_blocking` in the async wrapper.
pub fn compute_hash_sync(path: &Path, algorithm: HashAlgorithm) -> Result<String> {
    match algorithm {
        HashAlgorithm::Md5 => digest_file::<Md5>(path),
        HashAlgorithm::Sha256 => digest_file::<Sha256>(path),
        HashAlgorithm::Sha512 => digest_file::<Sha512>(path),
        HashAlgorithm::None => Err(FilexError::out_of_range(format!(
            "unsupported hash algorithm: {algorithm}"
        ))),
    }
}

fn digest_file<D: Digest + io::Write>(path: &Path) -> Result<String> {
    let file = File::open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                FilexError::not_found(format!("file '{}' does not exist", path.display()))
            }
            _ => FilexError::io(format!("opening {}: {e}", path.display())),
        })?;
    let mut reader = BufReader::with_capacity(READ_BUF_SIZE, file);
    let mut hasher = D::new();
    io::copy(&mut reader, &mut hasher)
        .map_err(|e| FilexError::io(format!("reading {}: {e}", path.display())))?;
    Ok(to_upper_hex(hasher.finalize().as_slice()))
}

fn to_upper_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_upper_hex_rendering() {
        assert_eq!(to_upper_hex(&[0x00, 0xAB, 0x0F]), "00AB0F");
        assert_eq!(to_upper_hex(&[]), "");
    }

    #[test]
    fn test_output_sizes() {
        assert_eq!(HashAlgorithm::Md5.output_size(), Some(16));
        assert_eq!(HashAlgorithm::Sha256.output_size(), Some(32));
        assert_eq!(HashAlgorithm::Sha512.output_size(), Some(64));
        assert_eq!(HashAlgorithm::None.output_size(), None);
    }

    #[tokio::test]
    async fn test_hash_is_deterministic() {
        let mut f = tempfile::NamedTempFile::new().expect("temp file");
        f.write_all(b"determinism check").expect("write");

        let first = compute_hash(f.path(), HashAlgorithm::Sha256)
            .await
            .expect("hash");
        let second = compute_hash(f.path(), HashAlgorithm::Sha256)
            .await
            .expect("hash");

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert_eq!(first, first.to_uppercase());
    }

    #[tokio::test]
    async fn test_none_algorithm_is_out_of_range() {
        let f = tempfile::NamedTempFile::new().expect("temp file");
        let err = compute_hash(f.path(), HashAlgorithm::None)
            .await
            .expect_err("NONE must fail");
        assert!(matches!(err, FilexError::OutOfRange(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let err = compute_hash("/definitely/not/here.bin", HashAlgorithm::Md5)
            .await
            .expect_err("missing file must fail");
        assert!(matches!(err, FilexError::NotFound(_)));
    }
}
