//! Encoded text file reading and writing with cancellation.
//!
//! [`read_text`] and [`write_text`] move a file's full contents through an
//! explicit [`encoding_rs::Encoding`]. Both operate in 4KB chunks and check
//! a [`CancellationToken`] at every chunk boundary, so a cancelled operation
//! aborts promptly and surfaces as [`FilexError::Cancelled`].
//!
//! A cancelled write leaves the file partially written; callers that need
//! atomicity should write to a temporary file and rename. Decoding uses
//! whatever encoding the caller supplies; a mismatch with the file's actual
//! encoding yields garbage text, not an error.

use crate::error::{FilexError, Result};
use encoding_rs::Encoding;
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Chunk size for cancellable reads and writes (4KB)
const CHUNK_SIZE: usize = 4096;

/// Open-mode selection for [`write_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create the file or truncate existing content
    Truncate,
    /// Create the file or append to existing content
    Append,
}

/// Reads the file's full byte content and decodes it with `encoding`.
pub async fn read_text(
    path: impl AsRef<Path>,
    encoding: &'static Encoding,
    cancel: &CancellationToken,
) -> Result<String> {
    let path = path.as_ref();
    debug!(file = %path.display(), encoding = encoding.name(), "reading text file");

    let mut file = File::open(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            FilexError::not_found(format!("file '{}' does not exist", path.display()))
        }
        _ => FilexError::io(format!("opening {}: {e}", path.display())),
    })?;

    let mut data = Vec::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(FilexError::cancelled(format!(
                    "read of '{}' was cancelled",
                    path.display()
                )));
            }
            res = file.read(&mut buf) => {
                res.map_err(|e| FilexError::io(format!("reading {}: {e}", path.display())))?
            }
        };
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }

    // Decode the whole buffer at once so multi-byte sequences never split
    // across chunk boundaries.
    let (text, _, _) = encoding.decode(&data);
    Ok(text.into_owned())
}

/// Encodes `text` with `encoding` and writes it to the file under the
/// caller-selected open mode.
pub async fn write_text(
    path: impl AsRef<Path>,
    text: &str,
    encoding: &'static Encoding,
    mode: WriteMode,
    cancel: &CancellationToken,
) -> Result<()> {
    let path = path.as_ref();
    debug!(
        file = %path.display(),
        encoding = encoding.name(),
        mode = ?mode,
        chars = text.len(),
        "writing text file"
    );

    // Checked up front so an already-cancelled write never opens (and
    // truncates) the file, even when the text encodes to zero chunks.
    if cancel.is_cancelled() {
        return Err(FilexError::cancelled(format!(
            "write of '{}' was cancelled",
            path.display()
        )));
    }

    let (encoded, _, _) = encoding.encode(text);

    let mut opts = OpenOptions::new();
    opts.write(true).create(true);
    match mode {
        WriteMode::Truncate => opts.truncate(true),
        WriteMode::Append => opts.append(true),
    };
    let mut file = opts
        .open(path)
        .await
        .map_err(|e| FilexError::io(format!("opening {}: {e}", path.display())))?;

    for chunk in encoded.chunks(CHUNK_SIZE) {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(FilexError::cancelled(format!(
                    "write of '{}' was cancelled",
                    path.display()
                )));
            }
            res = file.write_all(chunk) => {
                res.map_err(|e| FilexError::io(format!("writing {}: {e}", path.display())))?;
            }
        }
    }

    file.flush()
        .await
        .map_err(|e| FilexError::io(format!("flushing {}: {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::UTF_8;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_pre_cancelled_write_fails() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("cancelled.txt");

        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = write_text(&path, "never written", UTF_8, WriteMode::Truncate, &cancel)
            .await
            .expect_err("cancelled token must abort the write");
        assert!(matches!(err, FilexError::Cancelled(_)));
    }

    #[tokio::test]
    async fn test_pre_cancelled_empty_write_fails_without_touching_file() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("existing.txt");
        std::fs::write(&path, "keep me").expect("write");

        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = write_text(&path, "", UTF_8, WriteMode::Truncate, &cancel)
            .await
            .expect_err("cancelled token must abort even a zero-chunk write");
        assert!(matches!(err, FilexError::Cancelled(_)));
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "keep me",
            "a cancelled write must not truncate the file"
        );
    }

    #[tokio::test]
    async fn test_pre_cancelled_read_fails() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("data.txt");
        std::fs::write(&path, "content").expect("write");

        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = read_text(&path, UTF_8, &cancel)
            .await
            .expect_err("cancelled token must abort the read");
        assert!(matches!(err, FilexError::Cancelled(_)));
    }

    #[tokio::test]
    async fn test_append_mode_appends() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("log.txt");
        let cancel = CancellationToken::new();

        write_text(&path, "first", UTF_8, WriteMode::Truncate, &cancel)
            .await
            .expect("write");
        write_text(&path, " second", UTF_8, WriteMode::Append, &cancel)
            .await
            .expect("append");

        let text = read_text(&path, UTF_8, &cancel).await.expect("read");
        assert_eq!(text, "first second");
    }

    #[tokio::test]
    async fn test_truncate_mode_replaces() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("state.txt");
        let cancel = CancellationToken::new();

        write_text(&path, "old content here", UTF_8, WriteMode::Truncate, &cancel)
            .await
            .expect("write");
        write_text(&path, "new", UTF_8, WriteMode::Truncate, &cancel)
            .await
            .expect("overwrite");

        let text = read_text(&path, UTF_8, &cancel).await.expect("read");
        assert_eq!(text, "new");
    }
}
