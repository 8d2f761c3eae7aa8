//! GZip stream transcoding.
//!
//! [`compress_gzip`] and [`decompress_gzip`] produce a second file that is
//! the gzip-compressed or gzip-decompressed form of an input file. Both are
//! sequential streaming copies through flate2 filters; neither loads the
//! file into memory.
//!
//! The output file is created or truncated. On failure a partially written
//! output may remain; cleanup is the caller's responsibility. Decompression
//! does not pre-validate the gzip framing, so malformed input surfaces as a
//! mid-stream error.

use crate::error::{FilexError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, info};

/// Creates a gzip-compressed copy of `input` at `output`.
pub async fn compress_gzip(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<u64> {
    let input = input.as_ref().to_path_buf();
    let output = output.as_ref().to_path_buf();
    debug!(input = %input.display(), output = %output.display(), "compressing file");

    let bytes = tokio::task::spawn_blocking(move || compress_sync(&input, &output))
        .await
        .map_err(|e| FilexError::io(format!("compress task panicked: {e}")))??;

    info!(bytes, "file compressed");
    Ok(bytes)
}

/// Creates a decompressed copy of a gzip-compressed `input` at `output`.
pub async fn decompress_gzip(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<u64> {
    let input = input.as_ref().to_path_buf();
    let output = output.as_ref().to_path_buf();
    debug!(input = %input.display(), output = %output.display(), "decompressing file");

    let bytes = tokio::task::spawn_blocking(move || decompress_sync(&input, &output))
        .await
        .map_err(|e| FilexError::io(format!("decompress task panicked: {e}")))??;

    info!(bytes, "file decompressed");
    Ok(bytes)
}

fn compress_sync(input: &Path, output: &Path) -> Result<u64> {
    let mut reader = BufReader::new(open_input(input)?);
    let writer = BufWriter::new(create_output(output)?);
    let mut encoder = GzEncoder::new(writer, Compression::default());

    let bytes = io::copy(&mut reader, &mut encoder)
        .map_err(|e| FilexError::io(format!("compressing {}: {e}", input.display())))?;
    let mut writer = encoder
        .finish()
        .map_err(|e| FilexError::io(format!("finalizing {}: {e}", output.display())))?;
    io::Write::flush(&mut writer)
        .map_err(|e| FilexError::io(format!("flushing {}: {e}", output.display())))?;
    Ok(bytes)
}

fn decompress_sync(input: &Path, output: &Path) -> Result<u64> {
    let mut decoder = GzDecoder::new(BufReader::new(open_input(input)?));
    let mut writer = BufWriter::new(create_output(output)?);

    let bytes = io::copy(&mut decoder, &mut writer)
        .map_err(|e| FilexError::io(format!("decompressing {}: {e}", input.display())))?;
    io::Write::flush(&mut writer)
        .map_err(|e| FilexError::io(format!("flushing {}: {e}", output.display())))?;
    Ok(bytes)
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            FilexError::not_found(format!("input '{}' does not exist", path.display()))
        }
        _ => FilexError::io(format!("opening {}: {e}", path.display())),
    })
}

fn create_output(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| FilexError::io(format!("creating {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_round_trip_small() {
        let tmp = TempDir::new().expect("temp dir");
        let original = tmp.path().join("original.txt");
        let compressed = tmp.path().join("original.txt.gz");
        let restored = tmp.path().join("restored.txt");

        fs::write(&original, b"gzip round trip test data").expect("write");

        compress_gzip(&original, &compressed).await.expect("compress");
        decompress_gzip(&compressed, &restored).await.expect("decompress");

        assert_eq!(fs::read(&original).expect("read"), fs::read(&restored).expect("read"));
    }

    #[tokio::test]
    async fn test_round_trip_empty_file() {
        let tmp = TempDir::new().expect("temp dir");
        let original = tmp.path().join("empty");
        let compressed = tmp.path().join("empty.gz");
        let restored = tmp.path().join("empty.out");

        fs::write(&original, b"").expect("write");

        compress_gzip(&original, &compressed).await.expect("compress");
        decompress_gzip(&compressed, &restored).await.expect("decompress");

        assert!(fs::read(&restored).expect("read").is_empty());
    }

    #[tokio::test]
    async fn test_malformed_input_fails_mid_stream() {
        let tmp = TempDir::new().expect("temp dir");
        let garbage = tmp.path().join("not-gzip");
        let out = tmp.path().join("out");

        fs::write(&garbage, b"this is not a gzip stream at all").expect("write");

        let result = decompress_gzip(&garbage, &out).await;
        assert!(result.is_err());
    }
}
