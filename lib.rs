//! # filex - File Utility Library
//!
//! filex provides convenience operations over the operating system's file
//! APIs: gzip transcoding, content hashing, hash-based equality comparison,
//! encoded text I/O with cancellation, literal find-and-replace, PATH
//! directory search, and file-owner lookup.
//!
//! ## Features
//!
//! - **Hashing**: Streaming MD5 / SHA-256 / SHA-512 digests, uppercase hex
//! - **Comparison**: Concurrent two-way digest comparison for file equality
//! - **GZip**: Streaming compress/decompress between files
//! - **Text I/O**: Explicit-encoding read/write with cancellation tokens
//! - **Editing**: Case-sensitive or caseless literal find-and-replace
//! - **Lookup**: PATH directory search and file-owner resolution
//!
//! ## Quick Start
//!
//! ```no_run
//! use filex::compare::files_equal;
//! use filex::gzip::compress_gzip;
//! use filex::hash::HashAlgorithm;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     compress_gzip("data.bin", "data.bin.gz").await?;
//!
//!     let equal = files_equal("data.bin", "backup.bin", HashAlgorithm::Sha256).await?;
//!     println!("identical: {equal}");
//!     Ok(())
//! }
//! ```
//!
//! Every operation is stateless beyond the filesystem it touches; errors are
//! returned as data ([`FilexError`]), never logged-and-swallowed.

pub mod compare;
pub mod config;
pub mod error;
pub mod gzip;
pub mod hash;
pub mod owner;
pub mod path_search;
pub mod replace;
pub mod text_io;
pub mod util;

// Re-export common types for convenience
pub use error::FilexError;
pub use hash::HashAlgorithm;
