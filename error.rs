use thiserror::Error;

/// Custom error types for filex operations
#[derive(Debug, Error)]
pub enum FilexError {
    /// A required argument was missing, empty, or an explicitly disallowed
    /// value (e.g. `HashAlgorithm::None` where a real algorithm is required)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A recognized selector value with no supported implementation
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// A referenced file does not exist where existence is a precondition
    #[error("Not found: {0}")]
    NotFound(String),

    /// An in-flight read/write was aborted via its cancellation token
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// Filesystem and I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl FilexError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

impl From<std::io::Error> for FilexError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            _ => Self::Io(err.to_string()),
        }
    }
}

/// Convenience alias used throughout the library
pub type Result<T> = std::result::Result<T, FilexError>;
