//! Small filesystem conveniences.

use std::env;
use std::path::PathBuf;
use uuid::Uuid;

/// Returns the full path of a unique temporary file candidate in the
/// platform temp directory.
///
/// Only the name is generated; the file itself is never created. The
/// v4-UUID name makes a collision practically impossible, but the loop
/// guards against it anyway.
pub fn temp_file() -> PathBuf {
    temp_file_in(env::temp_dir())
}

/// [`temp_file`] with an explicit parent directory.
pub fn temp_file_in(dir: impl Into<PathBuf>) -> PathBuf {
    let dir = dir.into();
    loop {
        let candidate = dir.join(format!("{}.tmp", Uuid::new_v4()));
        if !candidate.exists() {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_file_does_not_exist() {
        let path = temp_file();
        assert!(!path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("tmp"));
    }

    #[test]
    fn test_temp_file_names_are_unique() {
        assert_ne!(temp_file(), temp_file());
    }
}
