//! Reading documents from disk.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::InputError;

/// Reads a document as text.
///
/// The content is decoded as UTF-8 when valid and as Latin-1 otherwise, so
/// any byte sequence yields a document.
///
/// # Errors
///
/// Returns [`InputError::NotFound`] for a missing path and
/// [`InputError::Unreadable`] for any other I/O failure.
pub fn read_document(path: &Path) -> Result<String, InputError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => InputError::NotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read document");
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            warn!(
                path = %path.display(),
                valid_up_to = err.utf8_error().valid_up_to(),
                "document is not valid UTF-8, decoding as Latin-1"
            );
            Ok(decode_latin1(err.as_bytes()))
        }
    }
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("naïve\n".as_bytes()).unwrap();
        assert_eq!(read_document(file.path()).unwrap(), "naïve\n");
    }

    #[test]
    fn test_falls_back_to_latin1() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"caf\xe9\n").unwrap();
        assert_eq!(read_document(file.path()).unwrap(), "café\n");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, InputError::NotFound { .. }));
        assert_eq!(err.to_string(), format!("File not found: {}", path.display()));
    }

    #[test]
    fn test_directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_document(dir.path()).unwrap_err();
        assert!(matches!(err, InputError::Unreadable { .. }));
    }
}
