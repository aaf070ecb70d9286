//! Errors raised while loading the documents to compare.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to read one of the input documents.
#[derive(Debug, Error)]
pub enum InputError {
    /// The path does not exist.
    #[error("File not found: {}", path.display())]
    NotFound {
        /// Path as given on the command line.
        path: PathBuf,
    },
    /// The path exists but could not be read.
    #[error("Error reading file {}", path.display())]
    Unreadable {
        /// Path as given on the command line.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
