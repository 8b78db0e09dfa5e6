//! Error types for file I/O operations.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use thiserror::Error;

/// Error types for file I/O operations.
///
/// Every variant names the offending path so the caller can report it as-is.
#[derive(Error, Debug)]
pub enum IoError {
    /// File does not exist or its metadata is unreadable.
    #[error("File not found: {0}")]
    NotFound(String),

    /// File exceeds size limit.
    #[error("File too large: {path} is {size} bytes (limit: {limit})")]
    TooLarge {
        /// Offending path.
        path: String,
        /// Actual size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },

    /// File contains binary content (NULL bytes detected).
    #[error("Binary file detected: {0}")]
    BinaryFile(String),

    /// File is not valid UTF-8.
    #[error("UTF-8 decoding error in {path} at byte {offset}")]
    Encoding {
        /// Offending path.
        path: String,
        /// Byte offset of the first invalid sequence.
        offset: usize,
    },

    /// Reading an existing file failed.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Offending path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Writing or renaming the destination failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Offending path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl IoError {
    /// Path the failure refers to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound(path) | Self::BinaryFile(path) => path,
            Self::TooLarge { path, .. }
            | Self::Encoding { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. } => path,
        }
    }
}
