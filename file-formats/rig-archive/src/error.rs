//! Error types for archive streams

use std::io;
use thiserror::Error;

/// Errors raised while writing or reading an archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O error from the underlying stream, including truncated input
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The first byte of the stream is not a known endianness marker
    #[error("Invalid endianness marker: {0:#04x}")]
    InvalidEndianMarker(u8),

    /// The stream holds an object of another type
    #[error("Tag mismatch: expected '{expected}', found '{found}'")]
    TagMismatch { expected: String, found: String },

    /// The object was written with a version this reader cannot interpret
    #[error("Unsupported version {version} for '{tag}' (supported: 1..={max})")]
    UnsupportedVersion { tag: String, version: u32, max: u32 },

    /// The stream is well formed at the byte level but its content is not
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl ArchiveError {
    /// Create an invalid data error
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    /// Create an unsupported version error for a tagged type
    pub fn unsupported_version(tag: &str, version: u32, max: u32) -> Self {
        Self::UnsupportedVersion {
            tag: tag.to_string(),
            version,
            max,
        }
    }

    /// Whether the error was caused by the stream ending early
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }
}

/// Result type alias for archive operations
pub type Result<T> = std::result::Result<T, ArchiveError>;
