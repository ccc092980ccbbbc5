use std::io;
use thiserror::Error;

use rig_archive::ArchiveError;

/// Error types for skeleton building, loading and saving
#[derive(Error, Debug)]
pub enum SkeletonError {
    /// I/O error while opening or creating a skeleton file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reported by the archive stream
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// The authoring hierarchy holds more joints than a skeleton can index
    #[error("Too many joints: {count} (maximum is {max})")]
    TooManyJoints { count: usize, max: usize },

    /// A joint name cannot be stored in the name table
    #[error("Invalid name for joint {index}: {reason}")]
    InvalidJointName { index: usize, reason: String },

    /// A structural invariant of the skeleton does not hold
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl SkeletonError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

/// Result type using SkeletonError
pub type Result<T> = std::result::Result<T, SkeletonError>;
