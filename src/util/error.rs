//! Error types for the animpack library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for compile and decode operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The loaded scene has no authored actions, so the frame range
    /// cannot be resolved. Fatal for the whole batch.
    #[error("No actions found in scene")]
    NoActionsFound,

    /// A value destined for a single-byte field exceeds 255.
    #[error("Value {0} does not fit in a single byte")]
    ValueOutOfRange(u32),

    /// The scene host rejected an asset file.
    #[error("Failed to import {path}: {reason}")]
    ImportFailure { path: PathBuf, reason: String },

    /// Archive data ends before a field is complete.
    #[error("Unexpected end of archive data at offset {0}")]
    UnexpectedEof(usize),

    /// A record did not end with the `END` terminator.
    #[error("Record '{0}' corrupted: terminator not reached")]
    MissingTerminator(String),

    /// A record started with an unrecognized tag byte.
    #[error("Unknown record tag: 0x{0:02x}")]
    UnknownRecordTag(u8),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Create an import failure for the given asset path.
    pub fn import(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ImportFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for animpack operations.
pub type Result<T> = std::result::Result<T, Error>;
