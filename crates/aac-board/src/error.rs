//! Error types for board operations.

use std::io;
use std::path::PathBuf;

use aac_store::StoreError;
use thiserror::Error;

/// Errors that can occur while navigating, editing, loading or writing a
/// board.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The image is not known to the active category or to home.
    #[error("image not found: {image}")]
    ImageNotFound { image: String },

    /// A selector names a category that is not registered.
    #[error("category not found: {name}")]
    UnknownCategory { name: String },

    /// An image location, category name or text cannot be represented in
    /// a mapping file.
    #[error("invalid name {value:?}: {reason}")]
    InvalidName { value: String, reason: String },

    /// A mapping file line could not be interpreted.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// The mapping file could not be opened or created.
    #[error("cannot open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O error while reading or writing mapping lines.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Error from the underlying keyed store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience type alias for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;
