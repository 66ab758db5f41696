/// Errors from keyed store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Attempted to store an entry under a null key.
    #[error("cannot store an entry under a null key")]
    InvalidKey,

    /// The requested key is null or not present in the store.
    #[error("key not found: {0}")]
    KeyNotFound(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
