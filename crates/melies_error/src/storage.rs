//! Persistence error types.

/// Specific error conditions for aggregate persistence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Filesystem or backend I/O failure
    #[display("Storage I/O error: {}", _0)]
    Io(String),
    /// Failed to serialize an aggregate snapshot
    #[display("Failed to serialize snapshot: {}", _0)]
    Serialize(String),
    /// Failed to deserialize an aggregate snapshot
    #[display("Failed to deserialize snapshot: {}", _0)]
    Deserialize(String),
    /// No snapshot exists for the requested project
    #[display("No saved project found for id '{}'", _0)]
    NotFound(String),
}

/// Error type for persistence operations.
///
/// # Examples
///
/// ```
/// use melies_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("abc".into()));
/// assert!(format!("{}", err).contains("abc"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The specific error condition
    pub kind: StorageErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StorageError {
    /// Create a new StorageError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
