//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, ProjectError, SceneError, StorageError};

/// This is the foundation error enum. Each Melies crate contributes its
/// subsystem error through a `From` conversion.
///
/// # Examples
///
/// ```
/// use melies_error::{MeliesError, SceneError, SceneErrorKind};
///
/// let scene_err = SceneError::new(SceneErrorKind::ConcurrentGeneration);
/// let err: MeliesError = scene_err.into();
/// assert!(format!("{}", err).contains("Scene Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MeliesErrorKind {
    /// Scene state machine error
    #[from(SceneError)]
    Scene(SceneError),
    /// Generation capability error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Project orchestrator error
    #[from(ProjectError)]
    Project(ProjectError),
    /// Persistence error
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Melies error with kind discrimination.
///
/// # Examples
///
/// ```
/// use melies_error::{MeliesResult, ProjectError, ProjectErrorKind};
///
/// fn might_fail() -> MeliesResult<()> {
///     Err(ProjectError::new(ProjectErrorKind::NoScenes))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Melies Error: {}", _0)]
pub struct MeliesError(Box<MeliesErrorKind>);

impl MeliesError {
    /// Create a new error from a kind.
    pub fn new(kind: MeliesErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MeliesErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to MeliesErrorKind
impl<T> From<T> for MeliesError
where
    T: Into<MeliesErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Melies operations.
///
/// # Examples
///
/// ```
/// use melies_error::{MeliesResult, StorageError, StorageErrorKind};
///
/// fn load() -> MeliesResult<String> {
///     Err(StorageError::new(StorageErrorKind::NotFound("p1".into())))?
/// }
/// ```
pub type MeliesResult<T> = std::result::Result<T, MeliesError>;
