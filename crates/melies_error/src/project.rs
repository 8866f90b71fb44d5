//! Project orchestrator error types.

/// Specific error conditions for project-level operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProjectErrorKind {
    /// Scenes were already created from a script for this project
    #[display("Project scenes have already been initialized from a script")]
    AlreadyInitialized,
    /// The script generator returned no scenes
    #[display("Script generation produced an empty scene list")]
    EmptyScript,
    /// The project has no scenes yet
    #[display("Project has no scenes")]
    NoScenes,
    /// Settings mutation attempted after scene generation started
    #[display("Project settings are locked: {}", _0)]
    SettingsLocked(String),
    /// Project settings failed validation
    #[display("Invalid project settings: {}", _0)]
    Validation(String),
    /// The upstream script generator failed
    #[display("Script generation failed: {}", _0)]
    ScriptGeneration(String),
}

/// Error type for project orchestrator operations.
///
/// # Examples
///
/// ```
/// use melies_error::{ProjectError, ProjectErrorKind};
///
/// let err = ProjectError::new(ProjectErrorKind::AlreadyInitialized);
/// assert!(format!("{}", err).contains("already been initialized"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Project Error: {} at line {} in {}", kind, line, file)]
pub struct ProjectError {
    /// The specific error condition
    pub kind: ProjectErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ProjectError {
    /// Create a new ProjectError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProjectErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
