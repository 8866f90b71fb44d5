//! Scene state machine error types.

/// Specific error conditions for scene transitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SceneErrorKind {
    /// User input failed validation (e.g. confirming an empty description)
    #[display("Validation failed: {}", _0)]
    Validation(String),
    /// The requested transition is not legal from the scene's current state
    #[display("Cannot {} while scene is {}", action, state)]
    InvalidState {
        /// The transition that was attempted
        action: String,
        /// The state the scene was in
        state: String,
    },
    /// A generation call was issued while another is still outstanding
    #[display("A generation call is already in flight for this scene")]
    ConcurrentGeneration,
    /// A business rule blocked the transition (e.g. approving with no artifact)
    #[display("Precondition not met: {}", _0)]
    Precondition(String),
}

/// Error type for scene state machine operations.
///
/// # Examples
///
/// ```
/// use melies_error::{SceneError, SceneErrorKind};
///
/// let err = SceneError::new(SceneErrorKind::ConcurrentGeneration);
/// assert!(format!("{}", err).contains("in flight"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Scene Error: {} at line {} in {}", kind, line, file)]
pub struct SceneError {
    /// The specific error condition
    pub kind: SceneErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SceneError {
    /// Create a new SceneError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SceneErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create an `InvalidState` error from an attempted action and the
    /// observed state.
    #[track_caller]
    pub fn invalid_state(action: impl Into<String>, state: impl ToString) -> Self {
        Self::new(SceneErrorKind::InvalidState {
            action: action.into(),
            state: state.to_string(),
        })
    }
}
