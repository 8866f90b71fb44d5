//! Generation capability error types.
//!
//! These are the outcomes a capability call can fail with. They are recorded
//! on the scene that issued the call and never propagate past the scene
//! boundary.

/// Specific failure conditions for a generation call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The capability is temporarily out of capacity (quota signal).
    ///
    /// This is an expected operational condition, never fatal. It is the only
    /// failure kind routed to the fallback policy engine.
    #[display("Generation capacity exhausted")]
    ResourceExhausted,
    /// The visual description was blank at call time.
    ///
    /// Distinct from confirm-time validation: the description can be cleared
    /// between confirmation and the call being issued.
    #[display("Visual description was empty at generation time")]
    EmptyPrompt,
    /// Opaque upstream failure; the message is preserved verbatim for display.
    #[display("Generation failed: {}", _0)]
    Failed(String),
}

impl GenerationErrorKind {
    /// Check whether this failure should be routed to the fallback policy.
    ///
    /// Only capacity exhaustion gets recovery offers; the other kinds are
    /// reported directly.
    pub fn is_resource_exhausted(&self) -> bool {
        matches!(self, GenerationErrorKind::ResourceExhausted)
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use melies_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::ResourceExhausted);
/// assert!(err.is_resource_exhausted());
/// assert!(format!("{}", err).contains("exhausted"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create an opaque upstream failure carrying the provider's message.
    #[track_caller]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::Failed(message.into()))
    }

    /// Check whether this failure should be routed to the fallback policy.
    pub fn is_resource_exhausted(&self) -> bool {
        self.kind.is_resource_exhausted()
    }
}
