//! Fallback policy engine.
//!
//! Decides which recovery actions to offer after a generation call fails.
//! The policy is a declarative rule table (failure kind × project attributes
//! → offered action) evaluated in order, so new fallback actions can be
//! added without touching the state machine.

use melies_error::{GenerationError, GenerationErrorKind};
use serde::{Deserialize, Serialize};

/// A recovery action offered to the user for a `Failed` scene.
///
/// Actions are not mutually exclusive: the user may invoke any subset, in
/// any order, any number of times, while the scene remains `Failed`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum RecoveryAction {
    /// Retry video generation tagged as an alternative attempt
    RetryAlternativeVideo,
    /// Generate a still image instead of video
    FallBackToStillImage,
    /// Ask for grounded analysis of the project's reference image.
    ///
    /// Informational and read-only: displays alongside the other options
    /// and can be dismissed without affecting the scene.
    AnalyzeReferenceImage,
}

/// Project-level attributes the policy consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectAttributes {
    /// Whether the project carries a reference image
    pub has_reference_image: bool,
}

struct PolicyRule {
    matches: fn(&GenerationErrorKind) -> bool,
    requires_reference_image: bool,
    action: RecoveryAction,
}

/// Only capacity exhaustion gets recovery offers; other failure kinds are
/// reported directly and leave the scene in `Failed` without options.
static POLICY: [PolicyRule; 3] = [
    PolicyRule {
        matches: GenerationErrorKind::is_resource_exhausted,
        requires_reference_image: false,
        action: RecoveryAction::RetryAlternativeVideo,
    },
    PolicyRule {
        matches: GenerationErrorKind::is_resource_exhausted,
        requires_reference_image: false,
        action: RecoveryAction::FallBackToStillImage,
    },
    PolicyRule {
        matches: GenerationErrorKind::is_resource_exhausted,
        requires_reference_image: true,
        action: RecoveryAction::AnalyzeReferenceImage,
    },
];

/// Compute the ordered list of recovery actions to offer for a failure.
///
/// # Examples
///
/// ```
/// use melies_error::{GenerationError, GenerationErrorKind};
/// use melies_scene::{ProjectAttributes, RecoveryAction, recovery_actions};
///
/// let error = GenerationError::new(GenerationErrorKind::ResourceExhausted);
/// let offered = recovery_actions(&error, &ProjectAttributes { has_reference_image: false });
/// assert_eq!(
///     offered,
///     vec![
///         RecoveryAction::RetryAlternativeVideo,
///         RecoveryAction::FallBackToStillImage,
///     ]
/// );
/// ```
pub fn recovery_actions(
    error: &GenerationError,
    attributes: &ProjectAttributes,
) -> Vec<RecoveryAction> {
    POLICY
        .iter()
        .filter(|rule| (rule.matches)(&error.kind))
        .filter(|rule| !rule.requires_reference_image || attributes.has_reference_image)
        .map(|rule| rule.action)
        .collect()
}
