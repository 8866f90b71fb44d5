//! Scene lifecycle states.

use serde::{Deserialize, Serialize};

/// Where a scene is in its lifecycle.
///
/// Normal flow runs `Draft → Confirmed → Generating → Ready → Approved`.
/// `Failed` is terminal-recoverable: the description unlocks again and the
/// user may edit back to `Draft` or re-enter generation through a fallback
/// action.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum SceneState {
    /// Description editable, not yet eligible for generation
    Draft,
    /// Description locked in, eligible for generation
    Confirmed,
    /// Exactly one generation call is outstanding
    Generating,
    /// An artifact is present, awaiting review
    Ready,
    /// Signed off; terminal for the normal flow
    Approved,
    /// Last generation call failed; description unlocked
    Failed,
}

impl SceneState {
    /// Whether a generation call may be issued from this state.
    ///
    /// `Failed` is included so fallback actions can re-generate without an
    /// intervening edit.
    pub fn can_generate(&self) -> bool {
        matches!(self, SceneState::Confirmed | SceneState::Ready | SceneState::Failed)
    }

    /// Whether the description may be edited in this state.
    pub fn can_edit(&self) -> bool {
        matches!(self, SceneState::Draft | SceneState::Confirmed | SceneState::Failed)
    }
}

/// Which artifact kind an outstanding generation call will produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum GenerationKind {
    /// Video variant rendering; `alternative` tags a varied-strategy retry
    #[strum(serialize = "video")]
    Video {
        /// Passed through to the gateway so upstream may vary its strategy
        alternative: bool,
    },
    /// Single still image
    #[strum(serialize = "still image")]
    StillImage,
}
