//! Script scene types produced by the script generator.

use serde::{Deserialize, Serialize};

/// One unit of the generated script: what is said and what is shown.
///
/// # Examples
///
/// ```
/// use melies_core::ScriptScene;
///
/// let scene = ScriptScene::new(
///     "The keeper climbs the spiral stair.",
///     "Interior spiral staircase, warm lantern light, 35mm film look.",
/// );
/// assert!(!scene.narration.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptScene {
    /// Voice-over text for this scene
    pub narration: String,
    /// Prompt describing the visuals to generate
    pub visual_description: String,
}

impl ScriptScene {
    /// Create a new script scene.
    pub fn new(narration: impl Into<String>, visual_description: impl Into<String>) -> Self {
        Self {
            narration: narration.into(),
            visual_description: visual_description.into(),
        }
    }
}
