//! Durable snapshot types for the project aggregate.

use chrono::{DateTime, Utc};
use melies_core::{AudioSelection, ProjectSettings, StillImage, VideoVariant};
use melies_error::{GenerationError, GenerationErrorKind};
use melies_scene::{Scene, SceneId, SceneState};
use serde::{Deserialize, Serialize};

/// Serializable form of a recorded generation failure.
///
/// The in-memory error carries source-location fields that are meaningless
/// across a restart, so only the failure kind and message survive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationFailureSnapshot {
    /// Capacity exhaustion
    ResourceExhausted,
    /// Description was blank at call time
    EmptyPrompt,
    /// Opaque upstream failure with its verbatim message
    Failed(String),
}

impl From<&GenerationError> for GenerationFailureSnapshot {
    fn from(error: &GenerationError) -> Self {
        match &error.kind {
            GenerationErrorKind::ResourceExhausted => Self::ResourceExhausted,
            GenerationErrorKind::EmptyPrompt => Self::EmptyPrompt,
            GenerationErrorKind::Failed(message) => Self::Failed(message.clone()),
        }
    }
}

impl From<GenerationFailureSnapshot> for GenerationError {
    fn from(snapshot: GenerationFailureSnapshot) -> Self {
        let kind = match snapshot {
            GenerationFailureSnapshot::ResourceExhausted => GenerationErrorKind::ResourceExhausted,
            GenerationFailureSnapshot::EmptyPrompt => GenerationErrorKind::EmptyPrompt,
            GenerationFailureSnapshot::Failed(message) => GenerationErrorKind::Failed(message),
        };
        GenerationError::new(kind)
    }
}

/// Durable form of one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Scene identifier
    pub id: SceneId,
    /// Playback position
    pub ordinal: u32,
    /// Voice-over text
    pub narration: String,
    /// Visual description prompt
    pub visual_description: String,
    /// Lifecycle state at capture time (may be `Generating`)
    pub state: SceneState,
    /// Produced video variants
    pub video_variants: Vec<VideoVariant>,
    /// Produced still image
    pub still_image: Option<StillImage>,
    /// Last recorded generation failure
    pub last_error: Option<GenerationFailureSnapshot>,
}

impl From<&Scene> for SceneSnapshot {
    fn from(scene: &Scene) -> Self {
        Self {
            id: *scene.id(),
            ordinal: *scene.ordinal(),
            narration: scene.narration().clone(),
            visual_description: scene.visual_description().clone(),
            state: *scene.state(),
            video_variants: scene.video_variants().clone(),
            still_image: scene.still_image().clone(),
            last_error: scene.last_error().as_ref().map(Into::into),
        }
    }
}

impl SceneSnapshot {
    /// Rebuild the live scene.
    ///
    /// Delegates to [`Scene::reassemble`], which turns a captured
    /// `Generating` state into `Failed`; no generation call can be resumed
    /// across a process restart.
    pub fn into_scene(self) -> Scene {
        Scene::reassemble(
            self.id,
            self.ordinal,
            self.narration,
            self.visual_description,
            self.state,
            self.video_variants,
            self.still_image,
            self.last_error.map(Into::into),
        )
    }
}

/// Durable form of a whole project aggregate.
///
/// # Examples
///
/// ```
/// use melies_core::ProjectSettings;
/// use melies_storage::ProjectSnapshot;
///
/// let settings = ProjectSettings::builder().topic("tide pools").build().unwrap();
/// let snapshot = ProjectSnapshot::new(settings, None, Vec::new());
/// assert!(snapshot.scenes.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// Project settings
    pub settings: ProjectSettings,
    /// Active audio selection
    pub audio: Option<AudioSelection>,
    /// Ordered scene snapshots
    pub scenes: Vec<SceneSnapshot>,
    /// When the snapshot was captured
    pub captured_at: DateTime<Utc>,
}

impl ProjectSnapshot {
    /// Capture a snapshot now.
    pub fn new(
        settings: ProjectSettings,
        audio: Option<AudioSelection>,
        scenes: Vec<SceneSnapshot>,
    ) -> Self {
        Self {
            settings,
            audio,
            scenes,
            captured_at: Utc::now(),
        }
    }
}
