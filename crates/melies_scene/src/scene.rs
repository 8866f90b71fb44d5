//! The per-scene state machine.

use crate::{GenerationKind, SceneState};
use melies_core::{StillImage, VideoVariant};
use melies_error::{GenerationError, SceneError, SceneErrorKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// Unique identifier for a scene.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct SceneId(Uuid);

impl SceneId {
    /// Create a fresh scene id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SceneId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SceneId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<SceneId> for Uuid {
    fn from(id: SceneId) -> Self {
        id.0
    }
}

/// Proof that a generation call was admitted by [`Scene::begin_generation`].
///
/// The ticket is not cloneable and must be surrendered to
/// [`Scene::complete_generation`], so exactly one completion can be applied
/// per admitted call.
#[derive(Debug)]
pub struct GenerationTicket {
    scene_id: SceneId,
    kind: GenerationKind,
}

impl GenerationTicket {
    /// The scene this ticket was issued for.
    pub fn scene_id(&self) -> SceneId {
        self.scene_id
    }

    /// The artifact kind the outstanding call will produce.
    pub fn kind(&self) -> GenerationKind {
        self.kind
    }
}

/// The result of a completed generation call.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// Video rendering succeeded; replaces the scene's video variants
    Video(Vec<VideoVariant>),
    /// Still image generation succeeded; replaces the scene's still image
    StillImage(StillImage),
    /// The call failed; the error is recorded on the scene
    Failure(GenerationError),
}

/// One ordered unit of a media project.
///
/// Owns the scene's narration, visual description, lifecycle state, and
/// produced artifacts. All transitions are synchronous; generation calls are
/// admitted with [`Scene::begin_generation`] and resolved with
/// [`Scene::complete_generation`] so that a second call issued while one is
/// outstanding is rejected rather than queued.
///
/// # Examples
///
/// ```
/// use melies_scene::{Scene, SceneId, SceneState};
///
/// let mut scene = Scene::new(
///     SceneId::new(),
///     0,
///     "Waves crash against the rocks.",
///     "Stormy coastline at dusk, long exposure.",
/// );
/// scene.confirm().unwrap();
/// assert_eq!(*scene.state(), SceneState::Confirmed);
/// ```
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct Scene {
    /// Unique identifier
    id: SceneId,
    /// Playback position; assigned at script-import time and never changes
    ordinal: u32,
    /// Voice-over text
    narration: String,
    /// Prompt describing the visuals to generate
    visual_description: String,
    /// Lifecycle state
    state: SceneState,
    /// Produced video renderings, most recent generation call's output
    video_variants: Vec<VideoVariant>,
    /// Produced still image, if any
    still_image: Option<StillImage>,
    /// Error recorded by the last failed generation call
    last_error: Option<GenerationError>,
}

impl Scene {
    /// Create a new scene in `Draft`.
    pub fn new(
        id: SceneId,
        ordinal: u32,
        narration: impl Into<String>,
        visual_description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            ordinal,
            narration: narration.into(),
            visual_description: visual_description.into(),
            state: SceneState::Draft,
            video_variants: Vec::new(),
            still_image: None,
            last_error: None,
        }
    }

    /// Reassemble a scene from persisted parts.
    ///
    /// No generation call survives a process restart, so a scene captured
    /// while `Generating` comes back as `Failed` with an interruption error
    /// recorded for the recovery UI.
    pub fn reassemble(
        id: SceneId,
        ordinal: u32,
        narration: String,
        visual_description: String,
        state: SceneState,
        video_variants: Vec<VideoVariant>,
        still_image: Option<StillImage>,
        last_error: Option<GenerationError>,
    ) -> Self {
        let (state, last_error) = if state == SceneState::Generating {
            warn!(scene_id = %id, "Scene was captured mid-generation; reloading as Failed");
            (
                SceneState::Failed,
                Some(GenerationError::failed("generation interrupted by restart")),
            )
        } else {
            (state, last_error)
        };
        Self {
            id,
            ordinal,
            narration,
            visual_description,
            state,
            video_variants,
            still_image,
            last_error,
        }
    }

    /// Whether the scene currently holds a video variant or a still image.
    pub fn has_artifact(&self) -> bool {
        !self.video_variants.is_empty() || self.still_image.is_some()
    }

    /// Lock in the visual description: `Draft → Confirmed`.
    ///
    /// # Errors
    ///
    /// `Validation` if the description is empty or whitespace;
    /// `InvalidState` from any state but `Draft`.
    #[tracing::instrument(skip(self), fields(scene_id = %self.id, state = %self.state))]
    pub fn confirm(&mut self) -> Result<(), SceneError> {
        if self.state != SceneState::Draft {
            return Err(SceneError::invalid_state("confirm", self.state));
        }
        if self.visual_description.trim().is_empty() {
            return Err(SceneError::new(SceneErrorKind::Validation(
                "visual description cannot be empty".to_string(),
            )));
        }
        self.state = SceneState::Confirmed;
        debug!(scene_id = %self.id, "Scene confirmed");
        Ok(())
    }

    /// Replace the visual description, returning the scene to `Draft`.
    ///
    /// Allowed in `Draft`, `Confirmed` (reverts the confirmation), and
    /// `Failed` (unlocks the description after a failed generation; the
    /// recorded error is cleared). Prior artifacts are retained until the
    /// next successful generation replaces them. Rejected while a
    /// generation call is in flight and once an artifact is under review
    /// or approved.
    ///
    /// # Errors
    ///
    /// `InvalidState` in `Generating`, `Ready`, or `Approved`.
    #[tracing::instrument(skip(self, new_description), fields(scene_id = %self.id, state = %self.state))]
    pub fn edit(&mut self, new_description: impl Into<String>) -> Result<(), SceneError> {
        if !self.state.can_edit() {
            return Err(SceneError::invalid_state("edit", self.state));
        }
        self.visual_description = new_description.into();
        if self.state == SceneState::Failed {
            self.last_error = None;
        }
        self.state = SceneState::Draft;
        Ok(())
    }

    /// Admit a generation call: `Confirmed | Ready | Failed → Generating`.
    ///
    /// Returns a ticket that must be surrendered to
    /// [`Scene::complete_generation`]. Exactly one call may be outstanding
    /// per scene; a second is rejected, never queued.
    ///
    /// # Errors
    ///
    /// `ConcurrentGeneration` while `Generating`; `InvalidState` from
    /// `Draft` or `Approved`.
    #[tracing::instrument(skip(self), fields(scene_id = %self.id, state = %self.state, kind = %kind))]
    pub fn begin_generation(&mut self, kind: GenerationKind) -> Result<GenerationTicket, SceneError> {
        if self.state == SceneState::Generating {
            return Err(SceneError::new(SceneErrorKind::ConcurrentGeneration));
        }
        if !self.state.can_generate() {
            return Err(SceneError::invalid_state("generate", self.state));
        }
        self.state = SceneState::Generating;
        debug!(scene_id = %self.id, kind = %kind, "Generation admitted");
        Ok(GenerationTicket {
            scene_id: self.id,
            kind,
        })
    }

    /// Resolve an admitted generation call: `Generating → Ready | Failed`.
    ///
    /// A video result replaces any prior video variants but keeps the still
    /// image; a still result replaces the still image but keeps the video
    /// variants. A failure records the error and leaves artifacts untouched.
    #[tracing::instrument(skip(self, outcome), fields(scene_id = %self.id, kind = %ticket.kind))]
    pub fn complete_generation(
        &mut self,
        ticket: GenerationTicket,
        outcome: GenerationOutcome,
    ) -> SceneState {
        debug_assert_eq!(ticket.scene_id, self.id, "ticket surrendered to wrong scene");
        match outcome {
            GenerationOutcome::Video(variants) => {
                self.video_variants = variants;
                self.last_error = None;
                self.state = SceneState::Ready;
            }
            GenerationOutcome::StillImage(image) => {
                self.still_image = Some(image);
                self.last_error = None;
                self.state = SceneState::Ready;
            }
            GenerationOutcome::Failure(error) => {
                warn!(scene_id = %self.id, error = %error, "Generation failed");
                self.last_error = Some(error);
                self.state = SceneState::Failed;
            }
        }
        self.state
    }

    /// Sign off on the scene: `Ready → Approved`.
    ///
    /// # Errors
    ///
    /// `Precondition` when no artifact exists (including a direct approve
    /// from `Confirmed`); `InvalidState` from `Draft`, `Generating`,
    /// `Failed`, or `Approved`.
    #[tracing::instrument(skip(self), fields(scene_id = %self.id, state = %self.state))]
    pub fn approve(&mut self) -> Result<(), SceneError> {
        match self.state {
            SceneState::Ready | SceneState::Confirmed => {
                if !self.has_artifact() {
                    return Err(SceneError::new(SceneErrorKind::Precondition(
                        "cannot approve a scene with no produced artifact".to_string(),
                    )));
                }
                self.state = SceneState::Approved;
                debug!(scene_id = %self.id, "Scene approved");
                Ok(())
            }
            _ => Err(SceneError::invalid_state("approve", self.state)),
        }
    }

    /// Withdraw approval: `Approved → Ready`.
    ///
    /// # Errors
    ///
    /// `InvalidState` from any state but `Approved`.
    #[tracing::instrument(skip(self), fields(scene_id = %self.id, state = %self.state))]
    pub fn unapprove(&mut self) -> Result<(), SceneError> {
        if self.state != SceneState::Approved {
            return Err(SceneError::invalid_state("unapprove", self.state));
        }
        self.state = SceneState::Ready;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use melies_error::GenerationErrorKind;

    fn draft_scene() -> Scene {
        Scene::new(SceneId::new(), 0, "narration", "a foggy harbor at dawn")
    }

    #[test]
    fn confirm_requires_description() {
        let mut scene = Scene::new(SceneId::new(), 0, "narration", "   ");
        let err = scene.confirm().unwrap_err();
        assert!(matches!(err.kind, SceneErrorKind::Validation(_)));
        assert_eq!(*scene.state(), SceneState::Draft);
    }

    #[test]
    fn edit_same_text_is_idempotent_in_draft() {
        let mut scene = draft_scene();
        scene.edit("a foggy harbor at dawn").unwrap();
        scene.edit("a foggy harbor at dawn").unwrap();
        assert_eq!(*scene.state(), SceneState::Draft);
        assert_eq!(scene.visual_description(), "a foggy harbor at dawn");
    }

    #[test]
    fn edit_reverts_confirmation() {
        let mut scene = draft_scene();
        scene.confirm().unwrap();
        scene.edit("a busy harbor at noon").unwrap();
        assert_eq!(*scene.state(), SceneState::Draft);
    }

    #[test]
    fn edit_rejected_while_generating() {
        let mut scene = draft_scene();
        scene.confirm().unwrap();
        let _ticket = scene.begin_generation(GenerationKind::StillImage).unwrap();
        let err = scene.edit("changed").unwrap_err();
        assert!(matches!(err.kind, SceneErrorKind::InvalidState { .. }));
        assert_eq!(scene.visual_description(), "a foggy harbor at dawn");
    }

    #[test]
    fn second_generation_is_rejected_not_queued() {
        let mut scene = draft_scene();
        scene.confirm().unwrap();
        let _ticket = scene
            .begin_generation(GenerationKind::Video { alternative: false })
            .unwrap();
        let err = scene
            .begin_generation(GenerationKind::Video { alternative: false })
            .unwrap_err();
        assert!(matches!(err.kind, SceneErrorKind::ConcurrentGeneration));
        assert_eq!(*scene.state(), SceneState::Generating);
    }

    #[test]
    fn video_success_keeps_still_image() {
        let mut scene = draft_scene();
        scene.confirm().unwrap();
        let ticket = scene.begin_generation(GenerationKind::StillImage).unwrap();
        scene.complete_generation(
            ticket,
            GenerationOutcome::StillImage(melies_core::StillImage::new("s3://img")),
        );
        let ticket = scene
            .begin_generation(GenerationKind::Video { alternative: false })
            .unwrap();
        scene.complete_generation(
            ticket,
            GenerationOutcome::Video(vec![melies_core::VideoVariant::new("s3://vid", false)]),
        );
        assert!(scene.still_image().is_some());
        assert_eq!(scene.video_variants().len(), 1);
        assert_eq!(*scene.state(), SceneState::Ready);
    }

    #[test]
    fn failure_preserves_prior_artifacts() {
        let mut scene = draft_scene();
        scene.confirm().unwrap();
        let ticket = scene
            .begin_generation(GenerationKind::Video { alternative: false })
            .unwrap();
        scene.complete_generation(
            ticket,
            GenerationOutcome::Video(vec![melies_core::VideoVariant::new("s3://vid", false)]),
        );
        let ticket = scene
            .begin_generation(GenerationKind::Video { alternative: true })
            .unwrap();
        scene.complete_generation(
            ticket,
            GenerationOutcome::Failure(GenerationError::new(
                GenerationErrorKind::ResourceExhausted,
            )),
        );
        assert_eq!(*scene.state(), SceneState::Failed);
        assert_eq!(scene.video_variants().len(), 1);
        assert!(scene.last_error().as_ref().unwrap().is_resource_exhausted());
    }

    #[test]
    fn edit_out_of_failed_clears_error_and_keeps_artifacts() {
        let mut scene = draft_scene();
        scene.confirm().unwrap();
        let ticket = scene.begin_generation(GenerationKind::StillImage).unwrap();
        scene.complete_generation(
            ticket,
            GenerationOutcome::StillImage(melies_core::StillImage::new("s3://img")),
        );
        let ticket = scene
            .begin_generation(GenerationKind::Video { alternative: false })
            .unwrap();
        scene.complete_generation(
            ticket,
            GenerationOutcome::Failure(GenerationError::new(
                GenerationErrorKind::ResourceExhausted,
            )),
        );

        scene.edit("a clearer harbor at dawn").unwrap();
        assert_eq!(*scene.state(), SceneState::Draft);
        assert!(scene.last_error().is_none());
        // The still image survives until a later generation replaces it.
        assert!(scene.still_image().is_some());
    }

    #[test]
    fn approve_without_artifact_is_precondition_error() {
        let mut scene = draft_scene();
        scene.confirm().unwrap();
        let err = scene.approve().unwrap_err();
        assert!(matches!(err.kind, SceneErrorKind::Precondition(_)));
        assert_eq!(*scene.state(), SceneState::Confirmed);
    }

    #[test]
    fn approve_and_unapprove_round_trip() {
        let mut scene = draft_scene();
        scene.confirm().unwrap();
        let ticket = scene.begin_generation(GenerationKind::StillImage).unwrap();
        scene.complete_generation(
            ticket,
            GenerationOutcome::StillImage(melies_core::StillImage::new("s3://img")),
        );
        scene.approve().unwrap();
        assert_eq!(*scene.state(), SceneState::Approved);
        scene.unapprove().unwrap();
        assert_eq!(*scene.state(), SceneState::Ready);
    }

    #[test]
    fn reassemble_normalizes_generating_to_failed() {
        let scene = Scene::reassemble(
            SceneId::new(),
            2,
            "narration".to_string(),
            "description".to_string(),
            SceneState::Generating,
            Vec::new(),
            None,
            None,
        );
        assert_eq!(*scene.state(), SceneState::Failed);
        assert!(scene.last_error().is_some());
    }
}
