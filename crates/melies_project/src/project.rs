//! The project orchestrator.

use crate::{ProjectLimits, gate};
use melies_core::{AudioSelection, ImageAnalysis, ProjectSettings, ScriptScene};
use melies_error::{MeliesResult, ProjectError, ProjectErrorKind};
use melies_interface::{CapabilityGateway, NarrationVoice, ScriptGenerator, ScriptRequest};
use melies_scene::driver::{self, SceneSlot};
use melies_scene::{
    ProjectAttributes, RecoveryAction, Scene, SceneId, SceneState, recovery_actions,
};
use melies_storage::{ProjectSnapshot, SceneSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Project-level lifecycle phase, derived from scene count and the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum ProjectPhase {
    /// No scenes yet
    Empty,
    /// Scenes exist but the composition gate is false
    InProgress,
    /// Every scene approved and an audio track selected
    ReadyToCompose,
}

/// What a recovery action produced.
#[derive(Debug)]
pub enum RecoveryOutcome {
    /// A generation call ran; the scene ended in this state
    Generation(SceneState),
    /// The informational reference-image analysis; scene state unchanged
    Analysis(ImageAnalysis),
}

/// Owns the ordered scene collection and project-level settings.
///
/// The orchestrator is the single entry point for the two project-wide
/// shared mutable values (the audio selection and the derived readiness),
/// so the composition gate always sees a consistent read.
///
/// # Examples
///
/// ```
/// use melies_core::ProjectSettings;
/// use melies_project::{Project, ProjectLimits};
///
/// let settings = ProjectSettings::builder().topic("tide pools").build().unwrap();
/// let project = Project::new(settings, ProjectLimits::default()).unwrap();
/// assert!(project.scenes().is_empty());
/// ```
#[derive(Debug)]
pub struct Project {
    settings: ProjectSettings,
    limits: ProjectLimits,
    scenes: Vec<SceneSlot>,
    audio: Option<AudioSelection>,
    script_imported: bool,
}

impl Project {
    /// Create a new, empty project.
    ///
    /// # Errors
    ///
    /// `Validation` if the topic is blank or the duration is outside the
    /// configured bounds.
    pub fn new(settings: ProjectSettings, limits: ProjectLimits) -> MeliesResult<Self> {
        Self::validate_settings(&settings, &limits)?;
        Ok(Self {
            settings,
            limits,
            scenes: Vec::new(),
            audio: None,
            script_imported: false,
        })
    }

    fn validate_settings(settings: &ProjectSettings, limits: &ProjectLimits) -> MeliesResult<()> {
        if settings.topic().trim().is_empty() {
            return Err(ProjectError::new(ProjectErrorKind::Validation(
                "topic cannot be empty".to_string(),
            ))
            .into());
        }
        let duration = *settings.duration_seconds();
        if duration < *limits.min_duration_seconds() || duration > *limits.max_duration_seconds() {
            return Err(ProjectError::new(ProjectErrorKind::Validation(format!(
                "duration {}s is outside the allowed range {}..={}s",
                duration,
                limits.min_duration_seconds(),
                limits.max_duration_seconds()
            )))
            .into());
        }
        Ok(())
    }

    /// The project settings.
    pub fn settings(&self) -> &ProjectSettings {
        &self.settings
    }

    /// The configured limits.
    pub fn limits(&self) -> &ProjectLimits {
        &self.limits
    }

    /// The ordered scene slots.
    pub fn scenes(&self) -> &[SceneSlot] {
        &self.scenes
    }

    /// The active audio selection.
    pub fn audio(&self) -> Option<&AudioSelection> {
        self.audio.as_ref()
    }

    /// The scene slot at a playback position.
    ///
    /// # Errors
    ///
    /// `NoScenes` if the project has no scenes yet; `Validation` if scenes
    /// exist but none at the position.
    pub fn scene(&self, position: usize) -> MeliesResult<&SceneSlot> {
        if self.scenes.is_empty() {
            return Err(ProjectError::new(ProjectErrorKind::NoScenes).into());
        }
        self.scenes.get(position).ok_or_else(|| {
            ProjectError::new(ProjectErrorKind::Validation(format!(
                "no scene at position {}",
                position
            )))
            .into()
        })
    }

    /// Generate the script and create the scene collection from it.
    ///
    /// Callable once per project; scene ordinals follow script order and
    /// never change afterwards.
    ///
    /// # Errors
    ///
    /// `AlreadyInitialized` on a second call, `EmptyScript` if the generator
    /// returns no scenes, `ScriptGeneration` if the generator fails, and
    /// `Validation` if the script exceeds the configured scene limit.
    #[tracing::instrument(skip(self, generator))]
    pub async fn initialize_from_script(
        &mut self,
        generator: &dyn ScriptGenerator,
    ) -> MeliesResult<usize> {
        if self.script_imported {
            return Err(ProjectError::new(ProjectErrorKind::AlreadyInitialized).into());
        }
        let mut request = ScriptRequest::builder();
        request
            .topic(self.settings.topic().clone())
            .duration_seconds(*self.settings.duration_seconds())
            .kind(*self.settings.kind());
        if let Some(image) = self.settings.reference_image() {
            request.reference_image(Some(image.clone()));
        }
        let request = request.build().map_err(|e| {
            ProjectError::new(ProjectErrorKind::ScriptGeneration(e.to_string()))
        })?;

        let script = generator.generate_script(&request).await.map_err(|e| {
            ProjectError::new(ProjectErrorKind::ScriptGeneration(e.to_string()))
        })?;
        self.add_scenes_from_script(script)
    }

    /// Create the scene collection from an already-generated script.
    ///
    /// # Errors
    ///
    /// Same contract as [`Project::initialize_from_script`], minus the
    /// generator call.
    #[tracing::instrument(skip(self, script), fields(scene_count = script.len()))]
    pub fn add_scenes_from_script(&mut self, script: Vec<ScriptScene>) -> MeliesResult<usize> {
        if self.script_imported {
            return Err(ProjectError::new(ProjectErrorKind::AlreadyInitialized).into());
        }
        if script.is_empty() {
            return Err(ProjectError::new(ProjectErrorKind::EmptyScript).into());
        }
        if script.len() > *self.limits.max_scenes() {
            return Err(ProjectError::new(ProjectErrorKind::Validation(format!(
                "script has {} scenes; at most {} are allowed",
                script.len(),
                self.limits.max_scenes()
            )))
            .into());
        }

        let count = script.len();
        self.scenes = script
            .into_iter()
            .enumerate()
            .map(|(ordinal, scene)| {
                driver::slot(Scene::new(
                    SceneId::new(),
                    ordinal as u32,
                    scene.narration,
                    scene.visual_description,
                ))
            })
            .collect();
        self.script_imported = true;
        info!(scenes = count, "Project scenes created from script");
        Ok(count)
    }

    /// Mutate settings while the project is still empty.
    ///
    /// # Errors
    ///
    /// `SettingsLocked` once scenes exist. The audio selection and the
    /// watermark flag have their own entry points and stay mutable.
    pub fn update_settings(
        &mut self,
        mutate: impl FnOnce(&mut ProjectSettings),
    ) -> MeliesResult<()> {
        if self.script_imported {
            return Err(ProjectError::new(ProjectErrorKind::SettingsLocked(
                "scene generation has started".to_string(),
            ))
            .into());
        }
        mutate(&mut self.settings);
        Self::validate_settings(&self.settings, &self.limits)
    }

    /// Toggle the watermark flag. Allowed at any time.
    pub fn set_watermark(&mut self, on: bool) {
        self.settings.set_watermark(on);
    }

    /// Replace the project-wide audio selection.
    #[tracing::instrument(skip(self, selection))]
    pub fn set_audio_selection(&mut self, selection: AudioSelection) {
        debug!(is_track = selection.track().is_some(), "Audio selection replaced");
        self.audio = Some(selection);
    }

    /// Clear the audio selection.
    pub fn clear_audio_selection(&mut self) {
        self.audio = None;
    }

    /// Ask the music-idea capability for an advisory description and store
    /// it as the active selection.
    ///
    /// The stored description does not satisfy the composition gate; only an
    /// explicit track reference does.
    ///
    /// # Errors
    ///
    /// Propagates the capability failure; the previous selection is kept.
    #[tracing::instrument(skip(self, gateway, prompt))]
    pub async fn describe_music(
        &mut self,
        prompt: &str,
        gateway: &dyn CapabilityGateway,
    ) -> MeliesResult<String> {
        let description = gateway.describe_music(prompt).await?;
        self.audio = Some(AudioSelection::Description(description.clone()));
        Ok(description)
    }

    /// Grounded analysis of the project's reference image.
    ///
    /// Read-only and informational; changes no scene state.
    ///
    /// # Errors
    ///
    /// `Validation` if the project carries no reference image; otherwise the
    /// capability failure is propagated.
    pub async fn analyze_reference_image(
        &self,
        gateway: &dyn CapabilityGateway,
        focus: Option<&str>,
    ) -> MeliesResult<ImageAnalysis> {
        let image = self.settings.reference_image().as_ref().ok_or_else(|| {
            ProjectError::new(ProjectErrorKind::Validation(
                "project has no reference image".to_string(),
            ))
        })?;
        Ok(gateway.analyze_reference_image(image, focus).await?)
    }

    /// Drive a video generation call for the scene at `position`.
    ///
    /// # Errors
    ///
    /// Sequencing errors from the scene state machine, or `Validation` for
    /// an unknown position. Upstream failures are recorded on the scene.
    pub async fn generate_scene_video(
        &self,
        position: usize,
        gateway: &dyn CapabilityGateway,
    ) -> MeliesResult<SceneState> {
        let slot = self.scene(position)?;
        driver::generate_video(
            slot,
            gateway,
            *self.settings.variant_count(),
            *self.settings.aspect_ratio(),
            false,
        )
        .await
    }

    /// Drive a still-image generation call for the scene at `position`.
    ///
    /// # Errors
    ///
    /// Same contract as [`Project::generate_scene_video`].
    pub async fn generate_scene_still(
        &self,
        position: usize,
        gateway: &dyn CapabilityGateway,
    ) -> MeliesResult<SceneState> {
        let slot = self.scene(position)?;
        driver::generate_still_image(slot, gateway).await
    }

    /// Speak the narration of the scene at `position`.
    ///
    /// # Errors
    ///
    /// Voice failures are reported directly; scene state is unaffected.
    pub async fn narrate_scene(
        &self,
        position: usize,
        voice: &dyn NarrationVoice,
    ) -> MeliesResult<()> {
        let slot = self.scene(position)?;
        driver::narrate(slot, voice).await
    }

    /// The recovery actions currently offered for the scene at `position`.
    ///
    /// Empty unless the scene is `Failed` with a recorded capacity
    /// exhaustion.
    ///
    /// # Errors
    ///
    /// `Validation` for an unknown position.
    pub async fn recovery_options(&self, position: usize) -> MeliesResult<Vec<RecoveryAction>> {
        let slot = self.scene(position)?;
        let scene = slot.lock().await;
        let attributes = ProjectAttributes {
            has_reference_image: self.settings.has_reference_image(),
        };
        Ok(scene
            .last_error()
            .as_ref()
            .map(|error| recovery_actions(error, &attributes))
            .unwrap_or_default())
    }

    /// Invoke one recovery action for the scene at `position`.
    ///
    /// Generation actions re-enter the scene state machine; the analysis
    /// action is informational and leaves the scene untouched.
    ///
    /// # Errors
    ///
    /// Sequencing errors from the scene state machine, `Validation` for an
    /// unknown position or a missing reference image.
    #[tracing::instrument(skip(self, gateway, focus))]
    pub async fn recover(
        &self,
        position: usize,
        action: RecoveryAction,
        gateway: &dyn CapabilityGateway,
        focus: Option<&str>,
    ) -> MeliesResult<RecoveryOutcome> {
        match action {
            RecoveryAction::RetryAlternativeVideo => {
                let slot = self.scene(position)?;
                let state = driver::generate_video(
                    slot,
                    gateway,
                    *self.settings.variant_count(),
                    *self.settings.aspect_ratio(),
                    true,
                )
                .await?;
                Ok(RecoveryOutcome::Generation(state))
            }
            RecoveryAction::FallBackToStillImage => {
                let slot = self.scene(position)?;
                let state = driver::generate_still_image(slot, gateway).await?;
                Ok(RecoveryOutcome::Generation(state))
            }
            RecoveryAction::AnalyzeReferenceImage => {
                let analysis = self.analyze_reference_image(gateway, focus).await?;
                Ok(RecoveryOutcome::Analysis(analysis))
            }
        }
    }

    /// Recompute the composition gate from current state.
    ///
    /// Never cached: every call re-reads every scene's state and the audio
    /// selection.
    pub async fn compute_readiness(&self) -> bool {
        let states = self.scene_states().await;
        gate::composition_ready(&states, self.audio.as_ref())
    }

    /// The project-level phase, derived on demand.
    pub async fn phase(&self) -> ProjectPhase {
        if self.scenes.is_empty() {
            return ProjectPhase::Empty;
        }
        if self.compute_readiness().await {
            ProjectPhase::ReadyToCompose
        } else {
            ProjectPhase::InProgress
        }
    }

    async fn scene_states(&self) -> Vec<SceneState> {
        let mut states = Vec::with_capacity(self.scenes.len());
        for slot in &self.scenes {
            states.push(*slot.lock().await.state());
        }
        states
    }

    /// Discard all scenes and the audio selection, returning the project to
    /// its pre-script state with settings unlocked.
    ///
    /// Irreversible; upstream is expected to confirm explicitly.
    #[tracing::instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(discarded_scenes = self.scenes.len(), "Project reset");
        self.scenes.clear();
        self.audio = None;
        self.script_imported = false;
    }

    /// Capture a durable snapshot of the whole aggregate.
    pub async fn snapshot(&self) -> ProjectSnapshot {
        let mut scenes = Vec::with_capacity(self.scenes.len());
        for slot in &self.scenes {
            let scene = slot.lock().await;
            scenes.push(SceneSnapshot::from(&*scene));
        }
        ProjectSnapshot::new(self.settings.clone(), self.audio.clone(), scenes)
    }

    /// Rebuild a project from a snapshot.
    ///
    /// Scenes captured mid-generation come back as `Failed`; everything else
    /// reloads as captured.
    ///
    /// # Errors
    ///
    /// `Validation` if the captured settings no longer satisfy the limits.
    #[tracing::instrument(skip(snapshot, limits), fields(scenes = snapshot.scenes.len()))]
    pub fn restore(snapshot: ProjectSnapshot, limits: ProjectLimits) -> MeliesResult<Self> {
        Self::validate_settings(&snapshot.settings, &limits)?;
        let script_imported = !snapshot.scenes.is_empty();
        let scenes = snapshot
            .scenes
            .into_iter()
            .map(|scene| driver::slot(scene.into_scene()))
            .collect();
        Ok(Self {
            settings: snapshot.settings,
            limits,
            scenes,
            audio: snapshot.audio,
            script_imported,
        })
    }
}
