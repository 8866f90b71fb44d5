//! Orchestrator-level tests: script import, readiness, and the full
//! two-scene recovery scenario.

use async_trait::async_trait;
use melies_core::{
    AspectRatio, AudioSelection, AudioTrack, ImageAnalysis, MediaSource, ProjectSettings,
    ScriptScene, StillImage, VariantCount, VideoVariant,
};
use melies_error::{GenerationError, GenerationErrorKind, MeliesErrorKind, ProjectErrorKind};
use melies_interface::{CapabilityGateway, ScriptGenerator, ScriptRequest};
use melies_project::{Project, ProjectLimits, ProjectPhase, RecoveryOutcome};
use melies_scene::{RecoveryAction, SceneState};
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// Gateway with a scripted queue of video outcomes; still images and the
/// other capabilities always succeed.
struct ScriptedGateway {
    video_outcomes: Mutex<VecDeque<Result<(), GenerationError>>>,
}

impl ScriptedGateway {
    fn new(outcomes: impl IntoIterator<Item = Result<(), GenerationError>>) -> Self {
        Self {
            video_outcomes: Mutex::new(outcomes.into_iter().collect()),
        }
    }
}

#[async_trait]
impl CapabilityGateway for ScriptedGateway {
    async fn generate_still_image(&self, _description: &str) -> Result<StillImage, GenerationError> {
        Ok(StillImage::new("s3://still"))
    }

    async fn generate_video_variants(
        &self,
        _description: &str,
        variant_count: VariantCount,
        _aspect_ratio: AspectRatio,
        alternative: bool,
    ) -> Result<Vec<VideoVariant>, GenerationError> {
        let next = self
            .video_outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or(Ok(()));
        next.map(|_| {
            (0..variant_count.as_u8())
                .map(|i| VideoVariant::new(format!("s3://video/{i}"), alternative))
                .collect()
        })
    }

    async fn describe_music(&self, prompt: &str) -> Result<String, GenerationError> {
        Ok(format!("{prompt}, but slower"))
    }

    async fn analyze_reference_image(
        &self,
        _image: &MediaSource,
        focus: Option<&str>,
    ) -> Result<ImageAnalysis, GenerationError> {
        Ok(ImageAnalysis {
            text: format!("analysis focused on {}", focus.unwrap_or("the whole image")),
            sources: vec!["https://example.com/source".to_string()],
        })
    }
}

struct FixedScript(Vec<ScriptScene>);

#[async_trait]
impl ScriptGenerator for FixedScript {
    async fn generate_script(
        &self,
        _request: &ScriptRequest,
    ) -> melies_error::MeliesResult<Vec<ScriptScene>> {
        Ok(self.0.clone())
    }
}

fn two_scene_script() -> Vec<ScriptScene> {
    vec![
        ScriptScene::new("The harbor wakes.", "Fishing boats at dawn, mist."),
        ScriptScene::new("Nets are cast.", "Wide shot of nets hitting the water."),
    ]
}

fn settings() -> ProjectSettings {
    ProjectSettings::builder()
        .topic("a fishing village")
        .duration_seconds(40u32)
        .build()
        .unwrap()
}

fn settings_with_reference() -> ProjectSettings {
    ProjectSettings::builder()
        .topic("a fishing village")
        .duration_seconds(40u32)
        .reference_image(Some(MediaSource::Url(
            "https://example.com/harbor.png".to_string(),
        )))
        .build()
        .unwrap()
}

async fn confirm_all(project: &Project) {
    for slot in project.scenes() {
        slot.lock().await.confirm().unwrap();
    }
}

#[tokio::test]
async fn script_import_is_once_only() {
    let mut project = Project::new(settings(), ProjectLimits::default()).unwrap();
    let generator = FixedScript(two_scene_script());

    assert_eq!(project.phase().await, ProjectPhase::Empty);
    let count = project.initialize_from_script(&generator).await.unwrap();
    assert_eq!(count, 2);
    assert_eq!(project.phase().await, ProjectPhase::InProgress);

    let err = project.initialize_from_script(&generator).await.unwrap_err();
    match err.kind() {
        MeliesErrorKind::Project(project_err) => {
            assert_eq!(project_err.kind, ProjectErrorKind::AlreadyInitialized);
        }
        other => panic!("unexpected error kind: {other}"),
    }
    // The scene collection is untouched by the rejected call.
    assert_eq!(project.scenes().len(), 2);
}

#[tokio::test]
async fn empty_script_is_rejected() {
    let mut project = Project::new(settings(), ProjectLimits::default()).unwrap();
    let err = project
        .initialize_from_script(&FixedScript(Vec::new()))
        .await
        .unwrap_err();
    match err.kind() {
        MeliesErrorKind::Project(project_err) => {
            assert_eq!(project_err.kind, ProjectErrorKind::EmptyScript);
        }
        other => panic!("unexpected error kind: {other}"),
    }
}

#[tokio::test]
async fn settings_freeze_once_scenes_exist() {
    let mut project = Project::new(settings(), ProjectLimits::default()).unwrap();
    project
        .add_scenes_from_script(two_scene_script())
        .unwrap();

    let err = project
        .update_settings(|s| s.set_watermark(true))
        .unwrap_err();
    match err.kind() {
        MeliesErrorKind::Project(project_err) => {
            assert!(matches!(project_err.kind, ProjectErrorKind::SettingsLocked(_)));
        }
        other => panic!("unexpected error kind: {other}"),
    }

    // Watermark and audio keep their own always-open entry points.
    project.set_watermark(true);
    assert!(project.settings().watermark());
    project.set_audio_selection(AudioSelection::Track(AudioTrack::new("lib-1", "Brine")));
}

#[tokio::test]
async fn readiness_tracks_approvals_and_audio() {
    let mut project = Project::new(settings(), ProjectLimits::default()).unwrap();
    project.add_scenes_from_script(two_scene_script()).unwrap();
    confirm_all(&project).await;

    let gateway = ScriptedGateway::new([Ok(()), Ok(())]);
    project.generate_scene_video(0, &gateway).await.unwrap();
    project.generate_scene_video(1, &gateway).await.unwrap();
    for slot in project.scenes() {
        slot.lock().await.approve().unwrap();
    }
    assert!(!project.compute_readiness().await);

    project.set_audio_selection(AudioSelection::Track(AudioTrack::new("lib-2", "Gulls")));
    assert!(project.compute_readiness().await);
    assert_eq!(project.phase().await, ProjectPhase::ReadyToCompose);

    // Unapproving any one scene flips the gate immediately.
    project.scenes()[1].lock().await.unapprove().unwrap();
    assert!(!project.compute_readiness().await);
    assert_eq!(project.phase().await, ProjectPhase::InProgress);

    // So does clearing the audio selection.
    project.scenes()[1].lock().await.approve().unwrap();
    assert!(project.compute_readiness().await);
    project.clear_audio_selection();
    assert!(!project.compute_readiness().await);
}

#[tokio::test]
async fn music_description_does_not_open_the_gate() {
    let mut project = Project::new(settings(), ProjectLimits::default()).unwrap();
    project.add_scenes_from_script(two_scene_script()).unwrap();
    confirm_all(&project).await;

    let gateway = ScriptedGateway::new([Ok(()), Ok(())]);
    for position in 0..2 {
        project.generate_scene_video(position, &gateway).await.unwrap();
        project.scenes()[position].lock().await.approve().unwrap();
    }

    let description = project.describe_music("sea shanty", &gateway).await.unwrap();
    assert!(description.contains("sea shanty"));
    assert!(!project.compute_readiness().await);
}

#[tokio::test]
async fn two_scene_recovery_scenario() {
    let mut project = Project::new(settings(), ProjectLimits::default()).unwrap();
    project.add_scenes_from_script(two_scene_script()).unwrap();
    confirm_all(&project).await;

    // Scene 1 succeeds; scene 2 hits capacity exhaustion.
    let gateway = ScriptedGateway::new([
        Ok(()),
        Err(GenerationError::new(GenerationErrorKind::ResourceExhausted)),
    ]);

    let state = project.generate_scene_video(0, &gateway).await.unwrap();
    assert_eq!(state, SceneState::Ready);
    let state = project.generate_scene_video(1, &gateway).await.unwrap();
    assert_eq!(state, SceneState::Failed);
    assert!(!project.compute_readiness().await);

    // No reference image: exactly two recovery actions.
    let offered = project.recovery_options(1).await.unwrap();
    assert_eq!(
        offered,
        vec![
            RecoveryAction::RetryAlternativeVideo,
            RecoveryAction::FallBackToStillImage,
        ]
    );

    project.scenes()[0].lock().await.approve().unwrap();
    assert!(!project.compute_readiness().await);

    // Fall back to a still image for scene 2 and approve it.
    let outcome = project
        .recover(1, RecoveryAction::FallBackToStillImage, &gateway, None)
        .await
        .unwrap();
    match outcome {
        RecoveryOutcome::Generation(state) => assert_eq!(state, SceneState::Ready),
        RecoveryOutcome::Analysis(_) => panic!("expected a generation outcome"),
    }
    project.scenes()[1].lock().await.approve().unwrap();
    assert!(!project.compute_readiness().await);

    project.set_audio_selection(AudioSelection::Track(AudioTrack::new("lib-3", "Moorings")));
    assert!(project.compute_readiness().await);
}

#[tokio::test]
async fn reference_image_unlocks_analysis_action() {
    let mut project = Project::new(settings_with_reference(), ProjectLimits::default()).unwrap();
    project.add_scenes_from_script(two_scene_script()).unwrap();
    confirm_all(&project).await;

    let gateway = ScriptedGateway::new([Err(GenerationError::new(
        GenerationErrorKind::ResourceExhausted,
    ))]);
    project.generate_scene_video(0, &gateway).await.unwrap();

    let offered = project.recovery_options(0).await.unwrap();
    assert_eq!(offered.len(), 3);
    assert_eq!(offered[2], RecoveryAction::AnalyzeReferenceImage);

    // The analysis is informational: state stays Failed and artifacts stay put.
    let outcome = project
        .recover(0, RecoveryAction::AnalyzeReferenceImage, &gateway, Some("the boats"))
        .await
        .unwrap();
    match outcome {
        RecoveryOutcome::Analysis(analysis) => {
            assert!(analysis.text.contains("the boats"));
            assert!(!analysis.sources.is_empty());
        }
        RecoveryOutcome::Generation(_) => panic!("analysis must not generate"),
    }
    assert_eq!(*project.scenes()[0].lock().await.state(), SceneState::Failed);
}

#[tokio::test]
async fn alternative_retry_tags_its_variants() {
    let mut project = Project::new(settings(), ProjectLimits::default()).unwrap();
    project.add_scenes_from_script(two_scene_script()).unwrap();
    confirm_all(&project).await;

    let gateway = ScriptedGateway::new([
        Err(GenerationError::new(GenerationErrorKind::ResourceExhausted)),
        Ok(()),
    ]);
    project.generate_scene_video(0, &gateway).await.unwrap();

    let outcome = project
        .recover(0, RecoveryAction::RetryAlternativeVideo, &gateway, None)
        .await
        .unwrap();
    assert!(matches!(outcome, RecoveryOutcome::Generation(SceneState::Ready)));

    let scene = project.scenes()[0].lock().await;
    assert!(scene.video_variants().iter().all(|v| v.alternative));
}

#[tokio::test]
async fn reset_discards_scenes_and_audio() {
    let mut project = Project::new(settings(), ProjectLimits::default()).unwrap();
    project.add_scenes_from_script(two_scene_script()).unwrap();
    project.set_audio_selection(AudioSelection::Track(AudioTrack::new("lib-4", "Slack Tide")));

    project.reset();
    assert_eq!(project.phase().await, ProjectPhase::Empty);
    assert!(project.audio().is_none());

    // Settings unlock and a fresh script import is allowed again.
    project.update_settings(|s| s.set_watermark(true)).unwrap();
    project.add_scenes_from_script(two_scene_script()).unwrap();
    assert_eq!(project.scenes().len(), 2);
}

#[tokio::test]
async fn snapshot_round_trip_fails_in_flight_scenes() {
    let mut project = Project::new(settings(), ProjectLimits::default()).unwrap();
    project.add_scenes_from_script(two_scene_script()).unwrap();
    confirm_all(&project).await;

    let gateway = ScriptedGateway::new([Ok(())]);
    project.generate_scene_video(0, &gateway).await.unwrap();
    project.scenes()[0].lock().await.approve().unwrap();

    // Capture scene 2 mid-generation.
    project.scenes()[1]
        .lock()
        .await
        .begin_generation(melies_scene::GenerationKind::Video { alternative: false })
        .unwrap();
    let snapshot = project.snapshot().await;

    let restored = Project::restore(snapshot, ProjectLimits::default()).unwrap();
    assert_eq!(*restored.scenes()[0].lock().await.state(), SceneState::Approved);
    assert_eq!(*restored.scenes()[1].lock().await.state(), SceneState::Failed);
    assert!(!restored.compute_readiness().await);

    // A second import on the restored aggregate is still rejected.
    let mut restored = restored;
    let err = restored
        .add_scenes_from_script(two_scene_script())
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        MeliesErrorKind::Project(p) if p.kind == ProjectErrorKind::AlreadyInitialized
    ));
}

#[tokio::test]
async fn generation_before_script_import_reports_no_scenes() {
    let project = Project::new(settings(), ProjectLimits::default()).unwrap();
    let gateway = ScriptedGateway::new([]);
    let err = project.generate_scene_video(0, &gateway).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        MeliesErrorKind::Project(p) if p.kind == ProjectErrorKind::NoScenes
    ));
}

#[tokio::test]
async fn duration_outside_limits_is_rejected() {
    let too_long = ProjectSettings::builder()
        .topic("marathon cut")
        .duration_seconds(4000u32)
        .build()
        .unwrap();
    let err = Project::new(too_long, ProjectLimits::default()).unwrap_err();
    assert!(matches!(
        err.kind(),
        MeliesErrorKind::Project(p) if matches!(p.kind, ProjectErrorKind::Validation(_))
    ));
}
