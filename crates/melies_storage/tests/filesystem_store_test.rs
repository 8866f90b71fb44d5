//! Round-trip tests for the filesystem project store.

use melies_core::{AudioSelection, AudioTrack, ProjectSettings, StillImage, VideoVariant};
use melies_error::MeliesErrorKind;
use melies_scene::{SceneId, SceneState};
use melies_storage::{
    FilesystemProjectStore, GenerationFailureSnapshot, ProjectSnapshot, ProjectStore,
    SceneSnapshot,
};
use uuid::Uuid;

fn temp_store() -> (FilesystemProjectStore, std::path::PathBuf) {
    let dir = std::env::temp_dir().join(format!("melies_store_test_{}", Uuid::new_v4()));
    let store = FilesystemProjectStore::new(&dir).unwrap();
    (store, dir)
}

fn sample_snapshot() -> ProjectSnapshot {
    let settings = ProjectSettings::builder()
        .topic("glassblowing")
        .build()
        .unwrap();
    let scenes = vec![
        SceneSnapshot {
            id: SceneId::new(),
            ordinal: 0,
            narration: "The furnace glows.".to_string(),
            visual_description: "Molten glass on a blowpipe.".to_string(),
            state: SceneState::Approved,
            video_variants: vec![VideoVariant::new("s3://v0", false)],
            still_image: None,
            last_error: None,
        },
        SceneSnapshot {
            id: SceneId::new(),
            ordinal: 1,
            narration: "A vase takes shape.".to_string(),
            visual_description: "Spinning glass, workshop light.".to_string(),
            state: SceneState::Generating,
            video_variants: Vec::new(),
            still_image: Some(StillImage::new("s3://i1")),
            last_error: Some(GenerationFailureSnapshot::ResourceExhausted),
        },
    ];
    ProjectSnapshot::new(
        settings,
        Some(AudioSelection::Track(AudioTrack::new("lib-7", "Ember"))),
        scenes,
    )
}

#[tokio::test]
async fn save_load_round_trip() {
    let (store, dir) = temp_store();
    let snapshot = sample_snapshot();

    store.save("p1", &snapshot).await.unwrap();
    assert!(store.exists("p1").await.unwrap());

    let loaded = store.load("p1").await.unwrap();
    assert_eq!(loaded, snapshot);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn load_missing_project_is_not_found() {
    let (store, dir) = temp_store();
    let err = store.load("nope").await.unwrap_err();
    assert!(matches!(err.kind(), MeliesErrorKind::Storage(_)));
    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn delete_removes_the_snapshot() {
    let (store, dir) = temp_store();
    store.save("p2", &sample_snapshot()).await.unwrap();
    store.delete("p2").await.unwrap();
    assert!(!store.exists("p2").await.unwrap());
    // Deleting again is a no-op.
    store.delete("p2").await.unwrap();
    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn reloaded_generating_scene_becomes_failed() {
    let (store, dir) = temp_store();
    store.save("p3", &sample_snapshot()).await.unwrap();

    let loaded = store.load("p3").await.unwrap();
    let scenes: Vec<_> = loaded
        .scenes
        .into_iter()
        .map(SceneSnapshot::into_scene)
        .collect();

    assert_eq!(*scenes[0].state(), SceneState::Approved);
    assert_eq!(*scenes[1].state(), SceneState::Failed);
    assert!(scenes[1].last_error().is_some());
    // Artifacts survive the reload untouched.
    assert!(scenes[1].still_image().is_some());

    std::fs::remove_dir_all(&dir).ok();
}
