//! Async generation drivers.
//!
//! A scene lives behind a per-scene async mutex. The drivers lock only to
//! admit and to resolve a generation call, never across the gateway await,
//! so a second driver invocation for the same scene observes `Generating`
//! and is rejected with `ConcurrentGeneration`, while drivers for different
//! scenes run freely in parallel.

use crate::{GenerationKind, GenerationOutcome, Scene, SceneState};
use melies_core::{AspectRatio, VariantCount};
use melies_error::{GenerationError, GenerationErrorKind, MeliesResult};
use melies_interface::{CapabilityGateway, NarrationVoice};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Shared handle to one scene.
pub type SceneSlot = Arc<Mutex<Scene>>;

/// Wrap a scene in a shareable slot.
pub fn slot(scene: Scene) -> SceneSlot {
    Arc::new(Mutex::new(scene))
}

/// Drive a video generation call for one scene.
///
/// On upstream failure the error is recorded on the scene and the scene
/// moves to `Failed`; the returned state tells the caller what happened.
/// A blank description at call time is recorded as an `EmptyPrompt`
/// generation failure without contacting the gateway.
///
/// # Errors
///
/// Only sequencing errors escape: issuing this while a call is already in
/// flight yields `ConcurrentGeneration`, and calling from a state that
/// cannot generate yields `InvalidState`.
#[tracing::instrument(skip(slot, gateway))]
pub async fn generate_video(
    slot: &SceneSlot,
    gateway: &dyn CapabilityGateway,
    variant_count: VariantCount,
    aspect_ratio: AspectRatio,
    alternative: bool,
) -> MeliesResult<SceneState> {
    let kind = GenerationKind::Video { alternative };
    let (ticket, description) = {
        let mut scene = slot.lock().await;
        let ticket = scene.begin_generation(kind)?;
        (ticket, scene.visual_description().clone())
    };

    let outcome = if description.trim().is_empty() {
        GenerationOutcome::Failure(GenerationError::new(GenerationErrorKind::EmptyPrompt))
    } else {
        match gateway
            .generate_video_variants(&description, variant_count, aspect_ratio, alternative)
            .await
        {
            Ok(variants) => GenerationOutcome::Video(variants),
            Err(error) => GenerationOutcome::Failure(error),
        }
    };

    let mut scene = slot.lock().await;
    Ok(scene.complete_generation(ticket, outcome))
}

/// Drive a still-image generation call for one scene.
///
/// Same shape as [`generate_video`]; replaces only the still image.
///
/// # Errors
///
/// Only sequencing errors escape, as for [`generate_video`].
#[tracing::instrument(skip(slot, gateway))]
pub async fn generate_still_image(
    slot: &SceneSlot,
    gateway: &dyn CapabilityGateway,
) -> MeliesResult<SceneState> {
    let (ticket, description) = {
        let mut scene = slot.lock().await;
        let ticket = scene.begin_generation(GenerationKind::StillImage)?;
        (ticket, scene.visual_description().clone())
    };

    let outcome = if description.trim().is_empty() {
        GenerationOutcome::Failure(GenerationError::new(GenerationErrorKind::EmptyPrompt))
    } else {
        match gateway.generate_still_image(&description).await {
            Ok(image) => GenerationOutcome::StillImage(image),
            Err(error) => GenerationOutcome::Failure(error),
        }
    };

    let mut scene = slot.lock().await;
    Ok(scene.complete_generation(ticket, outcome))
}

/// Speak a scene's narration text.
///
/// Side-effect only: reads the narration under the lock, then releases it
/// before speaking, so narration never blocks or is blocked by a generation
/// call for the same scene.
///
/// # Errors
///
/// Voice failures are reported to the caller; scene state is unaffected.
#[tracing::instrument(skip(slot, voice))]
pub async fn narrate(slot: &SceneSlot, voice: &dyn NarrationVoice) -> MeliesResult<()> {
    let text = {
        let scene = slot.lock().await;
        scene.narration().clone()
    };
    debug!(chars = text.len(), "Narrating scene");
    voice.narrate(&text).await?;
    Ok(())
}
