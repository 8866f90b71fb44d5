//! Capability gateway trait definitions.

use async_trait::async_trait;
use melies_core::{AspectRatio, ImageAnalysis, MediaSource, StillImage, VariantCount, VideoVariant};
use melies_error::GenerationError;

/// The generation capability consumed by the pipeline.
///
/// Every call is request/response and may fail with a typed
/// [`GenerationError`]. Capacity exhaustion surfaces as
/// `GenerationErrorKind::ResourceExhausted` on the individual call; there
/// is no gateway-wide exhaustion state, so each scene reacts independently.
#[async_trait]
pub trait CapabilityGateway: Send + Sync {
    /// Generate a single still image from a visual description.
    async fn generate_still_image(
        &self,
        description: &str,
    ) -> Result<StillImage, GenerationError>;

    /// Generate one or two video renderings of a visual description.
    ///
    /// `alternative` tags the request as a retry so the upstream system may
    /// vary its internal strategy; the produced variants carry the flag.
    async fn generate_video_variants(
        &self,
        description: &str,
        variant_count: VariantCount,
        aspect_ratio: AspectRatio,
        alternative: bool,
    ) -> Result<Vec<VideoVariant>, GenerationError>;

    /// Produce an advisory music description for a prompt.
    ///
    /// The result is text, not playable audio; it never satisfies the
    /// composition gate.
    async fn describe_music(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Grounded, read-only analysis of the project's reference image.
    ///
    /// Not a generation call: the result is displayed alongside recovery
    /// options and changes no scene state.
    async fn analyze_reference_image(
        &self,
        image: &MediaSource,
        focus: Option<&str>,
    ) -> Result<ImageAnalysis, GenerationError>;
}

/// Text-to-speech of narration text.
///
/// Fire-and-forget: touches no scene state and never participates in the
/// per-scene generation mutual exclusion.
#[async_trait]
pub trait NarrationVoice: Send + Sync {
    /// Speak the given narration text.
    async fn narrate(&self, text: &str) -> Result<(), GenerationError>;
}
