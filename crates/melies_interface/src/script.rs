//! Script generator trait and request type.

use async_trait::async_trait;
use melies_core::{MediaSource, ProjectKind, ScriptScene};
use melies_error::MeliesResult;
use serde::{Deserialize, Serialize};

/// Inputs to the upstream script generator.
///
/// # Examples
///
/// ```
/// use melies_interface::ScriptRequest;
/// use melies_core::ProjectKind;
///
/// let request = ScriptRequest::builder()
///     .topic("How tide pools form")
///     .duration_seconds(60u32)
///     .kind(ProjectKind::General)
///     .build()
///     .unwrap();
/// assert_eq!(request.topic(), "How tide pools form");
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters, derive_builder::Builder,
)]
pub struct ScriptRequest {
    /// What the video is about
    #[builder(setter(into))]
    topic: String,
    /// Optional reference image grounding the script
    #[builder(default)]
    reference_image: Option<MediaSource>,
    /// Target duration of the finished video, in seconds
    #[builder(default = "30")]
    duration_seconds: u32,
    /// The kind of project being produced
    #[builder(default)]
    kind: ProjectKind,
}

impl ScriptRequest {
    /// Creates a new request builder.
    pub fn builder() -> ScriptRequestBuilder {
        ScriptRequestBuilder::default()
    }
}

/// The natural-language script generator that turns a topic into scene text.
///
/// Called exactly once per project by the orchestrator.
#[async_trait]
pub trait ScriptGenerator: Send + Sync {
    /// Generate the ordered scene script for a project.
    async fn generate_script(&self, request: &ScriptRequest) -> MeliesResult<Vec<ScriptScene>>;
}
