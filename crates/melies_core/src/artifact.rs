//! Generated artifact references.
//!
//! Artifacts are produced by the capability gateway and attached to scenes.
//! A scene may hold video variants and a still image at the same time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of up to two independently generated video renderings for a scene.
///
/// # Examples
///
/// ```
/// use melies_core::VideoVariant;
///
/// let variant = VideoVariant::new("https://cdn.example.com/v1.mp4", false);
/// assert!(!variant.alternative);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoVariant {
    /// Unique identifier for this rendering
    pub id: Uuid,
    /// Backend location of the rendered video
    pub uri: String,
    /// Whether this rendering came from an alternative-strategy retry
    pub alternative: bool,
}

impl VideoVariant {
    /// Create a new variant reference with a fresh id.
    pub fn new(uri: impl Into<String>, alternative: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            uri: uri.into(),
            alternative,
        }
    }
}

/// A generated still image attached to a scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StillImage {
    /// Unique identifier for this image
    pub id: Uuid,
    /// Backend location of the image
    pub uri: String,
}

impl StillImage {
    /// Create a new still image reference with a fresh id.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            uri: uri.into(),
        }
    }
}

/// Grounded analysis of a project's reference image.
///
/// Informational only: displayed alongside recovery options and dismissed
/// without affecting scene state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    /// The analysis text
    pub text: String,
    /// Citations backing the analysis
    pub sources: Vec<String>,
}
