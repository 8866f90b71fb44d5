//! Project settings and their enumerated options.

use crate::MediaSource;
use serde::{Deserialize, Serialize};

/// Supported output aspect ratios.
///
/// # Examples
///
/// ```
/// use melies_core::AspectRatio;
/// use std::str::FromStr;
///
/// assert_eq!(AspectRatio::Widescreen.to_string(), "16:9");
/// assert_eq!(AspectRatio::from_str("9:16").unwrap(), AspectRatio::Portrait);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum AspectRatio {
    /// 16:9 landscape
    #[default]
    #[strum(serialize = "16:9")]
    Widescreen,
    /// 9:16 vertical
    #[strum(serialize = "9:16")]
    Portrait,
    /// 1:1 square
    #[strum(serialize = "1:1")]
    Square,
    /// 4:3 classic
    #[strum(serialize = "4:3")]
    Standard,
}

/// How many video variants to request per scene.
///
/// The upstream capability supports at most two independent renderings of
/// the same description.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum VariantCount {
    /// Single rendering
    #[default]
    One,
    /// Two independent renderings
    Two,
}

impl VariantCount {
    /// Numeric value passed to the capability gateway.
    pub fn as_u8(&self) -> u8 {
        match self {
            VariantCount::One => 1,
            VariantCount::Two => 2,
        }
    }
}

/// The kind of project being produced.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum ProjectKind {
    /// General-purpose video
    #[default]
    General,
    /// Product or portfolio showcase
    Showcase,
}

/// Project-level settings captured from initial user input.
///
/// Settings are mutable only before scenes exist; once scene generation has
/// started the orchestrator freezes everything except the audio selection
/// and the watermark flag.
///
/// # Examples
///
/// ```
/// use melies_core::{AspectRatio, ProjectSettings, VariantCount};
///
/// let settings = ProjectSettings::builder()
///     .topic("A day in the life of a lighthouse keeper")
///     .duration_seconds(45u32)
///     .aspect_ratio(AspectRatio::Portrait)
///     .build()
///     .unwrap();
///
/// assert_eq!(*settings.duration_seconds(), 45);
/// assert_eq!(*settings.variant_count(), VariantCount::One);
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters, derive_builder::Builder,
)]
pub struct ProjectSettings {
    /// What the video is about
    #[builder(setter(into))]
    topic: String,
    /// Things the generated visuals must avoid
    #[builder(setter(into), default)]
    negative_constraints: String,
    /// Optional reference image grounding the visuals
    #[builder(default)]
    reference_image: Option<MediaSource>,
    /// Target duration of the finished video, in seconds
    #[builder(default = "30")]
    duration_seconds: u32,
    /// Output aspect ratio
    #[builder(default)]
    aspect_ratio: AspectRatio,
    /// How many video variants to request per scene
    #[builder(default)]
    variant_count: VariantCount,
    /// Whether the finished video carries a watermark
    #[builder(default)]
    watermark: bool,
    /// The kind of project being produced
    #[builder(default)]
    kind: ProjectKind,
}

impl ProjectSettings {
    /// Creates a new settings builder.
    pub fn builder() -> ProjectSettingsBuilder {
        ProjectSettingsBuilder::default()
    }

    /// Whether a project-level reference image was supplied.
    pub fn has_reference_image(&self) -> bool {
        self.reference_image.is_some()
    }

    /// Toggle the watermark flag.
    ///
    /// The watermark and the audio selection are the only settings that stay
    /// mutable after scene generation has started; the orchestrator guards
    /// everything else.
    pub fn set_watermark(&mut self, on: bool) {
        self.watermark = on;
    }
}
