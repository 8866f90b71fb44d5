//! Core data types for the Melies media production pipeline.
//!
//! This crate provides the foundation data types used across all Melies
//! interfaces: project settings, media sources, generated artifacts, audio
//! selection, and script scenes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod audio;
mod media;
mod script;
mod settings;
mod telemetry;

pub use artifact::{ImageAnalysis, StillImage, VideoVariant};
pub use audio::{AudioSelection, AudioTrack};
pub use media::MediaSource;
pub use script::ScriptScene;
pub use settings::{
    AspectRatio, ProjectKind, ProjectSettings, ProjectSettingsBuilder,
    ProjectSettingsBuilderError, VariantCount,
};
pub use telemetry::init_telemetry;
