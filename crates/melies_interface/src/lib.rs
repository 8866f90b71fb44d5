//! Trait definitions for the Melies media production pipeline.
//!
//! This crate provides the narrow seams to the external collaborators: the
//! generation capability, the narration voice, and the script generator.
//! Everything behind these traits is request/response; nothing streams.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod script;
mod traits;

pub use script::{ScriptGenerator, ScriptRequest, ScriptRequestBuilder, ScriptRequestBuilderError};
pub use traits::{CapabilityGateway, NarrationVoice};
