//! Aggregate snapshot persistence for Melies projects.
//!
//! The pipeline persists whole aggregates opaquely: a [`ProjectSnapshot`] is
//! the durable form of a project and its scenes, and a [`ProjectStore`]
//! backend saves and loads it without interpreting the contents. Scene
//! reconstruction (including the rule that an in-flight generation reloads
//! as failed) happens in the domain crates, not here.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod snapshot;
mod store;

pub use filesystem::FilesystemProjectStore;
pub use snapshot::{GenerationFailureSnapshot, ProjectSnapshot, SceneSnapshot};
pub use store::ProjectStore;
