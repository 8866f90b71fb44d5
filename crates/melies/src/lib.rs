//! Melies - Multi-Scene Media Production Pipeline
//!
//! Melies orchestrates the production of short multi-scene videos: a project
//! is decomposed into an ordered sequence of scenes, each scene progresses
//! independently through a confirmation → generation → review → approval
//! lifecycle, capacity-exhaustion failures are routed to a declarative
//! fallback policy, and a final composition step is gated on every scene
//! reaching approval plus an explicit audio track selection.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use melies::{Project, ProjectLimits, ProjectSettings};
//!
//! #[tokio::main]
//! async fn main() -> melies::MeliesResult<()> {
//!     let settings = ProjectSettings::builder()
//!         .topic("How tide pools form")
//!         .duration_seconds(45u32)
//!         .build()
//!         .unwrap();
//!     let mut project = Project::new(settings, ProjectLimits::load()?)?;
//!     project.initialize_from_script(&my_script_generator).await?;
//!     // ... confirm scenes, generate, approve, select audio ...
//!     assert!(project.compute_readiness().await);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Melies is organized as a workspace with focused crates:
//!
//! - `melies_error` - Error types
//! - `melies_core` - Core data types (settings, artifacts, audio selection)
//! - `melies_interface` - Capability gateway and script generator traits
//! - `melies_scene` - Scene state machine and fallback policy engine
//! - `melies_storage` - Aggregate snapshot persistence
//! - `melies_project` - Project orchestrator and composition gate
//!
//! This crate (`melies`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use melies_core::*;
pub use melies_error::*;
pub use melies_interface::*;
pub use melies_project::{Project, ProjectLimits, ProjectPhase, RecoveryOutcome, gate};
pub use melies_scene::{
    GenerationKind, GenerationOutcome, GenerationTicket, ProjectAttributes, RecoveryAction, Scene,
    SceneId, SceneState, driver, fallback, recovery_actions,
};
pub use melies_storage::{
    FilesystemProjectStore, GenerationFailureSnapshot, ProjectSnapshot, ProjectStore,
    SceneSnapshot,
};
