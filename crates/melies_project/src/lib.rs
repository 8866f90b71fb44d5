//! Project orchestrator and composition gate.
//!
//! A [`Project`] owns the ordered scene collection and the project-level
//! settings, and is the single entry point for the two shared mutable
//! values: the audio selection and the derived readiness boolean. The
//! [`gate::composition_ready`] function is the load-bearing contract here:
//! it is recomputed from a consistent read of current state on every call
//! and never cached.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
pub mod gate;
mod project;

pub use config::ProjectLimits;
pub use project::{Project, ProjectPhase, RecoveryOutcome};
