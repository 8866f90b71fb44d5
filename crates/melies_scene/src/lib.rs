//! Scene state machine and fallback policy engine.
//!
//! A scene progresses through a confirmation → generation → review →
//! approval lifecycle. All transitions are synchronous mutations on
//! [`Scene`]; the only asynchronous boundary is a generation call, driven by
//! the functions in [`driver`] with the scene behind a per-scene lock.
//!
//! Generation failures never propagate past the scene: they are recorded as
//! the scene's last error, and capacity exhaustion is routed to the
//! [`fallback`] policy table to decide which recovery actions to offer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod driver;
pub mod fallback;
mod scene;
mod state;

pub use fallback::{ProjectAttributes, RecoveryAction, recovery_actions};
pub use scene::{GenerationOutcome, GenerationTicket, Scene, SceneId};
pub use state::{GenerationKind, SceneState};
