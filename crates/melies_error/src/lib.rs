//! Error types for the Melies media production pipeline.
//!
//! This crate provides the foundation error types used throughout the Melies
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use melies_error::{MeliesResult, ConfigError};
//!
//! fn load_limits() -> MeliesResult<u32> {
//!     Err(ConfigError::new("missing duration bounds"))?
//! }
//!
//! match load_limits() {
//!     Ok(v) => println!("Got: {}", v),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod project;
mod scene;
mod storage;

pub use config::ConfigError;
pub use error::{MeliesError, MeliesErrorKind, MeliesResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use project::{ProjectError, ProjectErrorKind};
pub use scene::{SceneError, SceneErrorKind};
pub use storage::{StorageError, StorageErrorKind};
