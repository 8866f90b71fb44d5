//! Persistence trait definition.

use crate::ProjectSnapshot;
use melies_error::MeliesResult;

/// Trait for pluggable project persistence backends.
///
/// Backends treat the snapshot opaquely: they durably store and retrieve the
/// whole aggregate without interpreting scene state.
#[async_trait::async_trait]
pub trait ProjectStore: Send + Sync {
    /// Persist a snapshot under a project id, replacing any previous one.
    async fn save(&self, project_id: &str, snapshot: &ProjectSnapshot) -> MeliesResult<()>;

    /// Load the snapshot for a project id.
    ///
    /// # Errors
    ///
    /// `StorageErrorKind::NotFound` if no snapshot exists for the id.
    async fn load(&self, project_id: &str) -> MeliesResult<ProjectSnapshot>;

    /// Remove the snapshot for a project id, if present.
    async fn delete(&self, project_id: &str) -> MeliesResult<()>;

    /// Check whether a snapshot exists for a project id.
    async fn exists(&self, project_id: &str) -> MeliesResult<bool>;
}
