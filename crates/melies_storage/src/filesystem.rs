//! Filesystem persistence backend.

use crate::{ProjectSnapshot, ProjectStore};
use melies_error::{MeliesResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores one pretty-printed JSON file per project id under a base directory.
///
/// # Examples
///
/// ```no_run
/// use melies_storage::FilesystemProjectStore;
///
/// let store = FilesystemProjectStore::new("./projects").unwrap();
/// ```
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct FilesystemProjectStore {
    /// Base directory for project files
    base_dir: PathBuf,
}

impl FilesystemProjectStore {
    /// Create a new store, creating the base directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> MeliesResult<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        if !base_dir.exists() {
            std::fs::create_dir_all(&base_dir).map_err(|e| {
                StorageError::new(StorageErrorKind::Io(format!(
                    "failed to create storage directory: {}",
                    e
                )))
            })?;
        }
        debug!(path = %base_dir.display(), "Initialized project store");
        Ok(Self { base_dir })
    }

    fn project_path(&self, project_id: &str) -> PathBuf {
        self.base_dir.join(format!("project_{}.json", project_id))
    }
}

#[async_trait::async_trait]
impl ProjectStore for FilesystemProjectStore {
    #[tracing::instrument(skip(self, snapshot), fields(scenes = snapshot.scenes.len()))]
    async fn save(&self, project_id: &str, snapshot: &ProjectSnapshot) -> MeliesResult<()> {
        let path = self.project_path(project_id);
        let contents = serde_json::to_string_pretty(snapshot)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialize(e.to_string())))?;
        tokio::fs::write(&path, contents)
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Io(e.to_string())))?;
        debug!(path = %path.display(), "Saved project snapshot");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn load(&self, project_id: &str) -> MeliesResult<ProjectSnapshot> {
        let path = self.project_path(project_id);
        if !path.exists() {
            return Err(
                StorageError::new(StorageErrorKind::NotFound(project_id.to_string())).into(),
            );
        }
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Io(e.to_string())))?;
        let snapshot: ProjectSnapshot = serde_json::from_str(&contents)
            .map_err(|e| StorageError::new(StorageErrorKind::Deserialize(e.to_string())))?;
        debug!(scenes = snapshot.scenes.len(), "Loaded project snapshot");
        Ok(snapshot)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, project_id: &str) -> MeliesResult<()> {
        let path = self.project_path(project_id);
        if path.exists() {
            tokio::fs::remove_file(&path)
                .await
                .map_err(|e| StorageError::new(StorageErrorKind::Io(e.to_string())))?;
            debug!(path = %path.display(), "Deleted project snapshot");
        }
        Ok(())
    }

    async fn exists(&self, project_id: &str) -> MeliesResult<bool> {
        Ok(self.project_path(project_id).exists())
    }
}
