//! Orchestrator configuration.

use melies_error::{ConfigError, MeliesResult};
use serde::{Deserialize, Serialize};

/// Bounds the orchestrator enforces on project settings and script imports.
///
/// Loaded from an optional `melies.toml` with `MELIES_*` environment
/// overrides; defaults apply when neither is present.
///
/// # Examples
///
/// ```
/// use melies_project::ProjectLimits;
///
/// let limits = ProjectLimits::default().with_max_scenes(8);
/// assert_eq!(*limits.max_scenes(), 8);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct ProjectLimits {
    /// Shortest allowed target duration (seconds)
    #[serde(default = "default_min_duration")]
    min_duration_seconds: u32,

    /// Longest allowed target duration (seconds)
    #[serde(default = "default_max_duration")]
    max_duration_seconds: u32,

    /// Most scenes a script import may create
    #[serde(default = "default_max_scenes")]
    max_scenes: usize,
}

fn default_min_duration() -> u32 {
    5
}

fn default_max_duration() -> u32 {
    300
}

fn default_max_scenes() -> usize {
    20
}

impl Default for ProjectLimits {
    fn default() -> Self {
        Self {
            min_duration_seconds: default_min_duration(),
            max_duration_seconds: default_max_duration(),
            max_scenes: default_max_scenes(),
        }
    }
}

impl ProjectLimits {
    /// Load limits from `melies.toml` (if present) and `MELIES_*` environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or the loaded values are
    /// inconsistent.
    pub fn load() -> MeliesResult<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name("melies").required(false))
            .add_source(::config::Environment::with_prefix("MELIES"))
            .build()
            .map_err(|e| ConfigError::new(format!("failed to load configuration: {}", e)))?;

        let limits: Self = settings
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("invalid configuration: {}", e)))?;
        limits.validate()?;
        Ok(limits)
    }

    /// Validate internal consistency.
    ///
    /// # Errors
    ///
    /// Returns an error if the duration bounds are inverted or a limit is
    /// zero.
    pub fn validate(&self) -> MeliesResult<()> {
        if self.min_duration_seconds == 0 {
            return Err(ConfigError::new("min_duration_seconds must be positive").into());
        }
        if self.max_duration_seconds < self.min_duration_seconds {
            return Err(ConfigError::new(format!(
                "max_duration_seconds ({}) is below min_duration_seconds ({})",
                self.max_duration_seconds, self.min_duration_seconds
            ))
            .into());
        }
        if self.max_scenes == 0 {
            return Err(ConfigError::new("max_scenes must be positive").into());
        }
        Ok(())
    }
}
