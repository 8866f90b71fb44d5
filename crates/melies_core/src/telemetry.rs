//! Tracing subscriber initialization.

use melies_error::{ConfigError, MeliesResult};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for the pipeline.
///
/// Installs a human-readable fmt layer filtered by `RUST_LOG`. Call once at
/// process start; a second call reports the underlying init error.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_telemetry() -> MeliesResult<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to initialize tracing: {}", e)))?;

    Ok(())
}
