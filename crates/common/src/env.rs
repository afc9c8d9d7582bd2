//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Warn if the static assets directory is missing; requests for it will 404.
pub async fn ensure_env(frontend_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(frontend_dir).await.is_err() {
        warn!(%frontend_dir, "frontend assets directory not found; static assets may 404");
    }
    Ok(())
}
