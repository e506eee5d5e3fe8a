pub mod explain;
pub mod participants;
pub mod status;

use anyhow::{Context, Result};
use bundle_status::engine::config::RenderConfig;
use bundle_status::engine::snapshot::Snapshot;
use bundle_status::engine::state::{derive_with_type, BundleStatus};
use std::path::Path;

/// Loads a snapshot and derives its status, applying the configured type override.
///
/// # Errors
/// Returns error if the snapshot cannot be read or parsed.
pub fn load_status(path: &Path, config: &RenderConfig) -> Result<Option<BundleStatus>> {
    let bundle = Snapshot::load(path).context("Failed to load bundle snapshot")?;
    let bundle_type = config.resolve_type(&bundle.bundle_type);
    Ok(derive_with_type(&bundle.tasks, bundle_type))
}
