//! Clean command: delete the report directory.

use crate::error::{DoctesterError, Result};
use crate::{registry, stylesheet};
use std::fs;
use std::path::Path;
use tracing::info;

/// Execute the clean command.
///
/// # Errors
///
/// Returns `CleanRequiresForce` without `--force`, `ReportDirMissing`
/// when there is nothing to delete, and any I/O error from the removal.
pub fn execute(dir: &Path, force: bool) -> Result<()> {
    if !dir.exists() {
        return Err(DoctesterError::ReportDirMissing {
            path: dir.to_path_buf(),
        });
    }
    if !force {
        return Err(DoctesterError::CleanRequiresForce {
            path: dir.to_path_buf(),
        });
    }

    fs::remove_dir_all(dir)?;
    // In-process caches must not outlive the directory they describe.
    registry::evict(dir);
    stylesheet::invalidate(dir);

    info!(dir = %dir.display(), "report directory removed");
    println!("Removed {}", dir.display());
    Ok(())
}
