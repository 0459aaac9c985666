//! Rebuild the index page from the manifest alone.
//!
//! The index is re-derivable purely from the record set; this command
//! exercises exactly that contract after manual edits or partial cleans.

use crate::error::{DoctesterError, Result};
use crate::registry::{IndexRegistry, MANIFEST_FILE};
use std::path::Path;
use tracing::info;

/// Execute the rebuild-index command.
///
/// # Errors
///
/// Returns `ReportDirMissing` when no manifest exists at `dir`, and an
/// error when reading the manifest or writing the index fails.
pub fn execute(dir: &Path) -> Result<()> {
    if !dir.join(MANIFEST_FILE).is_file() {
        return Err(DoctesterError::ReportDirMissing {
            path: dir.to_path_buf(),
        });
    }

    let registry = IndexRegistry::open(dir)?;
    let path = registry.rebuild_index()?;
    info!(path = %path.display(), "index rebuilt");
    println!(
        "Rebuilt {} from {} record(s)",
        path.display(),
        registry.snapshot().len()
    );
    Ok(())
}
