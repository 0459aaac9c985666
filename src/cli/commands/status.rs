//! Status command: list documents registered in the report manifest.

use crate::error::{DoctesterError, Result};
use crate::registry::{IndexRegistry, MANIFEST_FILE};
use std::path::Path;

/// Execute the status command.
///
/// # Errors
///
/// Returns `ReportDirMissing` when no manifest exists at `dir`, and an
/// error when the manifest cannot be read.
pub fn execute(dir: &Path, json: bool) -> Result<()> {
    if !dir.join(MANIFEST_FILE).is_file() {
        return Err(DoctesterError::ReportDirMissing {
            path: dir.to_path_buf(),
        });
    }

    let registry = IndexRegistry::open(dir)?;
    let records = registry.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!(
        "{} document{} in {}",
        records.len(),
        if records.len() == 1 { "" } else { "s" },
        dir.display()
    );
    for record in &records {
        let exists = if dir.join(&record.file_name).is_file() {
            ""
        } else {
            "  [missing file]"
        };
        println!("  {}  {}{}", record.file_name, record.title, exists);
    }
    Ok(())
}
