//! Process-wide index ledger for generated documents.
//!
//! Every finished document registers itself here; the registry rewrites
//! `index.html` and the `index.json` manifest synchronously on each
//! registration, so the files on disk always reflect the full record set
//! seen so far — never a partial or stale subset.
//!
//! The manifest is what lets separate test binaries in one build share a
//! single index: cargo runs each integration-test binary in its own
//! process, and each process seeds its registry from the manifest left by
//! the previous one before appending its own entries.
//!
//! # Concurrency
//!
//! The record set and both file writes sit behind one `Mutex` per
//! registry, and registries are shared per output directory through a
//! lazily-initialized process-wide map, so concurrent test completions
//! within one process serialize their read-modify-write cycles.

use crate::error::{DoctesterError, Result};
use crate::model::IndexRecord;
use crate::render;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Manifest file name inside the output directory.
pub const MANIFEST_FILE: &str = "index.json";
/// Index page file name inside the output directory.
pub const INDEX_FILE: &str = "index.html";

/// Shared registries, one per output directory.
static REGISTRIES: Lazy<Mutex<HashMap<PathBuf, Arc<IndexRegistry>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Get (or lazily create) the process-wide registry for `output_dir`.
///
/// # Errors
///
/// Returns an error when an existing manifest cannot be read or parsed.
pub fn registry_for(output_dir: &Path) -> Result<Arc<IndexRegistry>> {
    let mut registries = REGISTRIES.lock().expect("registry map poisoned");
    if let Some(registry) = registries.get(output_dir) {
        return Ok(Arc::clone(registry));
    }
    let registry = Arc::new(IndexRegistry::open(output_dir)?);
    registries.insert(output_dir.to_path_buf(), Arc::clone(&registry));
    Ok(registry)
}

/// Drop the shared registry handle for `output_dir`.
///
/// Used after `clean`; the next registration reopens from scratch.
pub fn evict(output_dir: &Path) {
    REGISTRIES
        .lock()
        .expect("registry map poisoned")
        .remove(output_dir);
}

/// Ordered ledger of (identifier → record), persisted after every change.
#[derive(Debug)]
pub struct IndexRegistry {
    output_dir: PathBuf,
    records: Mutex<Vec<IndexRecord>>,
}

impl IndexRegistry {
    /// Open a registry over `output_dir`, seeding from an existing
    /// manifest when one is present.
    ///
    /// # Errors
    ///
    /// Returns `ManifestCorrupt` when `index.json` exists but does not
    /// parse; I/O errors propagate unchanged.
    pub fn open(output_dir: &Path) -> Result<Self> {
        let records = load_manifest(&output_dir.join(MANIFEST_FILE))?;
        if !records.is_empty() {
            debug!(
                count = records.len(),
                dir = %output_dir.display(),
                "seeded index registry from manifest"
            );
        }
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            records: Mutex::new(records),
        })
    }

    /// Insert or update `record`, then rewrite manifest and index page.
    ///
    /// Updating an existing identifier keeps its first-seen position; new
    /// identifiers append at the end, preserving execution order across
    /// the build. Both files are flushed before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error when either file write fails.
    pub fn register(&self, record: IndexRecord) -> Result<()> {
        let mut records = self.records.lock().expect("registry poisoned");
        match records
            .iter_mut()
            .find(|existing| existing.identifier == record.identifier)
        {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        self.write_files(&records)?;
        debug!(
            count = records.len(),
            dir = %self.output_dir.display(),
            "index registry updated"
        );
        Ok(())
    }

    /// Rewrite `index.html` from the current record set alone.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    pub fn rebuild_index(&self) -> Result<PathBuf> {
        let records = self.records.lock().expect("registry poisoned");
        let path = self.output_dir.join(INDEX_FILE);
        fs::create_dir_all(&self.output_dir)?;
        fs::write(&path, render::render_index(&records))?;
        Ok(path)
    }

    /// Render the index page for the current record set.
    #[must_use]
    pub fn render(&self) -> String {
        let records = self.records.lock().expect("registry poisoned");
        render::render_index(&records)
    }

    /// Snapshot of the current records, in registry order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<IndexRecord> {
        self.records.lock().expect("registry poisoned").clone()
    }

    /// The directory this registry persists into.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write_files(&self, records: &[IndexRecord]) -> Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        let manifest = serde_json::to_string_pretty(records)?;
        fs::write(self.output_dir.join(MANIFEST_FILE), manifest)?;
        fs::write(
            self.output_dir.join(INDEX_FILE),
            render::render_index(records),
        )?;
        Ok(())
    }
}

fn load_manifest(path: &Path) -> Result<Vec<IndexRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| DoctesterError::ManifestCorrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
