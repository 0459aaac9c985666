//! Stylesheet discovery and staging for rendered reports.
//!
//! A test suite may ship its own look by placing a
//! `custom_doctester_stylesheet.css` in the stylesheet source directory
//! (`doctester/` by default). When present it is copied byte-for-byte into
//! the output directory and every document rendered there links it;
//! otherwise the bundled default is written once and linked instead.
//!
//! Resolution runs at most once per output directory per process: the
//! result is cached behind a process-wide lock so concurrent finishers
//! never race on existence checks or duplicate a copy.

use crate::error::Result;
use crate::model::StylesheetChoice;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// File name convention for a user-supplied stylesheet.
pub const CUSTOM_STYLESHEET: &str = "custom_doctester_stylesheet.css";
/// File name of the bundled default stylesheet in the output directory.
pub const DEFAULT_STYLESHEET: &str = "doctester_stylesheet.css";

/// Bundled default stylesheet content.
const DEFAULT_STYLESHEET_BODY: &str = include_str!("../../assets/doctester_stylesheet.css");

/// Per-output-directory resolution cache.
static RESOLVED: Lazy<Mutex<HashMap<PathBuf, StylesheetChoice>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Resolve the stylesheet for `output_dir`, staging files as needed.
///
/// Looks for [`CUSTOM_STYLESHEET`] in `source_dir`; if found, copies it
/// into `output_dir` (skipped when the destination already holds identical
/// bytes) and returns `Custom`. Otherwise writes the bundled default into
/// `output_dir` if absent and returns `Default`. The default write never
/// touches an already-staged custom stylesheet.
///
/// # Errors
///
/// Returns an error when the copy or write fails.
pub fn resolve(output_dir: &Path, source_dir: &Path) -> Result<StylesheetChoice> {
    let mut cache = RESOLVED.lock().expect("stylesheet cache poisoned");
    if let Some(choice) = cache.get(output_dir) {
        return Ok(choice.clone());
    }

    fs::create_dir_all(output_dir)?;
    let choice = stage(output_dir, source_dir)?;
    cache.insert(output_dir.to_path_buf(), choice.clone());
    Ok(choice)
}

/// Drop the cached resolution for `output_dir`.
///
/// Used after `clean` removed the directory; the next finisher re-stages.
pub fn invalidate(output_dir: &Path) {
    RESOLVED
        .lock()
        .expect("stylesheet cache poisoned")
        .remove(output_dir);
}

fn stage(output_dir: &Path, source_dir: &Path) -> Result<StylesheetChoice> {
    let custom_source = source_dir.join(CUSTOM_STYLESHEET);
    if custom_source.is_file() {
        let bytes = fs::read(&custom_source)?;
        let destination = output_dir.join(CUSTOM_STYLESHEET);
        if needs_write(&destination, &bytes)? {
            fs::write(&destination, &bytes)?;
            debug!(source = %custom_source.display(), "staged custom stylesheet");
        }
        return Ok(StylesheetChoice::Custom {
            file_name: CUSTOM_STYLESHEET.to_string(),
        });
    }

    let destination = output_dir.join(DEFAULT_STYLESHEET);
    if !destination.exists() {
        fs::write(&destination, DEFAULT_STYLESHEET_BODY)?;
        debug!(path = %destination.display(), "wrote default stylesheet");
    }
    Ok(StylesheetChoice::Default)
}

/// True when `path` is absent or holds different content than `bytes`.
fn needs_write(path: &Path, bytes: &[u8]) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    let existing = fs::read(path)?;
    Ok(fingerprint(&existing) != fingerprint(bytes))
}

/// SHA256 fingerprint of stylesheet content.
fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
