#![allow(dead_code)]

use doctester::DocTest;
use std::path::Path;
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(doctester::logging::init_test_logging);
}

/// Isolated output + stylesheet-source directories for one test.
pub struct ReportSpace {
    pub out: TempDir,
    pub styles: TempDir,
}

impl ReportSpace {
    pub fn out_path(&self) -> &Path {
        self.out.path()
    }

    pub fn styles_path(&self) -> &Path {
        self.styles.path()
    }

    /// Read a file from the output directory.
    pub fn read(&self, file_name: &str) -> String {
        std::fs::read_to_string(self.out.path().join(file_name))
            .unwrap_or_else(|e| panic!("failed to read {file_name}: {e}"))
    }

    pub fn exists(&self, file_name: &str) -> bool {
        self.out.path().join(file_name).is_file()
    }
}

impl Drop for ReportSpace {
    fn drop(&mut self) {
        // The process-wide registry and stylesheet caches key on the
        // output directory; drop the handles with the directory.
        doctester::registry::evict(self.out.path());
        doctester::stylesheet::invalidate(self.out.path());
    }
}

pub fn report_space() -> ReportSpace {
    init_test_logging();
    ReportSpace {
        out: TempDir::new().expect("failed to create output dir"),
        styles: TempDir::new().expect("failed to create stylesheet dir"),
    }
}

/// A context wired into an isolated report space.
pub fn doc_test(identifier: &str, space: &ReportSpace) -> DocTest {
    DocTest::new(identifier)
        .with_output_dir(space.out_path())
        .with_stylesheet_dir(space.styles_path())
}
