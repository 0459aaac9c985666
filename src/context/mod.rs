//! Per-test narration context and lifecycle.
//!
//! A [`DocTest`] lives for exactly one test: it collects narration, captures
//! assertion outcomes, and on [`DocTest::finish_doc_test`] turns the
//! narration into an HTML page and registers it with the shared index.
//!
//! Finalization consumes the context by value, so finishing twice or
//! narrating after finish does not compile — the reuse question is settled
//! by the type system instead of runtime checks.

use crate::config::{DocTestConfig, Overrides};
use crate::error::{DoctesterError, Result};
use crate::model::{self, AssertionOutcome, Document, IndexRecord, NarrationBuffer};
use crate::registry;
use crate::render;
use crate::stylesheet;
use chrono::Utc;
use predicates::Predicate;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Narration context for one test execution.
#[derive(Debug)]
pub struct DocTest {
    identifier: String,
    title: Option<String>,
    buffer: NarrationBuffer,
    overrides: Overrides,
}

impl DocTest {
    /// Create a context for the test identified by `identifier`
    /// (conventionally the test's module path, as produced by
    /// [`doc_test!`](crate::doc_test)).
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: None,
            buffer: NarrationBuffer::new(),
            overrides: Overrides::default(),
        }
    }

    /// Override the page title (defaults to the identifier's simple name).
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Override the report directory for this context.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.overrides.output_dir = Some(dir.into());
        self
    }

    /// Override the stylesheet source directory for this context.
    #[must_use]
    pub fn with_stylesheet_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.overrides.stylesheet_dir = Some(dir.into());
        self
    }

    /// Configure the base URL returned by [`Self::test_server_url`].
    #[must_use]
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.overrides.server_url = Some(url.into());
        self
    }

    /// Narrate a section heading.
    pub fn say_next_section(&mut self, title: impl Into<String>) {
        self.buffer.push_section(title);
    }

    /// Narrate a prose statement.
    pub fn say(&mut self, text: impl Into<String>) {
        self.buffer.push_statement(text);
    }

    /// Narrate an assertion attempt: evaluate `predicate` against
    /// `actual`, record the outcome, and re-raise failure unchanged.
    ///
    /// The failure message recorded into the narration is byte-identical
    /// to the one carried by the returned error; recording never swallows
    /// or rewrites the failure.
    ///
    /// # Errors
    ///
    /// Returns `AssertionFailed` when the predicate rejects `actual`.
    pub fn say_and_assert_that<T, P>(
        &mut self,
        description: impl Into<String>,
        actual: &T,
        predicate: P,
    ) -> Result<()>
    where
        T: fmt::Debug + ?Sized,
        P: Predicate<T>,
    {
        let description = description.into();
        if predicate.eval(actual) {
            self.buffer
                .push_assertion(description, AssertionOutcome::Passed);
            return Ok(());
        }

        let message = format!("Expected: {predicate}\n     but: was {actual:?}");
        self.buffer.push_assertion(
            description.clone(),
            AssertionOutcome::Failed {
                message: message.clone(),
            },
        );
        Err(DoctesterError::AssertionFailed {
            description,
            message,
        })
    }

    /// The configured test server base URL for browser-driven assertions.
    ///
    /// # Errors
    ///
    /// Returns `ServerUrlNotConfigured` when neither the builder nor
    /// `DOCTESTER_SERVER_URL` supplied one. Deliberately fail-fast: there
    /// is no meaningful default to fall back to.
    pub fn test_server_url(&self) -> Result<String> {
        DocTestConfig::resolve(&self.overrides)
            .server_url
            .ok_or(DoctesterError::ServerUrlNotConfigured)
    }

    /// Number of entries narrated so far.
    #[must_use]
    pub fn narrated_entries(&self) -> usize {
        self.buffer.len()
    }

    /// Finalize: build the document, resolve the stylesheet, render,
    /// write the per-test HTML file, and register it with the shared
    /// index. Returns the path of the written page.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` for an unusable identifier, and
    /// propagates any I/O error from writing the page or updating the
    /// index — generation failure must not masquerade as a passing test.
    pub fn finish_doc_test(self) -> Result<PathBuf> {
        let config = DocTestConfig::resolve(&self.overrides);
        model::sanitize_identifier(&self.identifier)?;

        fs::create_dir_all(&config.output_dir)?;
        let choice = stylesheet::resolve(&config.output_dir, &config.stylesheet_dir)?;

        let title = self
            .title
            .unwrap_or_else(|| model::simple_name(&self.identifier).to_string());
        let document = Document {
            identifier: self.identifier,
            title,
            entries: self.buffer.into_entries(),
            stylesheet: choice,
        };

        let file_name = document.file_name();
        let path = config.output_dir.join(&file_name);
        fs::write(&path, render::render_document(&document))?;
        debug!(path = %path.display(), "wrote document page");

        let registry = registry::registry_for(&config.output_dir)?;
        registry.register(IndexRecord {
            identifier: document.identifier.clone(),
            title: document.title.clone(),
            file_name,
            registered_at: Utc::now(),
        })?;

        info!(
            identifier = %document.identifier,
            path = %path.display(),
            "doc test finished"
        );
        Ok(path)
    }
}

/// Run-boundary hook for host test runners: run `f` against a fresh
/// context, always finalize, and re-raise the closure's failure unchanged.
///
/// A failing test still produces its report — the captured failure is part
/// of the narration. Finalization I/O errors surface only when the closure
/// itself succeeded, so a real test failure is never masked.
///
/// # Errors
///
/// Returns the closure's error when it failed, otherwise any finalization
/// error.
pub fn document<F>(identifier: &str, f: F) -> Result<PathBuf>
where
    F: FnOnce(&mut DocTest) -> Result<()>,
{
    document_with(DocTest::new(identifier), f)
}

/// Like [`document`], but over an already-configured context (custom
/// output directory, title, server URL, ...).
///
/// # Errors
///
/// Returns the closure's error when it failed, otherwise any finalization
/// error.
pub fn document_with<F>(mut doc: DocTest, f: F) -> Result<PathBuf>
where
    F: FnOnce(&mut DocTest) -> Result<()>,
{
    let outcome = f(&mut doc);
    let written = doc.finish_doc_test();
    match outcome {
        Ok(()) => written,
        Err(err) => Err(err),
    }
}

/// Create a [`DocTest`] identified by the calling module's path, with an
/// optional extra segment for per-function documents.
#[macro_export]
macro_rules! doc_test {
    () => {
        $crate::DocTest::new(module_path!())
    };
    ($name:expr) => {
        $crate::DocTest::new(format!("{}::{}", module_path!(), $name))
    };
}
