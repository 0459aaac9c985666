//! doctester — living documentation for Rust tests.
//!
//! A [`DocTest`] context rides along with a test function: the test
//! narrates sections, prose, and assertions as it runs, and finalization
//! renders the narration into a styled HTML page under
//! `target/site/doctester/`, linked from a shared `index.html` that
//! accumulates across every documented test in the build.
//!
//! ```no_run
//! use doctester::{document, Result};
//! use predicates::prelude::*;
//!
//! fn documented() -> Result<()> {
//!     document("myapp::articles::CrudTest", |doc| {
//!         doc.say_next_section("Posting an article");
//!         doc.say("We post an article and expect it on the front page.");
//!         doc.say_and_assert_that("the article was stored", &true, predicate::eq(true))
//!     })?;
//!     Ok(())
//! }
//! ```
//!
//! Captured assertion failures are recorded into the page (as a
//! highlighted failure block) and then re-raised unchanged, so the host
//! test runner's pass/fail accounting is unaffected by the narration.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod model;
pub mod registry;
pub mod render;
pub mod stylesheet;

pub use context::{document, document_with, DocTest};
pub use error::{DoctesterError, Result};
pub use model::{
    AssertionOutcome, Document, Entry, IndexRecord, NarrationBuffer, StylesheetChoice,
};
pub use registry::IndexRegistry;
