//! Core data types for `doctester`.
//!
//! This module defines the fundamental types used throughout the crate:
//! narration entries, the per-test narration buffer, the renderable
//! document, and the index record persisted to the report manifest.

use crate::error::{DoctesterError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one narrated assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionOutcome {
    Passed,
    /// The failure message recorded here is byte-identical to the one
    /// carried by the raised `DoctesterError::AssertionFailed`.
    Failed {
        message: String,
    },
}

impl AssertionOutcome {
    /// Returns true for `Passed`.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// One narration entry. Immutable once appended; insertion order is
/// narrative order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A section heading subdividing the page.
    Section { title: String },
    /// A prose statement.
    Statement { text: String },
    /// A narrated assertion attempt and its outcome.
    Assertion {
        description: String,
        outcome: AssertionOutcome,
    },
}

/// Ordered, append-only log of entries for one test execution.
///
/// Owned exclusively by one `DocTest`; consumed when the document is built,
/// so a buffer can never be rendered twice.
#[derive(Debug, Default)]
pub struct NarrationBuffer {
    entries: Vec<Entry>,
}

impl NarrationBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a section heading.
    pub fn push_section(&mut self, title: impl Into<String>) {
        self.entries.push(Entry::Section {
            title: title.into(),
        });
    }

    /// Append a prose statement.
    pub fn push_statement(&mut self, text: impl Into<String>) {
        self.entries.push(Entry::Statement { text: text.into() });
    }

    /// Append an assertion attempt with its recorded outcome.
    pub fn push_assertion(&mut self, description: impl Into<String>, outcome: AssertionOutcome) {
        self.entries.push(Entry::Assertion {
            description: description.into(),
            outcome,
        });
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been narrated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the buffer, yielding its entries in narration order.
    #[must_use]
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    /// Read-only view of the recorded entries.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

/// Which stylesheet a rendered document links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylesheetChoice {
    /// The bundled default stylesheet.
    Default,
    /// A user-supplied stylesheet staged into the output directory.
    Custom { file_name: String },
}

impl StylesheetChoice {
    /// File name the rendered page should reference.
    #[must_use]
    pub fn file_name(&self) -> &str {
        match self {
            Self::Default => crate::stylesheet::DEFAULT_STYLESHEET,
            Self::Custom { file_name } => file_name,
        }
    }
}

/// The renderable unit built from one test's narration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Fully-qualified identifier of the owning test (module path form).
    pub identifier: String,
    /// Page title; defaults to the identifier's final segment.
    pub title: String,
    /// Narration entries in order.
    pub entries: Vec<Entry>,
    /// Stylesheet the page links to.
    pub stylesheet: StylesheetChoice,
}

impl Document {
    /// Final path segment of the identifier ("simple name").
    #[must_use]
    pub fn simple_name(&self) -> &str {
        simple_name(&self.identifier)
    }

    /// File name this document is written to: the sanitized identifier
    /// plus `.html`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.html", sanitize_identifier_unchecked(&self.identifier))
    }
}

/// One row in the index ledger, keyed by document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub identifier: String,
    pub title: String,
    pub file_name: String,
    pub registered_at: DateTime<Utc>,
}

/// Final segment of a `::`-separated identifier.
#[must_use]
pub fn simple_name(identifier: &str) -> &str {
    identifier.rsplit("::").next().unwrap_or(identifier)
}

/// Map an identifier to a file-system-safe stem: `::` becomes `.`, any
/// character outside `[A-Za-z0-9._-]` becomes `_`.
///
/// # Errors
///
/// Returns `InvalidIdentifier` when the result carries no alphanumeric
/// character at all.
pub fn sanitize_identifier(identifier: &str) -> Result<String> {
    let stem = sanitize_identifier_unchecked(identifier);
    if stem.chars().any(|c| c.is_ascii_alphanumeric()) {
        Ok(stem)
    } else {
        Err(DoctesterError::InvalidIdentifier {
            identifier: identifier.to_string(),
        })
    }
}

fn sanitize_identifier_unchecked(identifier: &str) -> String {
    identifier
        .replace("::", ".")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_preserves_narration_order() {
        let mut buffer = NarrationBuffer::new();
        buffer.push_section("Setup");
        buffer.push_statement("We create an article.");
        buffer.push_assertion("article exists", AssertionOutcome::Passed);

        let entries = buffer.into_entries();
        assert_eq!(entries.len(), 3);
        assert!(matches!(&entries[0], Entry::Section { title } if title == "Setup"));
        assert!(matches!(&entries[1], Entry::Statement { .. }));
        assert!(matches!(
            &entries[2],
            Entry::Assertion {
                outcome: AssertionOutcome::Passed,
                ..
            }
        ));
    }

    #[test]
    fn sanitize_maps_module_path_to_dotted_stem() {
        let stem = sanitize_identifier("doctester::articles::CrudTest").unwrap();
        assert_eq!(stem, "doctester.articles.CrudTest");
    }

    #[test]
    fn sanitize_replaces_reserved_characters() {
        let stem = sanitize_identifier("my test/№1").unwrap();
        assert!(stem.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
        }));
    }

    #[test]
    fn sanitize_rejects_empty_identifier() {
        assert!(matches!(
            sanitize_identifier(""),
            Err(DoctesterError::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            sanitize_identifier("///"),
            Err(DoctesterError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn document_file_name_uses_dotted_identifier() {
        let doc = Document {
            identifier: "suite::articles::PostArticleTest".to_string(),
            title: "PostArticleTest".to_string(),
            entries: vec![],
            stylesheet: StylesheetChoice::Default,
        };
        assert_eq!(doc.file_name(), "suite.articles.PostArticleTest.html");
        assert_eq!(doc.simple_name(), "PostArticleTest");
    }

    #[test]
    fn index_record_round_trips_through_json() {
        let record = IndexRecord {
            identifier: "suite::SmokeTest".to_string(),
            title: "SmokeTest".to_string(),
            file_name: "suite.SmokeTest.html".to_string(),
            registered_at: Utc::now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: IndexRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
