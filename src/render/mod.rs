//! HTML rendering of documents and the index page.
//!
//! Rendering is a pure function of its input: arbitrary narrated text is
//! escapable, so these functions cannot fail. All free text passes through
//! `escape`/`escape_multiline` before touching markup.

mod escape;

pub use escape::{escape, escape_multiline};

use crate::model::{AssertionOutcome, Document, Entry, IndexRecord};
use chrono::Utc;
use std::fmt::Write as _;

/// Label rendered in front of a failed assertion's message.
const FAILURE_KIND: &str = "AssertionFailed";

/// Render one document into a complete HTML page.
#[must_use]
pub fn render_document(document: &Document) -> String {
    let title = escape(&document.title);
    let simple = escape(document.simple_name());
    let stylesheet = escape(document.stylesheet.file_name());

    let mut out = String::with_capacity(4096);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\"/>\n");
    let _ = writeln!(out, "<title>{title}</title>");
    let _ = writeln!(out, "<link rel=\"stylesheet\" href=\"{stylesheet}\"/>");
    out.push_str("</head>\n<body>\n<div class=\"container\">\n");
    let _ = writeln!(out, "<h1 id=\"{simple}\">{title}</h1>");

    for entry in &document.entries {
        render_entry(&mut out, entry);
    }

    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn render_entry(out: &mut String, entry: &Entry) {
    match entry {
        Entry::Section { title } => {
            let _ = writeln!(out, "<h2>{}</h2>", escape(title));
        }
        Entry::Statement { text } => {
            let _ = writeln!(out, "<p>{}</p>", escape_multiline(text));
        }
        Entry::Assertion {
            description,
            outcome,
        } => match outcome {
            AssertionOutcome::Passed => {
                let _ = writeln!(
                    out,
                    "<div class=\"alert alert-success\">{}</div>",
                    escape(description)
                );
            }
            AssertionOutcome::Failed { message } => {
                // The leading newline keeps the failure kind on its own
                // visual line, mirroring how the raised error prints.
                let _ = writeln!(
                    out,
                    "<div class=\"alert alert-danger\">\n<b>{}</b><br/>{FAILURE_KIND}: <br/>{}</div>",
                    escape(description),
                    escape_multiline(message)
                );
            }
        },
    }
}

/// Render the index page listing every registered document, in registry
/// order. Self-contained: styling is inlined so the page never depends on
/// which stylesheet variant the documents staged.
#[must_use]
pub fn render_index(records: &[IndexRecord]) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\"/>\n\
         <title>doctester index</title>\n<style>\n\
         body { font-family: sans-serif; margin: 2em auto; max-width: 48em; }\n\
         li { margin: 0.3em 0; }\n\
         .identifier { color: #777; font-size: 0.85em; margin-left: 0.6em; }\n\
         .footer { color: #777; font-size: 0.8em; margin-top: 2em; }\n\
         </style>\n</head>\n<body>\n<h1>doctester index</h1>\n<ul>\n",
    );

    for record in records {
        let _ = writeln!(
            out,
            "<li><a href=\"{}\">{}</a><span class=\"identifier\">{}</span></li>",
            escape(&record.file_name),
            escape(&record.title),
            escape(&record.identifier)
        );
    }

    let _ = writeln!(
        out,
        "</ul>\n<p class=\"footer\">generated {} &mdash; {} document{}</p>\n</body>\n</html>",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        records.len(),
        if records.len() == 1 { "" } else { "s" }
    );
    out
}
