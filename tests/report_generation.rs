//! End-to-end report generation through the public `DocTest` API.
//!
//! Mirrors the documented external contracts: per-class file location and
//! content, index linkage, stylesheet staging, failure capture.

mod common;

use common::{doc_test, report_space};
use doctester::stylesheet::{CUSTOM_STYLESHEET, DEFAULT_STYLESHEET};
use doctester::DoctesterError;
use predicates::prelude::*;

const EXPECTED_FILENAME: &str = "suite.articles.CrudTest.html";

fn narrate_something(doc: &mut doctester::DocTest) {
    doc.say_next_section("another fun heading!");
    doc.say("and a very long text...!");
}

#[test]
fn index_file_writing_works() {
    let space = report_space();
    let mut doc = doc_test("suite::articles::CrudTest", &space);
    narrate_something(&mut doc);

    doc.finish_doc_test().unwrap();

    assert!(space.exists("index.html"));
    assert!(space.read("index.html").contains("index"));
}

#[test]
fn doctest_file_writing_works() {
    let space = report_space();
    let mut doc = doc_test("suite::articles::CrudTest", &space);
    narrate_something(&mut doc);

    let path = doc.finish_doc_test().unwrap();

    assert_eq!(path, space.out_path().join(EXPECTED_FILENAME));
    // The simple name must appear somewhere in the page body.
    assert!(space.read(EXPECTED_FILENAME).contains("CrudTest"));
    // The index links the per-class file by name.
    assert!(space.read("index.html").contains(EXPECTED_FILENAME));
}

#[test]
fn narration_renders_in_order() {
    let space = report_space();
    let mut doc = doc_test("suite::articles::OrderTest", &space);
    doc.say_next_section("Create");
    doc.say("We create an article.");
    doc.say_next_section("Delete");
    doc.say("We delete it again.");

    doc.finish_doc_test().unwrap();

    let html = space.read("suite.articles.OrderTest.html");
    let create = html.find("<h2>Create</h2>").unwrap();
    let delete = html.find("<h2>Delete</h2>").unwrap();
    assert!(create < delete);
}

#[test]
fn assertion_failure_gets_written_to_html_file() {
    let space = report_space();
    let mut doc = doc_test("suite::articles::FailureTest", &space);

    let got_failure = doc
        .say_and_assert_that("This will go wrong", &false, predicate::eq(true))
        .is_err();
    assert!(got_failure);

    doc.finish_doc_test().unwrap();

    // Correct alert type together with proper escaping and replacement
    // of newline values.
    let html = space.read("suite.articles.FailureTest.html");
    assert!(html.contains("<div class=\"alert alert-danger\">"));
    assert!(html.contains("AssertionFailed: <br/>Expected: "));
    assert!(html.contains("<br/>     but: was false"));
    assert!(!html.contains("\\n"));
}

#[test]
fn failure_message_is_raised_unchanged() {
    let space = report_space();
    let mut doc = doc_test("suite::articles::RaiseTest", &space);

    let err = doc
        .say_and_assert_that("count matches", &3, predicate::eq(4))
        .unwrap_err();

    let DoctesterError::AssertionFailed {
        description,
        message,
    } = err
    else {
        panic!("expected AssertionFailed, got something else");
    };
    assert_eq!(description, "count matches");
    assert!(message.contains("\n     but: was 3"));

    doc.finish_doc_test().unwrap();
    // The rendered page carries the same message, line-broken and escaped.
    let html = space.read("suite.articles.RaiseTest.html");
    assert!(html.contains("<br/>     but: was 3"));
}

#[test]
fn passed_assertions_render_neutral() {
    let space = report_space();
    let mut doc = doc_test("suite::articles::PassTest", &space);
    doc.say_and_assert_that("math still works", &4, predicate::eq(4))
        .unwrap();

    doc.finish_doc_test().unwrap();

    let html = space.read("suite.articles.PassTest.html");
    assert!(html.contains("<div class=\"alert alert-success\">math still works</div>"));
    assert!(!html.contains("alert-danger"));
}

#[test]
fn copying_of_custom_stylesheet_works() {
    let space = report_space();
    let css = "body { background: #fafafa; }\n";
    std::fs::write(space.styles_path().join(CUSTOM_STYLESHEET), css).unwrap();

    let mut doc = doc_test("suite::articles::CssTest", &space);
    narrate_something(&mut doc);
    doc.finish_doc_test().unwrap();

    // The page references the custom stylesheet by name...
    assert!(space.read("suite.articles.CssTest.html").contains(CUSTOM_STYLESHEET));
    // ...and the staged copy is byte-identical, with recognizable content.
    let staged = space.read(CUSTOM_STYLESHEET);
    assert_eq!(staged, css);
    assert!(staged.contains("body"));
}

#[test]
fn default_stylesheet_is_staged_when_no_custom_exists() {
    let space = report_space();
    let mut doc = doc_test("suite::articles::DefaultCssTest", &space);
    narrate_something(&mut doc);
    doc.finish_doc_test().unwrap();

    assert!(
        space
            .read("suite.articles.DefaultCssTest.html")
            .contains(DEFAULT_STYLESHEET)
    );
    assert!(space.read(DEFAULT_STYLESHEET).contains("body"));
}

#[test]
fn usage_of_test_server_url_without_configuration_is_not_allowed() {
    let space = report_space();
    let mut doc = doc_test("suite::articles::UrlTest", &space);
    narrate_something(&mut doc);

    // Deterministic illegal state, independent of prior narration.
    assert!(matches!(
        doc.test_server_url(),
        Err(DoctesterError::ServerUrlNotConfigured)
    ));
}

#[test]
fn narrated_markup_cannot_corrupt_the_page() {
    let space = report_space();
    let mut doc = doc_test("suite::articles::EscapeTest", &space);
    doc.say("dangerous <script>alert('x')</script> & \"quotes\"");

    doc.finish_doc_test().unwrap();

    let html = space.read("suite.articles.EscapeTest.html");
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("&amp; &quot;quotes&quot;"));
}
