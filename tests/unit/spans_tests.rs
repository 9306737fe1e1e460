/*!
 * Tests for glossary span resolution
 */

use spanlint::reporting::{Category, Severity};
use spanlint::validation::resolve_glossary_spans;
use spanlint::validation::spans::{
    EMPTY_TERM, INAPPROPRIATE_VALUE, MISSING_END_MARKER, OVERLAPPING_TAG, UNRECOGNIZED_ELEMENT,
    TermTally, trim_term,
};
use spanlint::reporting::CollectingSink;

use crate::common;

fn resolve(markup: &str) -> (TermTally, CollectingSink) {
    common::init_logging();
    let fragment = common::fragment(markup);
    let (sink, context) = common::sink_and_context();
    let tally = resolve_glossary_spans(&fragment, &common::reporter(&sink, &context), Severity::Severe);
    (tally, sink)
}

/// One pair around "over" gives a single tally entry
#[test]
fn test_resolveSpans_withSinglePair_shouldTallyTerm() {
    let (tally, sink) = resolve(&format!("<p>Jump {} the fence.</p>", common::tagged("w1", "over")));

    assert_eq!(tally.len(), 1);
    assert_eq!(tally.count("over"), 1);
    assert!(sink.is_empty());
}

/// Distinct terms keep distinct keys
#[test]
fn test_resolveSpans_withOverlappingPhrases_shouldKeepTwoKeys() {
    let markup = format!(
        "<p>{} and then {}</p>",
        common::tagged("w1", "over"),
        common::tagged("w2", "over again")
    );

    let (tally, _) = resolve(&markup);

    assert_eq!(tally.len(), 2);
    assert_eq!(tally.count("over"), 1);
    assert_eq!(tally.count("over again"), 1);
}

/// Repeated terms increment the same key
#[test]
fn test_resolveSpans_withRepeatedTerm_shouldIncrementCount() {
    let markup = format!(
        "<p>{} and {}</p>",
        common::tagged("w1", "heron"),
        common::tagged("w2", "heron")
    );

    let (tally, _) = resolve(&markup);

    assert_eq!(tally.count("heron"), 2);
}

/// Text inside the start marker is an invalid shape
#[test]
fn test_resolveSpans_withTextInsideStartMarker_shouldReportInappropriateValue() {
    let markup = r#"<p><span id="A" data-tag="word" data-tag-boundary="start">over<span data-tag-ref="A" data-tag-boundary="end"></span></span></p>"#;

    let (tally, sink) = resolve(markup);

    assert!(tally.is_empty());
    assert!(sink.contains_message(INAPPROPRIATE_VALUE));
    assert!(sink.contains_message(MISSING_END_MARKER));
}

/// Text inside the end marker is reported but the span still resolves
#[test]
fn test_resolveSpans_withTextInsideEndMarker_shouldReportAndTally() {
    let markup = format!(
        r#"<p>{}crane<span data-tag-ref="w1" data-tag-boundary="end">x</span></p>"#,
        common::start_marker("w1")
    );

    let (tally, sink) = resolve(&markup);

    assert_eq!(tally.count("crane"), 1);
    assert!(sink.contains_message(INAPPROPRIATE_VALUE));
}

/// A start marker with no end marker is abandoned
#[test]
fn test_resolveSpans_withoutEndMarker_shouldReportMissing() {
    let markup = format!("<p>{}lonely word</p>", common::start_marker("w1"));

    let (tally, sink) = resolve(&markup);

    assert!(tally.is_empty());
    let findings = sink.findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].message, MISSING_END_MARKER);
    assert_eq!(findings[0].category, Category::Structural);
}

/// An end marker on another level does not close the span
#[test]
fn test_resolveSpans_withEndMarkerInOtherParent_shouldReportMissing() {
    let markup = format!(
        "<p>{}word</p><p>{}</p>",
        common::start_marker("w1"),
        common::end_marker("w1")
    );

    let (tally, sink) = resolve(&markup);

    assert!(tally.is_empty());
    assert!(sink.contains_message(MISSING_END_MARKER));
}

/// Adjacent start and end markers have no value
#[test]
fn test_resolveSpans_withAdjacentMarkers_shouldReportEmptyTerm() {
    let markup = format!("<p>{}{}</p>", common::start_marker("w1"), common::end_marker("w1"));

    let (tally, sink) = resolve(&markup);

    assert!(tally.is_empty());
    assert!(sink.contains_message(EMPTY_TERM));
}

/// Another start marker before the end marker abandons the first span
#[test]
fn test_resolveSpans_withInterleavedMarkers_shouldReportOverlap() {
    let markup = format!(
        "<p>{}one {}two{} three{}</p>",
        common::start_marker("w1"),
        common::start_marker("w2"),
        common::end_marker("w1"),
        common::end_marker("w2")
    );

    let (tally, sink) = resolve(&markup);

    assert!(sink.contains_message(OVERLAPPING_TAG));
    assert_eq!(tally.count("one two"), 0);
    // w2 is still resolved on its own
    assert_eq!(tally.count("two three"), 1);
}

/// Formatting inside a span is diagnostic only
#[test]
fn test_resolveSpans_withElementInsideSpan_shouldContinue() {
    let markup = format!(
        "<p>{}great <b>blue</b> heron{}</p>",
        common::start_marker("w1"),
        common::end_marker("w1")
    );

    let (tally, sink) = resolve(&markup);

    assert_eq!(tally.count("great  heron"), 1);
    let findings = sink.findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].message, UNRECOGNIZED_ELEMENT);
    assert_eq!(findings[0].severity, Severity::Tolerable);
}

/// A broken span does not stop later spans from resolving
#[test]
fn test_resolveSpans_afterBrokenSpan_shouldResolveLaterSpans() {
    let markup = format!(
        "<p>{}{}</p><p>{}</p>",
        common::start_marker("w1"),
        common::end_marker("w1"),
        common::tagged("w2", "egret")
    );

    let (tally, sink) = resolve(&markup);

    assert!(sink.contains_message(EMPTY_TERM));
    assert_eq!(tally.count("egret"), 1);
}

/// XML-style self-closing markers behave like empty ones
#[test]
fn test_resolveSpans_withSelfClosingMarkers_shouldResolve() {
    let markup = r#"<p><span id="w1" data-tag="word" data-tag-boundary="start"/>ibis<span data-tag-ref="w1" data-tag-boundary="end"/> flew.</p>"#;

    let (tally, sink) = resolve(markup);

    assert_eq!(tally.count("ibis"), 1);
    assert!(sink.is_empty());
}

/// Trimming removes whitespace and punctuation at the edges only
#[test]
fn test_trimTerm_shouldStripEdges() {
    assert_eq!(trim_term("  \u{201C}heron,\u{201D} "), "heron");
    assert_eq!(trim_term("(great egret)."), "great egret");
    assert_eq!(trim_term("o'clock"), "o'clock");
    assert_eq!(trim_term(" ... "), "");
}

/// The tally can be built directly from terms
#[test]
fn test_termTally_fromIterator_shouldCount() {
    let tally: TermTally = ["owl", "owl", "hawk"].into_iter().collect();

    assert_eq!(tally.count("owl"), 2);
    assert_eq!(tally.count("hawk"), 1);
    assert_eq!(tally.count("kite"), 0);
    assert_eq!(tally.sorted_terms(), vec!["hawk", "owl"]);
}

/// A span holding only an element has no term text: the element is reported
/// and the span is treated as empty rather than tallied as ""
#[test]
fn test_resolveSpans_withOnlyElementInsideSpan_shouldReportElementAndEmptyTerm() {
    let markup = format!(
        "<p>{}<b>x</b>{}</p>",
        common::start_marker("w1"),
        common::end_marker("w1")
    );

    let (tally, sink) = resolve(&markup);

    assert!(tally.is_empty());
    assert_eq!(tally.count(""), 0);
    let messages: Vec<String> = sink.findings().into_iter().map(|f| f.message).collect();
    assert_eq!(messages, vec![UNRECOGNIZED_ELEMENT, EMPTY_TERM]);
}

/// Quoted `>` in a self-closing marker does not break the marker pair
#[test]
fn test_resolveSpans_withQuotedAngleBracketInSelfClosingMarker_shouldResolve() {
    let markup = r#"<p><span id="A" data-tag="word" data-tag-boundary="start" title="a>b"/>fox<span data-tag-ref="A" data-tag-boundary="end"/> ran</p>"#;

    let (tally, sink) = resolve(markup);

    assert_eq!(tally.count("fox"), 1);
    assert!(!sink.contains_message(INAPPROPRIATE_VALUE));
    assert!(!sink.contains_message(MISSING_END_MARKER));
}
