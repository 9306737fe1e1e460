/*!
 * Glossary span resolution.
 *
 * Each start marker is resolved on its own by walking the siblings that
 * follow it until the matching end marker shows up. Text met on the way is
 * the annotated term; anything else is either diagnostic (stray elements) or
 * fatal for that one span (another start marker). Resolved terms are counted
 * in a `TermTally` for the coverage check.
 */

use std::collections::HashMap;

use log::debug;

use crate::markup::{Element, Fragment, MarkupNode, NodePosition};
use crate::reporting::{Category, Reporter, Severity};

use super::markers::{is_end_marker_element, is_start_marker_element};

pub const INAPPROPRIATE_VALUE: &str = "marker contains inappropriate value";
pub const MISSING_END_MARKER: &str = "missing matching end marker";
pub const EMPTY_TERM: &str = "glossary tag has no value";
pub const OVERLAPPING_TAG: &str = "annotation overlaps with another tag";
pub const UNRECOGNIZED_ELEMENT: &str =
    "unrecognized element encountered while scanning annotation span";

/// Typographic punctuation trimmed from term edges along with ASCII punctuation
const EXTRA_TRIM_CHARS: &[char] = &['\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2026}', '\u{2013}', '\u{2014}'];

/// One start/end marker pair as seen by the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossarySpan {
    /// Value of the start marker's `id`
    pub id: String,
    /// Annotated text, trimmed
    pub term_text: String,
    /// Ordinal of the start marker among all start markers of the fragment
    pub word_index: usize,
    /// Whether a well-formed end marker closed the span
    pub resolved: bool,
}

impl GlossarySpan {
    fn open(id: &str, word_index: usize) -> Self {
        Self {
            id: id.to_string(),
            term_text: String::new(),
            word_index,
            resolved: false,
        }
    }
}

/// How many times each exact term was annotated in one fragment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermTally {
    counts: HashMap<String, usize>,
}

impl TermTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a resolved span; unresolved spans are ignored
    pub fn register(&mut self, span: &GlossarySpan) {
        if span.resolved {
            self.add(&span.term_text);
        }
    }

    /// Count one annotation of `term`
    pub fn add(&mut self, term: &str) {
        *self.counts.entry(term.to_string()).or_insert(0) += 1;
    }

    /// Annotation count for `term`, 0 when never tagged
    pub fn count(&self, term: &str) -> usize {
        self.counts.get(term).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(term, count)| (term.as_str(), *count))
    }

    /// Terms sorted alphabetically, for stable reporting
    pub fn sorted_terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = self.counts.keys().map(String::as_str).collect();
        terms.sort_unstable();
        terms
    }
}

impl<'a> FromIterator<&'a str> for TermTally {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut tally = TermTally::new();
        for term in iter {
            tally.add(term);
        }
        tally
    }
}

/// Resolve every glossary span of the fragment and tally the terms.
///
/// Every start marker is processed exactly once, whatever happened to the
/// ones before it.
pub fn resolve_glossary_spans(
    fragment: &Fragment,
    reporter: &Reporter<'_>,
    severity: Severity,
) -> TermTally {
    let mut tally = TermTally::new();
    let mut word_index = 0;

    for position in fragment.positions() {
        let MarkupNode::Element(marker) = position.node() else {
            continue;
        };
        if !is_start_marker_element(marker) {
            continue;
        }

        let span = resolve_span(position, marker, word_index, reporter, severity);
        tally.register(&span);
        word_index += 1;
    }

    debug!(
        "Span resolver: {} start markers, {} distinct terms",
        word_index,
        tally.len()
    );
    tally
}

/// Walk the siblings after one start marker
pub fn resolve_span(
    position: NodePosition<'_>,
    marker: &Element,
    word_index: usize,
    reporter: &Reporter<'_>,
    severity: Severity,
) -> GlossarySpan {
    let id = marker.attr("id").unwrap_or_default();
    let mut span = GlossarySpan::open(id, word_index);

    check_marker_is_empty(marker, reporter, severity);

    let following = position.following();
    let Some(end_offset) = following
        .iter()
        .position(|n| n.as_element().is_some_and(|e| is_end_marker_element(e, id)))
    else {
        reporter.report(
            Category::Structural,
            severity,
            MISSING_END_MARKER,
            &marker.start_tag(),
        );
        return span;
    };

    let mut term = String::new();
    for node in &following[..=end_offset] {
        match node {
            MarkupNode::Text(text) => term.push_str(text),
            MarkupNode::Element(element) if is_end_marker_element(element, id) => {
                let cleaned = trim_term(&term);
                if cleaned.is_empty() {
                    reporter.report(Category::Structural, severity, EMPTY_TERM, &marker.start_tag());
                    check_marker_is_empty(element, reporter, severity);
                    return span;
                }

                check_marker_is_empty(element, reporter, severity);
                span.term_text = cleaned.to_string();
                span.resolved = true;
                return span;
            }
            MarkupNode::Element(element) if is_start_marker_element(element) => {
                reporter.report(
                    Category::Structural,
                    severity,
                    OVERLAPPING_TAG,
                    &format!("{} overlaps {}", element.start_tag(), marker.start_tag()),
                );
                return span;
            }
            MarkupNode::Element(element) => {
                reporter.report(
                    Category::Structural,
                    severity.min(Severity::Tolerable),
                    UNRECOGNIZED_ELEMENT,
                    &format!("{} inside span {}", element.start_tag(), id),
                );
            }
        }
    }

    span
}

/// Strip whitespace and punctuation from both ends of a term
pub fn trim_term(term: &str) -> &str {
    term.trim_matches(|c: char| {
        c.is_whitespace() || c.is_ascii_punctuation() || EXTRA_TRIM_CHARS.contains(&c)
    })
}

fn check_marker_is_empty(marker: &Element, reporter: &Reporter<'_>, severity: Severity) {
    let content = marker.text_content();
    if !content.trim().is_empty() {
        reporter.report(
            Category::Structural,
            severity,
            INAPPROPRIATE_VALUE,
            &format!("{} contains '{}'", marker.start_tag(), content.trim()),
        );
    }
}
