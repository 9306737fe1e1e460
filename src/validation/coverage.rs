/*!
 * Term coverage check.
 *
 * A term tagged for the glossary must be tagged at every standalone
 * occurrence in the fragment. The check compares the tally against a
 * case-insensitive, word-delimited count over the fragment's text runs, which
 * join text across inline elements the same way span terms are collected.
 * A shorter tagged term that also appears inside a longer tagged phrase is
 * counted twice by the scan, so overlapping annotations surface here as a
 * mismatch.
 */

use log::debug;
use regex::Regex;

use crate::markup::Fragment;
use crate::reporting::{Category, Reporter, Severity};

use super::spans::TermTally;

pub const ILLEGAL_CHARACTER: &str = "tagged section contains an illegal character";
pub const TERM_NOT_TAGGED_EVERYWHERE: &str =
    "term tagged for glossary is not tagged everywhere it occurs";

/// Letters, whitespace, commas, apostrophes, periods and hyphens
pub fn has_only_legal_characters(term: &str) -> bool {
    term.chars().all(|c| {
        c.is_alphabetic() || c.is_whitespace() || matches!(c, ',' | '\'' | '\u{2019}' | '.' | '-')
    })
}

/// Case-insensitive pattern matching `term` between non-word runs or text edges
pub fn term_pattern(term: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)(?:^|\W+)({})(?:\W+|$)", regex::escape(term)))
}

/// Count standalone occurrences of the term captured by `pattern`.
///
/// The search resumes right after each captured term rather than after the
/// trailing delimiter, so "fox fox" counts twice.
pub fn count_occurrences(pattern: &Regex, text: &str) -> usize {
    let mut count = 0;
    let mut start = 0;

    while start <= text.len() {
        let Some(term) = pattern.captures_at(text, start).and_then(|c| c.get(1)) else {
            break;
        };
        count += 1;
        if term.end() <= start {
            break;
        }
        start = term.end();
    }

    count
}

/// Check every tallied term against its occurrences in the fragment.
///
/// Returns true when no term failed.
pub fn validate_term_coverage(
    fragment: &Fragment,
    tally: &TermTally,
    reporter: &Reporter<'_>,
    severity: Severity,
) -> bool {
    let mut failed = 0;
    let runs = fragment.text_runs();

    for term in tally.sorted_terms() {
        if !has_only_legal_characters(term) {
            failed += 1;
            reporter.report(Category::Consistency, severity, ILLEGAL_CHARACTER, term);
            continue;
        }

        let pattern = match term_pattern(term) {
            Ok(pattern) => pattern,
            Err(e) => {
                failed += 1;
                reporter.report(
                    Category::Parse,
                    Severity::Degraded,
                    &format!("could not build search pattern for term '{}'", term),
                    &e.to_string(),
                );
                continue;
            }
        };

        let found: usize = runs
            .iter()
            .map(|run| count_occurrences(&pattern, run))
            .sum();
        let tagged = tally.count(term);

        if found != tagged {
            failed += 1;
            reporter.report(
                Category::Consistency,
                severity,
                TERM_NOT_TAGGED_EVERYWHERE,
                &format!("'{}' occurs {} times but is tagged {} times", term, found, tagged),
            );
        }
    }

    debug!("Term coverage: {} terms, {} failed", tally.len(), failed);
    failed == 0
}
