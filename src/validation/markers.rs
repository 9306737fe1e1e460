/*!
 * Glossary marker classification and the nesting guard.
 *
 * A glossary term is annotated by two empty `span` elements sitting in the
 * same sibling list:
 *
 * ```text
 * <span id="w1" data-tag="word" data-tag-boundary="start"></span>term
 * <span data-tag-ref="w1" data-tag-boundary="end"></span>
 * ```
 *
 * Start markers must never contain other start markers.
 */

use log::debug;

use crate::markup::{Element, Fragment, MarkupNode};
use crate::reporting::{Category, Reporter, Severity};

pub const ILLEGAL_NESTING: &str = "annotation nested illegally";

/// Check whether a node opens a glossary span
pub fn is_start_marker(node: Option<&MarkupNode>) -> bool {
    node.and_then(MarkupNode::as_element)
        .is_some_and(is_start_marker_element)
}

/// Element form of [`is_start_marker`]
pub fn is_start_marker_element(element: &Element) -> bool {
    element.is_named("span")
        && element.attr("id").is_some()
        && element.attr_equals("data-tag", "word")
        && element.attr_equals("data-tag-boundary", "start")
}

/// Check whether a node closes the glossary span with the given id
pub fn is_end_marker(node: Option<&MarkupNode>, id: &str) -> bool {
    node.and_then(MarkupNode::as_element)
        .is_some_and(|e| is_end_marker_element(e, id))
}

/// Element form of [`is_end_marker`]
pub fn is_end_marker_element(element: &Element, id: &str) -> bool {
    element.is_named("span")
        && element.attr_equals("data-tag-ref", id)
        && element.attr_equals("data-tag-boundary", "end")
}

/// Report every start marker that sits inside another start marker.
///
/// Returns true when no nesting was found.
pub fn validate_no_illegal_nesting(
    fragment: &Fragment,
    reporter: &Reporter<'_>,
    severity: Severity,
) -> bool {
    let mut violations = 0;
    let mut stack: Vec<(&MarkupNode, Option<&Element>)> =
        fragment.roots().iter().rev().map(|n| (n, None)).collect();

    while let Some((node, enclosing)) = stack.pop() {
        let MarkupNode::Element(element) = node else {
            continue;
        };

        let is_start = is_start_marker_element(element);
        if is_start {
            if let Some(outer) = enclosing {
                violations += 1;
                reporter.report(
                    Category::Structural,
                    severity,
                    ILLEGAL_NESTING,
                    &format!("{} inside {}", element.start_tag(), outer.start_tag()),
                );
            }
        }

        let next_enclosing = match enclosing {
            Some(outer) => Some(outer),
            None if is_start => Some(element),
            None => None,
        };
        for child in element.children().iter().rev() {
            stack.push((child, next_enclosing));
        }
    }

    debug!("Nesting guard: {} violations", violations);
    violations == 0
}
