/*!
 * Validation module for embedded item markup.
 *
 * This module provides the glossary and accessibility checks run over each
 * markup fragment:
 * - Marker classification and nesting guard (`markers`)
 * - Glossary span resolution into a term tally (`spans`)
 * - Term coverage against every occurrence (`coverage`)
 * - Image reference ids (`images`)
 * - Color-altering attributes and styles (`colors`)
 *
 * # Architecture
 *
 * Each check is a free function over a parsed `Fragment` that reports
 * findings through a `Reporter` and returns a verdict. `service` runs them in
 * order over raw markup.
 */

pub mod colors;
pub mod coverage;
pub mod images;
pub mod markers;
pub mod service;
pub mod spans;

// Re-export main types
pub use colors::{ColorRule, ColorStyleResult, validate_color_attributes, validate_color_styles};
pub use coverage::validate_term_coverage;
pub use images::validate_image_references;
pub use markers::{is_end_marker, is_start_marker, validate_no_illegal_nesting};
pub use service::{FragmentOutcome, FragmentValidator, ValidationConfig};
pub use spans::{GlossarySpan, TermTally, resolve_glossary_spans};
