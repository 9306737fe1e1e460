/*!
 * # spanlint - glossary span and accessibility scanner
 *
 * A Rust library for validating the markup embedded in test-item documents.
 *
 * ## Features
 *
 * - Parse embedded HTML fragments (CDATA payloads) into an owned node tree
 * - Resolve flat glossary spans marked by start/end `span` markers
 * - Check that every tagged term is tagged at every occurrence
 * - Reject nested or overlapping glossary annotations
 * - Accessibility checks:
 *   - Image reference ids
 *   - Color-altering attributes and CSS color values
 * - Findings with severities, sent to pluggable reporting sinks
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `markup`: Fragment node tree and html5ever-backed parser
 * - `validation`: The individual checks and the fragment validator:
 *   - `validation::markers`: Marker classification and nesting guard
 *   - `validation::spans`: Span resolution and term tally
 *   - `validation::coverage`: Term coverage check
 *   - `validation::images`: Image reference validation
 *   - `validation::colors`: Color attribute and style scanning
 *   - `validation::service`: Orchestration over one fragment
 * - `reporting`: Findings, severities and sinks
 * - `file_utils`: Item file discovery and CDATA extraction
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod file_utils;
pub mod markup;
pub mod reporting;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::ScanError;
pub use markup::{Fragment, MarkupNode, parse_fragment};
pub use reporting::{CollectingSink, Finding, ItemContext, LogSink, ReportSink, Severity};
pub use validation::{FragmentValidator, TermTally, ValidationConfig};
