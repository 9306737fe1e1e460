/*!
 * Findings, reporting sinks and the run summary.
 */

pub mod finding;
pub mod report;
pub mod sink;

pub use finding::{Category, Finding, ItemContext, Severity};
pub use report::ScanReport;
pub use sink::{CollectingSink, LogSink, ReportSink, Reporter};
