/*!
 * Reporting sinks.
 *
 * Scanners never keep findings. They push them into a `ReportSink` and move
 * on. Sinks are `Send + Sync` so fragments may be validated from several
 * threads against one sink.
 */

use log::{Level, log};
use parking_lot::Mutex;

use super::finding::{Category, Finding, ItemContext, Severity};

/// Destination for findings
pub trait ReportSink: Send + Sync {
    fn report(
        &self,
        context: &ItemContext,
        category: Category,
        severity: Severity,
        message: &str,
        detail: &str,
    );
}

/// A sink bound to one item, handed to the individual checks
#[derive(Clone, Copy)]
pub struct Reporter<'a> {
    sink: &'a dyn ReportSink,
    context: &'a ItemContext,
}

impl<'a> Reporter<'a> {
    pub fn new(sink: &'a dyn ReportSink, context: &'a ItemContext) -> Self {
        Self { sink, context }
    }

    pub fn report(&self, category: Category, severity: Severity, message: &str, detail: &str) {
        self.sink
            .report(self.context, category, severity, message, detail);
    }
}

/// Writes every finding through the `log` facade
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    fn level_for(severity: Severity) -> Level {
        match severity {
            Severity::Severe => Level::Error,
            Severity::Degraded => Level::Warn,
            Severity::Tolerable => Level::Info,
            Severity::Benign => Level::Debug,
        }
    }
}

impl ReportSink for LogSink {
    fn report(
        &self,
        context: &ItemContext,
        category: Category,
        severity: Severity,
        message: &str,
        detail: &str,
    ) {
        log!(
            Self::level_for(severity),
            "{} [{}] {}: {}",
            context,
            category,
            message,
            detail
        );
    }
}

/// Buffers findings in memory for later inspection or serialization
#[derive(Debug, Default)]
pub struct CollectingSink {
    findings: Mutex<Vec<Finding>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the findings in arrival order
    pub fn findings(&self) -> Vec<Finding> {
        self.findings.lock().clone()
    }

    /// Snapshot sorted most severe first; arrival order is kept within a severity
    pub fn sorted_findings(&self) -> Vec<Finding> {
        let mut findings = self.findings();
        findings.sort_by(|a, b| b.severity.cmp(&a.severity));
        findings
    }

    /// Take every buffered finding, leaving the sink empty
    pub fn drain(&self) -> Vec<Finding> {
        std::mem::take(&mut *self.findings.lock())
    }

    pub fn len(&self) -> usize {
        self.findings.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.lock().is_empty()
    }

    /// Number of findings at or above `severity`
    pub fn count_at_least(&self, severity: Severity) -> usize {
        self.findings
            .lock()
            .iter()
            .filter(|f| f.severity >= severity)
            .count()
    }

    /// Whether any finding carries `message`
    pub fn contains_message(&self, message: &str) -> bool {
        self.findings.lock().iter().any(|f| f.message == message)
    }
}

impl ReportSink for CollectingSink {
    fn report(
        &self,
        context: &ItemContext,
        category: Category,
        severity: Severity,
        message: &str,
        detail: &str,
    ) {
        self.findings.lock().push(Finding {
            context: context.clone(),
            severity,
            category,
            message: message.to_string(),
            detail: detail.to_string(),
        });
    }
}
