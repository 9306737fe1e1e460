/*!
 * Run-level summary written out by the command line tool.
 */

use std::collections::BTreeMap;

use serde::Serialize;

use super::finding::{Finding, Severity};

/// Summary of one scan over many fragments
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Files read
    pub files_scanned: usize,
    /// Fragments validated
    pub fragments_scanned: usize,
    /// Fragments whose validation returned false
    pub fragments_failed: usize,
    /// Number of findings per severity
    pub severity_counts: BTreeMap<String, usize>,
    /// Every finding, most severe first
    pub findings: Vec<Finding>,
}

impl ScanReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one fragment
    pub fn record_fragment(&mut self, passed: bool) {
        self.fragments_scanned += 1;
        if !passed {
            self.fragments_failed += 1;
        }
    }

    /// Add findings and keep the list sorted by severity
    pub fn add_findings(&mut self, findings: Vec<Finding>) {
        for finding in &findings {
            *self
                .severity_counts
                .entry(finding.severity.to_string())
                .or_insert(0) += 1;
        }
        self.findings.extend(findings);
        self.findings.sort_by(|a, b| b.severity.cmp(&a.severity));
    }

    /// Number of findings at or above `severity`
    pub fn count_at_least(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity >= severity)
            .count()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let counts: Vec<String> = Severity::all()
            .iter()
            .map(|s| {
                format!(
                    "{} {}",
                    self.severity_counts.get(s.as_str()).copied().unwrap_or(0),
                    s
                )
            })
            .collect();
        format!(
            "Scan: {} files, {}/{} fragments passed, findings: {}",
            self.files_scanned,
            self.fragments_scanned - self.fragments_failed,
            self.fragments_scanned,
            counts.join(", ")
        )
    }
}
