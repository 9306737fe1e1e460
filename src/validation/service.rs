/*!
 * Validation service that orchestrates all scanners over one fragment.
 *
 * Order of checks: image references, color attributes, color styles, nesting
 * guard, span resolution and term coverage. Only the accessibility checks
 * decide the fragment verdict; nesting and coverage findings are reported
 * but informational.
 */

use std::panic::{self, AssertUnwindSafe};

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::markup::{Fragment, parse_fragment};
use crate::reporting::{Category, ItemContext, ReportSink, Reporter, Severity};

use super::colors::{ColorStyleResult, scan_color_styles, validate_color_attributes};
use super::coverage::validate_term_coverage;
use super::images::validate_image_references;
use super::markers::validate_no_illegal_nesting;
use super::spans::{TermTally, resolve_glossary_spans};

pub const FRAGMENT_NOT_SCANNED: &str = "fragment could not be scanned";

/// Configuration for the validation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Whether validation is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether every image must carry an id
    #[serde(default = "default_true")]
    pub image_references: bool,

    /// Whether `color`/`bgcolor` attributes are rejected
    #[serde(default = "default_true")]
    pub color_attributes: bool,

    /// Whether color values in `style` attributes are rejected
    #[serde(default = "default_true")]
    pub color_styles: bool,

    /// Whether start markers nested in start markers are reported
    #[serde(default = "default_true")]
    pub illegal_nesting: bool,

    /// Whether glossary spans are resolved
    #[serde(default = "default_true")]
    pub glossary_spans: bool,

    /// Whether tallied terms are checked against all occurrences (needs `glossary_spans`)
    #[serde(default = "default_true")]
    pub term_coverage: bool,

    /// Severity given to findings of these checks
    #[serde(default)]
    pub severity: Severity,
}

fn default_true() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            image_references: true,
            color_attributes: true,
            color_styles: true,
            illegal_nesting: true,
            glossary_spans: true,
            term_coverage: true,
            severity: Severity::default(),
        }
    }
}

/// Per-check results for one fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentOutcome {
    /// Whether the fragment was parsed and scanned to the end
    pub scanned: bool,
    pub images_ok: bool,
    pub color_attributes_ok: bool,
    pub color_styles: ColorStyleResult,
    pub nesting_ok: bool,
    pub coverage_ok: bool,
    /// Terms found by the span resolver
    pub tally: TermTally,
}

impl FragmentOutcome {
    fn clean() -> Self {
        Self {
            scanned: true,
            images_ok: true,
            color_attributes_ok: true,
            color_styles: ColorStyleResult::default(),
            nesting_ok: true,
            coverage_ok: true,
            tally: TermTally::new(),
        }
    }

    fn not_scanned() -> Self {
        Self {
            scanned: false,
            ..Self::clean()
        }
    }

    /// The fragment verdict: scanned and free of accessibility violations
    pub fn passed(&self) -> bool {
        self.scanned
            && self.images_ok
            && self.color_attributes_ok
            && self.color_styles.patterns_ok()
            && self.color_styles.named_ok()
    }

    /// Whether the informational glossary checks also came out clean
    pub fn glossary_ok(&self) -> bool {
        self.nesting_ok && self.coverage_ok
    }
}

/// Validation service for markup fragments
pub struct FragmentValidator<'a> {
    config: ValidationConfig,
    sink: &'a dyn ReportSink,
}

impl<'a> FragmentValidator<'a> {
    /// Create a new validator with default configuration
    pub fn new(sink: &'a dyn ReportSink) -> Self {
        Self::with_config(ValidationConfig::default(), sink)
    }

    /// Create a new validator with custom configuration
    pub fn with_config(config: ValidationConfig, sink: &'a dyn ReportSink) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Check if validation is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Validate one raw fragment with the configured severity
    pub fn validate(&self, markup: &str, context: &ItemContext) -> bool {
        self.validate_fragment(markup, context, self.config.severity)
    }

    /// Validate one raw fragment; true when it passes the accessibility checks
    pub fn validate_fragment(&self, markup: &str, context: &ItemContext, severity: Severity) -> bool {
        self.check_fragment(markup, context, severity).passed()
    }

    /// Run every enabled check and return the individual results
    pub fn check_fragment(
        &self,
        markup: &str,
        context: &ItemContext,
        severity: Severity,
    ) -> FragmentOutcome {
        if !self.config.enabled {
            return FragmentOutcome::clean();
        }

        let reporter = Reporter::new(self.sink, context);

        let fragment = match parse_fragment(markup) {
            Ok(fragment) => fragment,
            Err(e) => {
                error!("{}: {}", context, e);
                reporter.report(Category::Parse, Severity::Degraded, FRAGMENT_NOT_SCANNED, &e.to_string());
                return FragmentOutcome::not_scanned();
            }
        };

        let scanned = panic::catch_unwind(AssertUnwindSafe(|| {
            self.check_parsed(&fragment, &reporter, severity)
        }));

        match scanned {
            Ok(outcome) => {
                debug!(
                    "{}: passed={}, glossary_ok={}, terms={}",
                    context,
                    outcome.passed(),
                    outcome.glossary_ok(),
                    outcome.tally.len()
                );
                outcome
            }
            Err(payload) => {
                let message = panic_message(&*payload);
                error!("{}: scanning aborted: {}", context, message);
                reporter.report(Category::Parse, Severity::Degraded, FRAGMENT_NOT_SCANNED, &message);
                FragmentOutcome::not_scanned()
            }
        }
    }

    /// Run every enabled check over an already parsed fragment
    pub fn check_parsed(
        &self,
        fragment: &Fragment,
        reporter: &Reporter<'_>,
        severity: Severity,
    ) -> FragmentOutcome {
        let mut outcome = FragmentOutcome::clean();

        if self.config.image_references {
            outcome.images_ok = validate_image_references(fragment, reporter, severity);
        }

        if self.config.color_attributes {
            outcome.color_attributes_ok = validate_color_attributes(fragment, reporter, severity);
        }

        if self.config.color_styles {
            outcome.color_styles = scan_color_styles(fragment, reporter, severity);
        }

        if self.config.illegal_nesting {
            outcome.nesting_ok = validate_no_illegal_nesting(fragment, reporter, severity);
        }

        if self.config.glossary_spans {
            outcome.tally = resolve_glossary_spans(fragment, reporter, severity);

            if self.config.term_coverage {
                outcome.coverage_ok =
                    validate_term_coverage(fragment, &outcome.tally, reporter, severity);
            }
        }

        outcome
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected internal fault".to_string()
    }
}
