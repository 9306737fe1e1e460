/*!
 * Findings and the values that classify them.
 */

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// How bad a finding is.
///
/// Variants are declared in ascending order so the derived `Ord` puts
/// `Severe` on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Benign,
    Tolerable,
    Degraded,
    #[default]
    Severe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Severe => "severe",
            Severity::Degraded => "degraded",
            Severity::Tolerable => "tolerable",
            Severity::Benign => "benign",
        }
    }

    /// All severities, most serious first
    pub fn all() -> [Severity; 4] {
        [
            Severity::Severe,
            Severity::Degraded,
            Severity::Tolerable,
            Severity::Benign,
        ]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "severe" => Ok(Self::Severe),
            "degraded" => Ok(Self::Degraded),
            "tolerable" => Ok(Self::Tolerable),
            "benign" => Ok(Self::Benign),
            _ => Err(anyhow!("Invalid severity: {}", s)),
        }
    }
}

/// Which family of rule produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Malformed marker pairs, missing end markers, overlap, illegal nesting
    Structural,
    /// Terms tagged in one place but not another, illegal term characters
    Consistency,
    /// Image references and color-altering markup
    Accessibility,
    /// The fragment could not be parsed or scanned
    Parse,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Structural => "structural",
            Category::Consistency => "consistency",
            Category::Accessibility => "accessibility",
            Category::Parse => "parse",
        };
        write!(f, "{}", name)
    }
}

/// Identity of the item a fragment came from.
///
/// Scanners pass it through untouched; only sinks look inside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemContext {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fragment: Option<usize>,
}

impl ItemContext {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            source: None,
            fragment: None,
        }
    }

    /// Attach the file the item was read from
    pub fn with_source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(path.as_ref().to_path_buf());
        self
    }

    /// Attach the ordinal of the fragment inside the item
    pub fn with_fragment(mut self, index: usize) -> Self {
        self.fragment = Some(index);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl fmt::Display for ItemContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if let Some(index) = self.fragment {
            write!(f, "#{}", index)?;
        }
        Ok(())
    }
}

/// One reported problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub context: ItemContext,
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    pub detail: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.severity, self.context, self.category, self.message
        )?;
        if !self.detail.is_empty() {
            write!(f, " - {}", self.detail)?;
        }
        Ok(())
    }
}
