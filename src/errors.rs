/*!
 * Error types for the spanlint library.
 *
 * Validation failures are never errors: they are reported as findings and
 * surface as `false` from the check functions. The types here cover the
 * faults that stop a fragment or a file from being scanned at all.
 */

use thiserror::Error;

/// Errors that can occur while loading or scanning markup
#[derive(Error, Debug)]
pub enum ScanError {
    /// The fragment could not be turned into a node tree
    #[error("Failed to parse fragment: {0}")]
    Parse(String),

    /// The configuration is missing values or inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for ScanError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for ScanError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
