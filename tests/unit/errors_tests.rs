/*!
 * Tests for error types
 */

use anyhow::anyhow;
use spanlint::ScanError;

#[test]
fn test_scanError_display_shouldIncludeKindAndMessage() {
    assert_eq!(
        ScanError::Parse("bad markup".to_string()).to_string(),
        "Failed to parse fragment: bad markup"
    );
    assert_eq!(
        ScanError::Config("no extensions".to_string()).to_string(),
        "Configuration error: no extensions"
    );
    assert_eq!(ScanError::File("gone".to_string()).to_string(), "File error: gone");
}

#[test]
fn test_scanError_fromIoError_shouldBeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing item");

    let error: ScanError = io_error.into();

    assert!(matches!(error, ScanError::File(ref m) if m.contains("missing item")));
}

#[test]
fn test_scanError_fromAnyhow_shouldBeUnknownError() {
    let error: ScanError = anyhow!("something odd").into();

    assert!(matches!(error, ScanError::Unknown(ref m) if m == "something odd"));
}

/// ScanError converts into anyhow for the command line layer
#[test]
fn test_scanError_intoAnyhow_shouldKeepMessage() {
    let error: anyhow::Error = ScanError::Parse("depth".to_string()).into();

    assert_eq!(error.to_string(), "Failed to parse fragment: depth");
}
