/*!
 * Image reference validation.
 *
 * Every `img` needs a non-empty `id`: accessibility metadata kept outside the
 * fragment refers to images by that id. Only presence is checked here; the
 * cross-reference itself belongs to whoever owns that metadata.
 */

use log::debug;

use crate::markup::{Element, Fragment};
use crate::reporting::{Category, Reporter, Severity};

pub const IMAGE_WITHOUT_ATTRIBUTES: &str = "image has no attributes";
pub const IMAGE_WITHOUT_ID: &str = "image is missing an id for its alt-text reference";
pub const IMAGE_WITH_EMPTY_ID: &str = "image has an empty id for its alt-text reference";

/// Problem found on a single image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageIssue {
    NoAttributes,
    MissingId,
    EmptyId,
}

impl ImageIssue {
    pub fn message(&self) -> &'static str {
        match self {
            ImageIssue::NoAttributes => IMAGE_WITHOUT_ATTRIBUTES,
            ImageIssue::MissingId => IMAGE_WITHOUT_ID,
            ImageIssue::EmptyId => IMAGE_WITH_EMPTY_ID,
        }
    }
}

/// Inspect one `img` element
pub fn check_image(image: &Element) -> Option<ImageIssue> {
    if !image.has_attributes() {
        return Some(ImageIssue::NoAttributes);
    }
    match image.attr("id") {
        None => Some(ImageIssue::MissingId),
        Some(id) if id.trim().is_empty() => Some(ImageIssue::EmptyId),
        Some(_) => None,
    }
}

/// Report every image without a usable id. Returns true when all images pass.
pub fn validate_image_references(
    fragment: &Fragment,
    reporter: &Reporter<'_>,
    severity: Severity,
) -> bool {
    let mut checked = 0;
    let mut failed = 0;

    for image in fragment.elements_named("img") {
        checked += 1;
        if let Some(issue) = check_image(image) {
            failed += 1;
            reporter.report(
                Category::Accessibility,
                severity,
                issue.message(),
                &image.start_tag(),
            );
        }
    }

    debug!("Image references: {} images, {} failed", checked, failed);
    failed == 0
}
