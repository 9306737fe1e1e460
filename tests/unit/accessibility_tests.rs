/*!
 * Tests for image reference and color alteration checks
 */

use spanlint::markup::Element;
use spanlint::reporting::{Category, CollectingSink, Severity};
use spanlint::validation::colors::{
    COLOR_ATTRIBUTE, COLOR_STYLE_NAMED, COLOR_STYLE_PATTERN, NAMED_COLOR_RULES, SYNTAX_RULES,
    matching_rules, scan_color_styles,
};
use spanlint::validation::images::{
    IMAGE_WITH_EMPTY_ID, IMAGE_WITHOUT_ATTRIBUTES, IMAGE_WITHOUT_ID, ImageIssue, check_image,
};
use spanlint::validation::{
    validate_color_attributes, validate_color_styles, validate_image_references,
};

use crate::common;

fn images(markup: &str) -> (bool, CollectingSink) {
    let fragment = common::fragment(markup);
    let (sink, context) = common::sink_and_context();
    let valid = validate_image_references(&fragment, &common::reporter(&sink, &context), Severity::Severe);
    (valid, sink)
}

fn color_attributes(markup: &str) -> (bool, CollectingSink) {
    let fragment = common::fragment(markup);
    let (sink, context) = common::sink_and_context();
    let valid = validate_color_attributes(&fragment, &common::reporter(&sink, &context), Severity::Severe);
    (valid, sink)
}

fn color_styles(markup: &str) -> (bool, CollectingSink) {
    let fragment = common::fragment(markup);
    let (sink, context) = common::sink_and_context();
    let valid = validate_color_styles(&fragment, &common::reporter(&sink, &context), Severity::Severe);
    (valid, sink)
}

#[test]
fn test_imageReferences_withId_shouldPass() {
    let (valid, sink) = images(r#"<p><img id="x" src="a.png"/></p>"#);

    assert!(valid);
    assert!(sink.is_empty());
}

#[test]
fn test_imageReferences_withoutAttributes_shouldFail() {
    let (valid, sink) = images("<p><img></p>");

    assert!(!valid);
    assert!(sink.contains_message(IMAGE_WITHOUT_ATTRIBUTES));
    assert_eq!(sink.findings()[0].category, Category::Accessibility);
}

#[test]
fn test_imageReferences_withoutId_shouldFail() {
    let (valid, sink) = images(r#"<img src="a.png" alt="a heron">"#);

    assert!(!valid);
    assert!(sink.contains_message(IMAGE_WITHOUT_ID));
}

#[test]
fn test_imageReferences_withEmptyId_shouldFail() {
    let (valid, sink) = images(r#"<img id="" src="a.png"><img id="  " src="b.png">"#);

    assert!(!valid);
    assert_eq!(sink.len(), 2);
    assert!(sink.contains_message(IMAGE_WITH_EMPTY_ID));
}

/// Only images are inspected
#[test]
fn test_imageReferences_withoutImages_shouldPass() {
    let (valid, _) = images("<p>No pictures here</p>");

    assert!(valid);
}

#[test]
fn test_checkImage_shouldClassifyIssues() {
    assert_eq!(check_image(&Element::new("img")), Some(ImageIssue::NoAttributes));
    assert_eq!(
        check_image(&Element::new("img").with_attr("src", "a.png")),
        Some(ImageIssue::MissingId)
    );
    assert_eq!(
        check_image(&Element::new("img").with_attr("id", "")),
        Some(ImageIssue::EmptyId)
    );
    assert_eq!(check_image(&Element::new("img").with_attr("id", "i1")), None);
}

#[test]
fn test_colorAttributes_withBgcolor_shouldFail() {
    let (valid, sink) = color_attributes(r#"<p bgcolor="red">x</p>"#);

    assert!(!valid);
    assert!(sink.contains_message(COLOR_ATTRIBUTE));
}

#[test]
fn test_colorAttributes_withColor_shouldFail() {
    let (valid, _) = color_attributes(r#"<p color="red">x</p>"#);

    assert!(!valid);
}

/// Attribute names are lowercased by the parser and compared case-insensitively
#[test]
fn test_colorAttributes_withUppercaseName_shouldFail() {
    let (valid, _) = color_attributes(r##"<table><tr><td BGCOLOR="#fff">x</td></tr></table>"##);

    assert!(!valid);
}

#[test]
fn test_colorAttributes_withPlainParagraph_shouldPass() {
    let (valid, sink) = color_attributes(r#"<p class="lead">x</p>"#);

    assert!(valid);
    assert!(sink.is_empty());
}

/// Every offending element is reported
#[test]
fn test_colorAttributes_withSeveralElements_shouldReportEach() {
    let (valid, sink) = color_attributes(r#"<p color="red">a</p><div bgcolor="blue" color="white">b</div>"#);

    assert!(!valid);
    assert_eq!(sink.len(), 3);
}

#[test]
fn test_colorStyles_withEachColorSyntax_shouldFail() {
    let styles = [
        "color:red",
        "color:#123456",
        "color: rgb(0,0,255)",
        "background: rgba(0,0,255,0.3)",
        "color: hsl(120,60%,70%)",
        "color: hsla(120,60%,70%,0.3)",
    ];

    for style in styles {
        let (valid, sink) = color_styles(&format!(r#"<p style="{}">x</p>"#, style));
        assert!(!valid, "style '{}' should fail", style);
        assert!(!sink.is_empty(), "style '{}' should be reported", style);
    }
}

#[test]
fn test_colorStyles_withEmptyStyle_shouldPass() {
    let (valid, sink) = color_styles(r#"<p style="">x</p>"#);

    assert!(valid);
    assert!(sink.is_empty());
}

/// Named colors only match as whole words
#[test]
fn test_colorStyles_withColorNameInsideWord_shouldPass() {
    let (valid, _) = color_styles(r#"<p style="font-family: bored-serif; white-space: nowrap">x</p>"#);

    assert!(valid);
}

#[test]
fn test_colorStyles_withLayoutOnly_shouldPass() {
    let (valid, _) = color_styles(r#"<p style="margin: 0 auto; font-weight: bold">x</p>"#);

    assert!(valid);
}

/// Syntax and named violations are counted separately
#[test]
fn test_scanColorStyles_withBothKinds_shouldReportBoth() {
    let fragment = common::fragment(r##"<p style="color: #abcdef; border-color: navy">x</p>"##);
    let (sink, context) = common::sink_and_context();

    let result = scan_color_styles(&fragment, &common::reporter(&sink, &context), Severity::Degraded);

    assert!(!result.patterns_ok());
    assert!(!result.named_ok());
    assert!(sink.contains_message(COLOR_STYLE_PATTERN));
    assert!(sink.contains_message(COLOR_STYLE_NAMED));
    assert!(sink.findings().iter().all(|f| f.severity == Severity::Degraded));
}

/// The detail names the rules that matched
#[test]
fn test_scanColorStyles_detail_shouldNameRules() {
    let (_, sink) = color_styles(r#"<p style="color: red; background: blue">x</p>"#);

    let findings = sink.findings();
    assert_eq!(findings.len(), 1);
    assert!(findings[0].detail.contains("red"));
    assert!(findings[0].detail.contains("blue"));
    assert!(findings[0].detail.contains("<p style="));
}

#[test]
fn test_colorRules_shouldCoverSyntaxAndNames() {
    assert_eq!(SYNTAX_RULES.len(), 5);
    assert!(NAMED_COLOR_RULES.len() >= 140);
    assert!(matching_rules(&NAMED_COLOR_RULES, "color: RebeccaPurple").contains(&"rebeccapurple"));
    assert!(matching_rules(&SYNTAX_RULES, "color: #fff").len() == 1);
    assert!(matching_rules(&SYNTAX_RULES, "width: 100%").is_empty());
}
