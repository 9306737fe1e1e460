/*!
 * Color alteration scanning.
 *
 * Items must not change text or background colors: students may use their
 * own contrast settings. Two passes run over every element:
 * - attributes: legacy `color` / `bgcolor`
 * - styles: CSS color syntax (hex, rgb, rgba, hsl, hsla) and CSS named colors
 *
 * Named colors are matched between non-word, non-hyphen characters so that
 * `red` does not fire inside `bored` and `white` does not fire on
 * `white-space`.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::markup::{Element, Fragment};
use crate::reporting::{Category, Reporter, Severity};

pub const COLOR_ATTRIBUTE: &str = "element carries a color-altering attribute";
pub const COLOR_STYLE_PATTERN: &str = "style alters color with a CSS color value";
pub const COLOR_STYLE_NAMED: &str = "style alters color with a CSS named color";

/// Attributes that change rendering colors
const COLOR_ATTRIBUTES: &[&str] = &["color", "bgcolor"];

/// CSS named colors
const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "grey", "green", "greenyellow", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
    "yellow", "yellowgreen",
];

/// One way of writing a color in CSS
#[derive(Debug, Clone)]
pub struct ColorRule {
    pub name: String,
    pub pattern: Regex,
}

impl ColorRule {
    fn new(name: &str, pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: Regex::new(pattern).expect("Invalid color rule regex"),
        }
    }

    /// Rule for a named color, delimited so it never matches inside a longer word
    fn named(color: &str) -> Self {
        Self::new(
            color,
            &format!(r"(?i)(?:^|[^\w-]){}(?:[^\w-]|$)", regex::escape(color)),
        )
    }

    pub fn matches(&self, style: &str) -> bool {
        self.pattern.is_match(style)
    }
}

/// Color value syntaxes
pub static SYNTAX_RULES: Lazy<Vec<ColorRule>> = Lazy::new(|| {
    vec![
        ColorRule::new("hex", r"#(?:[0-9a-fA-F]{8}|[0-9a-fA-F]{6}|[0-9a-fA-F]{3,4})\b"),
        ColorRule::new("rgb", r"(?i)\brgb\s*\([^)]*\)"),
        ColorRule::new("rgba", r"(?i)\brgba\s*\([^)]*\)"),
        ColorRule::new("hsl", r"(?i)\bhsl\s*\([^)]*\)"),
        ColorRule::new("hsla", r"(?i)\bhsla\s*\([^)]*\)"),
    ]
});

/// One rule per CSS named color
pub static NAMED_COLOR_RULES: Lazy<Vec<ColorRule>> =
    Lazy::new(|| NAMED_COLORS.iter().map(|c| ColorRule::named(c)).collect());

/// Names of the rules in `rules` that match `style`
pub fn matching_rules<'a>(rules: &'a [ColorRule], style: &str) -> Vec<&'a str> {
    rules
        .iter()
        .filter(|rule| rule.matches(style))
        .map(|rule| rule.name.as_str())
        .collect()
}

/// Outcome of the style pass, split by rule family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorStyleResult {
    /// Elements whose style uses hex/rgb/rgba/hsl/hsla
    pub pattern_violations: usize,
    /// Elements whose style uses a named color
    pub named_violations: usize,
}

impl ColorStyleResult {
    pub fn patterns_ok(&self) -> bool {
        self.pattern_violations == 0
    }

    pub fn named_ok(&self) -> bool {
        self.named_violations == 0
    }

    pub fn passed(&self) -> bool {
        self.patterns_ok() && self.named_ok()
    }
}

/// Report every `color`/`bgcolor` attribute. Returns true when none exist.
pub fn validate_color_attributes(
    fragment: &Fragment,
    reporter: &Reporter<'_>,
    severity: Severity,
) -> bool {
    let mut violations = 0;

    for element in fragment.elements() {
        for attribute in element.attributes() {
            if COLOR_ATTRIBUTES
                .iter()
                .any(|name| attribute.name.eq_ignore_ascii_case(name))
            {
                violations += 1;
                reporter.report(
                    Category::Accessibility,
                    severity,
                    COLOR_ATTRIBUTE,
                    &format!(
                        "{}=\"{}\" on {}",
                        attribute.name,
                        attribute.value,
                        element.start_tag()
                    ),
                );
            }
        }
    }

    debug!("Color attributes: {} violations", violations);
    violations == 0
}

/// Test every `style` attribute against all color rules
pub fn scan_color_styles(
    fragment: &Fragment,
    reporter: &Reporter<'_>,
    severity: Severity,
) -> ColorStyleResult {
    let mut result = ColorStyleResult::default();

    for element in fragment.elements() {
        let Some(style) = element.attr("style") else {
            continue;
        };

        let syntax = matching_rules(&SYNTAX_RULES, style);
        if !syntax.is_empty() {
            result.pattern_violations += 1;
            report_style(reporter, severity, COLOR_STYLE_PATTERN, &syntax, element);
        }

        let named = matching_rules(&NAMED_COLOR_RULES, style);
        if !named.is_empty() {
            result.named_violations += 1;
            report_style(reporter, severity, COLOR_STYLE_NAMED, &named, element);
        }
    }

    debug!(
        "Color styles: {} pattern violations, {} named color violations",
        result.pattern_violations, result.named_violations
    );
    result
}

/// Style pass as a single verdict
pub fn validate_color_styles(
    fragment: &Fragment,
    reporter: &Reporter<'_>,
    severity: Severity,
) -> bool {
    scan_color_styles(fragment, reporter, severity).passed()
}

fn report_style(
    reporter: &Reporter<'_>,
    severity: Severity,
    message: &str,
    rules: &[&str],
    element: &Element,
) {
    reporter.report(
        Category::Accessibility,
        severity,
        message,
        &format!("rules [{}] on {}", rules.join(", "), element.start_tag()),
    );
}
