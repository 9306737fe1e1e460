/*!
 * Fragment parser.
 *
 * Uses html5ever's RcDom and converts the result into an owned
 * `Fragment`. The document wrapper html5ever always builds is unwrapped, so
 * the fragment roots are whatever the payload itself contained.
 */

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use log::debug;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::errors::ScanError;

use super::node::{Attribute, Element, Fragment, MarkupNode};

/// Deepest element nesting accepted before the fragment is rejected
pub const MAX_NESTING_DEPTH: usize = 512;

/// Elements that are legitimately empty in HTML
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Regex for XML-style self-closing tags like `<span id="a"/>`
static SELF_CLOSING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<([A-Za-z][A-Za-z0-9:_-]*)(\s(?:[^<>"']|"[^"]*"|'[^']*')*?)?\s*/>"#)
        .expect("Invalid self-closing tag regex")
});

/// Parse a markup payload into a fragment
pub fn parse_fragment(markup: &str) -> Result<Fragment, ScanError> {
    let expanded = expand_self_closing(markup);

    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut expanded.as_bytes())
        .map_err(|e| ScanError::Parse(e.to_string()))?;

    let mut roots = Vec::new();
    for html in element_children(&dom.document, "html") {
        for section in ["head", "body"] {
            for wrapper in element_children(&html, section) {
                for child in wrapper.children.borrow().iter() {
                    if let Some(node) = convert_node(child, 1)? {
                        roots.push(node);
                    }
                }
            }
        }
    }

    debug!(
        "Parsed fragment: {} bytes, {} root nodes, {} parser notices",
        markup.len(),
        roots.len(),
        dom.errors.borrow().len()
    );

    Ok(Fragment::new(roots))
}

/// Rewrite `<tag .../>` into `<tag ...></tag>` for non-void elements.
///
/// HTML ignores the trailing slash on non-void elements, which would turn an
/// empty XML-style marker into an open element swallowing its siblings.
pub fn expand_self_closing(markup: &str) -> String {
    SELF_CLOSING_REGEX
        .replace_all(markup, |caps: &Captures| {
            let name = &caps[1];
            if VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name)) {
                return caps[0].to_string();
            }
            let attributes = caps.get(2).map_or("", |m| m.as_str());
            format!("<{name}{attributes}></{name}>")
        })
        .into_owned()
}

fn element_children(handle: &Handle, name: &str) -> Vec<Handle> {
    handle
        .children
        .borrow()
        .iter()
        .filter(|child| match &child.data {
            RcNodeData::Element { name: qual, .. } => &*qual.local == name,
            _ => false,
        })
        .cloned()
        .collect()
}

fn convert_node(handle: &Handle, depth: usize) -> Result<Option<MarkupNode>, ScanError> {
    match &handle.data {
        RcNodeData::Text { contents } => {
            Ok(Some(MarkupNode::Text(contents.borrow().to_string())))
        }
        RcNodeData::Element { name, attrs, .. } => {
            if depth > MAX_NESTING_DEPTH {
                return Err(ScanError::Parse(format!(
                    "elements nested deeper than {} levels",
                    MAX_NESTING_DEPTH
                )));
            }

            let mut element = Element::new(&name.local);
            for attr in attrs.borrow().iter() {
                element.push_attribute(Attribute {
                    name: attr.name.local.to_string(),
                    value: attr.value.to_string(),
                });
            }
            for child in handle.children.borrow().iter() {
                if let Some(node) = convert_node(child, depth + 1)? {
                    element.push_child(node);
                }
            }
            Ok(Some(MarkupNode::Element(element)))
        }
        // Comments, doctypes and processing instructions carry no content
        _ => Ok(None),
    }
}
