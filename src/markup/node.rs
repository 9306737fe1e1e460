/*!
 * Owned node tree for one markup fragment.
 *
 * A fragment is a forest: CDATA payloads rarely have a single root, so the
 * top level is a plain sibling list like any element's children.
 */

use std::fmt::Write as _;

/// Elements that end a run of inline text
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "caption", "dd", "div", "dl", "dt",
    "figcaption", "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "ol", "p", "pre", "section", "table", "tbody", "td", "tfoot", "th",
    "thead", "tr", "ul",
];

/// One attribute in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name as written (the HTML parser lowercases it)
    pub name: String,
    /// Attribute value with entities decoded
    pub value: String,
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<MarkupNode>,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute, keeping insertion order
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push(Attribute {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Append a child node
    pub fn with_child(mut self, child: impl Into<MarkupNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text child
    pub fn with_text(self, text: &str) -> Self {
        self.with_child(MarkupNode::Text(text.to_string()))
    }

    pub(crate) fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub(crate) fn push_child(&mut self, child: MarkupNode) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive tag name comparison
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Whether the element breaks inline text flow
    pub fn is_block(&self) -> bool {
        BLOCK_ELEMENTS.iter().any(|b| self.name.eq_ignore_ascii_case(b))
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Look up an attribute value by name, ignoring ASCII case
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// True when the attribute exists and equals `expected`, ignoring ASCII case
    pub fn attr_equals(&self, name: &str, expected: &str) -> bool {
        self.attr(name)
            .is_some_and(|value| value.eq_ignore_ascii_case(expected))
    }

    pub fn children(&self) -> &[MarkupNode] {
        &self.children
    }

    /// Concatenated text of every descendant text node
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        let mut stack: Vec<&MarkupNode> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            match node {
                MarkupNode::Text(t) => text.push_str(t),
                MarkupNode::Element(e) => stack.extend(e.children.iter().rev()),
            }
        }
        text
    }

    /// Render the start tag, used as finding detail
    pub fn start_tag(&self) -> String {
        let mut tag = format!("<{}", self.name);
        for attribute in &self.attributes {
            let _ = write!(tag, " {}=\"{}\"", attribute.name, attribute.value);
        }
        tag.push('>');
        tag
    }
}

/// A node in a fragment: either an element or a run of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Element(Element),
    Text(String),
}

impl MarkupNode {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            MarkupNode::Element(e) => Some(e),
            MarkupNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MarkupNode::Text(t) => Some(t),
            MarkupNode::Element(_) => None,
        }
    }

    /// Text of this node and everything below it
    pub fn text_content(&self) -> String {
        match self {
            MarkupNode::Text(t) => t.clone(),
            MarkupNode::Element(e) => e.text_content(),
        }
    }
}

impl From<Element> for MarkupNode {
    fn from(element: Element) -> Self {
        MarkupNode::Element(element)
    }
}

impl From<&str> for MarkupNode {
    fn from(text: &str) -> Self {
        MarkupNode::Text(text.to_string())
    }
}

/// A node together with the sibling list it lives in
#[derive(Debug, Clone, Copy)]
pub struct NodePosition<'a> {
    /// Every node sharing this node's parent, in order
    pub siblings: &'a [MarkupNode],
    /// Index of the node inside `siblings`
    pub index: usize,
}

impl<'a> NodePosition<'a> {
    pub fn node(&self) -> &'a MarkupNode {
        &self.siblings[self.index]
    }

    /// The siblings after this node
    pub fn following(&self) -> &'a [MarkupNode] {
        &self.siblings[self.index + 1..]
    }
}

/// Pre-order walk over a forest that keeps sibling context
pub struct Positions<'a> {
    stack: Vec<(&'a [MarkupNode], usize)>,
}

impl<'a> Iterator for Positions<'a> {
    type Item = NodePosition<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(top) = self.stack.last_mut() {
            let (siblings, index) = *top;
            if index >= siblings.len() {
                self.stack.pop();
                continue;
            }
            top.1 += 1;

            if let MarkupNode::Element(element) = &siblings[index] {
                if !element.children.is_empty() {
                    self.stack.push((&element.children, 0));
                }
            }
            return Some(NodePosition { siblings, index });
        }
        None
    }
}

/// The parsed form of one CDATA payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    roots: Vec<MarkupNode>,
}

impl Fragment {
    pub fn new(roots: Vec<MarkupNode>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[MarkupNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Every node in document order, with its sibling list
    pub fn positions(&self) -> Positions<'_> {
        Positions {
            stack: vec![(&self.roots, 0)],
        }
    }

    /// Every element in document order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.positions().filter_map(|p| p.node().as_element())
    }

    /// Every element with the given tag name
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| e.is_named(name))
    }

    /// Every text node in document order
    pub fn text_nodes(&self) -> impl Iterator<Item = &str> {
        self.positions().filter_map(|p| p.node().as_text())
    }

    /// All text of the fragment concatenated
    pub fn flattened_text(&self) -> String {
        self.text_nodes().collect()
    }

    /// Text of each sibling list joined into runs.
    ///
    /// Text nodes of one sibling list are concatenated, stepping over inline
    /// elements without taking their text; a block element ends the run. The
    /// children of every element form runs of their own. Runs come out in no
    /// particular order.
    pub fn text_runs(&self) -> Vec<String> {
        let mut runs = Vec::new();
        let mut pending: Vec<&[MarkupNode]> = vec![&self.roots];

        while let Some(siblings) = pending.pop() {
            let mut run = String::new();
            for node in siblings {
                match node {
                    MarkupNode::Text(text) => run.push_str(text),
                    MarkupNode::Element(element) => {
                        if element.is_block() && !run.is_empty() {
                            runs.push(std::mem::take(&mut run));
                        }
                        if !element.children.is_empty() {
                            pending.push(&element.children);
                        }
                    }
                }
            }
            if !run.is_empty() {
                runs.push(run);
            }
        }

        runs
    }
}
