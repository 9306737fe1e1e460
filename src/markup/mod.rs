/*!
 * Markup fragments: the owned node tree and the parser that builds it.
 *
 * - `node`: `Fragment`, `MarkupNode`, `Element` and document-order walks
 * - `parser`: html5ever-backed conversion from raw CDATA text
 */

pub mod node;
pub mod parser;

pub use node::{Attribute, Element, Fragment, MarkupNode, NodePosition};
pub use parser::parse_fragment;
