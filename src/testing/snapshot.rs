//! Snapshot rendering helpers.
//!
//! Functions for turning shadow subtrees into stable, readable text for
//! snapshot assertions. `<style>` elements are skipped so snapshots track
//! structure and attributes rather than CSS.

use crate::document::Document;
use crate::dom::NodeId;
use crate::render::{VElement, VNode};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a subtree as indented markup, one element or text run per line.
///
/// Elements print as `<tag attr="value">` (presence attributes bare) with
/// their children indented two spaces below and no closing tag. Whitespace
/// only text is dropped; other text is trimmed.
///
/// # Examples
///
/// ```
/// use aui::render::{h, VNode};
/// use aui::testing::outline;
///
/// let tree: VNode = h("ul").child(h("li").flag("selected", true).text(" One ")).into();
/// assert_eq!(outline(&tree), "<ul>\n  <li selected>\n    One");
/// ```
pub fn outline(node: &VNode) -> String {
    let mut lines = Vec::new();
    push_lines(node, 0, &mut lines);
    lines.join("\n")
}

/// Outline of the shadow subtree of the component at `node`.
///
/// Empty when no component is mounted there.
pub fn shadow_outline(doc: &Document, node: NodeId) -> String {
    doc.shadow(node)
        .map(|shadow| outline(shadow.tree()))
        .unwrap_or_default()
}

/// The opening tag of `el`, attributes in insertion order.
pub fn open_tag(el: &VElement) -> String {
    let mut out = format!("<{}", el.tag);
    for (name, value) in &el.attrs {
        if value.is_empty() {
            out.push_str(&format!(" {name}"));
        } else {
            out.push_str(&format!(" {name}=\"{}\"", value.replace('"', "&quot;")));
        }
    }
    out.push('>');
    out
}

fn push_lines(node: &VNode, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match node {
        VNode::Text(text) => {
            let text = text.trim();
            if !text.is_empty() {
                lines.push(format!("{indent}{text}"));
            }
        }
        VNode::Element(el) if el.tag == "style" => {}
        VNode::Element(el) => {
            lines.push(format!("{indent}{}", open_tag(el)));
            for child in &el.children {
                push_lines(child, depth + 1, lines);
            }
        }
        VNode::Fragment(children) => {
            for child in children {
                push_lines(child, depth, lines);
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
