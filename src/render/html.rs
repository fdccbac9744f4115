//! HTML serialization of shadow subtrees.

use crate::markup::parser::is_void;

use super::vnode::{VElement, VNode};

/// Serialize a subtree to HTML.
///
/// Presence attributes (empty value) serialize as a bare name. Character data
/// and attribute values are escaped; `<style>` content is emitted verbatim.
pub fn to_html(node: &VNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out, false);
    out
}

fn write_node(node: &VNode, out: &mut String, raw_text: bool) {
    match node {
        VNode::Text(text) if raw_text => out.push_str(text),
        VNode::Text(text) => escape_into(text, out, false),
        VNode::Element(el) => write_element(el, out),
        VNode::Fragment(children) => {
            for child in children {
                write_node(child, out, raw_text);
            }
        }
    }
}

fn write_element(el: &VElement, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        if !value.is_empty() {
            out.push_str("=\"");
            escape_into(value, out, true);
            out.push('"');
        }
    }
    out.push('>');
    if is_void(&el.tag) {
        return;
    }
    let raw = el.tag == "style";
    for child in &el.children {
        write_node(child, out, raw);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

fn escape_into(text: &str, out: &mut String, attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::vnode::h;

    #[test]
    fn element_with_attrs() {
        let node: VNode = h("button").attr("type", "button").flag("disabled", true).text("Go").into();
        assert_eq!(to_html(&node), r#"<button type="button" disabled>Go</button>"#);
    }

    #[test]
    fn escapes_text_and_attributes() {
        let node: VNode = h("span").attr("title", r#"a "b" & c"#).text("<x>").into();
        assert_eq!(to_html(&node), r#"<span title="a &quot;b&quot; &amp; c">&lt;x&gt;</span>"#);
    }

    #[test]
    fn style_is_raw() {
        let node: VNode = h("style").text(":host > .a { content: \"&\"; }").into();
        assert_eq!(to_html(&node), "<style>:host > .a { content: \"&\"; }</style>");
    }

    #[test]
    fn void_elements_have_no_close() {
        let node: VNode = h("input").attr("value", "x").into();
        assert_eq!(to_html(&node), r#"<input value="x">"#);
    }

    #[test]
    fn fragments_flatten() {
        let node = VNode::Fragment(vec![h("b").into(), "t".into(), VNode::empty()]);
        assert_eq!(to_html(&node), "<b></b>t");
    }
}
