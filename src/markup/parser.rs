//! Markup parser: builds detached light-DOM subtrees from a token stream.

use crate::dom::{Dom, NodeData, NodeId};

use super::tokenizer::{tokenize, MarkupToken};
use super::MarkupError;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta", "source", "wbr"];

/// Whether `tag` is a void element.
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Parse `input` and insert the resulting nodes into `dom` as detached
/// top-level nodes, returned in document order.
///
/// Whitespace-only text between elements is dropped. On error every node
/// created so far is removed again, leaving `dom` unchanged.
pub fn parse_into(dom: &mut Dom, input: &str) -> Result<Vec<NodeId>, MarkupError> {
    let tokens = tokenize(input)?;
    let mut roots = Vec::new();
    let mut stack: Vec<(NodeId, String)> = Vec::new();

    let result = build(dom, tokens, &mut roots, &mut stack);
    if let Err(err) = result {
        for root in roots {
            dom.remove(root);
        }
        return Err(err);
    }

    tracing::debug!(nodes = roots.len(), "parsed markup fragment");
    Ok(roots)
}

fn build(
    dom: &mut Dom,
    tokens: Vec<MarkupToken>,
    roots: &mut Vec<NodeId>,
    stack: &mut Vec<(NodeId, String)>,
) -> Result<(), MarkupError> {
    for token in tokens {
        match token {
            MarkupToken::Text(text) => {
                if text.trim().is_empty() {
                    continue;
                }
                push_node(dom, roots, stack, NodeData::text(text));
            }
            MarkupToken::Open { name, attributes, self_closing } => {
                let mut data = NodeData::element(name.clone());
                for (attr, value) in attributes {
                    data.attributes.set(&attr, value);
                }
                let id = push_node(dom, roots, stack, data);
                if !self_closing && !is_void(&name) {
                    stack.push((id, name));
                }
            }
            MarkupToken::Close(name) => match stack.pop() {
                Some((_, open)) if open == name => {}
                Some((_, open)) => {
                    return Err(MarkupError::MismatchedClose { expected: open, found: name });
                }
                None if is_void(&name) => {}
                None => return Err(MarkupError::UnmatchedClose(name)),
            },
        }
    }

    match stack.last() {
        Some((_, open)) => Err(MarkupError::Unclosed(open.clone())),
        None => Ok(()),
    }
}

fn push_node(
    dom: &mut Dom,
    roots: &mut Vec<NodeId>,
    stack: &[(NodeId, String)],
    data: NodeData,
) -> NodeId {
    match stack.last() {
        Some(&(parent, _)) => dom.insert_child(parent, data),
        None => {
            let id = dom.insert(data);
            roots.push(id);
            id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dom_with_body() -> Dom {
        let mut dom = Dom::new();
        dom.insert(NodeData::element("body"));
        dom
    }

    #[test]
    fn nested_structure() {
        let mut dom = dom_with_body();
        let roots = parse_into(
            &mut dom,
            r#"
            <aui-tabs value="b">
                <aui-tab value="a">A</aui-tab>
                <aui-tab value="b">B</aui-tab>
                <aui-tab-panel value="a">Panel A</aui-tab-panel>
            </aui-tabs>
            "#,
        )
        .unwrap();
        assert_eq!(roots.len(), 1);
        let tabs = roots[0];
        assert_eq!(dom.get(tabs).unwrap().attr("value"), Some("b"));
        assert_eq!(dom.children(tabs).len(), 3);
        assert_eq!(dom.children_by_tag(tabs, "aui-tab").len(), 2);
        let first = dom.children(tabs)[0];
        assert_eq!(dom.text_content(first), "A");
        assert_eq!(dom.parent(tabs), None);
    }

    #[test]
    fn multiple_roots_in_order() {
        let mut dom = dom_with_body();
        let roots = parse_into(&mut dom, "<aui-badge value=3></aui-badge><aui-button>Go</aui-button>").unwrap();
        let tags: Vec<_> = roots.iter().map(|&r| dom.get(r).unwrap().tag.clone()).collect();
        assert_eq!(tags, vec!["aui-badge", "aui-button"]);
    }

    #[test]
    fn void_elements_do_not_nest() {
        let mut dom = dom_with_body();
        let roots = parse_into(&mut dom, r#"<div><input value="x"><span>after</span></div>"#).unwrap();
        let div = roots[0];
        assert_eq!(dom.children(div).len(), 2);
    }

    #[test]
    fn mismatched_close_rolls_back() {
        let mut dom = dom_with_body();
        let before = dom.len();
        let err = parse_into(&mut dom, "<aui-menu><aui-menu-item></aui-menu>").unwrap_err();
        assert_eq!(
            err,
            MarkupError::MismatchedClose { expected: "aui-menu-item".into(), found: "aui-menu".into() }
        );
        assert_eq!(dom.len(), before);
    }

    #[test]
    fn unclosed_is_error() {
        let mut dom = dom_with_body();
        assert_eq!(parse_into(&mut dom, "<aui-drawer>"), Err(MarkupError::Unclosed("aui-drawer".into())));
    }

    #[test]
    fn stray_close_is_error() {
        let mut dom = dom_with_body();
        assert_eq!(parse_into(&mut dom, "</div>"), Err(MarkupError::UnmatchedClose("div".into())));
    }

    #[test]
    fn void_detection() {
        assert!(is_void("input"));
        assert!(!is_void("aui-textfield"));
    }
}
