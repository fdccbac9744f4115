//! Shadow roots: per-component rendered subtree, slots, and parts.
//!
//! A [`ShadowRoot`] is owned exclusively by one component instance. Its tree is
//! replaced whole on every render; nothing in it is ever patched in place.

use crate::dom::{Dom, NodeId};

use super::html::to_html;
use super::vnode::VNode;

/// The rendered, encapsulated subtree of a component.
#[derive(Debug, Clone)]
pub struct ShadowRoot {
    host: NodeId,
    tree: VNode,
    renders: u64,
}

impl ShadowRoot {
    /// An empty shadow root for `host`, not yet rendered.
    pub fn new(host: NodeId) -> Self {
        Self {
            host,
            tree: VNode::empty(),
            renders: 0,
        }
    }

    /// The host element this root belongs to.
    pub fn host(&self) -> NodeId {
        self.host
    }

    /// Replace the whole subtree with a freshly rendered one.
    pub fn replace(&mut self, tree: VNode) {
        self.tree = tree;
        self.renders += 1;
    }

    /// The current subtree.
    pub fn tree(&self) -> &VNode {
        &self.tree
    }

    /// How many times this root has been rendered.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Serialize the current subtree to HTML.
    pub fn to_html(&self) -> String {
        to_html(&self.tree)
    }

    /// Names of the slots present in the current subtree (`""` is the default slot).
    pub fn slot_names(&self) -> Vec<String> {
        self.tree
            .find_all(&|el| el.tag == "slot")
            .into_iter()
            .map(|el| el.get_attr("name").unwrap_or_default().to_owned())
            .collect()
    }

    /// Light-DOM children of the host projected into slot `name`
    /// (`None` = default slot). Empty when the slot is not rendered.
    pub fn assigned_nodes(&self, dom: &Dom, name: Option<&str>) -> Vec<NodeId> {
        let wanted = name.unwrap_or_default();
        if !self.slot_names().iter().any(|s| s == wanted) {
            return Vec::new();
        }
        dom.children(self.host)
            .iter()
            .copied()
            .filter(|&child| {
                dom.get(child)
                    .is_some_and(|d| d.slot().unwrap_or_default() == wanted)
            })
            .collect()
    }

    /// Whether a part named `name` is rendered and not disabled.
    pub fn part_enabled(&self, name: &str) -> bool {
        self.tree
            .part(name)
            .is_some_and(|el| !el.has_attr("disabled"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeData;
    use crate::render::vnode::{h, slot};

    fn host_with_children() -> (Dom, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let host = dom.insert(NodeData::element("aui-button"));
        let icon = dom.insert_child(host, NodeData::element("svg").with_attr("slot", "icon"));
        let label = dom.insert_child(host, NodeData::text("Save"));
        (dom, host, icon, label)
    }

    #[test]
    fn replace_counts_renders() {
        let (_, host, ..) = host_with_children();
        let mut root = ShadowRoot::new(host);
        assert_eq!(root.render_count(), 0);
        assert!(root.tree().is_empty());
        root.replace(h("div").into());
        root.replace(h("span").into());
        assert_eq!(root.render_count(), 2);
        assert_eq!(root.to_html(), "<span></span>");
    }

    #[test]
    fn slot_assignment() {
        let (dom, host, icon, label) = host_with_children();
        let mut root = ShadowRoot::new(host);
        root.replace(h("button").child(slot(Some("icon"))).child(slot(None)).into());
        assert_eq!(root.slot_names(), vec!["icon".to_owned(), String::new()]);
        assert_eq!(root.assigned_nodes(&dom, Some("icon")), vec![icon]);
        assert_eq!(root.assigned_nodes(&dom, None), vec![label]);
    }

    #[test]
    fn missing_slot_assigns_nothing() {
        let (dom, host, ..) = host_with_children();
        let mut root = ShadowRoot::new(host);
        root.replace(h("button").child(slot(None)).into());
        assert!(root.assigned_nodes(&dom, Some("icon")).is_empty());
        assert!(root.assigned_nodes(&dom, Some("suffix")).is_empty());
    }

    #[test]
    fn part_enabled_respects_disabled() {
        let (_, host, ..) = host_with_children();
        let mut root = ShadowRoot::new(host);
        root.replace(
            h("div")
                .child(h("button").part("prev").flag("disabled", true))
                .child(h("button").part("next"))
                .into(),
        );
        assert!(!root.part_enabled("prev"));
        assert!(root.part_enabled("next"));
        assert!(!root.part_enabled("missing"));
    }
}
