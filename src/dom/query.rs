//! DOM queries: children by tag, closest ancestor, text content.

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Direct children of `parent` whose tag is `tag`, in document order.
    pub fn children_by_tag(&self, parent: NodeId, tag: &str) -> Vec<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .filter(|&c| self.get(c).is_some_and(|d| d.tag == tag))
            .collect()
    }

    /// First direct child of `parent` matching `predicate`.
    pub fn find_child(
        &self,
        parent: NodeId,
        predicate: impl Fn(&NodeData) -> bool,
    ) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| self.get(c).is_some_and(&predicate))
    }

    /// All descendants of `start` (excluding `start`) whose tag is `tag`,
    /// in pre-order.
    pub fn descendants_by_tag(&self, start: NodeId, tag: &str) -> Vec<NodeId> {
        self.walk_depth_first(start)
            .into_iter()
            .skip(1)
            .filter(|&n| self.get(n).is_some_and(|d| d.tag == tag))
            .collect()
    }

    /// Nearest inclusive ancestor of `node` with tag `tag`, not searching
    /// above `boundary`.
    pub fn closest(&self, node: NodeId, tag: &str, boundary: NodeId) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(c) = current {
            if self.get(c).is_some_and(|d| d.tag == tag) {
                return Some(c);
            }
            if c == boundary {
                return None;
            }
            current = self.parent(c);
        }
        None
    }

    /// Concatenated text of all text descendants, whitespace-trimmed.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        for id in self.walk_depth_first(node) {
            if let Some(text) = self.get(id).and_then(|d| d.text.as_deref()) {
                out.push_str(text);
            }
        }
        out.trim().to_owned()
    }

    /// Find every node in the arena matching `predicate`.
    ///
    /// Iterates in slotmap insertion order, which is deterministic but not
    /// tree-order.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, data)| predicate(data))
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::NodeData;
    use crate::dom::tree::Dom;

    #[test]
    fn children_by_tag_keeps_order() {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::element("aui-tabs"));
        let t1 = dom.insert_child(root, NodeData::element("aui-tab"));
        let _p = dom.insert_child(root, NodeData::element("aui-tab-panel"));
        let t2 = dom.insert_child(root, NodeData::element("aui-tab"));
        assert_eq!(dom.children_by_tag(root, "aui-tab"), vec![t1, t2]);
    }

    #[test]
    fn find_child_by_slot() {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::element("aui-menu"));
        let _item = dom.insert_child(root, NodeData::element("aui-menu-item"));
        let trigger = dom.insert_child(root, NodeData::element("button").with_attr("slot", "trigger"));
        assert_eq!(dom.find_child(root, |d| d.slot() == Some("trigger")), Some(trigger));
    }

    #[test]
    fn descendants_by_tag_is_preorder() {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::element("aui-tree-view"));
        let a = dom.insert_child(root, NodeData::element("aui-tree-item"));
        let a1 = dom.insert_child(a, NodeData::element("aui-tree-item"));
        let b = dom.insert_child(root, NodeData::element("aui-tree-item"));
        assert_eq!(dom.descendants_by_tag(root, "aui-tree-item"), vec![a, a1, b]);
    }

    #[test]
    fn closest_respects_boundary() {
        let mut dom = Dom::new();
        let outer = dom.insert(NodeData::element("aui-menu-item"));
        let menu = dom.insert_child(outer, NodeData::element("aui-menu"));
        let span = dom.insert_child(menu, NodeData::element("span"));
        assert_eq!(dom.closest(span, "aui-menu", menu), Some(menu));
        assert_eq!(dom.closest(span, "aui-menu-item", menu), None);
        assert_eq!(dom.closest(span, "aui-menu-item", outer), Some(outer));
    }

    #[test]
    fn text_content_concatenates() {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::element("aui-tab"));
        dom.insert_child(root, NodeData::text("  Hello "));
        let b = dom.insert_child(root, NodeData::element("b"));
        dom.insert_child(b, NodeData::text("World  "));
        assert_eq!(dom.text_content(root), "Hello World");
    }

    #[test]
    fn query_all_predicate() {
        let mut dom = Dom::new();
        let root = dom.insert(NodeData::element("div"));
        dom.insert_child(root, NodeData::element("aui-option").with_flag("disabled"));
        dom.insert_child(root, NodeData::element("aui-option"));
        assert_eq!(dom.query_all(|d| d.has_attr("disabled")).len(), 1);
    }
}
