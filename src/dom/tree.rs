//! The light-DOM arena: nodes, parent links, ordered child lists.

use std::iter;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};

const NO_CHILDREN: &[NodeId] = &[];

/// Light-DOM nodes in a slotmap arena.
///
/// Child order and parent links live in secondary maps keyed by [`NodeId`],
/// so lookups stay O(1) and removing a subtree touches only that subtree.
/// A node with no parent that is not the document root is detached: it is
/// still in the arena but outside the document.
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: Option<NodeId>,
}

impl Dom {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Add a detached node. The first node ever added becomes the root.
    pub fn insert(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.root.get_or_insert(id);
        id
    }

    /// Add a node as the last child of `parent`.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        debug_assert!(self.nodes.contains_key(parent), "unknown parent");
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.link(id, parent, None);
        id
    }

    /// Place `node` under `parent`, before `before` when that is one of
    /// `parent`'s children and last otherwise. Attached nodes are moved.
    pub fn attach(&mut self, node: NodeId, parent: NodeId, before: Option<NodeId>) {
        debug_assert!(self.nodes.contains_key(node), "unknown node");
        debug_assert!(self.nodes.contains_key(parent), "unknown parent");
        self.detach(node);
        self.link(node, parent, before);
    }

    /// Unlink `node` from its parent. The subtree stays in the arena.
    /// Returns the former parent.
    pub fn detach(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent.remove(node)?;
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.retain(|&c| c != node);
        }
        Some(parent)
    }

    fn link(&mut self, node: NodeId, parent: NodeId, before: Option<NodeId>) {
        self.parent.insert(node, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            let at = before
                .and_then(|b| siblings.iter().position(|&c| c == b))
                .unwrap_or(siblings.len());
            siblings.insert(at, node);
        }
    }

    /// Drop `id` and its whole subtree from the arena, returning the data of
    /// `id` itself.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        self.detach(id);
        if self.root == Some(id) {
            self.root = None;
        }
        let subtree = self.walk_depth_first(id);
        for &node in &subtree {
            self.children.remove(node);
            self.parent.remove(node);
        }
        let data = self.nodes.remove(id);
        for node in subtree.into_iter().skip(1) {
            self.nodes.remove(node);
        }
        data
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Children of `id` in document order; empty for unknown nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(id).map_or(NO_CHILDREN, Vec::as_slice)
    }

    /// Parent, grandparent, and so on up to the topmost ancestor. Excludes
    /// `id`.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        iter::successors(self.parent(id), |&p| self.parent(p)).collect()
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        iter::successors(Some(node), |&n| self.parent(n)).any(|n| n == ancestor)
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// The document root, once set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Nodes in the arena, attached or detached.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// `start` and its descendants in document (pre-)order.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if !self.nodes.contains_key(node) {
                continue;
            }
            order.push(node);
            stack.extend(self.children(node).iter().rev());
        }
        order
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// `body > (aui-tabs > (tab one, tab two), aui-menu)`
    struct Page {
        dom: Dom,
        body: NodeId,
        tabs: NodeId,
        menu: NodeId,
        one: NodeId,
        two: NodeId,
    }

    fn page() -> Page {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::element("body"));
        let tabs = dom.insert_child(body, NodeData::element("aui-tabs"));
        let menu = dom.insert_child(body, NodeData::element("aui-menu"));
        let one = dom.insert_child(tabs, NodeData::element("aui-tab").with_attr("value", "one"));
        let two = dom.insert_child(tabs, NodeData::element("aui-tab").with_attr("value", "two"));
        Page { dom, body, tabs, menu, one, two }
    }

    #[test]
    fn first_inserted_node_is_root() {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::element("body"));
        let loose = dom.insert(NodeData::element("div"));
        assert_eq!(dom.root(), Some(body));
        assert!(dom.parent(loose).is_none());
    }

    #[test]
    fn children_keep_insertion_order() {
        let p = page();
        assert_eq!(p.dom.children(p.body), [p.tabs, p.menu]);
        assert_eq!(p.dom.children(p.tabs), [p.one, p.two]);
        assert_eq!(p.dom.parent(p.two), Some(p.tabs));
        assert!(p.dom.parent(p.body).is_none());
    }

    #[test]
    fn attach_inserts_before_reference() {
        let mut p = page();
        let extra = p.dom.insert(NodeData::element("aui-tab"));
        p.dom.attach(extra, p.tabs, Some(p.two));
        assert_eq!(p.dom.children(p.tabs), [p.one, extra, p.two]);

        p.dom.attach(p.two, p.tabs, Some(p.one));
        assert_eq!(p.dom.children(p.tabs), [p.two, p.one, extra]);
    }

    #[test]
    fn foreign_reference_appends() {
        let mut p = page();
        let extra = p.dom.insert(NodeData::element("x-y"));
        p.dom.attach(extra, p.tabs, Some(p.menu));
        assert_eq!(p.dom.children(p.tabs).last(), Some(&extra));
    }

    #[test]
    fn detached_subtree_survives() {
        let mut p = page();
        assert_eq!(p.dom.detach(p.tabs), Some(p.body));
        assert_eq!(p.dom.children(p.body), [p.menu]);
        assert_eq!(p.dom.parent(p.one), Some(p.tabs));
        assert_eq!(p.dom.detach(p.tabs), None, "already detached");
    }

    #[test]
    fn ancestor_queries() {
        let p = page();
        assert_eq!(p.dom.ancestors(p.one), [p.tabs, p.body]);
        assert!(p.dom.is_inclusive_ancestor(p.one, p.one));
        assert!(p.dom.is_inclusive_ancestor(p.body, p.two));
        assert!(!p.dom.is_inclusive_ancestor(p.menu, p.two));
    }

    #[test]
    fn removing_a_node_drops_its_descendants() {
        let mut p = page();
        let removed = p.dom.remove(p.tabs).map(|data| data.tag);
        assert_eq!(removed.as_deref(), Some("aui-tabs"));
        assert!(!p.dom.contains(p.one) && !p.dom.contains(p.two));
        assert_eq!(p.dom.len(), 2);
        assert!(p.dom.remove(p.tabs).is_none());

        p.dom.remove(p.body);
        assert!(p.dom.is_empty());
        assert!(p.dom.root().is_none());
    }

    #[test]
    fn depth_first_is_document_order() {
        let p = page();
        assert_eq!(p.dom.walk_depth_first(p.body), [p.body, p.tabs, p.one, p.two, p.menu]);
        assert_eq!(p.dom.walk_depth_first(p.menu), [p.menu]);
    }

    #[test]
    fn attributes_are_mutable_in_place() {
        let mut p = page();
        if let Some(data) = p.dom.get_mut(p.one) {
            data.attributes.set("label", "One");
        }
        assert_eq!(p.dom.get(p.one).and_then(|d| d.attr("label")), Some("One"));
        assert!(Dom::default().is_empty());
    }
}
