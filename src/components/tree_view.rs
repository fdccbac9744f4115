//! Tree view: a hierarchy of nested `aui-tree-item`s rendered as one tree.
//!
//! Items render nothing themselves. The tree view walks its light DOM and
//! builds the whole nested list in its shadow root, so an item change asks
//! the enclosing tree view to re-render. Parts are keyed by item value:
//! `item-{value}` selects (and toggles items with children) and
//! `toggle-{value}` only toggles.

use serde_json::json;

use crate::dom::{Attributes, NodeId};
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable, StrProp};
use crate::event::{Event, Key};
use crate::render::{h, VElement, VNode};
use crate::styles;

use super::support::{aria_bool, is_disabled, own_part};

pub const VALUE: StrProp = StrProp::new("value", "");

pub const ITEM_VALUE: StrProp = StrProp::new("value", "");
pub const ITEM_LABEL: StrProp = StrProp::new("label", "");
pub const ITEM_EXPANDED: Prop<bool> = Prop::new("expanded", false);
pub const ITEM_DISABLED: Prop<bool> = Prop::new("disabled", false);

/// Tree item attributes, parsed. Empty `value` and `label` count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeItemConfig {
    pub value: Option<String>,
    pub label: Option<String>,
    pub expanded: bool,
    pub disabled: bool,
}

impl TreeItemConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self {
            value: ITEM_VALUE.non_empty(attrs).map(str::to_owned),
            label: ITEM_LABEL.non_empty(attrs).map(str::to_owned),
            expanded: ITEM_EXPANDED.get(attrs),
            disabled: ITEM_DISABLED.get(attrs),
        }
    }
}

// ---------------------------------------------------------------------------
// Light-DOM walking
// ---------------------------------------------------------------------------

fn child_items(cx: &RenderContext<'_>, node: NodeId) -> Vec<NodeId> {
    cx.dom.children_by_tag(node, &cx.tag("tree-item"))
}

/// Item label: the `label` attribute, else the item's own text nodes
/// (nested items excluded).
fn item_label(cx: &RenderContext<'_>, item: NodeId) -> String {
    if let Some(label) = ITEM_LABEL.non_empty(cx.attrs_of(item)) {
        return label.to_owned();
    }
    let text: String = cx
        .dom
        .children(item)
        .iter()
        .filter_map(|&c| cx.dom.get(c).and_then(|d| d.text.as_deref()))
        .collect();
    text.trim().to_owned()
}

/// Item value: the `value` attribute, else its label.
fn item_value(cx: &RenderContext<'_>, item: NodeId) -> String {
    match ITEM_VALUE.non_empty(cx.attrs_of(item)) {
        Some(value) => value.to_owned(),
        None => item_label(cx, item),
    }
}

fn has_children(cx: &RenderContext<'_>, item: NodeId) -> bool {
    !child_items(cx, item).is_empty()
}

fn is_expanded(cx: &RenderContext<'_>, item: NodeId) -> bool {
    ITEM_EXPANDED.get(cx.attrs_of(item))
}

/// Items reachable without expanding anything, in display order.
fn visible_items(cx: &RenderContext<'_>) -> Vec<NodeId> {
    fn walk(cx: &RenderContext<'_>, node: NodeId, out: &mut Vec<NodeId>) {
        for item in child_items(cx, node) {
            out.push(item);
            if is_expanded(cx, item) {
                walk(cx, item, out);
            }
        }
    }
    let mut out = Vec::new();
    walk(cx, cx.host, &mut out);
    out
}

fn find_item(cx: &RenderContext<'_>, value: &str) -> Option<NodeId> {
    cx.dom
        .descendants_by_tag(cx.host, &cx.tag("tree-item"))
        .into_iter()
        .find(|&item| item_value(cx, item) == value)
}

// ---------------------------------------------------------------------------
// TreeView
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TreeView {
    /// Value of the keyboard-focused item.
    focused: Option<String>,
}

impl TreeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Select `item`: set `value` and emit `select`.
    fn select(&mut self, cx: &mut Context<'_>, item: NodeId) {
        let view = cx.view();
        let value = item_value(&view, item);
        let label = item_label(&view, item);
        self.focused = Some(value.clone());
        cx.set_prop(&VALUE, value.clone());
        cx.emit("select", json!({ "value": value, "label": label }));
        cx.request_render();
    }

    /// Expand or collapse `item` and emit `toggle`. Leaves are ignored.
    fn set_expanded(&mut self, cx: &mut Context<'_>, item: NodeId, expanded: bool) {
        let view = cx.view();
        if !has_children(&view, item) || is_expanded(&view, item) == expanded {
            return;
        }
        cx.set_node_flag(item, "expanded", expanded);
        cx.emit(
            "toggle",
            json!({ "value": item_value(&view, item), "expanded": expanded }),
        );
    }

    fn toggle(&mut self, cx: &mut Context<'_>, item: NodeId) {
        let expanded = is_expanded(&cx.view(), item);
        self.set_expanded(cx, item, !expanded);
    }

    fn focus(&mut self, cx: &mut Context<'_>, item: NodeId) {
        self.focused = Some(item_value(&cx.view(), item));
        cx.request_render();
    }

    fn focused_item(&self, cx: &RenderContext<'_>) -> Option<NodeId> {
        self.focused.as_deref().and_then(|v| find_item(cx, v))
    }

    fn on_key(&mut self, cx: &mut Context<'_>, key: Key) {
        let view = cx.view();
        let visible: Vec<NodeId> = visible_items(&view)
            .into_iter()
            .filter(|&item| !is_disabled(&view, item))
            .collect();
        if visible.is_empty() {
            return;
        }
        let current = self
            .focused_item(&view)
            .and_then(|item| visible.iter().position(|&v| v == item));
        match key {
            Key::ArrowDown => {
                let next = current.map_or(0, |i| (i + 1).min(visible.len() - 1));
                self.focus(cx, visible[next]);
            }
            Key::ArrowUp => {
                let prev = current.map_or(0, |i| i.saturating_sub(1));
                self.focus(cx, visible[prev]);
            }
            Key::Home => self.focus(cx, visible[0]),
            Key::End => self.focus(cx, visible[visible.len() - 1]),
            Key::ArrowRight => {
                if let Some(item) = current.map(|i| visible[i]) {
                    if has_children(&view, item) && !is_expanded(&view, item) {
                        self.set_expanded(cx, item, true);
                    } else if let Some(&first) = child_items(&view, item).first() {
                        self.focus(cx, first);
                    }
                }
            }
            Key::ArrowLeft => {
                if let Some(item) = current.map(|i| visible[i]) {
                    if is_expanded(&view, item) {
                        self.set_expanded(cx, item, false);
                    } else if let Some(parent) = view.dom.parent(item).filter(|&p| p != view.host) {
                        self.focus(cx, parent);
                    }
                }
            }
            Key::Enter | Key::Space => {
                if let Some(item) = current.map(|i| visible[i]) {
                    self.select(cx, item);
                }
            }
            _ => {}
        }
    }

    fn render_items(&self, cx: &RenderContext<'_>, node: NodeId, level: usize) -> Vec<VElement> {
        let selected = VALUE.get(cx.attrs());
        child_items(cx, node)
            .into_iter()
            .map(|item| {
                let config = TreeItemConfig::from_attributes(cx.attrs_of(item));
                let label = config.label.unwrap_or_else(|| item_label(cx, item));
                let value = config.value.unwrap_or_else(|| label.clone());
                let branch = has_children(cx, item);
                let expanded = branch && config.expanded;
                let disabled = config.disabled;
                let is_selected = !value.is_empty() && value == selected;
                let is_focused = self.focused.as_deref() == Some(value.as_str());

                let toggle = if branch {
                    h("span")
                        .part(format!("toggle-{value}"))
                        .class(["toggle"])
                        .attr("aria-hidden", "true")
                        .text(if expanded { "▾" } else { "▸" })
                } else {
                    h("span").class(["toggle"])
                };
                let node_el = h("div")
                    .part(format!("item-{value}"))
                    .class([
                        "node",
                        if is_selected { "selected" } else { "" },
                        if is_focused { "focused" } else { "" },
                    ])
                    .flag("disabled", disabled)
                    .attr_if(disabled, "aria-disabled", "true")
                    .child(toggle)
                    .child(h("span").class(["label"]).text(label));

                let mut li = h("li")
                    .attr("role", "treeitem")
                    .attr("aria-level", level.to_string())
                    .attr("aria-selected", aria_bool(is_selected))
                    .attr_if(branch, "aria-expanded", aria_bool(expanded))
                    .child(node_el);
                if expanded {
                    li = li.child(
                        h("ul")
                            .class(["group"])
                            .attr("role", "group")
                            .children(self.render_items(cx, item, level + 1)),
                    );
                }
                li
            })
            .collect()
    }
}

impl AttributeBound for TreeView {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["value"]
    }

    fn observes_children(&self) -> bool {
        true
    }
}

impl Renderable for TreeView {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let tree = h("ul")
            .part("tree")
            .class(["tree"])
            .attr("role", "tree")
            .attr("tabindex", "0")
            .children(self.render_items(cx, cx.host, 1));
        VNode::Fragment(vec![styles::style(styles::TREE_VIEW).into(), tree.into()])
    }
}

impl Component for TreeView {
    fn children_changed(&mut self, cx: &mut Context<'_>) {
        let view = cx.view();
        if self.focused.as_deref().is_some_and(|v| find_item(&view, v).is_none()) {
            self.focused = None;
        }
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        let view = cx.view();
        match event.name.as_str() {
            "click" => {
                let Some(part) = own_part(&view, event) else {
                    return;
                };
                if let Some(value) = part.strip_prefix("toggle-") {
                    if let Some(item) = find_item(&view, value) {
                        if !is_disabled(&view, item) {
                            self.toggle(cx, item);
                        }
                    }
                } else if let Some(value) = part.strip_prefix("item-") {
                    let Some(item) = find_item(&view, value).filter(|&i| !is_disabled(&view, i))
                    else {
                        return;
                    };
                    self.select(cx, item);
                    self.toggle(cx, item);
                }
            }
            "keydown" if event.target == view.host => {
                if let Some(key) = event.key {
                    self.on_key(cx, key);
                }
            }
            _ => {}
        }
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(TreeView::new())
}

// ---------------------------------------------------------------------------
// TreeItem
// ---------------------------------------------------------------------------

/// A node of the tree. Renders nothing; its tree view draws it.
#[derive(Debug, Default)]
pub struct TreeItem;

impl TreeItem {
    fn notify_tree(cx: &mut Context<'_>) {
        let view = cx.view();
        if let Some(tree) = view.closest(view.host, &view.tag("tree-view")) {
            cx.request_render_of(tree);
        }
    }
}

impl AttributeBound for TreeItem {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["value", "label", "expanded", "disabled"]
    }

    fn observes_children(&self) -> bool {
        true
    }
}

impl Renderable for TreeItem {
    fn render(&self, _cx: &RenderContext<'_>) -> VNode {
        VNode::Fragment(vec![styles::style(styles::TREE_ITEM).into()])
    }
}

impl Component for TreeItem {
    fn attribute_changed(
        &mut self,
        cx: &mut Context<'_>,
        _name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) {
        Self::notify_tree(cx);
    }

    fn children_changed(&mut self, cx: &mut Context<'_>) {
        Self::notify_tree(cx);
    }
}

pub fn item_factory() -> Box<dyn Component> {
    Box::new(TreeItem)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    const MARKUP: &str = r#"<aui-tree-view>
        <aui-tree-item value="src" label="src">
            <aui-tree-item value="lib">lib.rs</aui-tree-item>
            <aui-tree-item value="main" disabled>main.rs</aui-tree-item>
        </aui-tree-item>
        <aui-tree-item value="readme">README.md</aui-tree-item>
    </aui-tree-view>"#;

    fn setup() -> (Harness, NodeId) {
        let mut ui = Harness::new();
        let tree = ui.mount(MARKUP);
        (ui, tree)
    }

    fn item(ui: &Harness, value: &str) -> NodeId {
        ui.find_all("aui-tree-item")
            .into_iter()
            .find(|&n| ui.attr(n, "value").as_deref() == Some(value))
            .unwrap()
    }

    #[test]
    fn item_config_reads_flags() {
        let attrs: Attributes = [("value", ""), ("label", "Docs"), ("expanded", "")]
            .into_iter()
            .collect();
        let config = TreeItemConfig::from_attributes(&attrs);
        assert_eq!(config.value, None);
        assert_eq!(config.label.as_deref(), Some("Docs"));
        assert!(config.expanded);
        assert!(!config.disabled);
    }

    #[test]
    fn collapsed_children_not_rendered() {
        let (ui, tree) = setup();
        assert_eq!(ui.parts_with_prefix(tree, "item-"), vec!["item-src", "item-readme"]);
        assert!(ui.has_part(tree, "toggle-src"));
        assert!(!ui.has_part(tree, "toggle-readme"));
    }

    #[test]
    fn click_selects_and_expands() {
        let (mut ui, tree) = setup();
        ui.click_part(tree, "item-src");
        assert_eq!(ui.attr(tree, "value").as_deref(), Some("src"));
        assert!(ui.has(item(&ui, "src"), "expanded"));
        assert_eq!(
            ui.parts_with_prefix(tree, "item-"),
            vec!["item-src", "item-lib", "item-main", "item-readme"]
        );
        assert_eq!(ui.last_event("select").unwrap()["label"], json!("src"));
        assert_eq!(ui.last_event("toggle").unwrap()["expanded"], json!(true));
        assert_eq!(
            ui.part(tree, "item-src").unwrap().get_attr("class"),
            Some("node selected focused")
        );
    }

    #[test]
    fn toggle_part_does_not_select() {
        let (mut ui, tree) = setup();
        ui.click_part(tree, "toggle-src");
        assert!(ui.has(item(&ui, "src"), "expanded"));
        assert_eq!(ui.attr(tree, "value"), None);
        ui.click_part(tree, "toggle-src");
        assert!(!ui.has(item(&ui, "src"), "expanded"));
    }

    #[test]
    fn leaf_label_from_own_text() {
        let (mut ui, tree) = setup();
        ui.click_part(tree, "item-readme");
        let select = ui.last_event("select").unwrap();
        assert_eq!(select["label"], json!("README.md"));
        assert!(ui.events("toggle").is_empty());
    }

    #[test]
    fn disabled_item_not_clickable() {
        let (mut ui, tree) = setup();
        ui.click_part(tree, "toggle-src");
        assert!(!ui.click_part(tree, "item-main"));
    }

    #[test]
    fn keyboard_navigation() {
        let (mut ui, tree) = setup();
        ui.press(tree, Key::ArrowDown);
        assert_eq!(ui.part(tree, "item-src").unwrap().get_attr("class"), Some("node focused"));
        ui.press(tree, Key::ArrowRight);
        assert!(ui.has(item(&ui, "src"), "expanded"));
        ui.press(tree, Key::ArrowRight);
        ui.press(tree, Key::ArrowDown);
        // main is disabled, so focus moves past it
        ui.press(tree, Key::Enter);
        assert_eq!(ui.attr(tree, "value").as_deref(), Some("readme"));

        ui.press(tree, Key::Home);
        ui.press(tree, Key::ArrowDown);
        ui.press(tree, Key::ArrowLeft);
        ui.press(tree, Key::ArrowLeft);
        assert!(!ui.has(item(&ui, "src"), "expanded"));
    }

    #[test]
    fn item_attribute_change_rerenders_tree() {
        let (mut ui, tree) = setup();
        let readme = item(&ui, "readme");
        ui.set(readme, "label", "Read me");
        assert_eq!(ui.part(tree, "item-readme").unwrap().text_content(), "Read me");
    }

    #[test]
    fn nested_insertion_rerenders_tree() {
        let (mut ui, tree) = setup();
        let src = item(&ui, "src");
        ui.set(src, "expanded", "");
        ui.mount_into(src, r#"<aui-tree-item value="util">util.rs</aui-tree-item>"#);
        assert!(ui.has_part(tree, "item-util"));
    }
}
