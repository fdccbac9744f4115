//! Menu: a trigger plus a popup list of `aui-menu-item`s.
//!
//! States are closed and open, reflected in the `open` attribute. The menu
//! holds a document-level click listener and keydown listener for as long as
//! it is connected: clicks outside the host close it, and while open the
//! arrow keys move a highlight, Enter activates it, and Escape closes.
//!
//! `open` and `close` events are emitted from the attribute change itself, so
//! programmatic writes and user interaction look the same to observers.

use serde_json::json;

use crate::attr_enum;
use crate::dom::{Attributes, NodeId};
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable, StrProp};
use crate::event::{Event, Key, ListenerKind};
use crate::render::{h, slot, VNode};
use crate::styles;

use super::support::{
    aria_bool, closest_in_host, host_child_containing, is_disabled, label_of, step_enabled,
    value_of, DocumentListeners,
};

attr_enum! {
    /// Where the popup opens relative to the trigger.
    pub enum Placement {
        BottomStart => "bottom-start",
        BottomEnd => "bottom-end",
        TopStart => "top-start",
        TopEnd => "top-end",
    }
}

pub const OPEN: Prop<bool> = Prop::new("open", false);
pub const PLACEMENT: Prop<Placement> = Prop::new("placement", Placement::BottomStart);

/// Menu attributes, parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuConfig {
    pub open: bool,
    pub placement: Placement,
}

impl MenuConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self {
            open: OPEN.get(attrs),
            placement: PLACEMENT.get(attrs),
        }
    }
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

/// The `aui-menu` container.
#[derive(Debug, Default)]
pub struct Menu {
    listeners: DocumentListeners,
    highlight: Option<usize>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the keyboard-highlighted item.
    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn open(&mut self, cx: &mut Context<'_>) {
        cx.set_prop(&OPEN, true);
    }

    pub fn close(&mut self, cx: &mut Context<'_>) {
        cx.set_prop(&OPEN, false);
    }

    pub fn toggle(&mut self, cx: &mut Context<'_>) {
        let open = OPEN.get(cx.attrs());
        cx.set_prop(&OPEN, !open);
    }

    fn items(cx: &RenderContext<'_>) -> Vec<NodeId> {
        cx.children_by_tag(&cx.tag("menu-item"))
    }

    fn trigger(cx: &RenderContext<'_>) -> Option<NodeId> {
        cx.element_children()
            .into_iter()
            .find(|&c| cx.attrs_of(c).get("slot") == Some("trigger"))
    }

    fn sync_trigger(&self, cx: &mut Context<'_>, open: bool) {
        if let Some(trigger) = Self::trigger(&cx.view()) {
            cx.set_node_attribute(trigger, "aria-haspopup", "menu");
            cx.set_node_attribute(trigger, "aria-expanded", aria_bool(open));
        }
    }

    fn set_highlight(&mut self, cx: &mut Context<'_>, index: Option<usize>) {
        self.highlight = index;
        let items = Self::items(&cx.view());
        for (i, item) in items.into_iter().enumerate() {
            cx.set_node_flag(item, "highlighted", Some(i) == index);
        }
    }

    fn activate(&mut self, cx: &mut Context<'_>, item: NodeId) {
        let view = cx.view();
        if is_disabled(&view, item) {
            return;
        }
        let value = value_of(&view, item);
        let label = label_of(&view, item);
        cx.emit("select", json!({ "value": value, "label": label }));
        self.close(cx);
    }

    fn move_highlight(&mut self, cx: &mut Context<'_>, forward: bool) {
        let view = cx.view();
        let enabled: Vec<bool> = Self::items(&view)
            .into_iter()
            .map(|item| !is_disabled(&view, item))
            .collect();
        let next = step_enabled(&enabled, self.highlight, forward);
        self.set_highlight(cx, next);
    }
}

impl AttributeBound for Menu {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["open", "placement"]
    }

    fn observes_children(&self) -> bool {
        true
    }
}

impl Renderable for Menu {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = MenuConfig::from_attributes(cx.attrs());
        let root = h("div")
            .class(["menu-root"])
            .child(slot(Some("trigger")))
            .child(
                h("div")
                    .part("menu")
                    .class(["menu", config.placement.as_str()])
                    .attr("role", "menu")
                    .flag("hidden", !config.open)
                    .child(slot(None)),
            );
        VNode::Fragment(vec![styles::style(styles::MENU).into(), root.into()])
    }
}

impl Component for Menu {
    fn connected(&mut self, cx: &mut Context<'_>) {
        self.listeners
            .acquire(cx, &[ListenerKind::Click, ListenerKind::KeyDown]);
        let open = OPEN.get(cx.attrs());
        self.sync_trigger(cx, open);
    }

    fn disconnected(&mut self, cx: &mut Context<'_>) {
        self.listeners.release(cx);
        self.highlight = None;
    }

    fn attribute_changed(
        &mut self,
        cx: &mut Context<'_>,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) {
        if name != "open" || old.is_some() == new.is_some() {
            return;
        }
        let open = new.is_some();
        self.set_highlight(cx, None);
        self.sync_trigger(cx, open);
        cx.emit(if open { "open" } else { "close" }, json!({}));
    }

    fn children_changed(&mut self, cx: &mut Context<'_>) {
        let count = Self::items(&cx.view()).len();
        if self.highlight.is_some_and(|i| i >= count) {
            self.set_highlight(cx, None);
        }
        let open = OPEN.get(cx.attrs());
        self.sync_trigger(cx, open);
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        if event.name != "click" {
            return;
        }
        let view = cx.view();
        let on_trigger = host_child_containing(&view, event.target)
            .is_some_and(|child| view.attrs_of(child).get("slot") == Some("trigger"));
        if on_trigger {
            self.toggle(cx);
            return;
        }
        if !OPEN.get(view.attrs()) {
            return;
        }
        if let Some(item) = closest_in_host(&view, event.target, &view.tag("menu-item")) {
            self.activate(cx, item);
        }
    }

    fn handle_document_event(&mut self, cx: &mut Context<'_>, event: &Event, inside: bool) {
        if !OPEN.get(cx.attrs()) {
            return;
        }
        match (event.name.as_str(), event.key) {
            ("click", _) if !inside => self.close(cx),
            ("keydown", Some(Key::ArrowDown)) => self.move_highlight(cx, true),
            ("keydown", Some(Key::ArrowUp)) => self.move_highlight(cx, false),
            ("keydown", Some(Key::Enter)) => {
                let item = self
                    .highlight
                    .and_then(|i| Self::items(&cx.view()).get(i).copied());
                if let Some(item) = item {
                    self.activate(cx, item);
                }
            }
            ("keydown", Some(Key::Escape)) => self.close(cx),
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// MenuItem
// ---------------------------------------------------------------------------

pub const ITEM_VALUE: StrProp = StrProp::new("value", "");
pub const ITEM_LABEL: StrProp = StrProp::new("label", "");
pub const ITEM_DISABLED: Prop<bool> = Prop::new("disabled", false);
pub const ITEM_HIGHLIGHTED: Prop<bool> = Prop::new("highlighted", false);

/// A single `aui-menu-item`.
#[derive(Debug, Default)]
pub struct MenuItem;

impl AttributeBound for MenuItem {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["value", "label", "disabled", "highlighted"]
    }
}

impl Renderable for MenuItem {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let attrs = cx.attrs();
        let disabled = ITEM_DISABLED.get(attrs);
        let highlighted = ITEM_HIGHLIGHTED.get(attrs);
        let item = h("div")
            .part("item")
            .class(["item", if highlighted { "highlighted" } else { "" }])
            .attr("role", "menuitem")
            .attr("tabindex", "-1")
            .flag("disabled", disabled)
            .attr_if(disabled, "aria-disabled", "true")
            .child(slot(Some("icon")));
        let item = match ITEM_LABEL.non_empty(attrs) {
            Some(label) => item.text(label),
            None => item.child(slot(None)),
        };
        VNode::Fragment(vec![styles::style(styles::MENU_ITEM).into(), item.into()])
    }
}

impl Component for MenuItem {}

pub fn factory() -> Box<dyn Component> {
    Box::new(Menu::new())
}

pub fn item_factory() -> Box<dyn Component> {
    Box::new(MenuItem)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    const MARKUP: &str = r#"<aui-menu>
        <aui-button slot="trigger">Actions</aui-button>
        <aui-menu-item value="edit">Edit</aui-menu-item>
        <aui-menu-item value="copy" disabled>Copy</aui-menu-item>
        <aui-menu-item label="Delete"></aui-menu-item>
    </aui-menu>"#;

    fn setup() -> (Harness, NodeId, NodeId, Vec<NodeId>) {
        let mut ui = Harness::new();
        let menu = ui.mount(MARKUP);
        let trigger = ui.find("aui-button");
        let items = ui.find_all("aui-menu-item");
        (ui, menu, trigger, items)
    }

    #[test]
    fn trigger_click_toggles() {
        let (mut ui, menu, trigger, _) = setup();
        assert_eq!(ui.attr(trigger, "aria-expanded").as_deref(), Some("false"));
        ui.click(trigger);
        assert!(ui.has(menu, "open"));
        assert_eq!(ui.attr(trigger, "aria-expanded").as_deref(), Some("true"));
        assert!(!ui.part(menu, "menu").unwrap().has_attr("hidden"));
        ui.click(trigger);
        assert!(!ui.has(menu, "open"));
        assert_eq!(ui.events("open").len(), 1);
        assert_eq!(ui.events("close").len(), 1);
    }

    #[test]
    fn outside_click_closes() {
        let (mut ui, menu, trigger, _) = setup();
        ui.click(trigger);
        let body = ui.doc().body();
        ui.click(body);
        assert!(!ui.has(menu, "open"));
    }

    #[test]
    fn outside_click_while_closed_is_noop() {
        let (mut ui, menu, _, _) = setup();
        let body = ui.doc().body();
        ui.click(body);
        assert!(!ui.has(menu, "open"));
        assert!(ui.events("close").is_empty());
    }

    #[test]
    fn item_click_selects_then_closes() {
        let (mut ui, menu, trigger, items) = setup();
        ui.click(trigger);
        ui.clear_events();
        ui.click(items[2]);
        let names: Vec<String> = ui.doc().events().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["select", "close", "click"]);
        let detail = ui.last_event("select").unwrap();
        assert_eq!(detail["value"], json!("Delete"));
        assert_eq!(detail["label"], json!("Delete"));
        assert!(!ui.has(menu, "open"));
    }

    #[test]
    fn disabled_item_keeps_menu_open() {
        let (mut ui, menu, trigger, items) = setup();
        ui.click(trigger);
        ui.click(items[1]);
        assert!(ui.has(menu, "open"));
        assert!(ui.events("select").is_empty());
    }

    #[test]
    fn keyboard_navigation() {
        let (mut ui, menu, trigger, items) = setup();
        ui.click(trigger);
        ui.press(trigger, Key::ArrowDown);
        assert!(ui.has(items[0], "highlighted"));
        ui.press(trigger, Key::ArrowDown);
        assert!(ui.has(items[2], "highlighted"));
        assert!(!ui.has(items[0], "highlighted"));
        ui.press(trigger, Key::ArrowDown);
        assert!(ui.has(items[0], "highlighted"));
        ui.press(trigger, Key::ArrowUp);
        assert!(ui.has(items[2], "highlighted"));
        ui.press(trigger, Key::Enter);
        assert_eq!(ui.last_event("select").unwrap()["value"], json!("Delete"));
        assert!(!ui.has(menu, "open"));
        assert!(!ui.has(items[2], "highlighted"));
    }

    #[test]
    fn escape_closes() {
        let (mut ui, menu, trigger, _) = setup();
        ui.click(trigger);
        let body = ui.doc().body();
        ui.press(body, Key::Escape);
        assert!(!ui.has(menu, "open"));
    }

    #[test]
    fn programmatic_open_emits() {
        let (mut ui, menu, _, _) = setup();
        ui.set(menu, "open", "");
        assert_eq!(ui.events("open").len(), 1);
        ui.set(menu, "open", "true");
        assert_eq!(ui.events("open").len(), 1);
    }

    #[test]
    fn listeners_released_on_removal() {
        let (mut ui, menu, _, _) = setup();
        assert_eq!(ui.doc().listener_count(menu), 2);
        ui.remove(menu);
        assert_eq!(ui.doc().total_listeners(), 0);
    }

    #[test]
    fn two_menus_do_not_clobber() {
        let mut ui = Harness::new();
        ui.mount(MARKUP);
        ui.mount(MARKUP);
        let menus = ui.find_all("aui-menu");
        let triggers = ui.find_all("aui-button");
        ui.click(triggers[0]);
        assert!(ui.has(menus[0], "open"));
        ui.click(triggers[1]);
        assert!(!ui.has(menus[0], "open"));
        assert!(ui.has(menus[1], "open"));
    }
}
