//! Select: a single-choice listbox over `aui-option` children.
//!
//! Open state and the keyboard highlight are internal. Document-level click
//! and keydown listeners are held only while the listbox is open; they close
//! it on an outside click or an Escape pressed elsewhere. Keys pressed on the
//! select itself arrive through normal bubbling.

use serde_json::json;

use crate::dom::{Attributes, NodeId};
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable, StrProp};
use crate::event::{Event, Key, ListenerKind};
use crate::render::{h, VNode};
use crate::styles;

use super::support::{aria_bool, is_disabled, label_of, own_part, step_enabled, value_of, DocumentListeners};

pub const VALUE: StrProp = StrProp::new("value", "");
pub const PLACEHOLDER: StrProp = StrProp::new("placeholder", "Select…");
pub const DISABLED: Prop<bool> = Prop::new("disabled", false);

/// Select attributes, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectConfig {
    /// `None` when absent or empty.
    pub value: Option<String>,
    pub placeholder: String,
    pub disabled: bool,
}

impl SelectConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self {
            value: VALUE.non_empty(attrs).map(str::to_owned),
            placeholder: PLACEHOLDER.get(attrs).to_owned(),
            disabled: DISABLED.get(attrs),
        }
    }
}

/// A resolved `aui-option` child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub node: NodeId,
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

/// The `aui-option` children of the host, in order.
pub fn options(cx: &RenderContext<'_>) -> Vec<OptionEntry> {
    cx.children_by_tag(&cx.tag("option"))
        .into_iter()
        .map(|node| OptionEntry {
            node,
            value: value_of(cx, node),
            label: label_of(cx, node),
            disabled: is_disabled(cx, node),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Select
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Select {
    open: bool,
    highlight: Option<usize>,
    listeners: DocumentListeners,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn open(&mut self, cx: &mut Context<'_>) {
        let view = cx.view();
        if self.open || DISABLED.get(view.attrs()) {
            return;
        }
        let value = VALUE.get(view.attrs());
        let opts = options(&view);
        self.open = true;
        self.highlight = opts
            .iter()
            .position(|o| o.value == value && !o.disabled)
            .or_else(|| opts.iter().position(|o| !o.disabled));
        self.listeners
            .acquire(cx, &[ListenerKind::Click, ListenerKind::KeyDown]);
        cx.request_render();
    }

    pub fn close(&mut self, cx: &mut Context<'_>) {
        if !self.open {
            return;
        }
        self.open = false;
        self.highlight = None;
        self.listeners.release(cx);
        cx.request_render();
    }

    /// Choose option `index`: set `value`, emit `change`, close.
    pub fn choose(&mut self, cx: &mut Context<'_>, index: usize) {
        let opts = options(&cx.view());
        let Some(option) = opts.get(index).filter(|o| !o.disabled) else {
            return;
        };
        if VALUE.get(cx.attrs()) != option.value {
            cx.set_prop(&VALUE, option.value.clone());
            cx.emit(
                "change",
                json!({ "value": option.value, "label": option.label }),
            );
        }
        self.close(cx);
    }

    fn move_highlight(&mut self, cx: &mut Context<'_>, forward: bool) {
        let enabled: Vec<bool> = options(&cx.view()).iter().map(|o| !o.disabled).collect();
        self.highlight = step_enabled(&enabled, self.highlight, forward);
        cx.request_render();
    }

    fn on_key(&mut self, cx: &mut Context<'_>, key: Key) {
        if !self.open {
            if matches!(key, Key::ArrowDown | Key::ArrowUp | Key::Enter | Key::Space) {
                self.open(cx);
            }
            return;
        }
        match key {
            Key::ArrowDown => self.move_highlight(cx, true),
            Key::ArrowUp => self.move_highlight(cx, false),
            Key::Enter | Key::Space => match self.highlight {
                Some(i) => self.choose(cx, i),
                None => self.close(cx),
            },
            Key::Escape | Key::Tab => self.close(cx),
            _ => {}
        }
    }
}

impl AttributeBound for Select {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["value", "placeholder", "disabled"]
    }

    fn observes_children(&self) -> bool {
        true
    }

    fn observed_child_attributes(&self) -> &'static [&'static str] {
        &["value", "label", "disabled"]
    }
}

impl Renderable for Select {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = SelectConfig::from_attributes(cx.attrs());
        let opts = options(cx);
        let current = opts
            .iter()
            .find(|o| config.value.as_deref() == Some(o.value.as_str()));

        let shown = match current {
            Some(option) => h("span").part("value").class(["value"]).text(option.label.as_str()),
            None => h("span")
                .part("value")
                .class(["placeholder"])
                .text(config.placeholder.as_str()),
        };
        let trigger = h("button")
            .part("trigger")
            .class(["trigger"])
            .attr("type", "button")
            .attr("aria-haspopup", "listbox")
            .attr("aria-expanded", aria_bool(self.open))
            .flag("disabled", config.disabled)
            .child(shown)
            .child(h("span").class(["chevron"]).attr("aria-hidden", "true").text("▾"));

        let mut children: Vec<VNode> = vec![styles::style(styles::SELECT).into(), trigger.into()];
        if self.open {
            let list = h("ul")
                .part("listbox")
                .class(["listbox"])
                .attr("role", "listbox")
                .children(opts.iter().enumerate().map(|(i, option)| {
                    let selected = current.is_some_and(|c| c.node == option.node);
                    h("li")
                        .part(format!("option-{i}"))
                        .class([
                            "option",
                            if self.highlight == Some(i) { "highlighted" } else { "" },
                            if selected { "selected" } else { "" },
                        ])
                        .attr("role", "option")
                        .attr("aria-selected", aria_bool(selected))
                        .flag("disabled", option.disabled)
                        .attr_if(option.disabled, "aria-disabled", "true")
                        .text(option.label.as_str())
                }));
            children.push(list.into());
        }
        VNode::Fragment(children)
    }
}

impl Component for Select {
    fn disconnected(&mut self, cx: &mut Context<'_>) {
        self.open = false;
        self.highlight = None;
        self.listeners.release(cx);
    }

    fn attribute_changed(
        &mut self,
        cx: &mut Context<'_>,
        name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) {
        if name == "disabled" && DISABLED.get(cx.attrs()) {
            self.close(cx);
        }
    }

    fn children_changed(&mut self, cx: &mut Context<'_>) {
        let count = options(&cx.view()).len();
        if self.highlight.is_some_and(|i| i >= count) {
            self.highlight = None;
        }
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        let view = cx.view();
        match event.name.as_str() {
            "click" => match own_part(&view, event) {
                Some("trigger") => {
                    if self.open {
                        self.close(cx);
                    } else {
                        self.open(cx);
                    }
                }
                Some(part) => {
                    if let Some(i) = part.strip_prefix("option-").and_then(|n| n.parse().ok()) {
                        self.choose(cx, i);
                    }
                }
                None => {}
            },
            "keydown" => {
                if let Some(key) = event.key {
                    self.on_key(cx, key);
                }
            }
            _ => {}
        }
    }

    fn handle_document_event(&mut self, cx: &mut Context<'_>, event: &Event, inside: bool) {
        if inside {
            return;
        }
        match event.name.as_str() {
            "click" => self.close(cx),
            "keydown" if event.key == Some(Key::Escape) => self.close(cx),
            _ => {}
        }
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(Select::new())
}

// ---------------------------------------------------------------------------
// SelectOption
// ---------------------------------------------------------------------------

/// An `aui-option`. Renders nothing; its select or autocomplete draws it.
#[derive(Debug, Default)]
pub struct SelectOption;

impl AttributeBound for SelectOption {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &[]
    }
}

impl Renderable for SelectOption {
    fn render(&self, _cx: &RenderContext<'_>) -> VNode {
        VNode::Fragment(vec![styles::style(styles::OPTION).into()])
    }
}

impl Component for SelectOption {}

pub fn option_factory() -> Box<dyn Component> {
    Box::new(SelectOption)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    const MARKUP: &str = r#"<aui-select placeholder="Pick a fruit">
        <aui-option value="apple">Apple</aui-option>
        <aui-option value="banana" disabled>Banana</aui-option>
        <aui-option value="cherry">Cherry</aui-option>
    </aui-select>"#;

    fn setup() -> (Harness, NodeId) {
        let mut ui = Harness::new();
        let select = ui.mount(MARKUP);
        (ui, select)
    }

    #[test]
    fn config_defaults() {
        let config = SelectConfig::from_attributes(&Attributes::new());
        assert_eq!(config.value, None);
        assert_eq!(config.placeholder, "Select…");
        assert!(!config.disabled);
    }

    #[test]
    fn placeholder_until_chosen() {
        let (mut ui, s) = setup();
        assert_eq!(ui.part(s, "value").unwrap().text_content(), "Pick a fruit");
        assert!(!ui.has_part(s, "listbox"));
        ui.click_part(s, "trigger");
        assert_eq!(ui.parts_with_prefix(s, "option-").len(), 3);
        ui.click_part(s, "option-2");
        assert_eq!(ui.attr(s, "value").as_deref(), Some("cherry"));
        assert_eq!(ui.part(s, "value").unwrap().text_content(), "Cherry");
        assert!(!ui.has_part(s, "listbox"));
        let change = ui.last_event("change").unwrap();
        assert_eq!(change["label"], json!("Cherry"));
    }

    #[test]
    fn disabled_option_not_selectable() {
        let (mut ui, s) = setup();
        ui.click_part(s, "trigger");
        assert!(!ui.click_part(s, "option-1"));
        assert!(ui.has_part(s, "listbox"));
    }

    #[test]
    fn outside_click_and_escape_close() {
        let (mut ui, s) = setup();
        ui.click_part(s, "trigger");
        assert_eq!(ui.doc().listener_count(s), 2);
        let body = ui.doc().body();
        ui.click(body);
        assert!(!ui.has_part(s, "listbox"));
        assert_eq!(ui.doc().listener_count(s), 0);

        ui.click_part(s, "trigger");
        ui.press(body, Key::Escape);
        assert!(!ui.has_part(s, "listbox"));
    }

    #[test]
    fn keyboard_selection() {
        let (mut ui, s) = setup();
        ui.press(s, Key::ArrowDown);
        assert!(ui.has_part(s, "listbox"));
        assert_eq!(
            ui.part(s, "option-0").unwrap().get_attr("class"),
            Some("option highlighted")
        );
        ui.press(s, Key::ArrowDown);
        ui.press(s, Key::Enter);
        assert_eq!(ui.attr(s, "value").as_deref(), Some("cherry"));
        assert!(!ui.has_part(s, "listbox"));
    }

    #[test]
    fn reopening_highlights_current_value() {
        let (mut ui, s) = setup();
        ui.set(s, "value", "cherry");
        ui.press(s, Key::Enter);
        assert_eq!(
            ui.part(s, "option-2").unwrap().get_attr("class"),
            Some("option highlighted selected")
        );
        ui.press(s, Key::Escape);
        assert!(!ui.has_part(s, "listbox"));
        assert!(ui.events("change").is_empty());
    }

    #[test]
    fn disabled_select_stays_closed() {
        let (mut ui, s) = setup();
        ui.set(s, "disabled", "");
        assert!(!ui.click_part(s, "trigger"));
        ui.press(s, Key::Enter);
        assert!(!ui.has_part(s, "listbox"));
    }

    #[test]
    fn option_label_change_rerenders() {
        let (mut ui, s) = setup();
        ui.set(s, "value", "apple");
        let apple = ui.find("aui-option");
        ui.set(apple, "label", "Green apple");
        assert_eq!(ui.part(s, "value").unwrap().text_content(), "Green apple");
    }
}
