//! Accordion: a stack of collapsible `aui-accordion-item`s.
//!
//! Each item owns its `open` attribute and toggles it from its header part.
//! The accordion observes the items' `open` attributes; without `multiple`
//! it keeps at most one item open, preferring the one opened most recently.

use serde_json::json;

use crate::dom::{Attributes, NodeId};
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable, StrProp};
use crate::event::{Event, Key};
use crate::render::{h, slot, VNode};
use crate::styles;

use super::support::{aria_bool, own_part};

pub const MULTIPLE: Prop<bool> = Prop::new("multiple", false);

pub const ITEM_OPEN: Prop<bool> = Prop::new("open", false);
pub const ITEM_LABEL: StrProp = StrProp::new("label", "");
pub const ITEM_DISABLED: Prop<bool> = Prop::new("disabled", false);

// ---------------------------------------------------------------------------
// Accordion
// ---------------------------------------------------------------------------

/// The `aui-accordion` container.
#[derive(Debug, Default)]
pub struct Accordion {
    /// Items that were open after the last reconciliation.
    open: Vec<NodeId>,
}

impl Accordion {
    pub fn new() -> Self {
        Self::default()
    }

    fn open_items(cx: &RenderContext<'_>) -> Vec<NodeId> {
        cx.children_by_tag(&cx.tag("accordion-item"))
            .into_iter()
            .filter(|&item| ITEM_OPEN.get(cx.attrs_of(item)))
            .collect()
    }

    /// Close surplus items in single mode and remember the open set.
    fn reconcile(&mut self, cx: &mut Context<'_>) {
        let view = cx.view();
        let open = Self::open_items(&view);
        if MULTIPLE.get(view.attrs()) || open.len() <= 1 {
            self.open = open;
            return;
        }
        let keep = open
            .iter()
            .rev()
            .copied()
            .find(|item| !self.open.contains(item))
            .or_else(|| open.first().copied());
        for &item in &open {
            if Some(item) != keep {
                cx.set_node_prop(item, &ITEM_OPEN, false);
            }
        }
        self.open = keep.into_iter().collect();
    }
}

impl AttributeBound for Accordion {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["multiple"]
    }

    fn observes_children(&self) -> bool {
        true
    }

    fn observed_child_attributes(&self) -> &'static [&'static str] {
        &["open"]
    }
}

impl Renderable for Accordion {
    fn render(&self, _cx: &RenderContext<'_>) -> VNode {
        VNode::Fragment(vec![
            styles::style(styles::ACCORDION).into(),
            h("div").part("accordion").class(["accordion"]).child(slot(None)).into(),
        ])
    }
}

impl Component for Accordion {
    fn connected(&mut self, cx: &mut Context<'_>) {
        // Markup with several open items keeps the first.
        self.open = Self::open_items(&cx.view());
        self.reconcile(cx);
    }

    fn attribute_changed(
        &mut self,
        cx: &mut Context<'_>,
        _name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) {
        self.reconcile(cx);
    }

    fn children_changed(&mut self, cx: &mut Context<'_>) {
        self.reconcile(cx);
    }
}

// ---------------------------------------------------------------------------
// AccordionItem
// ---------------------------------------------------------------------------

/// A single `aui-accordion-item`.
#[derive(Debug, Default)]
pub struct AccordionItem;

/// Accordion item attributes, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionItemConfig {
    pub open: bool,
    /// `None` when absent or empty; the `header` slot is shown instead.
    pub label: Option<String>,
    pub disabled: bool,
}

impl AccordionItemConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self {
            open: ITEM_OPEN.get(attrs),
            label: ITEM_LABEL.non_empty(attrs).map(str::to_owned),
            disabled: ITEM_DISABLED.get(attrs),
        }
    }
}

impl AccordionItem {
    /// Position among the sibling items of the parent accordion.
    fn index(cx: &RenderContext<'_>) -> usize {
        let Some(parent) = cx.dom.parent(cx.host) else {
            return 0;
        };
        cx.dom
            .children_by_tag(parent, &cx.tag("accordion-item"))
            .iter()
            .position(|&n| n == cx.host)
            .unwrap_or(0)
    }

    /// Flip `open` and emit `toggle`.
    pub fn toggle(&mut self, cx: &mut Context<'_>) {
        let view = cx.view();
        if ITEM_DISABLED.get(view.attrs()) {
            return;
        }
        let open = !ITEM_OPEN.get(view.attrs());
        cx.set_prop(&ITEM_OPEN, open);
        cx.emit("toggle", json!({ "index": Self::index(&view), "open": open }));
    }
}

impl AttributeBound for AccordionItem {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["open", "label", "disabled"]
    }
}

impl Renderable for AccordionItem {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let AccordionItemConfig { open, label, disabled } =
            AccordionItemConfig::from_attributes(cx.attrs());

        let header = h("button")
            .part("header")
            .class(["header"])
            .attr("type", "button")
            .attr("aria-expanded", aria_bool(open))
            .flag("disabled", disabled);
        let header = match label {
            Some(label) => header.child(h("span").class(["label"]).text(label)),
            None => header.child(slot(Some("header"))),
        };
        let header = header.child(
            h("span")
                .class(["chevron"])
                .attr("aria-hidden", "true")
                .text("▾"),
        );
        let item = h("div")
            .class(["item", if open { "open" } else { "" }])
            .child(header)
            .child(
                h("div")
                    .part("content")
                    .class(["content"])
                    .attr("role", "region")
                    .flag("hidden", !open)
                    .child(slot(None)),
            );
        VNode::Fragment(vec![styles::style(styles::ACCORDION_ITEM).into(), item.into()])
    }
}

impl Component for AccordionItem {
    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        let view = cx.view();
        if own_part(&view, event) != Some("header") {
            return;
        }
        let activated = match event.name.as_str() {
            "click" => true,
            "keydown" => event.key.is_some_and(Key::is_activation),
            _ => false,
        };
        if activated {
            self.toggle(cx);
        }
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(Accordion::new())
}

pub fn item_factory() -> Box<dyn Component> {
    Box::new(AccordionItem)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    fn setup(multiple: bool) -> (Harness, NodeId, Vec<NodeId>) {
        let mut ui = Harness::new();
        let markup = format!(
            r#"<aui-accordion{}>
                <aui-accordion-item label="One">First</aui-accordion-item>
                <aui-accordion-item label="Two">Second</aui-accordion-item>
                <aui-accordion-item label="Three" disabled>Third</aui-accordion-item>
            </aui-accordion>"#,
            if multiple { " multiple" } else { "" }
        );
        let accordion = ui.mount(&markup);
        let items = ui.find_all("aui-accordion-item");
        (ui, accordion, items)
    }

    #[test]
    fn item_config_treats_empty_label_as_missing() {
        let attrs: Attributes = [("label", ""), ("open", "")].into_iter().collect();
        let config = AccordionItemConfig::from_attributes(&attrs);
        assert!(config.open);
        assert_eq!(config.label, None);
        assert!(!config.disabled);
    }

    #[test]
    fn header_click_toggles() {
        let (mut ui, _, items) = setup(false);
        assert!(ui.part(items[0], "content").unwrap().has_attr("hidden"));
        ui.click_part(items[0], "header");
        assert!(ui.has(items[0], "open"));
        assert!(!ui.part(items[0], "content").unwrap().has_attr("hidden"));
        assert_eq!(
            ui.part(items[0], "header").unwrap().get_attr("aria-expanded"),
            Some("true")
        );
        ui.click_part(items[0], "header");
        assert!(!ui.has(items[0], "open"));

        let toggles = ui.events("toggle");
        assert_eq!(toggles.len(), 2);
        assert_eq!(toggles[0]["index"], json!(0));
        assert_eq!(toggles[0]["open"], json!(true));
        assert_eq!(toggles[1]["open"], json!(false));
    }

    #[test]
    fn single_mode_closes_siblings() {
        let (mut ui, _, items) = setup(false);
        ui.click_part(items[0], "header");
        ui.click_part(items[1], "header");
        assert!(!ui.has(items[0], "open"));
        assert!(ui.has(items[1], "open"));
        assert_eq!(ui.last_event("toggle").unwrap()["index"], json!(1));
    }

    #[test]
    fn multiple_mode_keeps_siblings() {
        let (mut ui, _, items) = setup(true);
        ui.click_part(items[0], "header");
        ui.click_part(items[1], "header");
        assert!(ui.has(items[0], "open"));
        assert!(ui.has(items[1], "open"));
    }

    #[test]
    fn programmatic_open_respects_single_mode() {
        let (mut ui, _, items) = setup(false);
        ui.set(items[1], "open", "");
        ui.set(items[0], "open", "");
        assert!(ui.has(items[0], "open"));
        assert!(!ui.has(items[1], "open"));
    }

    #[test]
    fn leaving_multiple_mode_collapses_to_one() {
        let (mut ui, accordion, items) = setup(true);
        ui.set(items[0], "open", "");
        ui.set(items[1], "open", "");
        ui.unset(accordion, "multiple");
        let open: Vec<bool> = items.iter().map(|&i| ui.has(i, "open")).collect();
        assert_eq!(open.iter().filter(|&&o| o).count(), 1);
    }

    #[test]
    fn initial_markup_keeps_first_open() {
        let mut ui = Harness::new();
        ui.mount(
            r#"<aui-accordion>
                <aui-accordion-item open>A</aui-accordion-item>
                <aui-accordion-item open>B</aui-accordion-item>
            </aui-accordion>"#,
        );
        let items = ui.find_all("aui-accordion-item");
        assert!(ui.has(items[0], "open"));
        assert!(!ui.has(items[1], "open"));
    }

    #[test]
    fn disabled_item_does_not_toggle() {
        let (mut ui, _, items) = setup(false);
        assert!(!ui.click_part(items[2], "header"));
        assert!(!ui.has(items[2], "open"));
        assert!(ui.events("toggle").is_empty());
    }

    #[test]
    fn keyboard_activation() {
        let (mut ui, _, items) = setup(false);
        let mut event = Event::keydown(items[0], Key::Enter);
        event.part = Some("header".to_owned());
        ui.doc_mut().dispatch(event).unwrap();
        assert!(ui.has(items[0], "open"));
    }
}
