//! Tabs: a tab strip with an animated indicator and value-matched panels.
//!
//! `aui-tabs` owns the selection. Its `value` attribute names the active tab;
//! the first `aui-tab` whose `value` matches is marked `selected` and the
//! first `aui-tab-panel` whose `value` matches is shown. Every other tab is
//! deselected and every other panel gets `hidden`. A value that matches
//! nothing selects nothing and shows nothing.
//!
//! The indicator is positioned from the selected tab's box in a row layout of
//! all tabs. Measured boxes (see [`Document::resize`]) are used when present;
//! otherwise widths are estimated from label length.
//!
//! [`Document::resize`]: crate::document::Document::resize

use serde_json::json;

use crate::dom::{Attributes, NodeId};
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable, StrProp};
use crate::event::{Event, Key};
use crate::geometry::{Rect, Size};
use crate::layout::{measure_row, RowItem};
use crate::render::{h, slot, VNode};
use crate::styles;

use super::support::{
    aria_bool, closest_in_host, first_enabled, format_number, is_disabled, label_of,
    last_enabled, step_enabled,
};

pub const VALUE: StrProp = StrProp::new("value", "");
pub const SELECTED: Prop<bool> = Prop::new("selected", false);
pub const DISABLED: Prop<bool> = Prop::new("disabled", false);
pub const LABEL: StrProp = StrProp::new("label", "");

// ---------------------------------------------------------------------------
// Selection helpers
// ---------------------------------------------------------------------------

/// One tab as seen by its container.
#[derive(Debug, Clone, PartialEq)]
struct TabInfo {
    node: NodeId,
    value: Option<String>,
    enabled: bool,
}

fn tabs_of(cx: &RenderContext<'_>) -> Vec<TabInfo> {
    cx.children_by_tag(&cx.tag("tab"))
        .into_iter()
        .map(|node| TabInfo {
            node,
            value: cx.attrs_of(node).get("value").map(str::to_owned),
            enabled: !is_disabled(cx, node),
        })
        .collect()
}

/// The value of the active tab: the `value` attribute, or the first enabled
/// tab's value when the attribute is absent.
fn effective_value(cx: &RenderContext<'_>, tabs: &[TabInfo]) -> Option<String> {
    match cx.attrs().get("value") {
        Some(value) => Some(value.to_owned()),
        None => tabs
            .iter()
            .find(|t| t.enabled && t.value.is_some())
            .and_then(|t| t.value.clone()),
    }
}

fn selected_index(tabs: &[TabInfo], value: Option<&str>) -> Option<usize> {
    let value = value?;
    tabs.iter().position(|t| t.value.as_deref() == Some(value))
}

/// Box of the selected tab's indicator relative to the tab strip, or `None`
/// when no tab is selected.
pub fn indicator_rect(cx: &RenderContext<'_>) -> Option<Rect> {
    let tabs = tabs_of(cx);
    let value = effective_value(cx, &tabs);
    let selected = selected_index(&tabs, value.as_deref())?;
    let items: Vec<RowItem> = tabs
        .iter()
        .map(|t| RowItem {
            size: cx.box_size(t.node).unwrap_or_else(|| {
                let chars = label_of(cx, t.node).chars().count();
                Size::new(cx.config.label_width(chars), cx.config.tab_height)
            }),
        })
        .collect();
    let rects = measure_row(&items, cx.host_width(), cx.config.tab_gap);
    rects.get(selected).copied()
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

/// The `aui-tabs` container.
#[derive(Debug, Default)]
pub struct Tabs;

impl Tabs {
    pub fn new() -> Self {
        Self
    }

    /// Adopt a value when none is set, then mark tabs and panels.
    fn sync(&self, cx: &mut Context<'_>) {
        let view = cx.view();
        let tabs = tabs_of(&view);
        let value = effective_value(&view, &tabs);
        if view.attrs().get("value").is_none() {
            if let Some(adopted) = &value {
                cx.set_attribute("value", adopted.as_str());
            }
        }

        let selected = selected_index(&tabs, value.as_deref());
        for (i, tab) in tabs.iter().enumerate() {
            let on = Some(i) == selected;
            cx.set_node_attribute(tab.node, "slot", "tab");
            cx.set_node_flag(tab.node, "selected", on);
            cx.set_node_attribute(tab.node, "aria-selected", aria_bool(on));
            cx.set_node_attribute(tab.node, "tabindex", if on { "0" } else { "-1" });
        }

        let panels = view.children_by_tag(&view.tag("tab-panel"));
        let shown = value.as_deref().and_then(|v| {
            panels
                .iter()
                .position(|&p| view.attrs_of(p).get("value") == Some(v))
        });
        for (i, &panel) in panels.iter().enumerate() {
            cx.set_node_attribute(panel, "slot", "panel");
            cx.set_node_flag(panel, "hidden", Some(i) != shown);
        }
    }

    /// Make `value` the active tab and emit `change`.
    pub fn select(&self, cx: &mut Context<'_>, value: &str) {
        if cx.attrs().get("value") == Some(value) {
            return;
        }
        cx.set_attribute("value", value);
        cx.emit("change", json!({ "value": value }));
    }

    fn handle_key(&self, cx: &mut Context<'_>, key: Key) {
        let view = cx.view();
        let tabs = tabs_of(&view);
        let enabled: Vec<bool> = tabs.iter().map(|t| t.enabled && t.value.is_some()).collect();
        let current = selected_index(&tabs, effective_value(&view, &tabs).as_deref());
        let next = match key {
            Key::ArrowRight | Key::ArrowDown => step_enabled(&enabled, current, true),
            Key::ArrowLeft | Key::ArrowUp => step_enabled(&enabled, current, false),
            Key::Home => first_enabled(&enabled),
            Key::End => last_enabled(&enabled),
            _ => return,
        };
        if let Some(value) = next.and_then(|i| tabs[i].value.clone()) {
            self.select(cx, &value);
        }
    }
}

impl AttributeBound for Tabs {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["value"]
    }

    fn observes_children(&self) -> bool {
        true
    }

    fn observed_child_attributes(&self) -> &'static [&'static str] {
        &["value", "disabled", "label"]
    }
}

impl Renderable for Tabs {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let indicator = h("div").part("indicator").class(["indicator"]);
        let indicator = match indicator_rect(cx) {
            Some(rect) => indicator.attr(
                "style",
                format!(
                    "transform: translateX({}px); width: {}px",
                    format_number(rect.x.into()),
                    format_number(rect.width.into())
                ),
            ),
            None => indicator.flag("hidden", true),
        };
        let root = h("div")
            .class(["tabs"])
            .child(
                h("div")
                    .part("tablist")
                    .class(["tablist"])
                    .attr("role", "tablist")
                    .child(slot(Some("tab")))
                    .child(indicator),
            )
            .child(h("div").class(["panels"]).child(slot(Some("panel"))));
        VNode::Fragment(vec![styles::style(styles::TABS).into(), root.into()])
    }
}

impl Component for Tabs {
    fn connected(&mut self, cx: &mut Context<'_>) {
        self.sync(cx);
    }

    fn attribute_changed(
        &mut self,
        cx: &mut Context<'_>,
        _name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) {
        self.sync(cx);
    }

    fn children_changed(&mut self, cx: &mut Context<'_>) {
        self.sync(cx);
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        let view = cx.view();
        let tab_tag = view.tag("tab");
        match event.name.as_str() {
            "click" => {
                let Some(tab) = closest_in_host(&view, event.target, &tab_tag) else {
                    return;
                };
                if is_disabled(&view, tab) {
                    return;
                }
                if let Some(value) = view.attrs_of(tab).get("value") {
                    self.select(cx, value);
                }
            }
            "keydown" => {
                let on_strip = event.target == view.host
                    || closest_in_host(&view, event.target, &tab_tag).is_some();
                if let (true, Some(key)) = (on_strip, event.key) {
                    self.handle_key(cx, key);
                }
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Tab
// ---------------------------------------------------------------------------

/// Tab attributes, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabConfig {
    pub value: String,
    pub label: String,
    pub disabled: bool,
    pub selected: bool,
}

impl TabConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self {
            value: VALUE.get(attrs).to_owned(),
            label: LABEL.get(attrs).to_owned(),
            disabled: DISABLED.get(attrs),
            selected: SELECTED.get(attrs),
        }
    }
}

/// A single `aui-tab`.
#[derive(Debug, Default)]
pub struct Tab;

impl AttributeBound for Tab {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["value", "label", "disabled", "selected"]
    }
}

impl Renderable for Tab {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = TabConfig::from_attributes(cx.attrs());
        let button = h("button")
            .part("tab")
            .class(["tab", if config.selected { "selected" } else { "" }])
            .attr("type", "button")
            .attr("role", "tab")
            .attr("aria-selected", aria_bool(config.selected))
            .flag("disabled", config.disabled);
        let button = if config.label.is_empty() {
            button.child(slot(None))
        } else {
            button.text(config.label.as_str())
        };
        VNode::Fragment(vec![styles::style(styles::TAB).into(), button.into()])
    }
}

impl Component for Tab {}

// ---------------------------------------------------------------------------
// TabPanel
// ---------------------------------------------------------------------------

/// A single `aui-tab-panel`.
#[derive(Debug, Default)]
pub struct TabPanel;

impl AttributeBound for TabPanel {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["value", "hidden"]
    }
}

impl Renderable for TabPanel {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let panel = h("div")
            .part("panel")
            .class(["panel"])
            .attr("role", "tabpanel")
            .attr_if(cx.attrs().contains("hidden"), "aria-hidden", "true")
            .child(slot(None));
        VNode::Fragment(vec![styles::style(styles::TAB_PANEL).into(), panel.into()])
    }
}

impl Component for TabPanel {}

pub fn factory() -> Box<dyn Component> {
    Box::new(Tabs::new())
}

pub fn tab_factory() -> Box<dyn Component> {
    Box::new(Tab)
}

pub fn panel_factory() -> Box<dyn Component> {
    Box::new(TabPanel)
}

// ===========================================================================
// Tests
// ===========================================================================
