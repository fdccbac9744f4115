//! Autocomplete: a text input that suggests matching `aui-option` children.
//!
//! `value` mirrors the input text. Typing at least `min-chars` characters
//! opens the suggestion list, filtered by case-insensitive substring on the
//! option label and capped at `max-results`. Choosing a suggestion writes its
//! label into `value`.

use serde_json::json;

use crate::dom::Attributes;
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable, StrProp};
use crate::event::{Event, Key, ListenerKind};
use crate::render::{h, VNode};
use crate::styles;

use super::select::{options, OptionEntry};
use super::support::{aria_bool, own_part, step_enabled, DocumentListeners};

pub const VALUE: StrProp = StrProp::new("value", "");
pub const PLACEHOLDER: StrProp = StrProp::new("placeholder", "");
pub const MIN_CHARS: Prop<i64> = Prop::new("min-chars", 1);
pub const MAX_RESULTS: Prop<i64> = Prop::new("max-results", 8);
pub const DISABLED: Prop<bool> = Prop::new("disabled", false);

/// Autocomplete attributes, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteConfig {
    pub value: String,
    pub placeholder: String,
    pub min_chars: usize,
    /// Zero means unlimited.
    pub max_results: usize,
    pub disabled: bool,
}

impl AutocompleteConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self {
            value: VALUE.get(attrs).to_owned(),
            placeholder: PLACEHOLDER.get(attrs).to_owned(),
            min_chars: MIN_CHARS.get(attrs).max(0) as usize,
            max_results: MAX_RESULTS.get(attrs).max(0) as usize,
            disabled: DISABLED.get(attrs),
        }
    }

    /// Whether `query` is long enough to show suggestions.
    pub fn accepts(&self, query: &str) -> bool {
        query.chars().count() >= self.min_chars.max(1)
    }
}

/// Options whose label contains `query`, case-insensitively, in order and
/// capped at `max` (zero for no cap).
pub fn filter_options(options: Vec<OptionEntry>, query: &str, max: usize) -> Vec<OptionEntry> {
    let needle = query.to_lowercase();
    let matching = options
        .into_iter()
        .filter(|o| o.label.to_lowercase().contains(&needle));
    if max == 0 {
        matching.collect()
    } else {
        matching.take(max).collect()
    }
}

#[derive(Debug, Default)]
pub struct Autocomplete {
    open: bool,
    highlight: Option<usize>,
    listeners: DocumentListeners,
}

impl Autocomplete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn suggestions(cx: &RenderContext<'_>) -> Vec<OptionEntry> {
        let config = AutocompleteConfig::from_attributes(cx.attrs());
        filter_options(options(cx), &config.value, config.max_results)
    }

    fn show(&mut self, cx: &mut Context<'_>) {
        self.highlight = None;
        if !self.open {
            self.open = true;
            self.listeners.acquire(cx, &[ListenerKind::Click]);
        }
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

    fn on_input(&mut self, cx: &mut Context<'_>, text: &str) {
        let config = AutocompleteConfig::from_attributes(cx.attrs());
        if config.disabled {
            return;
        }
        cx.set_prop(&VALUE, text.to_owned());
        cx.emit("input", json!({ "value": text }));
        if config.accepts(text) {
            self.show(cx);
        } else {
            self.close(cx);
        }
    }

    /// Choose suggestion `index` of the current filtered list.
    pub fn choose(&mut self, cx: &mut Context<'_>, index: usize) {
        let suggestions = Self::suggestions(&cx.view());
        let Some(option) = suggestions.get(index).filter(|o| !o.disabled) else {
            return;
        };
        cx.set_prop(&VALUE, option.label.clone());
        cx.emit(
            "select",
            json!({ "value": option.value, "label": option.label }),
        );
        self.close(cx);
    }

    fn on_key(&mut self, cx: &mut Context<'_>, key: Key) {
        let view = cx.view();
        let config = AutocompleteConfig::from_attributes(view.attrs());
        if config.disabled {
            return;
        }
        match key {
            Key::ArrowDown | Key::ArrowUp if !self.open => {
                if config.accepts(&config.value) {
                    self.show(cx);
                }
            }
            Key::ArrowDown | Key::ArrowUp => {
                let enabled: Vec<bool> =
                    Self::suggestions(&view).iter().map(|o| !o.disabled).collect();
                self.highlight = step_enabled(&enabled, self.highlight, key == Key::ArrowDown);
                cx.request_render();
            }
            Key::Enter if self.open => {
                if let Some(i) = self.highlight {
                    self.choose(cx, i);
                }
            }
            Key::Escape | Key::Tab => self.close(cx),
            _ => {}
        }
    }
}

impl AttributeBound for Autocomplete {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["value", "placeholder", "min-chars", "max-results", "disabled"]
    }

    fn observes_children(&self) -> bool {
        true
    }

    fn observed_child_attributes(&self) -> &'static [&'static str] {
        &["value", "label", "disabled"]
    }
}

impl Renderable for Autocomplete {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = AutocompleteConfig::from_attributes(cx.attrs());
        let expanded = self.open && !config.disabled;

        let input = h("input")
            .part("input")
            .class(["input"])
            .attr("type", "text")
            .attr("role", "combobox")
            .attr("autocomplete", "off")
            .attr("aria-autocomplete", "list")
            .attr("aria-expanded", aria_bool(expanded))
            .attr("value", config.value.as_str())
            .attr_if(!config.placeholder.is_empty(), "placeholder", config.placeholder.as_str())
            .flag("disabled", config.disabled);

        let mut children: Vec<VNode> = vec![styles::style(styles::AUTOCOMPLETE).into(), input.into()];
        if expanded {
            let suggestions = Self::suggestions(cx);
            if suggestions.is_empty() {
                children.push(h("div").part("empty").class(["empty"]).text("No results").into());
            } else {
                let list = h("ul")
                    .part("listbox")
                    .class(["listbox"])
                    .attr("role", "listbox")
                    .children(suggestions.iter().enumerate().map(|(i, option)| {
                        h("li")
                            .part(format!("option-{i}"))
                            .class(["option", if self.highlight == Some(i) { "highlighted" } else { "" }])
                            .attr("role", "option")
                            .attr("aria-selected", aria_bool(self.highlight == Some(i)))
                            .flag("disabled", option.disabled)
                            .text(option.label.as_str())
                    }));
                children.push(list.into());
            }
        }
        VNode::Fragment(children)
    }
}

impl Component for Autocomplete {
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

    fn children_changed(&mut self, _cx: &mut Context<'_>) {
        self.highlight = None;
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        let view = cx.view();
        match event.name.as_str() {
            "input" if own_part(&view, event) == Some("input") => {
                event.stop_propagation();
                let text = event.data.clone().unwrap_or_default();
                self.on_input(cx, &text);
            }
            "click" => {
                if let Some(i) = own_part(&view, event)
                    .and_then(|p| p.strip_prefix("option-"))
                    .and_then(|n| n.parse().ok())
                {
                    self.choose(cx, i);
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

    fn handle_document_event(&mut self, cx: &mut Context<'_>, event: &Event, inside: bool) {
        if event.name == "click" && !inside {
            self.close(cx);
        }
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(Autocomplete::new())
}

// ===========================================================================
// Tests
// ===========================================================================
