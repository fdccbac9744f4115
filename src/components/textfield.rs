//! Text field: a labelled single-line input with helper, error, and counter.
//!
//! Native `input` events on the `input` part are absorbed at the host and
//! re-emitted as `input {value}` after `maxlength` truncation, so listeners
//! only ever see the committed value.

use serde_json::json;

use crate::attr_enum;
use crate::dom::Attributes;
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable, StrProp};
use crate::event::{Event, Key};
use crate::render::{h, slot, VNode};
use crate::styles;

use super::support::own_part;

attr_enum! {
    /// The `type` of the inner input.
    pub enum InputType {
        Text => "text",
        Password => "password",
        Email => "email",
        Number => "number",
        Search => "search",
        Tel => "tel",
        Url => "url",
    }
}

pub const VALUE: StrProp = StrProp::new("value", "");
pub const PLACEHOLDER: StrProp = StrProp::new("placeholder", "");
pub const LABEL: StrProp = StrProp::new("label", "");
pub const TYPE: Prop<InputType> = Prop::new("type", InputType::Text);
pub const DISABLED: Prop<bool> = Prop::new("disabled", false);
pub const READONLY: Prop<bool> = Prop::new("readonly", false);
pub const REQUIRED: Prop<bool> = Prop::new("required", false);
pub const ERROR: StrProp = StrProp::new("error", "");
pub const HELPER: StrProp = StrProp::new("helper", "");
pub const MAXLENGTH: Prop<usize> = Prop::new("maxlength", 0);

// ---------------------------------------------------------------------------
// TextFieldConfig
// ---------------------------------------------------------------------------

/// Text field attributes, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFieldConfig {
    pub value: String,
    pub placeholder: String,
    pub label: String,
    pub kind: InputType,
    pub disabled: bool,
    pub readonly: bool,
    pub required: bool,
    pub error: String,
    pub helper: String,
    /// Maximum length in characters; 0 is unlimited.
    pub maxlength: usize,
}

impl TextFieldConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self {
            value: VALUE.get(attrs).to_owned(),
            placeholder: PLACEHOLDER.get(attrs).to_owned(),
            label: LABEL.get(attrs).to_owned(),
            kind: TYPE.get(attrs),
            disabled: DISABLED.get(attrs),
            readonly: READONLY.get(attrs),
            required: REQUIRED.get(attrs),
            error: ERROR.get(attrs).to_owned(),
            helper: HELPER.get(attrs).to_owned(),
            maxlength: MAXLENGTH.get(attrs),
        }
    }

    /// Whether user input is ignored.
    pub fn is_locked(&self) -> bool {
        self.disabled || self.readonly
    }

    /// `text` cut to `maxlength` characters.
    pub fn clamp_text(&self, text: &str) -> String {
        if self.maxlength == 0 {
            text.to_owned()
        } else {
            text.chars().take(self.maxlength).collect()
        }
    }
}

// ---------------------------------------------------------------------------
// TextField
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TextField;

impl TextField {
    pub fn new() -> Self {
        Self
    }
}

impl AttributeBound for TextField {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &[
            "value",
            "placeholder",
            "label",
            "type",
            "disabled",
            "readonly",
            "required",
            "error",
            "helper",
            "maxlength",
        ]
    }
}

impl Renderable for TextField {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = TextFieldConfig::from_attributes(cx.attrs());
        let has_error = !config.error.is_empty();

        let mut field = h("div").class(["field", if has_error { "has-error" } else { "" }]);
        if !config.label.is_empty() {
            let mut label = h("label").part("label").class(["label"]).text(config.label.as_str());
            if config.required {
                label = label.child(h("span").class(["required"]).attr("aria-hidden", "true").text(" *"));
            }
            field = field.child(label);
        }

        let input = h("input")
            .part("input")
            .attr("type", config.kind.as_str())
            .attr("value", config.value.as_str())
            .attr_if(!config.placeholder.is_empty(), "placeholder", config.placeholder.as_str())
            .flag("disabled", config.disabled)
            .flag("readonly", config.readonly)
            .flag("required", config.required)
            .attr_if(config.maxlength > 0, "maxlength", config.maxlength.to_string())
            .attr_if(has_error, "aria-invalid", "true");
        field = field.child(
            h("div")
                .class(["control"])
                .child(slot(Some("prefix")))
                .child(input)
                .child(slot(Some("suffix"))),
        );

        let mut footer = h("div").class(["footer"]);
        if has_error {
            footer = footer.child(
                h("div").part("error").class(["error"]).attr("role", "alert").text(config.error.as_str()),
            );
        } else if !config.helper.is_empty() {
            footer = footer.child(h("div").part("helper").class(["helper"]).text(config.helper.as_str()));
        }
        if config.maxlength > 0 {
            let count = config.value.chars().count();
            footer = footer.child(
                h("span")
                    .part("counter")
                    .class(["counter"])
                    .text(format!("{count}/{}", config.maxlength)),
            );
        }
        if !footer.children.is_empty() {
            field = field.child(footer);
        }

        VNode::Fragment(vec![styles::style(styles::TEXTFIELD).into(), field.into()])
    }
}

impl Component for TextField {
    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        let view = cx.view();
        let config = TextFieldConfig::from_attributes(view.attrs());
        match event.name.as_str() {
            "input" if own_part(&view, event) == Some("input") => {
                event.stop_propagation();
                if config.is_locked() {
                    return;
                }
                let value = config.clamp_text(event.data.as_deref().unwrap_or_default());
                cx.set_attribute("value", value.as_str());
                cx.emit("input", json!({ "value": value }));
            }
            "keydown" if event.key == Some(Key::Enter) && event.target == view.host => {
                cx.emit("change", json!({ "value": config.value }));
            }
            "focusout" if event.target == view.host => {
                cx.emit("change", json!({ "value": config.value }));
            }
            _ => {}
        }
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(TextField::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    #[test]
    fn input_updates_value_and_emits() {
        let mut ui = Harness::new();
        let tf = ui.mount("<aui-textfield></aui-textfield>");
        ui.type_text(tf, "input", "hello");
        assert_eq!(ui.attr(tf, "value").as_deref(), Some("hello"));
        assert_eq!(ui.events("input").len(), 1);
        assert_eq!(ui.last_event("input").unwrap()["value"], json!("hello"));
        assert_eq!(ui.part(tf, "input").unwrap().get_attr("value"), Some("hello"));
    }

    #[test]
    fn maxlength_truncates_and_counts() {
        let mut ui = Harness::new();
        let tf = ui.mount(r#"<aui-textfield maxlength="4"></aui-textfield>"#);
        ui.type_text(tf, "input", "héllo world");
        assert_eq!(ui.attr(tf, "value").as_deref(), Some("héll"));
        assert_eq!(ui.part(tf, "counter").unwrap().text_content(), "4/4");
    }

    #[test]
    fn locked_fields_ignore_input() {
        let mut ui = Harness::new();
        let tf = ui.mount(r#"<aui-textfield value="x" readonly></aui-textfield>"#);
        ui.type_text(tf, "input", "y");
        assert_eq!(ui.attr(tf, "value").as_deref(), Some("x"));
        ui.set(tf, "disabled", "");
        ui.unset(tf, "readonly");
        ui.type_text(tf, "input", "z");
        assert_eq!(ui.attr(tf, "value").as_deref(), Some("x"));
        assert!(ui.events("input").is_empty());
    }

    #[test]
    fn enter_and_focusout_emit_change() {
        let mut ui = Harness::new();
        let tf = ui.mount(r#"<aui-textfield value="a"></aui-textfield>"#);
        ui.press(tf, Key::Enter);
        ui.type_text(tf, "input", "ab");
        ui.blur(tf);
        let values: Vec<_> = ui.events("change").iter().map(|d| d["value"].clone()).collect();
        assert_eq!(values, vec![json!("a"), json!("ab")]);
    }

    #[test]
    fn error_replaces_helper() {
        let mut ui = Harness::new();
        let tf = ui.mount(r#"<aui-textfield helper="We never share it"></aui-textfield>"#);
        assert!(ui.has_part(tf, "helper"));
        ui.set(tf, "error", "Required");
        assert!(!ui.has_part(tf, "helper"));
        assert_eq!(ui.part(tf, "error").unwrap().text_content(), "Required");
        assert_eq!(ui.part(tf, "input").unwrap().get_attr("aria-invalid"), Some("true"));
    }

    #[test]
    fn renders_slots_and_type() {
        let mut ui = Harness::new();
        let tf = ui.mount(r#"<aui-textfield type="EMAIL" label="Email" required></aui-textfield>"#);
        assert_eq!(ui.part(tf, "input").unwrap().get_attr("type"), Some("email"));
        assert_eq!(ui.part(tf, "label").unwrap().text_content(), "Email *");
        let shadow = ui.doc().shadow(tf).unwrap();
        assert_eq!(shadow.slot_names(), vec!["prefix".to_owned(), "suffix".to_owned()]);
    }
}
