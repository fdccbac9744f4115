//! Checkbox: a labelled tri-state check box.

use serde_json::json;

use crate::dom::Attributes;
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable, StrProp};
use crate::event::{Event, Key};
use crate::render::{h, slot, VNode};
use crate::styles;

pub const CHECKED: Prop<bool> = Prop::new("checked", false);
pub const INDETERMINATE: Prop<bool> = Prop::new("indeterminate", false);
pub const DISABLED: Prop<bool> = Prop::new("disabled", false);
pub const LABEL: StrProp = StrProp::new("label", "");
pub const NAME: StrProp = StrProp::new("name", "");
pub const VALUE: StrProp = StrProp::new("value", "on");

/// Checkbox attributes, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxConfig {
    pub checked: bool,
    pub indeterminate: bool,
    pub disabled: bool,
    pub label: String,
    pub name: String,
    pub value: String,
}

impl CheckboxConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self {
            checked: CHECKED.get(attrs),
            indeterminate: INDETERMINATE.get(attrs),
            disabled: DISABLED.get(attrs),
            label: LABEL.get(attrs).to_owned(),
            name: NAME.get(attrs).to_owned(),
            value: VALUE.get(attrs).to_owned(),
        }
    }

    /// `aria-checked` value.
    pub fn aria_checked(&self) -> &'static str {
        match (self.indeterminate, self.checked) {
            (true, _) => "mixed",
            (false, true) => "true",
            (false, false) => "false",
        }
    }
}

#[derive(Debug, Default)]
pub struct Checkbox;

impl Checkbox {
    pub fn new() -> Self {
        Self
    }

    fn toggle(&self, cx: &mut Context<'_>) {
        let config = CheckboxConfig::from_attributes(cx.attrs());
        if config.disabled {
            return;
        }
        let checked = !config.checked;
        cx.set_prop(&CHECKED, checked);
        cx.set_prop(&INDETERMINATE, false);
        cx.emit("change", json!({ "checked": checked, "value": config.value }));
    }
}

impl AttributeBound for Checkbox {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["checked", "indeterminate", "disabled", "label", "name", "value"]
    }
}

impl Renderable for Checkbox {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = CheckboxConfig::from_attributes(cx.attrs());
        let mark = match config.aria_checked() {
            "mixed" => "−",
            "true" => "✓",
            _ => "",
        };
        let mut label = h("span").class(["label"]);
        label = if config.label.is_empty() {
            label.child(slot(None))
        } else {
            label.text(config.label.as_str())
        };

        let root = h("label")
            .part("control")
            .class([
                "checkbox",
                if config.checked { "checked" } else { "" },
                if config.indeterminate { "indeterminate" } else { "" },
                if config.disabled { "disabled" } else { "" },
            ])
            .attr("role", "checkbox")
            .attr("aria-checked", config.aria_checked())
            .attr("tabindex", if config.disabled { "-1" } else { "0" })
            .attr_if(config.disabled, "aria-disabled", "true")
            .child(h("span").class(["box"]).text(mark))
            .child(label);

        VNode::Fragment(vec![styles::style(styles::CHECKBOX).into(), root.into()])
    }
}

impl Component for Checkbox {
    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        let activates = match event.name.as_str() {
            "click" => true,
            "keydown" => event.key == Some(Key::Space),
            _ => false,
        };
        if activates {
            self.toggle(cx);
        }
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(Checkbox::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    #[test]
    fn click_toggles_and_emits() {
        let mut ui = Harness::new();
        let cb = ui.mount(r#"<aui-checkbox value="tos">I agree</aui-checkbox>"#);
        ui.click(cb);
        assert!(ui.has(cb, "checked"));
        let detail = ui.last_event("change").unwrap();
        assert_eq!(detail["checked"], json!(true));
        assert_eq!(detail["value"], json!("tos"));

        ui.press(cb, Key::Space);
        assert!(!ui.has(cb, "checked"));
        assert_eq!(ui.events("change").len(), 2);
    }

    #[test]
    fn toggle_clears_indeterminate() {
        let mut ui = Harness::new();
        let cb = ui.mount("<aui-checkbox indeterminate></aui-checkbox>");
        assert_eq!(ui.part(cb, "control").unwrap().get_attr("aria-checked"), Some("mixed"));
        ui.click(cb);
        assert!(!ui.has(cb, "indeterminate"));
        assert_eq!(ui.part(cb, "control").unwrap().get_attr("aria-checked"), Some("true"));
    }

    #[test]
    fn disabled_ignores_input() {
        let mut ui = Harness::new();
        let cb = ui.mount("<aui-checkbox disabled></aui-checkbox>");
        ui.click(cb);
        ui.press(cb, Key::Space);
        assert!(!ui.has(cb, "checked"));
        assert!(ui.events("change").is_empty());
    }

    #[test]
    fn default_value_is_on() {
        assert_eq!(CheckboxConfig::from_attributes(&Attributes::new()).value, "on");
    }

    #[test]
    fn label_attribute_replaces_slot() {
        let mut ui = Harness::new();
        let cb = ui.mount(r#"<aui-checkbox label="Remember me"></aui-checkbox>"#);
        assert_eq!(ui.text(cb), "Remember me");
        assert!(!ui.html(cb).contains("<slot>"));
    }
}
