//! Switch: an on/off toggle rendered as a track and thumb.

use serde_json::json;

use crate::dom::Attributes;
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable, StrProp};
use crate::event::{Event, Key};
use crate::render::{h, slot, VNode};
use crate::styles;

use super::support::{aria_bool, ControlSize};

pub const CHECKED: Prop<bool> = Prop::new("checked", false);
pub const DISABLED: Prop<bool> = Prop::new("disabled", false);
pub const LABEL: StrProp = StrProp::new("label", "");
pub const SIZE: Prop<ControlSize> = Prop::new("size", ControlSize::Md);

/// Switch attributes, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchConfig {
    pub checked: bool,
    pub disabled: bool,
    pub label: String,
    pub size: ControlSize,
}

impl SwitchConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self {
            checked: CHECKED.get(attrs),
            disabled: DISABLED.get(attrs),
            label: LABEL.get(attrs).to_owned(),
            size: SIZE.get(attrs),
        }
    }
}

#[derive(Debug, Default)]
pub struct Switch;

impl Switch {
    pub fn new() -> Self {
        Self
    }
}

impl AttributeBound for Switch {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["checked", "disabled", "label", "size"]
    }
}

impl Renderable for Switch {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = SwitchConfig::from_attributes(cx.attrs());
        let size = format!("switch-{}", config.size);
        let label = if config.label.is_empty() {
            h("span").class(["label"]).child(slot(None))
        } else {
            h("span").class(["label"]).text(config.label.as_str())
        };
        let root = h("label")
            .part("control")
            .class([
                "switch",
                size.as_str(),
                if config.checked { "checked" } else { "" },
                if config.disabled { "disabled" } else { "" },
            ])
            .attr("role", "switch")
            .attr("aria-checked", aria_bool(config.checked))
            .attr("tabindex", if config.disabled { "-1" } else { "0" })
            .attr_if(config.disabled, "aria-disabled", "true")
            .child(h("span").class(["track"]).child(h("span").class(["thumb"])))
            .child(label);
        VNode::Fragment(vec![styles::style(styles::SWITCH).into(), root.into()])
    }
}

impl Component for Switch {
    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        let activates = match event.name.as_str() {
            "click" => true,
            "keydown" => matches!(event.key, Some(Key::Space | Key::Enter)),
            _ => false,
        };
        let config = SwitchConfig::from_attributes(cx.attrs());
        if !activates || config.disabled {
            return;
        }
        let checked = !config.checked;
        cx.set_prop(&CHECKED, checked);
        cx.emit("change", json!({ "checked": checked }));
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(Switch::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    #[test]
    fn renders_switch_role() {
        let mut ui = Harness::new();
        let sw = ui.mount(r#"<aui-switch size="lg" checked></aui-switch>"#);
        let control = ui.part(sw, "control").unwrap();
        assert_eq!(control.get_attr("role"), Some("switch"));
        assert_eq!(control.get_attr("aria-checked"), Some("true"));
        assert_eq!(control.get_attr("class"), Some("switch switch-lg checked"));
    }

    #[test]
    fn click_space_and_enter_toggle() {
        let mut ui = Harness::new();
        let sw = ui.mount("<aui-switch></aui-switch>");
        ui.click(sw);
        assert!(ui.has(sw, "checked"));
        ui.press(sw, Key::Space);
        assert!(!ui.has(sw, "checked"));
        ui.press(sw, Key::Enter);
        assert!(ui.has(sw, "checked"));
        ui.press(sw, Key::Char('x'));
        assert!(ui.has(sw, "checked"));

        let checked: Vec<_> = ui.events("change").iter().map(|d| d["checked"].clone()).collect();
        assert_eq!(checked, vec![json!(true), json!(false), json!(true)]);
    }

    #[test]
    fn disabled_does_not_toggle() {
        let mut ui = Harness::new();
        let sw = ui.mount("<aui-switch disabled></aui-switch>");
        ui.click(sw);
        assert!(!ui.has(sw, "checked"));
    }
}
