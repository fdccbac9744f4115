//! Button: a styled `<button>` with variants, sizes, and a loading state.
//!
//! Clicks on a disabled or loading button are swallowed at the host: the
//! event is canceled and stops propagating, so outer listeners never see it.

use crate::attr_enum;
use crate::dom::Attributes;
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable};
use crate::event::Event;
use crate::render::{h, slot, VNode};
use crate::styles;

use super::support::ControlSize;

attr_enum! {
    /// Visual style of a button.
    pub enum ButtonVariant {
        Primary => "primary",
        Secondary => "secondary",
        Outline => "outline",
        Ghost => "ghost",
        Danger => "danger",
    }
}

attr_enum! {
    /// Form role of a button.
    pub enum ButtonType {
        Button => "button",
        Submit => "submit",
        Reset => "reset",
    }
}

pub const VARIANT: Prop<ButtonVariant> = Prop::new("variant", ButtonVariant::Primary);
pub const SIZE: Prop<ControlSize> = Prop::new("size", ControlSize::Md);
pub const DISABLED: Prop<bool> = Prop::new("disabled", false);
pub const LOADING: Prop<bool> = Prop::new("loading", false);
pub const TYPE: Prop<ButtonType> = Prop::new("type", ButtonType::Button);
pub const FULL_WIDTH: Prop<bool> = Prop::new("full-width", false);

// ---------------------------------------------------------------------------
// ButtonConfig
// ---------------------------------------------------------------------------

/// Button attributes, parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    pub variant: ButtonVariant,
    pub size: ControlSize,
    pub disabled: bool,
    pub loading: bool,
    pub kind: ButtonType,
    pub full_width: bool,
}

impl ButtonConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self {
            variant: VARIANT.get(attrs),
            size: SIZE.get(attrs),
            disabled: DISABLED.get(attrs),
            loading: LOADING.get(attrs),
            kind: TYPE.get(attrs),
            full_width: FULL_WIDTH.get(attrs),
        }
    }

    /// Whether clicks are ignored.
    pub fn is_inert(&self) -> bool {
        self.disabled || self.loading
    }
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Button;

impl Button {
    pub fn new() -> Self {
        Self
    }
}

impl AttributeBound for Button {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["variant", "size", "disabled", "loading", "type", "full-width"]
    }
}

impl Renderable for Button {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = ButtonConfig::from_attributes(cx.attrs());
        let variant = format!("btn-{}", config.variant);
        let size = format!("btn-{}", config.size);

        let mut button = h("button")
            .part("button")
            .attr("type", config.kind.as_str())
            .class(["btn", variant.as_str(), size.as_str()])
            .flag("disabled", config.is_inert())
            .attr_if(config.loading, "aria-busy", "true");
        if config.loading {
            button = button.child(h("span").class(["spinner"]).attr("aria-hidden", "true"));
        }
        let button = button.child(slot(Some("icon"))).child(slot(None));

        VNode::Fragment(vec![styles::style(styles::BUTTON).into(), button.into()])
    }
}

impl Component for Button {
    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        if event.name != "click" {
            return;
        }
        if ButtonConfig::from_attributes(cx.attrs()).is_inert() {
            event.prevent_default();
            event.stop_propagation();
        }
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(Button::new())
}

// ===========================================================================
// Tests
// ===========================================================================
