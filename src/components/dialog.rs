//! Dialog: a centered modal with heading, body, actions and footer.
//!
//! Dismissal follows the drawer: backdrop click or Escape closes unless
//! `persistent`. The `close` part always closes.

use crate::dom::Attributes;
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable, StrProp};
use crate::event::{Event, Key};
use crate::render::{h, slot, VNode};
use crate::styles;

use super::support::{own_part, ControlSize, Overlay};

pub const OPEN: Prop<bool> = Prop::new("open", false);
pub const HEADING: StrProp = StrProp::new("heading", "");
pub const SIZE: Prop<ControlSize> = Prop::new("size", ControlSize::Md);
pub const PERSISTENT: Prop<bool> = Prop::new("persistent", false);

/// Dialog attributes, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogConfig {
    pub open: bool,
    pub heading: String,
    pub size: ControlSize,
    pub persistent: bool,
}

impl DialogConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self {
            open: OPEN.get(attrs),
            heading: HEADING.get(attrs).to_owned(),
            size: SIZE.get(attrs),
            persistent: PERSISTENT.get(attrs),
        }
    }
}

#[derive(Debug, Default)]
pub struct Dialog {
    overlay: Overlay,
}

impl Dialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, cx: &mut Context<'_>) {
        cx.set_prop(&OPEN, true);
    }

    /// Close regardless of `persistent`.
    pub fn hide(&mut self, cx: &mut Context<'_>) {
        cx.set_prop(&OPEN, false);
    }
}

impl AttributeBound for Dialog {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["open", "heading", "size", "persistent"]
    }
}

impl Renderable for Dialog {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = DialogConfig::from_attributes(cx.attrs());
        if !config.open {
            return VNode::Fragment(vec![styles::style(styles::DIALOG).into()]);
        }
        let size = format!("dialog-{}", config.size);

        let title = if config.heading.is_empty() {
            h("div").class(["title"]).child(slot(Some("header")))
        } else {
            h("h2")
                .part("heading")
                .class(["title"])
                .attr("id", "heading")
                .text(config.heading.as_str())
        };
        let header = h("header")
            .class(["header"])
            .child(title)
            .child(
                h("button")
                    .part("close")
                    .class(["close"])
                    .attr("type", "button")
                    .attr("aria-label", "Close")
                    .text("×"),
            );

        let dialog = h("div")
            .part("dialog")
            .class(["dialog", size.as_str()])
            .attr("role", "dialog")
            .attr("aria-modal", "true")
            .attr_if(!config.heading.is_empty(), "aria-labelledby", "heading")
            .child(header)
            .child(h("div").part("body").class(["body"]).child(slot(None)))
            .child(h("div").class(["actions"]).child(slot(Some("actions"))))
            .child(h("footer").class(["footer"]).child(slot(Some("footer"))));

        VNode::Fragment(vec![
            styles::style(styles::DIALOG).into(),
            h("div").part("backdrop").class(["backdrop"]).into(),
            dialog.into(),
        ])
    }
}

impl Component for Dialog {
    fn connected(&mut self, cx: &mut Context<'_>) {
        let open = OPEN.get(cx.attrs());
        self.overlay.sync(cx, open);
    }

    fn disconnected(&mut self, cx: &mut Context<'_>) {
        self.overlay.sync(cx, false);
    }

    fn attribute_changed(
        &mut self,
        cx: &mut Context<'_>,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) {
        if name == "open" {
            self.overlay.open_changed(cx, old, new);
        }
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        if event.name != "click" {
            return;
        }
        let view = cx.view();
        match own_part(&view, event) {
            Some("close") => self.hide(cx),
            Some("backdrop") => {
                self.overlay.dismiss(cx);
            }
            _ => {}
        }
    }

    fn handle_document_event(&mut self, cx: &mut Context<'_>, event: &Event, _inside: bool) {
        if event.key == Some(Key::Escape) {
            self.overlay.dismiss(cx);
        }
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(Dialog::new())
}

// ===========================================================================
// Tests
// ===========================================================================
