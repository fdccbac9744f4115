//! Drawer: a panel that slides in from one edge of the viewport.

use crate::attr_enum;
use crate::dom::Attributes;
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable, StrProp};
use crate::event::{Event, Key};
use crate::render::{h, slot, VNode};
use crate::styles;

use super::support::{aria_bool, own_part, Overlay};

attr_enum! {
    /// Edge the drawer is attached to.
    pub enum DrawerPlacement {
        Left => "left",
        Right => "right",
        Top => "top",
        Bottom => "bottom",
    }
}

pub const OPEN: Prop<bool> = Prop::new("open", false);
pub const PLACEMENT: Prop<DrawerPlacement> = Prop::new("placement", DrawerPlacement::Left);
pub const SIZE: Prop<i64> = Prop::new("size", DEFAULT_SIZE);
pub const PERSISTENT: Prop<bool> = Prop::new("persistent", false);
pub const LABEL: StrProp = StrProp::new("label", "");

/// Panel extent in pixels when `size` is missing or non-positive.
pub const DEFAULT_SIZE: i64 = 320;

/// Drawer attributes, parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawerConfig {
    pub open: bool,
    pub placement: DrawerPlacement,
    pub size: i64,
    pub persistent: bool,
}

impl DrawerConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        let size = SIZE.get(attrs);
        Self {
            open: OPEN.get(attrs),
            placement: PLACEMENT.get(attrs),
            size: if size > 0 { size } else { DEFAULT_SIZE },
            persistent: PERSISTENT.get(attrs),
        }
    }

    /// Inline style sizing the panel along its sliding axis.
    pub fn panel_style(&self) -> String {
        match self.placement {
            DrawerPlacement::Left | DrawerPlacement::Right => format!("width: {}px", self.size),
            DrawerPlacement::Top | DrawerPlacement::Bottom => format!("height: {}px", self.size),
        }
    }
}

#[derive(Debug, Default)]
pub struct Drawer {
    overlay: Overlay,
}

impl Drawer {
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

impl AttributeBound for Drawer {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["open", "placement", "size", "persistent", "label"]
    }
}

impl Renderable for Drawer {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = DrawerConfig::from_attributes(cx.attrs());
        let mut children: Vec<VNode> = vec![styles::style(styles::DRAWER).into()];
        if config.open {
            children.push(h("div").part("backdrop").class(["backdrop"]).into());
        }
        let panel = h("aside")
            .part("panel")
            .class(["panel", config.placement.as_str()])
            .attr("role", "dialog")
            .attr("aria-modal", "true")
            .attr("aria-hidden", aria_bool(!config.open))
            .attr_if(!LABEL.get(cx.attrs()).is_empty(), "aria-label", LABEL.get(cx.attrs()))
            .attr("style", config.panel_style())
            .flag("hidden", !config.open)
            .child(h("header").class(["header"]).child(slot(Some("header"))))
            .child(h("div").class(["body"]).child(slot(None)))
            .child(h("footer").class(["footer"]).child(slot(Some("footer"))));
        children.push(panel.into());
        VNode::Fragment(children)
    }
}

impl Component for Drawer {
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
        let view = cx.view();
        if event.name == "click" && own_part(&view, event) == Some("backdrop") {
            self.overlay.dismiss(cx);
        }
    }

    fn handle_document_event(&mut self, cx: &mut Context<'_>, event: &Event, _inside: bool) {
        if event.key == Some(Key::Escape) {
            self.overlay.dismiss(cx);
        }
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(Drawer::new())
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    #[test]
    fn listener_held_only_while_open() {
        let mut ui = Harness::new();
        let d = ui.mount("<aui-drawer>Nav</aui-drawer>");
        assert_eq!(ui.doc().listener_count(d), 0);
        ui.set(d, "open", "");
        assert_eq!(ui.doc().listener_count(d), 1);
        ui.unset(d, "open");
        assert_eq!(ui.doc().listener_count(d), 0);
        assert_eq!(ui.events("open").len(), 1);
        assert_eq!(ui.events("close").len(), 1);
    }

    #[test]
    fn backdrop_and_escape_close() {
        let mut ui = Harness::new();
        let d = ui.mount("<aui-drawer open></aui-drawer>");
        assert_eq!(ui.doc().listener_count(d), 1);
        ui.click_part(d, "backdrop");
        assert!(!ui.has(d, "open"));
        assert!(!ui.has_part(d, "backdrop"));

        ui.set(d, "open", "");
        let body = ui.doc().body();
        ui.press(body, Key::Escape);
        assert!(!ui.has(d, "open"));
        assert_eq!(ui.doc().total_listeners(), 0);
    }

    #[test]
    fn persistent_ignores_dismissal() {
        let mut ui = Harness::new();
        let d = ui.mount("<aui-drawer open persistent></aui-drawer>");
        ui.click_part(d, "backdrop");
        let body = ui.doc().body();
        ui.press(body, Key::Escape);
        assert!(ui.has(d, "open"));
        assert!(ui.events("close").is_empty());
    }

    #[test]
    fn panel_sized_along_axis() {
        let mut ui = Harness::new();
        let d = ui.mount(r#"<aui-drawer placement="bottom" size="200"></aui-drawer>"#);
        let panel = ui.part(d, "panel").unwrap();
        assert_eq!(panel.get_attr("style"), Some("height: 200px"));
        assert_eq!(panel.get_attr("class"), Some("panel bottom"));
        ui.set(d, "size", "-10");
        ui.set(d, "placement", "right");
        assert_eq!(ui.part(d, "panel").unwrap().get_attr("style"), Some("width: 320px"));
    }

    #[test]
    fn removal_releases_listener() {
        let mut ui = Harness::new();
        let d = ui.mount("<aui-drawer open></aui-drawer>");
        ui.remove(d);
        assert_eq!(ui.doc().total_listeners(), 0);
    }
}
