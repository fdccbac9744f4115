//! Alert: an inline status message with optional auto-dismiss.
//!
//! A positive `duration` installs a one-shot `dismiss` timer on connect.
//! Changing `duration` reinstalls it; hiding or removing the alert clears it.

use std::time::Duration;

use serde_json::json;

use crate::attr_enum;
use crate::dom::Attributes;
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable, StrProp};
use crate::event::Event;
use crate::render::{h, slot, VNode};
use crate::styles;

use super::support::own_part;

attr_enum! {
    /// Severity of an alert.
    pub enum AlertVariant {
        Info => "info",
        Success => "success",
        Warning => "warning",
        Error => "error",
    }
}

pub const VARIANT: Prop<AlertVariant> = Prop::new("variant", AlertVariant::Info);
pub const TITLE: StrProp = StrProp::new("title", "");
pub const DISMISSIBLE: Prop<bool> = Prop::new("dismissible", false);
pub const DURATION: Prop<u64> = Prop::new("duration", 0);
pub const HIDDEN: Prop<bool> = Prop::new("hidden", false);

const DISMISS_TIMER: &str = "dismiss";

/// Alert attributes, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertConfig {
    pub variant: AlertVariant,
    pub title: String,
    pub dismissible: bool,
    /// Auto-dismiss delay; `None` never dismisses.
    pub duration: Option<Duration>,
    pub hidden: bool,
}

impl AlertConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        let ms = DURATION.get(attrs);
        Self {
            variant: VARIANT.get(attrs),
            title: TITLE.get(attrs).to_owned(),
            dismissible: DISMISSIBLE.get(attrs),
            duration: (ms > 0).then(|| Duration::from_millis(ms)),
            hidden: HIDDEN.get(attrs),
        }
    }

    /// ARIA role: assertive for problems, polite otherwise.
    pub fn role(&self) -> &'static str {
        match self.variant {
            AlertVariant::Error | AlertVariant::Warning => "alert",
            AlertVariant::Info | AlertVariant::Success => "status",
        }
    }

    fn icon(&self) -> &'static str {
        match self.variant {
            AlertVariant::Info => "ℹ",
            AlertVariant::Success => "✓",
            AlertVariant::Warning => "!",
            AlertVariant::Error => "✕",
        }
    }
}

#[derive(Debug, Default)]
pub struct Alert;

impl Alert {
    pub fn new() -> Self {
        Self
    }

    /// Hide the alert and emit `close`.
    pub fn dismiss(&mut self, cx: &mut Context<'_>) {
        cx.clear_timer(DISMISS_TIMER);
        if HIDDEN.get(cx.attrs()) {
            return;
        }
        cx.set_prop(&HIDDEN, true);
        cx.emit("close", json!({}));
    }

    fn schedule(&self, cx: &mut Context<'_>) {
        let config = AlertConfig::from_attributes(cx.attrs());
        match config.duration {
            Some(delay) if !config.hidden => cx.set_timer(DISMISS_TIMER, delay, false),
            _ => {
                cx.clear_timer(DISMISS_TIMER);
            }
        }
    }
}

impl AttributeBound for Alert {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["variant", "title", "dismissible", "duration", "hidden"]
    }
}

impl Renderable for Alert {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = AlertConfig::from_attributes(cx.attrs());
        if config.hidden {
            return VNode::empty();
        }
        let variant = format!("alert-{}", config.variant);

        let mut content = h("div").class(["content"]);
        if !config.title.is_empty() {
            content = content.child(h("div").part("title").class(["title"]).text(config.title.as_str()));
        }
        content = content.child(h("div").class(["message"]).child(slot(None)));

        let mut alert = h("div")
            .part("alert")
            .class(["alert", variant.as_str()])
            .attr("role", config.role())
            .child(h("span").class(["icon"]).attr("aria-hidden", "true").text(config.icon()))
            .child(content);
        if config.dismissible {
            alert = alert.child(
                h("button")
                    .part("close")
                    .class(["close"])
                    .attr("type", "button")
                    .attr("aria-label", "Dismiss")
                    .text("×"),
            );
        }
        VNode::Fragment(vec![styles::style(styles::ALERT).into(), alert.into()])
    }
}

impl Component for Alert {
    fn connected(&mut self, cx: &mut Context<'_>) {
        self.schedule(cx);
    }

    fn disconnected(&mut self, cx: &mut Context<'_>) {
        cx.clear_timer(DISMISS_TIMER);
    }

    fn attribute_changed(
        &mut self,
        cx: &mut Context<'_>,
        name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) {
        if matches!(name, "duration" | "hidden") {
            self.schedule(cx);
        }
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        let view = cx.view();
        if event.name == "click"
            && own_part(&view, event) == Some("close")
            && DISMISSIBLE.get(view.attrs())
        {
            self.dismiss(cx);
        }
    }

    fn timer_fired(&mut self, cx: &mut Context<'_>, key: &'static str) {
        if key == DISMISS_TIMER {
            tracing::debug!(host = ?cx.host, "alert auto-dismissed");
            self.dismiss(cx);
        }
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(Alert::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    #[test]
    fn role_follows_variant() {
        let mut ui = Harness::new();
        let a = ui.mount(r#"<aui-alert variant="error" title="Oops">Broken</aui-alert>"#);
        let part = ui.part(a, "alert").unwrap();
        assert_eq!(part.get_attr("role"), Some("alert"));
        assert_eq!(part.get_attr("class"), Some("alert alert-error"));
        assert_eq!(ui.part(a, "title").unwrap().text_content(), "Oops");
        ui.set(a, "variant", "success");
        assert_eq!(ui.part(a, "alert").unwrap().get_attr("role"), Some("status"));
    }

    #[test]
    fn close_part_only_when_dismissible() {
        let mut ui = Harness::new();
        let a = ui.mount("<aui-alert>Note</aui-alert>");
        assert!(!ui.click_part(a, "close"));
        ui.set(a, "dismissible", "");
        assert!(ui.click_part(a, "close"));
        assert!(ui.has(a, "hidden"));
        assert_eq!(ui.events("close").len(), 1);
        assert!(ui.doc().shadow(a).unwrap().tree().is_empty());
    }

    #[test]
    fn auto_dismiss_fires_once() {
        let mut ui = Harness::new();
        let a = ui.mount(r#"<aui-alert duration="1000">Saved</aui-alert>"#);
        assert!(ui.doc().timer_active(a, "dismiss"));
        assert_eq!(ui.advance_ms(999), 0);
        assert!(!ui.has(a, "hidden"));
        assert_eq!(ui.advance_ms(1), 1);
        assert!(ui.has(a, "hidden"));
        assert_eq!(ui.advance_ms(5000), 0);
        assert_eq!(ui.events("close").len(), 1);
    }

    #[test]
    fn duration_change_reinstalls_timer() {
        let mut ui = Harness::new();
        let a = ui.mount(r#"<aui-alert duration="1000"></aui-alert>"#);
        ui.advance_ms(800);
        ui.set(a, "duration", "500");
        assert_eq!(ui.advance_ms(400), 0);
        assert_eq!(ui.advance_ms(100), 1);
        assert_eq!(ui.doc().timer_count(a), 0);
    }

    #[test]
    fn zero_or_malformed_duration_never_dismisses() {
        let mut ui = Harness::new();
        let a = ui.mount(r#"<aui-alert duration="soon"></aui-alert>"#);
        let b = ui.mount(r#"<aui-alert duration="0"></aui-alert>"#);
        assert_eq!(ui.doc().timer_count(a) + ui.doc().timer_count(b), 0);
    }

    #[test]
    fn manual_dismiss_clears_timer() {
        let mut ui = Harness::new();
        let a = ui.mount(r#"<aui-alert duration="1000" dismissible></aui-alert>"#);
        ui.click_part(a, "close");
        assert!(!ui.doc().timer_active(a, "dismiss"));
        assert_eq!(ui.advance_ms(2000), 0);
    }

    #[test]
    fn removal_clears_timer() {
        let mut ui = Harness::new();
        let a = ui.mount(r#"<aui-alert duration="1000"></aui-alert>"#);
        ui.remove(a);
        assert_eq!(ui.doc().next_deadline(), None);
    }
}
