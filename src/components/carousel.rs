//! Carousel: a horizontal track of `aui-slide`s with navigation.
//!
//! The current slide is the `index` attribute, clamped to the slide count
//! and written back when out of range. With `autoplay` a repeating timer
//! advances the carousel (wrapping at the end); the timer is paused while the
//! pointer is over the host.

use std::time::Duration;

use serde_json::json;

use crate::dom::{Attributes, NodeId};
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable};
use crate::event::{Event, Key};
use crate::render::{h, slot, VNode};
use crate::styles;

use super::support::{aria_bool, own_part};

pub const INDEX: Prop<i64> = Prop::new("index", 0);
pub const LOOP: Prop<bool> = Prop::new("loop", false);
pub const AUTOPLAY: Prop<bool> = Prop::new("autoplay", false);
pub const INTERVAL: Prop<i64> = Prop::new("interval", 5000);

const AUTOPLAY_TIMER: &str = "autoplay";

/// Clamp `index` into `[0, count)`; `0` when there are no slides.
pub fn clamp_index(index: i64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    index.clamp(0, count as i64 - 1) as usize
}

/// Resolve a navigation target: wraps with `looping`, clamps otherwise.
pub fn resolve_target(target: i64, count: usize, looping: bool) -> usize {
    if count == 0 {
        0
    } else if looping {
        target.rem_euclid(count as i64) as usize
    } else {
        clamp_index(target, count)
    }
}

/// Carousel attributes, parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselConfig {
    /// Raw requested index, before clamping against the slide count.
    pub index: i64,
    pub looping: bool,
    pub autoplay: bool,
    /// `None` when the attribute is absent or non-positive.
    pub interval: Option<Duration>,
}

impl CarouselConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        let interval = INTERVAL.get(attrs);
        Self {
            index: INDEX.get(attrs),
            looping: LOOP.get(attrs),
            autoplay: AUTOPLAY.get(attrs),
            interval: (interval > 0).then(|| Duration::from_millis(interval as u64)),
        }
    }
}

#[derive(Debug, Default)]
pub struct Carousel {
    hovered: bool,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    fn slides(cx: &RenderContext<'_>) -> Vec<NodeId> {
        cx.children_by_tag(&cx.tag("slide"))
    }

    fn current(cx: &RenderContext<'_>) -> usize {
        clamp_index(INDEX.get(cx.attrs()), Self::slides(cx).len())
    }

    fn interval(cx: &RenderContext<'_>) -> Duration {
        CarouselConfig::from_attributes(cx.attrs())
            .interval
            .unwrap_or(cx.config.default_autoplay_interval)
    }

    /// Write back a clamped index and mark the active slide.
    fn sync(&self, cx: &mut Context<'_>) {
        let view = cx.view();
        let slides = Self::slides(&view);
        let index = Self::current(&view);
        if let Some(raw) = view.attrs().get("index") {
            if raw.trim() != index.to_string() {
                cx.set_prop(&INDEX, index as i64);
            }
        }
        let count = slides.len();
        for (i, slide) in slides.into_iter().enumerate() {
            cx.set_node_flag(slide, "active", i == index);
            cx.set_node_attribute(slide, "aria-hidden", aria_bool(i != index));
            cx.set_node_attribute(slide, "aria-label", format!("{} of {count}", i + 1));
        }
    }

    /// (Re)start or stop the autoplay timer.
    fn schedule(&self, cx: &mut Context<'_>) {
        let view = cx.view();
        let config = CarouselConfig::from_attributes(view.attrs());
        let running = config.autoplay && !self.hovered && Self::slides(&view).len() > 1;
        if running {
            cx.set_timer(AUTOPLAY_TIMER, Self::interval(&view), true);
        } else {
            cx.clear_timer(AUTOPLAY_TIMER);
        }
    }

    /// Show slide `target`. Emits `change` when the slide actually changes.
    pub fn go_to(&mut self, cx: &mut Context<'_>, target: i64) {
        let view = cx.view();
        let count = Self::slides(&view).len();
        if count == 0 {
            return;
        }
        let looping = CarouselConfig::from_attributes(view.attrs()).looping;
        let next = resolve_target(target, count, looping);
        if next == Self::current(&view) {
            return;
        }
        cx.set_prop(&INDEX, next as i64);
        cx.emit("change", json!({ "index": next }));
    }

    pub fn next(&mut self, cx: &mut Context<'_>) {
        let current = Self::current(&cx.view()) as i64;
        self.go_to(cx, current + 1);
    }

    pub fn prev(&mut self, cx: &mut Context<'_>) {
        let current = Self::current(&cx.view()) as i64;
        self.go_to(cx, current - 1);
    }

    /// Navigate from user input and restart the autoplay countdown.
    fn navigate(&mut self, cx: &mut Context<'_>, target: i64) {
        self.go_to(cx, target);
        if cx.timer_active(AUTOPLAY_TIMER) {
            self.schedule(cx);
        }
    }
}

impl AttributeBound for Carousel {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["index", "loop", "autoplay", "interval"]
    }

    fn observes_children(&self) -> bool {
        true
    }
}

impl Renderable for Carousel {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let count = Self::slides(cx).len();
        let index = Self::current(cx);
        let looping = LOOP.get(cx.attrs());

        let track = h("div")
            .part("track")
            .class(["track"])
            .attr("style", format!("transform: translateX(-{}%)", index * 100))
            .child(slot(None));

        let prev = h("button")
            .part("prev")
            .class(["nav", "prev"])
            .attr("type", "button")
            .attr("aria-label", "Previous slide")
            .flag("disabled", count == 0 || (!looping && index == 0))
            .text("‹");
        let next = h("button")
            .part("next")
            .class(["nav", "next"])
            .attr("type", "button")
            .attr("aria-label", "Next slide")
            .flag("disabled", count == 0 || (!looping && index + 1 >= count))
            .text("›");

        let dots = h("div")
            .class(["dots"])
            .attr("role", "tablist")
            .children((0..count).map(|i| {
                h("button")
                    .part(format!("dot-{i}"))
                    .class(["dot", if i == index { "active" } else { "" }])
                    .attr("type", "button")
                    .attr("aria-label", format!("Go to slide {}", i + 1))
                    .attr_if(i == index, "aria-current", "true")
            }));

        let root = h("div")
            .part("carousel")
            .class(["carousel"])
            .attr("role", "region")
            .attr("aria-roledescription", "carousel")
            .child(track)
            .child(prev)
            .child(next)
            .child(dots);
        VNode::Fragment(vec![styles::style(styles::CAROUSEL).into(), root.into()])
    }
}

impl Component for Carousel {
    fn connected(&mut self, cx: &mut Context<'_>) {
        self.hovered = false;
        self.sync(cx);
        self.schedule(cx);
    }

    fn attribute_changed(
        &mut self,
        cx: &mut Context<'_>,
        name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) {
        match name {
            "index" => self.sync(cx),
            "autoplay" | "interval" => self.schedule(cx),
            _ => {}
        }
    }

    fn children_changed(&mut self, cx: &mut Context<'_>) {
        self.sync(cx);
        if !cx.timer_active(AUTOPLAY_TIMER) {
            self.schedule(cx);
        }
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        let view = cx.view();
        let current = Self::current(&view) as i64;
        match event.name.as_str() {
            "click" => {
                let Some(part) = own_part(&view, event) else {
                    return;
                };
                if part == "prev" {
                    self.navigate(cx, current - 1);
                } else if part == "next" {
                    self.navigate(cx, current + 1);
                } else if let Some(i) = part.strip_prefix("dot-").and_then(|n| n.parse().ok()) {
                    self.navigate(cx, i);
                }
            }
            "keydown" => match event.key {
                Some(Key::ArrowLeft) => self.navigate(cx, current - 1),
                Some(Key::ArrowRight) => self.navigate(cx, current + 1),
                _ => {}
            },
            "pointerenter" => {
                self.hovered = true;
                self.schedule(cx);
            }
            "pointerleave" => {
                self.hovered = false;
                self.schedule(cx);
            }
            _ => {}
        }
    }

    fn timer_fired(&mut self, cx: &mut Context<'_>, key: &'static str) {
        if key != AUTOPLAY_TIMER {
            return;
        }
        let view = cx.view();
        let count = Self::slides(&view).len();
        if count == 0 {
            return;
        }
        let next = (Self::current(&view) + 1) % count;
        tracing::trace!(host = ?cx.host, next, "carousel autoplay");
        if next != Self::current(&view) {
            cx.set_prop(&INDEX, next as i64);
            cx.emit("change", json!({ "index": next }));
        }
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(Carousel::new())
}

// ---------------------------------------------------------------------------
// Slide
// ---------------------------------------------------------------------------

/// A single `aui-slide`. The carousel writes `active` and `aria-hidden`.
#[derive(Debug, Default)]
pub struct Slide;

impl AttributeBound for Slide {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["active"]
    }
}

impl Renderable for Slide {
    fn render(&self, _cx: &RenderContext<'_>) -> VNode {
        VNode::Fragment(vec![
            styles::style(styles::SLIDE).into(),
            h("div")
                .part("slide")
                .class(["slide"])
                .attr("role", "group")
                .child(slot(None))
                .into(),
        ])
    }
}

impl Component for Slide {}

pub fn slide_factory() -> Box<dyn Component> {
    Box::new(Slide)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    fn mount(ui: &mut Harness, attrs: &str) -> NodeId {
        ui.mount(&format!(
            "<aui-carousel {attrs}><aui-slide>A</aui-slide><aui-slide>B</aui-slide><aui-slide>C</aui-slide></aui-carousel>"
        ))
    }

    #[test]
    fn targets_clamp_or_wrap() {
        assert_eq!(resolve_target(3, 3, false), 2);
        assert_eq!(resolve_target(-1, 3, false), 0);
        assert_eq!(resolve_target(3, 3, true), 0);
        assert_eq!(resolve_target(-1, 3, true), 2);
        assert_eq!(resolve_target(5, 0, true), 0);
    }

    #[test]
    fn next_and_prev_parts() {
        let mut ui = Harness::new();
        let c = mount(&mut ui, "");
        assert!(!ui.click_part(c, "prev"));
        ui.click_part(c, "next");
        assert_eq!(ui.attr(c, "index").as_deref(), Some("1"));
        assert_eq!(
            ui.part(c, "track").unwrap().get_attr("style"),
            Some("transform: translateX(-100%)")
        );
        ui.click_part(c, "next");
        assert!(!ui.click_part(c, "next"));
        assert_eq!(ui.attr(c, "index").as_deref(), Some("2"));
        assert_eq!(ui.events("change").len(), 2);
    }

    #[test]
    fn loop_wraps_both_ways() {
        let mut ui = Harness::new();
        let c = mount(&mut ui, "loop");
        ui.click_part(c, "prev");
        assert_eq!(ui.attr(c, "index").as_deref(), Some("2"));
        ui.click_part(c, "next");
        assert_eq!(ui.attr(c, "index").as_deref(), Some("0"));
    }

    #[test]
    fn out_of_range_index_written_back() {
        let mut ui = Harness::new();
        let c = mount(&mut ui, r#"index="9""#);
        assert_eq!(ui.attr(c, "index").as_deref(), Some("2"));
        ui.set(c, "index", "-4");
        assert_eq!(ui.attr(c, "index").as_deref(), Some("0"));
        let slides = ui.find_all("aui-slide");
        assert!(ui.has(slides[0], "active"));
        assert_eq!(ui.attr(slides[1], "aria-hidden").as_deref(), Some("true"));
    }

    #[test]
    fn dots_and_keys() {
        let mut ui = Harness::new();
        let c = mount(&mut ui, "");
        assert_eq!(ui.parts_with_prefix(c, "dot-"), vec!["dot-0", "dot-1", "dot-2"]);
        ui.click_part(c, "dot-2");
        assert_eq!(ui.attr(c, "index").as_deref(), Some("2"));
        ui.press(c, Key::ArrowLeft);
        assert_eq!(ui.attr(c, "index").as_deref(), Some("1"));
        ui.press(c, Key::ArrowRight);
        assert_eq!(ui.last_event("change").unwrap()["index"], json!(2));
    }

    #[test]
    fn autoplay_wraps_and_pauses_on_hover() {
        let mut ui = Harness::new();
        let c = mount(&mut ui, r#"autoplay interval="1000""#);
        assert_eq!(ui.advance_ms(1000), 1);
        assert_eq!(ui.attr(c, "index").as_deref(), Some("1"));
        ui.advance_ms(2000);
        assert_eq!(ui.attr(c, "index").as_deref(), Some("0"));

        ui.hover(c);
        assert_eq!(ui.advance_ms(5000), 0);
        ui.unhover(c);
        assert_eq!(ui.advance_ms(1000), 1);
        assert_eq!(ui.attr(c, "index").as_deref(), Some("1"));
    }

    #[test]
    fn config_drops_non_positive_interval() {
        let attrs: Attributes = [("interval", "0"), ("loop", "")].into_iter().collect();
        let config = CarouselConfig::from_attributes(&attrs);
        assert!(config.looping);
        assert!(!config.autoplay);
        assert_eq!(config.interval, None);
        let attrs: Attributes = [("interval", "750")].into_iter().collect();
        assert_eq!(
            CarouselConfig::from_attributes(&attrs).interval,
            Some(Duration::from_millis(750))
        );
    }

    #[test]
    fn invalid_interval_uses_default() {
        let mut ui = Harness::new();
        let c = mount(&mut ui, r#"autoplay interval="-1""#);
        assert_eq!(ui.advance_ms(4999), 0);
        assert_eq!(ui.advance_ms(1), 1);
        assert_eq!(ui.attr(c, "index").as_deref(), Some("1"));
    }

    #[test]
    fn removal_stops_autoplay() {
        let mut ui = Harness::new();
        let c = mount(&mut ui, "autoplay");
        ui.remove(c);
        assert_eq!(ui.doc().next_deadline(), None);
    }

    #[test]
    fn empty_carousel_renders_disabled_nav() {
        let mut ui = Harness::new();
        let c = ui.mount(r#"<aui-carousel index="3" autoplay></aui-carousel>"#);
        assert_eq!(ui.attr(c, "index").as_deref(), Some("0"));
        assert!(!ui.click_part(c, "next"));
        assert_eq!(ui.doc().timer_count(c), 0);
    }
}
