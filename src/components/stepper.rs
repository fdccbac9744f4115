//! Stepper: progress through an ordered list of `aui-step`s.
//!
//! The stepper owns the `active` index and writes each step's `index` and
//! `status` (`complete`, `active` or `upcoming`). Navigation happens through
//! the `prev`/`next` parts or by clicking a step; in `linear` mode clicking
//! may only move backwards.

use serde_json::json;

use crate::attr_enum;
use crate::dom::{Attributes, NodeId};
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable, StrProp};
use crate::event::Event;
use crate::render::{h, slot, VNode};
use crate::styles;

use super::support::{closest_in_host, is_disabled, own_part};

attr_enum! {
    /// Layout direction of the step list.
    pub enum Orientation {
        Horizontal => "horizontal",
        Vertical => "vertical",
    }
}

attr_enum! {
    /// Progress state of a single step.
    pub enum StepStatus {
        Complete => "complete",
        Active => "active",
        Upcoming => "upcoming",
    }
}

pub const ACTIVE: Prop<i64> = Prop::new("active", 0);
pub const ORIENTATION: Prop<Orientation> = Prop::new("orientation", Orientation::Horizontal);
pub const LINEAR: Prop<bool> = Prop::new("linear", false);

pub const STEP_LABEL: StrProp = StrProp::new("label", "");
pub const STEP_DESCRIPTION: StrProp = StrProp::new("description", "");
pub const STEP_STATUS: Prop<StepStatus> = Prop::new("status", StepStatus::Upcoming);
pub const STEP_INDEX: Prop<usize> = Prop::new("index", 0);

/// Status of step `index` when `active` is the current step.
pub fn status_of(index: usize, active: usize) -> StepStatus {
    match index.cmp(&active) {
        std::cmp::Ordering::Less => StepStatus::Complete,
        std::cmp::Ordering::Equal => StepStatus::Active,
        std::cmp::Ordering::Greater => StepStatus::Upcoming,
    }
}

// ---------------------------------------------------------------------------
// Stepper
// ---------------------------------------------------------------------------

/// Stepper attributes, parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepperConfig {
    /// Requested active step, before clamping against the step count.
    pub active: i64,
    pub orientation: Orientation,
    pub linear: bool,
}

impl StepperConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self {
            active: ACTIVE.get(attrs),
            orientation: ORIENTATION.get(attrs),
            linear: LINEAR.get(attrs),
        }
    }
}

#[derive(Debug, Default)]
pub struct Stepper;

impl Stepper {
    pub fn new() -> Self {
        Self
    }

    fn steps(cx: &RenderContext<'_>) -> Vec<NodeId> {
        cx.children_by_tag(&cx.tag("step"))
    }

    fn active(cx: &RenderContext<'_>) -> usize {
        let count = Self::steps(cx).len();
        if count == 0 {
            return 0;
        }
        StepperConfig::from_attributes(cx.attrs())
            .active
            .clamp(0, count as i64 - 1) as usize
    }

    fn sync(&self, cx: &mut Context<'_>) {
        let view = cx.view();
        let active = Self::active(&view);
        if let Some(raw) = view.attrs().get("active") {
            if raw.trim() != active.to_string() {
                cx.set_prop(&ACTIVE, active as i64);
            }
        }
        for (i, step) in Self::steps(&view).into_iter().enumerate() {
            cx.set_node_prop(step, &STEP_INDEX, i);
            cx.set_node_prop(step, &STEP_STATUS, status_of(i, active));
        }
    }

    /// Make step `target` active, emitting `change` when it moves.
    pub fn go_to(&mut self, cx: &mut Context<'_>, target: usize) {
        let view = cx.view();
        let count = Self::steps(&view).len();
        if target >= count || target == Self::active(&view) {
            return;
        }
        cx.set_prop(&ACTIVE, target as i64);
        cx.emit("change", json!({ "active": target }));
    }

    /// Advance one step; on the last step emit `complete` instead.
    pub fn next(&mut self, cx: &mut Context<'_>) {
        let view = cx.view();
        let count = Self::steps(&view).len();
        if count == 0 {
            return;
        }
        let active = Self::active(&view);
        if active + 1 >= count {
            cx.emit("complete", json!({ "active": active }));
        } else {
            self.go_to(cx, active + 1);
        }
    }

    pub fn prev(&mut self, cx: &mut Context<'_>) {
        let active = Self::active(&cx.view());
        if active > 0 {
            self.go_to(cx, active - 1);
        }
    }
}

impl AttributeBound for Stepper {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["active", "orientation", "linear"]
    }

    fn observes_children(&self) -> bool {
        true
    }
}

impl Renderable for Stepper {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let count = Self::steps(cx).len();
        let active = Self::active(cx);
        let orientation = StepperConfig::from_attributes(cx.attrs()).orientation;
        let last = active + 1 >= count;

        let steps = h("div")
            .part("steps")
            .class(["stepper", orientation.as_str()])
            .attr("role", "list")
            .attr("aria-orientation", orientation.as_str())
            .child(slot(None));
        let actions = h("div")
            .class(["actions"])
            .child(
                h("button")
                    .part("prev")
                    .attr("type", "button")
                    .flag("disabled", active == 0)
                    .text("Back"),
            )
            .child(
                h("button")
                    .part("next")
                    .attr("type", "button")
                    .flag("disabled", count == 0)
                    .text(if last { "Finish" } else { "Next" }),
            );
        VNode::Fragment(vec![
            styles::style(styles::STEPPER).into(),
            steps.into(),
            h("div").part("content").class(["content"]).child(slot(Some("content"))).into(),
            actions.into(),
        ])
    }
}

impl Component for Stepper {
    fn connected(&mut self, cx: &mut Context<'_>) {
        self.sync(cx);
    }

    fn attribute_changed(
        &mut self,
        cx: &mut Context<'_>,
        name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) {
        if name == "active" {
            self.sync(cx);
        }
    }

    fn children_changed(&mut self, cx: &mut Context<'_>) {
        self.sync(cx);
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        if event.name != "click" {
            return;
        }
        let view = cx.view();
        match own_part(&view, event) {
            Some("next") => return self.next(cx),
            Some("prev") => return self.prev(cx),
            _ => {}
        }
        let Some(step) = closest_in_host(&view, event.target, &view.tag("step")) else {
            return;
        };
        if is_disabled(&view, step) {
            return;
        }
        let Some(target) = Self::steps(&view).iter().position(|&s| s == step) else {
            return;
        };
        if StepperConfig::from_attributes(view.attrs()).linear && target > Self::active(&view) {
            tracing::trace!(host = ?cx.host, target, "linear stepper refused forward jump");
            return;
        }
        self.go_to(cx, target);
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(Stepper::new())
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// A single `aui-step`. `index` and `status` are written by the stepper.
#[derive(Debug, Default)]
pub struct Step;

impl AttributeBound for Step {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["label", "description", "status", "index", "disabled"]
    }
}

impl Renderable for Step {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let attrs = cx.attrs();
        let status = STEP_STATUS.get(attrs);
        let marker = match status {
            StepStatus::Complete => "✓".to_owned(),
            _ => STEP_INDEX.get(attrs).saturating_add(1).to_string(),
        };

        let mut text = h("div").class(["text"]);
        text = match STEP_LABEL.non_empty(attrs) {
            Some(label) => text.child(h("span").part("label").class(["label"]).text(label)),
            None => text.child(slot(None)),
        };
        if let Some(description) = STEP_DESCRIPTION.non_empty(attrs) {
            text = text.child(
                h("span")
                    .part("description")
                    .class(["description"])
                    .text(description),
            );
        }

        let step = h("div")
            .part("step")
            .class(["step", status.as_str()])
            .attr("role", "listitem")
            .attr_if(status == StepStatus::Active, "aria-current", "step")
            .attr_if(attrs.contains("disabled"), "aria-disabled", "true")
            .child(
                h("span")
                    .part("marker")
                    .class(["marker"])
                    .text(marker),
            )
            .child(text);
        VNode::Fragment(vec![styles::style(styles::STEP).into(), step.into()])
    }
}

impl Component for Step {}

pub fn step_factory() -> Box<dyn Component> {
    Box::new(Step)
}

// ===========================================================================
// Tests
// ===========================================================================
