//! Progress: a linear bar or circular ring showing completion.

use std::f64::consts::PI;

use crate::attr_enum;
use crate::dom::Attributes;
use crate::element::{AttributeBound, Component, Prop, RenderContext, Renderable, StrProp};
use crate::render::{h, VNode};
use crate::styles;

use super::support::format_number;

attr_enum! {
    /// Shape of a progress indicator.
    pub enum ProgressVariant {
        Linear => "linear",
        Circular => "circular",
    }
}

pub const VALUE: Prop<f64> = Prop::new("value", 0.0);
pub const MAX: Prop<f64> = Prop::new("max", 100.0);
pub const VARIANT: Prop<ProgressVariant> = Prop::new("variant", ProgressVariant::Linear);
pub const INDETERMINATE: Prop<bool> = Prop::new("indeterminate", false);
pub const LABEL: StrProp = StrProp::new("label", "");

/// Radius of the circular ring.
pub const RING_RADIUS: f64 = 20.0;

/// Progress attributes, parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressConfig {
    pub value: f64,
    pub max: f64,
    pub variant: ProgressVariant,
    pub indeterminate: bool,
    pub label: String,
}

impl ProgressConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        let max = MAX.get(attrs);
        Self {
            value: VALUE.get(attrs),
            max: if max > 0.0 { max } else { 100.0 },
            variant: VARIANT.get(attrs),
            indeterminate: INDETERMINATE.get(attrs),
            label: LABEL.get(attrs).to_owned(),
        }
    }

    /// Completion in percent, clamped to `[0, 100]`.
    pub fn percent(&self) -> f64 {
        (self.value / self.max * 100.0).clamp(0.0, 100.0)
    }
}

/// Dash offset of the ring arc at `percent` completion.
pub fn ring_offset(percent: f64) -> f64 {
    let circumference = 2.0 * PI * RING_RADIUS;
    circumference * (1.0 - percent / 100.0)
}

#[derive(Debug, Default)]
pub struct Progress;

impl Progress {
    pub fn new() -> Self {
        Self
    }
}

impl AttributeBound for Progress {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["value", "max", "variant", "indeterminate", "label"]
    }
}

impl Renderable for Progress {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = ProgressConfig::from_attributes(cx.attrs());
        let percent = config.percent();

        let mut root = h("div")
            .part("progress")
            .class([
                config.variant.as_str(),
                if config.indeterminate { "indeterminate" } else { "" },
            ])
            .attr("role", "progressbar")
            .attr("aria-valuemin", "0")
            .attr("aria-valuemax", format_number(config.max))
            .attr_if(
                !config.indeterminate,
                "aria-valuenow",
                format_number(config.value.clamp(0.0, config.max)),
            )
            .attr_if(!config.label.is_empty(), "aria-label", config.label.as_str());

        root = match config.variant {
            ProgressVariant::Linear => {
                let bar = h("div").part("bar").class(["bar"]);
                let bar = if config.indeterminate {
                    bar
                } else {
                    bar.attr("style", format!("width: {}%", format_number(percent)))
                };
                root.child(bar)
            }
            ProgressVariant::Circular => {
                let circumference = 2.0 * PI * RING_RADIUS;
                let offset = if config.indeterminate {
                    circumference * 0.75
                } else {
                    ring_offset(percent)
                };
                let radius = format_number(RING_RADIUS);
                root.child(
                    h("svg")
                        .attr("viewBox", "0 0 48 48")
                        .attr("width", "48")
                        .attr("height", "48")
                        .child(
                            h("circle")
                                .class(["track"])
                                .attr("cx", "24")
                                .attr("cy", "24")
                                .attr("r", radius.as_str()),
                        )
                        .child(
                            h("circle")
                                .part("arc")
                                .class(["arc"])
                                .attr("cx", "24")
                                .attr("cy", "24")
                                .attr("r", radius.as_str())
                                .attr("stroke-dasharray", format_number(circumference))
                                .attr("stroke-dashoffset", format_number(offset)),
                        ),
                )
            }
        };
        if !config.label.is_empty() {
            root = root.child(h("span").part("label").class(["label"]).text(config.label.as_str()));
        }
        VNode::Fragment(vec![styles::style(styles::PROGRESS).into(), root.into()])
    }
}

impl Component for Progress {}

pub fn factory() -> Box<dyn Component> {
    Box::new(Progress::new())
}
