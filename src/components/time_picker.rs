//! Time picker: a trigger button and a list of times `step` minutes apart.

use chrono::{NaiveTime, Timelike};
use serde_json::json;

use crate::attr_enum;
use crate::dom::Attributes;
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable, StrProp};
use crate::event::{Event, Key, ListenerKind};
use crate::render::{h, VNode};
use crate::styles;

use super::support::{aria_bool, own_part, step_enabled, DocumentListeners};

attr_enum! {
    /// Clock used for option labels. Values are always `HH:MM`.
    pub enum TimeFormat {
        H24 => "24h",
        H12 => "12h",
    }
}

pub const VALUE: StrProp = StrProp::new("value", "");
pub const STEP: Prop<i64> = Prop::new("step", DEFAULT_STEP as i64);
pub const FORMAT: Prop<TimeFormat> = Prop::new("format", TimeFormat::H24);
pub const MIN: StrProp = StrProp::new("min", "");
pub const MAX: StrProp = StrProp::new("max", "");
pub const DISABLED: Prop<bool> = Prop::new("disabled", false);

pub const DEFAULT_STEP: u32 = 30;
const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse `HH:MM` into minutes after midnight.
pub fn parse_time(s: &str) -> Option<u32> {
    let time = NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()?;
    Some(time.hour() * 60 + time.minute())
}

/// Format minutes after midnight as `HH:MM`.
pub fn format_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60 % 24, minutes % 60)
}

/// Display label for `minutes` in `format`.
pub fn time_label(minutes: u32, format: TimeFormat) -> String {
    match format {
        TimeFormat::H24 => format_time(minutes),
        TimeFormat::H12 => NaiveTime::from_hms_opt(minutes / 60 % 24, minutes % 60, 0)
            .map(|t| t.format("%-I:%M %p").to_string())
            .unwrap_or_else(|| format_time(minutes)),
    }
}

/// Times from 00:00 in `step`-minute increments within `[min, max]`.
pub fn time_slots(step: u32, min: Option<u32>, max: Option<u32>) -> Vec<u32> {
    let step = if step == 0 || step > 720 { DEFAULT_STEP } else { step };
    let lo = min.unwrap_or(0);
    let hi = max.unwrap_or(MINUTES_PER_DAY - 1);
    (0..MINUTES_PER_DAY)
        .step_by(step as usize)
        .filter(|&m| m >= lo && m <= hi)
        .collect()
}

/// Time picker attributes, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePickerConfig {
    pub value: Option<u32>,
    pub step: u32,
    pub format: TimeFormat,
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub disabled: bool,
}

impl TimePickerConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        let step = STEP.get(attrs);
        Self {
            value: parse_time(&VALUE.get(attrs)),
            step: if step <= 0 || step > 720 { DEFAULT_STEP } else { step as u32 },
            format: FORMAT.get(attrs),
            min: parse_time(&MIN.get(attrs)),
            max: parse_time(&MAX.get(attrs)),
            disabled: DISABLED.get(attrs),
        }
    }

    pub fn slots(&self) -> Vec<u32> {
        time_slots(self.step, self.min, self.max)
    }
}

#[derive(Debug, Default)]
pub struct TimePicker {
    open: bool,
    highlight: Option<usize>,
    listeners: DocumentListeners,
}

impl TimePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self, cx: &mut Context<'_>) {
        let config = TimePickerConfig::from_attributes(cx.attrs());
        if self.open || config.disabled {
            return;
        }
        self.open = true;
        self.highlight = config
            .value
            .and_then(|v| config.slots().iter().position(|&m| m == v));
        self.listeners
            .acquire(cx, &[ListenerKind::Click, ListenerKind::KeyDown]);
        cx.request_render();
    }

    pub fn close(&mut self, cx: &mut Context<'_>) {
        if !self.open {
            return;
        }
        self.open = false;
        self.highlight = None;
        self.listeners.release(cx);
        cx.request_render();
    }

    /// Select `minutes` if it is one of the offered slots.
    pub fn pick(&mut self, cx: &mut Context<'_>, minutes: u32) {
        let config = TimePickerConfig::from_attributes(cx.attrs());
        if config.disabled || !config.slots().contains(&minutes) {
            return;
        }
        let value = format_time(minutes);
        cx.set_prop(&VALUE, value.clone());
        cx.emit("change", json!({ "value": value }));
        self.close(cx);
    }

    fn on_key(&mut self, cx: &mut Context<'_>, key: Key) {
        if !self.open {
            if matches!(key, Key::ArrowDown | Key::ArrowUp | Key::Enter | Key::Space) {
                self.open(cx);
            }
            return;
        }
        let slots = TimePickerConfig::from_attributes(cx.attrs()).slots();
        match key {
            Key::ArrowDown | Key::ArrowUp => {
                let enabled = vec![true; slots.len()];
                self.highlight = step_enabled(&enabled, self.highlight, key == Key::ArrowDown);
                cx.request_render();
            }
            Key::Enter | Key::Space => match self.highlight.and_then(|i| slots.get(i)) {
                Some(&minutes) => self.pick(cx, minutes),
                None => self.close(cx),
            },
            Key::Escape | Key::Tab => self.close(cx),
            _ => {}
        }
    }
}

impl AttributeBound for TimePicker {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["value", "step", "format", "min", "max", "disabled"]
    }
}

impl Renderable for TimePicker {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = TimePickerConfig::from_attributes(cx.attrs());
        let label = match config.value {
            Some(minutes) => h("span").class(["value"]).text(time_label(minutes, config.format)),
            None => h("span").class(["placeholder"]).text("Select time"),
        };
        let trigger = h("button")
            .part("trigger")
            .class(["trigger"])
            .attr("type", "button")
            .attr("aria-haspopup", "listbox")
            .attr("aria-expanded", aria_bool(self.open))
            .flag("disabled", config.disabled)
            .child(label);

        let mut children: Vec<VNode> = vec![styles::style(styles::TIME_PICKER).into(), trigger.into()];
        if self.open {
            let list = h("ul")
                .part("listbox")
                .class(["listbox"])
                .attr("role", "listbox")
                .children(config.slots().into_iter().enumerate().map(|(i, minutes)| {
                    let selected = config.value == Some(minutes);
                    h("li")
                        .part(format!("time-{}", format_time(minutes)))
                        .class([
                            "option",
                            if self.highlight == Some(i) { "highlighted" } else { "" },
                            if selected { "selected" } else { "" },
                        ])
                        .attr("role", "option")
                        .attr("aria-selected", aria_bool(selected))
                        .text(time_label(minutes, config.format))
                }));
            children.push(list.into());
        }
        VNode::Fragment(children)
    }
}

impl Component for TimePicker {
    fn disconnected(&mut self, cx: &mut Context<'_>) {
        self.open = false;
        self.highlight = None;
        self.listeners.release(cx);
    }

    fn attribute_changed(
        &mut self,
        cx: &mut Context<'_>,
        name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) {
        match name {
            "disabled" if DISABLED.get(cx.attrs()) => self.close(cx),
            "step" | "min" | "max" => self.highlight = None,
            _ => {}
        }
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        let view = cx.view();
        match event.name.as_str() {
            "click" => match own_part(&view, event) {
                Some("trigger") => {
                    if self.open {
                        self.close(cx);
                    } else {
                        self.open(cx);
                    }
                }
                Some(part) => {
                    if let Some(minutes) = part.strip_prefix("time-").and_then(parse_time) {
                        self.pick(cx, minutes);
                    }
                }
                None => {}
            },
            "keydown" if event.target == view.host => {
                if let Some(key) = event.key {
                    self.on_key(cx, key);
                }
            }
            _ => {}
        }
    }

    fn handle_document_event(&mut self, cx: &mut Context<'_>, event: &Event, inside: bool) {
        if inside {
            return;
        }
        match event.name.as_str() {
            "click" => self.close(cx),
            "keydown" if event.key == Some(Key::Escape) => self.close(cx),
            _ => {}
        }
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(TimePicker::new())
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    #[test]
    fn slots_follow_step_and_bounds() {
        assert_eq!(time_slots(30, None, None).len(), 48);
        assert_eq!(time_slots(0, None, None).len(), 48);
        assert_eq!(time_slots(721, None, None).len(), 48);
        assert_eq!(time_slots(720, None, None), vec![0, 720]);
        assert_eq!(
            time_slots(60, parse_time("09:00"), parse_time("12:00")),
            vec![540, 600, 660, 720]
        );
    }

    #[test]
    fn parse_and_label() {
        assert_eq!(parse_time("07:05"), Some(425));
        assert_eq!(parse_time("24:00"), None);
        assert_eq!(parse_time("7am"), None);
        assert_eq!(time_label(0, TimeFormat::H12), "12:00 AM");
        assert_eq!(time_label(13 * 60 + 30, TimeFormat::H12), "1:30 PM");
        assert_eq!(time_label(13 * 60 + 30, TimeFormat::H24), "13:30");
    }

    #[test]
    fn negative_step_reads_as_default() {
        let mut ui = Harness::new();
        let tp = ui.mount(r#"<aui-time-picker step="-5"></aui-time-picker>"#);
        ui.click_part(tp, "trigger");
        assert_eq!(ui.parts_with_prefix(tp, "time-").len(), 48);
    }

    #[test]
    fn picking_sets_value_and_closes() {
        let mut ui = Harness::new();
        let tp = ui.mount(
            r#"<aui-time-picker step="15" min="08:00" max="09:00"></aui-time-picker>"#,
        );
        ui.click_part(tp, "trigger");
        assert_eq!(
            ui.parts_with_prefix(tp, "time-"),
            vec!["time-08:00", "time-08:15", "time-08:30", "time-08:45", "time-09:00"]
        );
        ui.click_part(tp, "time-08:45");
        assert_eq!(ui.attr(tp, "value").as_deref(), Some("08:45"));
        assert_eq!(ui.last_event("change").unwrap()["value"], json!("08:45"));
        assert!(!ui.has_part(tp, "listbox"));
    }

    #[test]
    fn twelve_hour_labels_keep_iso_values() {
        let mut ui = Harness::new();
        let tp = ui.mount(r#"<aui-time-picker format="12h" value="18:30"></aui-time-picker>"#);
        assert_eq!(ui.part(tp, "trigger").unwrap().text_content(), "6:30 PM");
        ui.click_part(tp, "trigger");
        assert_eq!(ui.part(tp, "time-18:30").unwrap().text_content(), "6:30 PM");
    }

    #[test]
    fn keyboard_moves_from_current_value() {
        let mut ui = Harness::new();
        let tp = ui.mount(r#"<aui-time-picker step="60" value="10:00"></aui-time-picker>"#);
        ui.press(tp, Key::Enter);
        assert_eq!(
            ui.part(tp, "time-10:00").unwrap().get_attr("class"),
            Some("option highlighted selected")
        );
        ui.press(tp, Key::ArrowDown);
        ui.press(tp, Key::Enter);
        assert_eq!(ui.attr(tp, "value").as_deref(), Some("11:00"));
    }

    #[test]
    fn outside_click_closes() {
        let mut ui = Harness::new();
        let tp = ui.mount("<aui-time-picker></aui-time-picker>");
        ui.click_part(tp, "trigger");
        let body = ui.doc().body();
        ui.click(body);
        assert!(!ui.has_part(tp, "listbox"));
        assert!(ui.events("change").is_empty());
    }
}
