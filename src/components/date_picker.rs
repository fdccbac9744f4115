//! Date picker: a trigger button and a month calendar popup.
//!
//! The calendar starts each grid on `first-day-of-week`, fills the leading
//! cells from the previous month and pads only the final week with days of
//! the next month, so a grid has four to six rows.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde_json::json;

use crate::dom::Attributes;
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable, StrProp};
use crate::event::{Event, Key, ListenerKind};
use crate::render::{h, VNode};
use crate::styles;

use super::support::{aria_bool, own_part, DocumentListeners};

pub const VALUE: StrProp = StrProp::new("value", "");
pub const MIN: StrProp = StrProp::new("min", "");
pub const MAX: StrProp = StrProp::new("max", "");
pub const FIRST_DAY_OF_WEEK: Prop<i64> = Prop::new("first-day-of-week", 0);
pub const DISABLED: Prop<bool> = Prop::new("disabled", false);

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Format a date as ISO `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// One cell of the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Whether the day belongs to the viewed month.
    pub in_month: bool,
}

/// Calendar cells for `month` (1-12) of `year`, weeks starting on
/// `first_dow` (0 = Sunday). Empty for an invalid month.
pub fn calendar_grid(year: i32, month: u32, first_dow: u32) -> Vec<DayCell> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let days = days_in_month(first);
    let leading = (first.weekday().num_days_from_sunday() + 7 - first_dow % 7) % 7;
    let trailing = (7 - (leading + days) % 7) % 7;
    let Some(start) = first.checked_sub_days(Days::new(u64::from(leading))) else {
        return Vec::new();
    };
    start
        .iter_days()
        .take((leading + days + trailing) as usize)
        .map(|date| DayCell {
            date,
            in_month: date.month() == month,
        })
        .collect()
}

fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .map(|next| next.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}

/// Date picker attributes, parsed. Unparseable dates read as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePickerConfig {
    pub value: Option<NaiveDate>,
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
    pub first_day_of_week: u32,
    pub disabled: bool,
}

impl DatePickerConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self {
            value: parse_date(&VALUE.get(attrs)),
            min: parse_date(&MIN.get(attrs)),
            max: parse_date(&MAX.get(attrs)),
            first_day_of_week: FIRST_DAY_OF_WEEK.get(attrs).clamp(0, 6) as u32,
            disabled: DISABLED.get(attrs),
        }
    }

    /// Whether `date` lies within `[min, max]`.
    pub fn allows(&self, date: NaiveDate) -> bool {
        self.min.map_or(true, |min| date >= min) && self.max.map_or(true, |max| date <= max)
    }
}

#[derive(Debug, Default)]
pub struct DatePicker {
    open: bool,
    /// First day of the viewed month while open.
    month: Option<NaiveDate>,
    listeners: DocumentListeners,
}

impl DatePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The viewed month's first day, when open.
    pub fn viewed_month(&self) -> Option<NaiveDate> {
        self.month
    }

    pub fn open(&mut self, cx: &mut Context<'_>) {
        let view = cx.view();
        let config = DatePickerConfig::from_attributes(view.attrs());
        if self.open || config.disabled {
            return;
        }
        let anchor = config.value.unwrap_or_else(|| view.today());
        self.month = anchor.with_day(1);
        self.open = true;
        self.listeners
            .acquire(cx, &[ListenerKind::Click, ListenerKind::KeyDown]);
        cx.request_render();
    }

    pub fn close(&mut self, cx: &mut Context<'_>) {
        if !self.open {
            return;
        }
        self.open = false;
        self.month = None;
        self.listeners.release(cx);
        cx.request_render();
    }

    /// Move the viewed month by `delta` months.
    pub fn shift_month(&mut self, cx: &mut Context<'_>, delta: i32) {
        let Some(month) = self.month else {
            return;
        };
        let shifted = if delta >= 0 {
            month.checked_add_months(Months::new(delta.unsigned_abs()))
        } else {
            month.checked_sub_months(Months::new(delta.unsigned_abs()))
        };
        if let Some(shifted) = shifted {
            self.month = Some(shifted);
            cx.request_render();
        }
    }

    /// Select `date` if it is within range: write `value`, emit `change`,
    /// close.
    pub fn pick(&mut self, cx: &mut Context<'_>, date: NaiveDate) {
        let config = DatePickerConfig::from_attributes(cx.attrs());
        if config.disabled || !config.allows(date) {
            return;
        }
        let value = format_date(date);
        cx.set_prop(&VALUE, value.clone());
        cx.emit("change", json!({ "value": value }));
        self.close(cx);
    }

    fn render_calendar(&self, cx: &RenderContext<'_>, config: &DatePickerConfig, month: NaiveDate) -> VNode {
        let today = cx.today();
        let header = h("div")
            .class(["header"])
            .child(
                h("button")
                    .part("prev-month")
                    .class(["nav"])
                    .attr("type", "button")
                    .attr("aria-label", "Previous month")
                    .text("‹"),
            )
            .child(
                h("span")
                    .part("month-label")
                    .class(["month-label"])
                    .attr("aria-live", "polite")
                    .text(month.format("%B %Y").to_string()),
            )
            .child(
                h("button")
                    .part("next-month")
                    .class(["nav"])
                    .attr("type", "button")
                    .attr("aria-label", "Next month")
                    .text("›"),
            );

        let weekdays = h("div").class(["weekdays"]).children((0..7).map(|i| {
            let name = WEEKDAYS[(config.first_day_of_week as usize + i) % 7];
            h("span").class(["weekday"]).text(name)
        }));

        let cells = calendar_grid(month.year(), month.month(), config.first_day_of_week);
        let grid = h("div")
            .part("grid")
            .class(["grid"])
            .attr("role", "grid")
            .children(cells.iter().map(|cell| {
                let selected = config.value == Some(cell.date);
                h("button")
                    .part(format!("day-{}", format_date(cell.date)))
                    .class([
                        "day",
                        if cell.in_month { "" } else { "outside" },
                        if cell.date == today { "today" } else { "" },
                        if selected { "selected" } else { "" },
                    ])
                    .attr("type", "button")
                    .attr("aria-selected", aria_bool(selected))
                    .flag("disabled", !config.allows(cell.date))
                    .text(cell.date.day().to_string())
            }));

        h("div")
            .part("calendar")
            .class(["calendar"])
            .attr("role", "dialog")
            .child(header)
            .child(weekdays)
            .child(grid)
            .into()
    }
}

impl AttributeBound for DatePicker {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["value", "min", "max", "first-day-of-week", "disabled"]
    }
}

impl Renderable for DatePicker {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = DatePickerConfig::from_attributes(cx.attrs());
        let label = match config.value {
            Some(date) => h("span").class(["value"]).text(format_date(date)),
            None => h("span").class(["placeholder"]).text("Select date"),
        };
        let trigger = h("button")
            .part("trigger")
            .class(["trigger"])
            .attr("type", "button")
            .attr("aria-haspopup", "dialog")
            .attr("aria-expanded", aria_bool(self.open))
            .flag("disabled", config.disabled)
            .child(label);

        let mut children: Vec<VNode> = vec![styles::style(styles::DATE_PICKER).into(), trigger.into()];
        if let Some(month) = self.month.filter(|_| self.open) {
            children.push(self.render_calendar(cx, &config, month));
        }
        VNode::Fragment(children)
    }
}

impl Component for DatePicker {
    fn disconnected(&mut self, cx: &mut Context<'_>) {
        self.open = false;
        self.month = None;
        self.listeners.release(cx);
    }

    fn attribute_changed(
        &mut self,
        cx: &mut Context<'_>,
        name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) {
        if name == "disabled" && DISABLED.get(cx.attrs()) {
            self.close(cx);
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
                Some("prev-month") => self.shift_month(cx, -1),
                Some("next-month") => self.shift_month(cx, 1),
                Some(part) => {
                    if let Some(date) = part.strip_prefix("day-").and_then(parse_date) {
                        self.pick(cx, date);
                    }
                }
                None => {}
            },
            "keydown" if event.target == view.host => match event.key {
                Some(Key::Escape) => self.close(cx),
                Some(Key::Enter | Key::Space | Key::ArrowDown) if !self.open => self.open(cx),
                Some(Key::PageUp) if self.open => self.shift_month(cx, -1),
                Some(Key::PageDown) if self.open => self.shift_month(cx, 1),
                _ => {}
            },
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
    Box::new(DatePicker::new())
}

// ===========================================================================
// Tests
// ===========================================================================
