//! Runtime configuration.

use std::time::Duration;

use chrono::{Local, NaiveDate};

/// Configuration shared by every component in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Prefix for built-in tag names (`"aui"` gives `aui-button`).
    pub tag_prefix: String,
    /// Width of hosts with no measured box.
    pub viewport_width: f32,
    /// Estimated advance of one character of label text, in pixels.
    pub char_width: f32,
    /// Horizontal padding on each side of a tab label.
    pub tab_padding: f32,
    /// Gap between tabs in the tab strip.
    pub tab_gap: f32,
    /// Height of an unmeasured tab.
    pub tab_height: f32,
    /// Fixed "today" for calendars; `None` uses the local date.
    pub today: Option<NaiveDate>,
    /// Carousel autoplay interval used when `interval` is missing or invalid.
    pub default_autoplay_interval: Duration,
    /// Most events the document log keeps; older ones are dropped. `0`
    /// disables recording.
    pub event_log_limit: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tag_prefix: "aui".to_owned(),
            viewport_width: 1024.0,
            char_width: 8.0,
            tab_padding: 16.0,
            tab_gap: 0.0,
            tab_height: 48.0,
            today: None,
            default_autoplay_interval: Duration::from_millis(5000),
            event_log_limit: 1024,
        }
    }
}

impl RuntimeConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tag prefix (builder).
    pub fn with_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.tag_prefix = prefix.into();
        self
    }

    /// Set the default viewport width (builder).
    pub fn with_viewport_width(mut self, width: f32) -> Self {
        self.viewport_width = width;
        self
    }

    /// Set the text metrics used to estimate label widths (builder).
    pub fn with_text_metrics(mut self, char_width: f32, tab_padding: f32) -> Self {
        self.char_width = char_width;
        self.tab_padding = tab_padding;
        self
    }

    /// Set the gap between tabs (builder).
    pub fn with_tab_gap(mut self, gap: f32) -> Self {
        self.tab_gap = gap;
        self
    }

    /// Pin "today" to a fixed date (builder).
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Set the fallback autoplay interval (builder).
    pub fn with_default_autoplay_interval(mut self, interval: Duration) -> Self {
        self.default_autoplay_interval = interval;
        self
    }

    /// Cap the document event log; `0` turns recording off (builder).
    pub fn with_event_log_limit(mut self, limit: usize) -> Self {
        self.event_log_limit = limit;
        self
    }

    /// Full tag name for a built-in component, e.g. `tag("tabs")`.
    pub fn tag(&self, name: &str) -> String {
        format!("{}-{name}", self.tag_prefix)
    }

    /// The configured date, or the local calendar date.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Estimated intrinsic width of a label of `chars` characters.
    pub fn label_width(&self, chars: usize) -> f32 {
        chars as f32 * self.char_width + 2.0 * self.tab_padding
    }
}
