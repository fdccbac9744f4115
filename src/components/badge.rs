//! Badge: a small count or status label, optionally anchored to content.

use crate::attr_enum;
use crate::dom::Attributes;
use crate::element::{AttributeBound, Component, Prop, RenderContext, Renderable, StrProp};
use crate::render::{h, slot, VNode};
use crate::styles;

attr_enum! {
    /// Color of a badge.
    pub enum BadgeVariant {
        Default => "default",
        Primary => "primary",
        Success => "success",
        Warning => "warning",
        Error => "error",
    }
}

pub const VALUE: StrProp = StrProp::new("value", "");
pub const MAX: Prop<i64> = Prop::new("max", 99);
pub const VARIANT: Prop<BadgeVariant> = Prop::new("variant", BadgeVariant::Default);
pub const DOT: Prop<bool> = Prop::new("dot", false);
pub const SHOW_ZERO: Prop<bool> = Prop::new("show-zero", false);

/// Badge attributes, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeConfig {
    pub value: String,
    pub max: i64,
    pub variant: BadgeVariant,
    pub dot: bool,
    pub show_zero: bool,
}

impl BadgeConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self {
            value: VALUE.get(attrs).to_owned(),
            max: MAX.get(attrs),
            variant: VARIANT.get(attrs),
            dot: DOT.get(attrs),
            show_zero: SHOW_ZERO.get(attrs),
        }
    }

    /// Text shown in the badge; `None` hides the badge.
    pub fn label(&self) -> Option<String> {
        badge_label(&self.value, self.max, self.show_zero)
    }
}

/// Format a badge value.
///
/// Any finite number counts as numeric, integer or not: numbers above `max`
/// become `"{max}+"` and zero is hidden unless `show_zero`. Numbers at or
/// below `max` and anything non-numeric are shown as written. An empty value
/// hides the badge.
pub fn badge_label(value: &str, max: i64, show_zero: bool) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if !n.is_finite() => Some(value.to_owned()),
        Ok(n) if n == 0.0 && !show_zero => None,
        Ok(n) if n > max as f64 => Some(format!("{max}+")),
        Ok(_) => Some(trimmed.to_owned()),
        Err(_) => Some(value.to_owned()),
    }
}

#[derive(Debug, Default)]
pub struct Badge;

impl Badge {
    pub fn new() -> Self {
        Self
    }
}

impl AttributeBound for Badge {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["value", "max", "variant", "dot", "show-zero"]
    }
}

impl Renderable for Badge {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = BadgeConfig::from_attributes(cx.attrs());
        let variant = format!("badge-{}", config.variant);
        let mut children: Vec<VNode> = vec![styles::style(styles::BADGE).into(), slot(None).into()];

        if config.dot {
            children.push(
                h("span")
                    .part("badge")
                    .class(["badge", variant.as_str(), "dot"])
                    .attr("aria-hidden", "true")
                    .into(),
            );
        } else if let Some(label) = config.label() {
            children.push(
                h("span")
                    .part("badge")
                    .class(["badge", variant.as_str()])
                    .text(label)
                    .into(),
            );
        }
        VNode::Fragment(children)
    }
}

impl Component for Badge {}

pub fn factory() -> Box<dyn Component> {
    Box::new(Badge::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    #[test]
    fn overflow_uses_max_plus() {
        assert_eq!(badge_label("100", 99, false).as_deref(), Some("99+"));
        assert_eq!(badge_label("1000", 1000, false).as_deref(), Some("1000"));
        assert_eq!(badge_label("5", 99, false).as_deref(), Some("5"));
    }

    #[test]
    fn fractional_and_wide_numbers_overflow() {
        assert_eq!(badge_label("99.5", 99, false).as_deref(), Some("99+"));
        assert_eq!(badge_label("98.5", 99, false).as_deref(), Some("98.5"));
        assert_eq!(badge_label("1e30", 99, false).as_deref(), Some("99+"));
        assert_eq!(
            badge_label("99999999999999999999999", i64::MAX, false).as_deref(),
            Some("9223372036854775807+")
        );
        assert_eq!(badge_label("0.0", 99, false), None);
        assert_eq!(badge_label("inf", 99, false).as_deref(), Some("inf"));
    }

    #[test]
    fn zero_hidden_unless_show_zero() {
        assert_eq!(badge_label("0", 99, false), None);
        assert_eq!(badge_label("0", 99, true).as_deref(), Some("0"));
    }

    #[test]
    fn non_numeric_verbatim() {
        assert_eq!(badge_label("new", 99, false).as_deref(), Some("new"));
        assert_eq!(badge_label("", 99, false), None);
    }

    #[test]
    fn malformed_max_falls_back() {
        let mut ui = Harness::new();
        let b = ui.mount(r#"<aui-badge value="150" max="lots"></aui-badge>"#);
        assert_eq!(ui.part(b, "badge").unwrap().text_content(), "99+");
    }

    #[test]
    fn dot_has_no_label() {
        let mut ui = Harness::new();
        let b = ui.mount(r#"<aui-badge value="4" dot variant="error"></aui-badge>"#);
        let part = ui.part(b, "badge").unwrap();
        assert_eq!(part.get_attr("class"), Some("badge badge-error dot"));
        assert_eq!(part.text_content(), "");
    }

    #[test]
    fn value_change_rerenders_label() {
        let mut ui = Harness::new();
        let b = ui.mount(r#"<aui-badge value="0"></aui-badge>"#);
        assert!(!ui.has_part(b, "badge"));
        ui.set(b, "value", "12");
        assert_eq!(ui.part(b, "badge").unwrap().text_content(), "12");
    }
}
