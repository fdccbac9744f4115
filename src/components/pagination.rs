//! Pagination: page links with first/last anchors, siblings and ellipses.

use serde_json::json;

use crate::dom::Attributes;
use crate::element::{AttributeBound, Component, Context, Prop, RenderContext, Renderable};
use crate::event::Event;
use crate::render::{h, VNode};
use crate::styles;

use super::data::page_count;
use super::support::own_part;

pub const TOTAL: Prop<i64> = Prop::new("total", 0);
pub const PAGE_SIZE: Prop<i64> = Prop::new("page-size", 10);
pub const PAGE: Prop<i64> = Prop::new("page", 1);
pub const SIBLINGS: Prop<i64> = Prop::new("siblings", 1);

/// Upper bound on `siblings`; larger values render as this many.
pub const MAX_SIBLINGS: usize = 50;

/// One entry of the rendered page list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Page entries for 1-indexed `current` out of `pages`.
///
/// The first and last pages are always present, `siblings` pages flank the
/// current one, and a gap of two or more pages collapses into an ellipsis.
pub fn page_items(pages: usize, current: usize, siblings: usize) -> Vec<PageItem> {
    let pages = pages.max(1);
    let current = current.clamp(1, pages);
    let siblings = siblings.min(MAX_SIBLINGS);
    // first + last + current + two siblings + two gaps
    if pages <= siblings.saturating_mul(2).saturating_add(5) {
        return (1..=pages).map(PageItem::Page).collect();
    }
    let start = current.saturating_sub(siblings).max(2);
    let end = current.saturating_add(siblings).min(pages - 1);

    let mut items = vec![PageItem::Page(1)];
    match start {
        2 => {}
        3 => items.push(PageItem::Page(2)),
        _ => items.push(PageItem::Ellipsis),
    }
    items.extend((start..=end).map(PageItem::Page));
    match pages - end {
        1 => {}
        2 => items.push(PageItem::Page(pages - 1)),
        _ => items.push(PageItem::Ellipsis),
    }
    items.push(PageItem::Page(pages));
    items
}

/// Pagination attributes, parsed and clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub total: usize,
    pub page_size: usize,
    pub pages: usize,
    /// 1-indexed, clamped to `[1, pages]`.
    pub page: usize,
    pub siblings: usize,
}

impl PaginationConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        let total = TOTAL.get(attrs).max(0) as usize;
        let size = PAGE_SIZE.get(attrs);
        let page_size = if size > 0 { size as usize } else { 10 };
        let pages = page_count(total, page_size);
        Self {
            total,
            page_size,
            pages,
            page: PAGE.get(attrs).clamp(1, pages as i64) as usize,
            siblings: (SIBLINGS.get(attrs).max(0) as usize).min(MAX_SIBLINGS),
        }
    }
}

#[derive(Debug, Default)]
pub struct Pagination;

impl Pagination {
    pub fn new() -> Self {
        Self
    }

    fn clamp_page(&self, cx: &mut Context<'_>) {
        let attrs = cx.attrs();
        let Some(raw) = attrs.get("page") else {
            return;
        };
        let page = PaginationConfig::from_attributes(attrs).page;
        if raw.trim() != page.to_string() {
            cx.set_prop(&PAGE, page as i64);
        }
    }

    /// Move to 1-indexed `page` (clamped), emitting `change` on a move.
    pub fn go_to(&mut self, cx: &mut Context<'_>, page: i64) {
        let config = PaginationConfig::from_attributes(cx.attrs());
        let target = page.clamp(1, config.pages as i64) as usize;
        if target == config.page {
            return;
        }
        cx.set_prop(&PAGE, target as i64);
        cx.emit("change", json!({ "page": target }));
    }
}

impl AttributeBound for Pagination {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["total", "page-size", "page", "siblings"]
    }
}

impl Renderable for Pagination {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = PaginationConfig::from_attributes(cx.attrs());
        let mut list = h("ul").part("pagination").class(["pagination"]);

        list = list.child(
            h("li").child(
                h("button")
                    .part("prev")
                    .class(["page", "prev"])
                    .attr("type", "button")
                    .attr("aria-label", "Previous page")
                    .flag("disabled", config.page <= 1)
                    .text("‹"),
            ),
        );
        for item in page_items(config.pages, config.page, config.siblings) {
            let entry = match item {
                PageItem::Page(n) => h("button")
                    .part(format!("page-{n}"))
                    .class(["page", if n == config.page { "current" } else { "" }])
                    .attr("type", "button")
                    .attr("aria-label", format!("Page {n}"))
                    .attr_if(n == config.page, "aria-current", "page")
                    .text(n.to_string()),
                PageItem::Ellipsis => h("span")
                    .class(["ellipsis"])
                    .attr("aria-hidden", "true")
                    .text("…"),
            };
            list = list.child(h("li").child(entry));
        }
        list = list.child(
            h("li").child(
                h("button")
                    .part("next")
                    .class(["page", "next"])
                    .attr("type", "button")
                    .attr("aria-label", "Next page")
                    .flag("disabled", config.page >= config.pages)
                    .text("›"),
            ),
        );

        VNode::Fragment(vec![
            styles::style(styles::PAGINATION).into(),
            h("nav")
                .attr("aria-label", "Pagination")
                .child(list)
                .into(),
        ])
    }
}

impl Component for Pagination {
    fn connected(&mut self, cx: &mut Context<'_>) {
        self.clamp_page(cx);
    }

    fn attribute_changed(
        &mut self,
        cx: &mut Context<'_>,
        name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) {
        if matches!(name, "total" | "page-size" | "page") {
            self.clamp_page(cx);
        }
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        if event.name != "click" {
            return;
        }
        let view = cx.view();
        let Some(part) = own_part(&view, event) else {
            return;
        };
        let current = PaginationConfig::from_attributes(view.attrs()).page as i64;
        match part {
            "prev" => self.go_to(cx, current.saturating_sub(1)),
            "next" => self.go_to(cx, current.saturating_add(1)),
            other => {
                if let Some(n) = other.strip_prefix("page-").and_then(|n| n.parse().ok()) {
                    self.go_to(cx, n);
                }
            }
        }
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(Pagination::new())
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;
    use PageItem::{Ellipsis as E, Page as P};

    #[test]
    fn short_ranges_list_every_page() {
        assert_eq!(page_items(5, 3, 1), vec![P(1), P(2), P(3), P(4), P(5)]);
        assert_eq!(page_items(0, 1, 1), vec![P(1)]);
    }

    #[test]
    fn ellipses_around_current() {
        assert_eq!(page_items(20, 10, 1), vec![P(1), E, P(9), P(10), P(11), E, P(20)]);
        assert_eq!(page_items(20, 1, 1), vec![P(1), P(2), E, P(20)]);
        assert_eq!(page_items(20, 20, 1), vec![P(1), E, P(19), P(20)]);
    }

    #[test]
    fn single_page_gap_is_not_elided() {
        assert_eq!(
            page_items(10, 4, 1),
            vec![P(1), P(2), P(3), P(4), P(5), E, P(10)]
        );
        assert_eq!(
            page_items(10, 7, 1),
            vec![P(1), E, P(6), P(7), P(8), P(9), P(10)]
        );
    }

    #[test]
    fn out_of_range_page_written_back() {
        let mut ui = Harness::new();
        let p = ui.mount(r#"<aui-pagination total="95" page="40"></aui-pagination>"#);
        assert_eq!(ui.attr(p, "page").as_deref(), Some("10"));
        assert_eq!(ui.part(p, "page-10").unwrap().get_attr("class"), Some("page current"));
        ui.set(p, "page-size", "50");
        assert_eq!(ui.attr(p, "page").as_deref(), Some("2"));
    }

    #[test]
    fn navigation_emits_change() {
        let mut ui = Harness::new();
        let p = ui.mount(r#"<aui-pagination total="200" page-size="10"></aui-pagination>"#);
        assert!(!ui.click_part(p, "prev"));
        ui.click_part(p, "next");
        ui.click_part(p, "page-20");
        assert_eq!(ui.attr(p, "page").as_deref(), Some("20"));
        assert!(!ui.click_part(p, "next"));
        let pages: Vec<_> = ui.events("change").iter().map(|d| d["page"].clone()).collect();
        assert_eq!(pages, vec![json!(2), json!(20)]);
    }

    #[test]
    fn clicking_current_page_is_silent() {
        let mut ui = Harness::new();
        let p = ui.mount(r#"<aui-pagination total="30"></aui-pagination>"#);
        ui.click_part(p, "page-1");
        assert!(ui.events("change").is_empty());
    }

    #[test]
    fn zero_total_renders_one_page() {
        let mut ui = Harness::new();
        let p = ui.mount("<aui-pagination></aui-pagination>");
        assert_eq!(ui.parts_with_prefix(p, "page-"), vec!["page-1"]);
    }

    #[test]
    fn huge_sibling_count_is_capped() {
        assert_eq!(page_items(usize::MAX, usize::MAX, usize::MAX).len(), 2 * MAX_SIBLINGS + 3);
        assert_eq!(page_items(10, 1, usize::MAX).len(), 10);
    }

    #[test]
    fn extreme_attributes_render() {
        let mut ui = Harness::new();
        let max = i64::MAX.to_string();
        let p = ui.mount(&format!(
            r#"<aui-pagination total="{max}" page-size="1" page="{max}" siblings="{max}"></aui-pagination>"#
        ));
        assert_eq!(ui.attr(p, "page").as_deref(), Some(max.as_str()));
        let pages = ui.parts_with_prefix(p, "page-");
        assert_eq!(pages.len(), MAX_SIBLINGS + 2);
        assert_eq!(pages.last(), Some(&format!("page-{max}")));
        assert!(!ui.click_part(p, "next"));

        ui.set(p, "page-size", &max);
        ui.set(p, "page", &i64::MIN.to_string());
        assert_eq!(ui.attr(p, "page").as_deref(), Some("1"));
        assert_eq!(ui.parts_with_prefix(p, "page-"), vec!["page-1"]);
    }
}
