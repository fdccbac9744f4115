//! Table: sortable, paginated, selectable rows from JSON attributes.
//!
//! `columns` and `rows` are JSON arrays. Sorting is internal state cycling
//! through none, ascending and descending per column. The 1-indexed
//! `current-page` is clamped to the page count and written back whenever the
//! rows or page size change. Selection is a set of original row indices and
//! survives sorting and paging.

use std::collections::BTreeSet;

use serde_json::{json, Value};

use crate::dom::Attributes;
use crate::element::{AttributeBound, Component, Context, JsonProp, Prop, RenderContext, Renderable};
use crate::event::Event;
use crate::render::{h, VElement, VNode};
use crate::styles;

use super::data::{
    cell_text, clamp_page, page_count, page_range, parse_columns, showing_label, sorted_indices,
    Column, SortDirection,
};
use super::support::own_part;

pub const COLUMNS: JsonProp = JsonProp::new("columns");
pub const ROWS: JsonProp = JsonProp::new("rows");
pub const PAGE_SIZE: Prop<i64> = Prop::new("page-size", DEFAULT_PAGE_SIZE);
pub const CURRENT_PAGE: Prop<i64> = Prop::new("current-page", 1);
pub const SELECTABLE: Prop<bool> = Prop::new("selectable", false);
pub const STRIPED: Prop<bool> = Prop::new("striped", false);

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Next state of the three-state sort cycle for `key`.
pub fn cycle_sort(
    current: Option<&(String, SortDirection)>,
    key: &str,
) -> Option<(String, SortDirection)> {
    match current {
        Some((k, SortDirection::Asc)) if k == key => Some((key.to_owned(), SortDirection::Desc)),
        Some((k, SortDirection::Desc)) if k == key => None,
        _ => Some((key.to_owned(), SortDirection::Asc)),
    }
}

/// Parsed table data and paging.
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    pub columns: Vec<Column>,
    pub rows: Vec<Value>,
    pub page_size: usize,
    /// 0-indexed, clamped.
    pub page: usize,
    pub page_count: usize,
}

impl TableModel {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        let rows = ROWS.array(attrs);
        let size = PAGE_SIZE.get(attrs);
        let page_size = if size > 0 { size as usize } else { DEFAULT_PAGE_SIZE as usize };
        let count = page_count(rows.len(), page_size);
        Self {
            columns: parse_columns(COLUMNS.array(attrs), false),
            page: clamp_page(CURRENT_PAGE.get(attrs).saturating_sub(1), count),
            page_count: count,
            page_size,
            rows,
        }
    }
}

#[derive(Debug, Default)]
pub struct Table {
    sort: Option<(String, SortDirection)>,
    selected: BTreeSet<usize>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active sort column and direction.
    pub fn sort(&self) -> Option<(&str, SortDirection)> {
        self.sort.as_ref().map(|(k, d)| (k.as_str(), *d))
    }

    /// Selected original row indices, ascending.
    pub fn selected(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    /// Row indices in display order.
    fn order(&self, rows: &[Value]) -> Vec<usize> {
        match &self.sort {
            Some((key, direction)) => sorted_indices(rows, key, *direction),
            None => (0..rows.len()).collect(),
        }
    }

    /// Write back a clamped `current-page`.
    fn clamp_current_page(&self, cx: &mut Context<'_>) {
        let attrs = cx.attrs();
        let Some(raw) = attrs.get("current-page") else {
            return;
        };
        let page = TableModel::from_attributes(attrs).page + 1;
        if raw.trim() != page.to_string() {
            tracing::debug!(host = ?cx.host, raw, page, "current-page clamped");
            cx.set_prop(&CURRENT_PAGE, page as i64);
        }
    }

    /// Advance the sort cycle of column `key`.
    pub fn sort_by(&mut self, cx: &mut Context<'_>, key: &str) {
        let model = TableModel::from_attributes(cx.attrs());
        if !model.columns.iter().any(|c| c.key == key && c.sortable) {
            return;
        }
        self.sort = cycle_sort(self.sort.as_ref(), key);
        let direction = self.sort.as_ref().map_or("none", |(_, d)| d.as_str());
        cx.emit("sort", json!({ "column": key, "direction": direction }));
        cx.request_render();
    }

    /// Go to 1-indexed `page` (clamped) and emit `page-change`.
    pub fn set_page(&mut self, cx: &mut Context<'_>, page: i64) {
        let model = TableModel::from_attributes(cx.attrs());
        let target = clamp_page(page.saturating_sub(1), model.page_count);
        if target == model.page {
            return;
        }
        cx.set_prop(&CURRENT_PAGE, target as i64 + 1);
        cx.emit("page-change", json!({ "page": target + 1 }));
    }

    pub fn toggle_row(&mut self, cx: &mut Context<'_>, index: usize) {
        let len = ROWS.array(cx.attrs()).len();
        if index >= len {
            return;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
        self.selection_changed(cx);
    }

    /// Select every row, or clear the selection when all are selected.
    pub fn toggle_all(&mut self, cx: &mut Context<'_>) {
        let len = ROWS.array(cx.attrs()).len();
        if len > 0 && self.selected.len() == len {
            self.selected.clear();
        } else {
            self.selected = (0..len).collect();
        }
        self.selection_changed(cx);
    }

    fn selection_changed(&self, cx: &mut Context<'_>) {
        cx.emit("selection-change", json!({ "selected": self.selected() }));
        cx.request_render();
    }

    fn header(&self, model: &TableModel, selectable: bool) -> VElement {
        let mut row = h("tr");
        if selectable {
            let all = !model.rows.is_empty() && self.selected.len() == model.rows.len();
            let some = !self.selected.is_empty() && !all;
            row = row.child(
                h("th").class(["select"]).child(
                    h("input")
                        .part("select-all")
                        .attr("type", "checkbox")
                        .attr("aria-label", "Select all rows")
                        .flag("checked", all)
                        .flag("indeterminate", some),
                ),
            );
        }
        for column in &model.columns {
            let direction = match &self.sort {
                Some((key, d)) if *key == column.key => Some(*d),
                _ => None,
            };
            let mut th = h("th").attr("scope", "col");
            if column.sortable {
                let aria = match direction {
                    Some(SortDirection::Asc) => "ascending",
                    Some(SortDirection::Desc) => "descending",
                    None => "none",
                };
                th = th
                    .part(format!("sort-{}", column.key))
                    .class(["sortable"])
                    .attr("aria-sort", aria);
            }
            th = th.text(column.label.as_str());
            if let Some(d) = direction {
                th = th.child(
                    h("span")
                        .class(["sort-indicator"])
                        .attr("aria-hidden", "true")
                        .text(if d == SortDirection::Asc { "▲" } else { "▼" }),
                );
            }
            row = row.child(th);
        }
        row
    }

    fn body(&self, model: &TableModel, selectable: bool) -> VElement {
        let order = self.order(&model.rows);
        let range = page_range(order.len(), model.page_size, model.page);
        let mut body = h("tbody");
        if model.rows.is_empty() {
            let span = model.columns.len() + usize::from(selectable);
            return body.child(
                h("tr").part("empty").child(
                    h("td")
                        .attr("colspan", span.max(1).to_string())
                        .class(["empty"])
                        .text("No data"),
                ),
            );
        }
        for &index in &order[range] {
            let row = &model.rows[index];
            let selected = self.selected.contains(&index);
            let mut tr = h("tr")
                .part(format!("row-{index}"))
                .class([if selected { "selected" } else { "" }])
                .attr_if(selectable, "aria-selected", if selected { "true" } else { "false" });
            if selectable {
                tr = tr.child(
                    h("td").class(["select"]).child(
                        h("input")
                            .part(format!("select-{index}"))
                            .attr("type", "checkbox")
                            .attr("aria-label", format!("Select row {}", index + 1))
                            .flag("checked", selected),
                    ),
                );
            }
            for column in &model.columns {
                tr = tr.child(h("td").text(cell_text(row, &column.key)));
            }
            body = body.child(tr);
        }
        body
    }
}

impl AttributeBound for Table {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["columns", "rows", "page-size", "current-page", "selectable", "striped"]
    }
}

impl Renderable for Table {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let attrs = cx.attrs();
        let model = TableModel::from_attributes(attrs);
        let selectable = SELECTABLE.get(attrs);
        let range = page_range(model.rows.len(), model.page_size, model.page);

        let table = h("table")
            .part("table")
            .class([if STRIPED.get(attrs) { "striped" } else { "" }])
            .child(h("thead").child(self.header(&model, selectable)))
            .child(self.body(&model, selectable));

        let footer = h("div")
            .part("footer")
            .class(["footer"])
            .child(
                h("span")
                    .part("summary")
                    .text(showing_label(model.rows.len(), &range)),
            )
            .child(
                h("div")
                    .class(["pager"])
                    .child(
                        h("button")
                            .part("prev-page")
                            .attr("type", "button")
                            .attr("aria-label", "Previous page")
                            .flag("disabled", model.page == 0)
                            .text("‹"),
                    )
                    .child(
                        h("span")
                            .part("page-label")
                            .text(format!("Page {} of {}", model.page + 1, model.page_count)),
                    )
                    .child(
                        h("button")
                            .part("next-page")
                            .attr("type", "button")
                            .attr("aria-label", "Next page")
                            .flag("disabled", model.page + 1 >= model.page_count)
                            .text("›"),
                    ),
            );

        VNode::Fragment(vec![
            styles::style(styles::TABLE).into(),
            table.into(),
            footer.into(),
        ])
    }
}

impl Component for Table {
    fn connected(&mut self, cx: &mut Context<'_>) {
        self.clamp_current_page(cx);
    }

    fn attribute_changed(
        &mut self,
        cx: &mut Context<'_>,
        name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) {
        match name {
            "rows" => {
                let len = ROWS.array(cx.attrs()).len();
                self.selected.retain(|&i| i < len);
                self.clamp_current_page(cx);
            }
            "columns" => {
                let model = TableModel::from_attributes(cx.attrs());
                let still_sortable = self.sort.as_ref().is_some_and(|(key, _)| {
                    model.columns.iter().any(|c| c.key == *key && c.sortable)
                });
                if !still_sortable {
                    self.sort = None;
                }
            }
            "page-size" | "current-page" => self.clamp_current_page(cx),
            _ => {}
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
        let current = TableModel::from_attributes(view.attrs()).page as i64 + 1;
        if part == "prev-page" {
            self.set_page(cx, current - 1);
        } else if part == "next-page" {
            self.set_page(cx, current + 1);
        } else if part == "select-all" {
            self.toggle_all(cx);
        } else if let Some(key) = part.strip_prefix("sort-") {
            self.sort_by(cx, key);
        } else if let Some(i) = part.strip_prefix("select-").and_then(|n| n.parse().ok()) {
            self.toggle_row(cx, i);
        } else if let Some(i) = part.strip_prefix("row-").and_then(|n| n.parse::<usize>().ok()) {
            let row = ROWS.array(view.attrs()).into_iter().nth(i).unwrap_or(Value::Null);
            cx.emit("row-click", json!({ "index": i, "row": row }));
        }
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(Table::new())
}

// ===========================================================================
// Tests
// ===========================================================================
