//! Data grid: a denser table with filtering and row selection modes.
//!
//! Differs from the table in that every column is sortable and sorting only
//! toggles between ascending and descending. The page is internal and
//! 0-indexed. A free-text filter typed into the `filter` part narrows the
//! rows before sorting and paging.

use std::collections::BTreeSet;

use serde_json::{json, Value};

use crate::attr_enum;
use crate::dom::Attributes;
use crate::element::{AttributeBound, Component, Context, JsonProp, Prop, RenderContext, Renderable};
use crate::event::Event;
use crate::render::{h, VNode};
use crate::styles;

use super::data::{
    cell_text, clamp_page, page_count, page_range, parse_columns, row_matches, showing_label,
    sorted_indices, Column, SortDirection,
};
use super::support::{aria_bool, own_part};

attr_enum! {
    /// How clicking rows selects them.
    pub enum SelectionMode {
        None => "none",
        Single => "single",
        Multiple => "multiple",
    }
}

pub const COLUMNS: JsonProp = JsonProp::new("columns");
pub const ROWS: JsonProp = JsonProp::new("rows");
pub const PAGE_SIZE: Prop<i64> = Prop::new("page-size", DEFAULT_PAGE_SIZE);
pub const SELECTION: Prop<SelectionMode> = Prop::new("selection", SelectionMode::None);
pub const FILTERABLE: Prop<bool> = Prop::new("filterable", false);

pub const DEFAULT_PAGE_SIZE: i64 = 25;

/// Grid attributes, parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub columns: Vec<Column>,
    pub rows: Vec<Value>,
    pub page_size: usize,
    pub selection: SelectionMode,
    pub filterable: bool,
}

impl GridConfig {
    pub fn from_attributes(attrs: &Attributes) -> Self {
        let size = PAGE_SIZE.get(attrs);
        Self {
            columns: parse_columns(COLUMNS.array(attrs), true),
            rows: ROWS.array(attrs),
            page_size: if size > 0 { size as usize } else { DEFAULT_PAGE_SIZE as usize },
            selection: SELECTION.get(attrs),
            filterable: FILTERABLE.get(attrs),
        }
    }
}

#[derive(Debug, Default)]
pub struct DataGrid {
    sort: Option<(String, SortDirection)>,
    page: usize,
    filter: String,
    selected: BTreeSet<usize>,
}

impl DataGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current 0-indexed page.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn selected(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    /// Original indices of the rows passing the filter, in display order.
    pub fn visible(&self, config: &GridConfig) -> Vec<usize> {
        let order = match &self.sort {
            Some((key, direction)) => sorted_indices(&config.rows, key, *direction),
            None => (0..config.rows.len()).collect(),
        };
        order
            .into_iter()
            .filter(|&i| row_matches(&config.rows[i], &config.columns, &self.filter))
            .collect()
    }

    fn page_count(&self, config: &GridConfig) -> usize {
        page_count(self.visible(config).len(), config.page_size)
    }

    fn clamp(&mut self, config: &GridConfig) {
        self.page = clamp_page(self.page as i64, self.page_count(config));
    }

    /// Sort by `key`: ascending first, then flip on each repeat.
    pub fn sort_by(&mut self, cx: &mut Context<'_>, key: &str) {
        let config = GridConfig::from_attributes(cx.attrs());
        if !config.columns.iter().any(|c| c.key == key && c.sortable) {
            return;
        }
        let direction = match &self.sort {
            Some((k, SortDirection::Asc)) if k == key => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        self.sort = Some((key.to_owned(), direction));
        cx.emit("sort", json!({ "column": key, "direction": direction.as_str() }));
        cx.request_render();
    }

    /// Go to 0-indexed `page` (clamped), emitting `page-change` on a move.
    pub fn go_to_page(&mut self, cx: &mut Context<'_>, page: i64) {
        let config = GridConfig::from_attributes(cx.attrs());
        let target = clamp_page(page, self.page_count(&config));
        if target == self.page {
            return;
        }
        self.page = target;
        cx.emit("page-change", json!({ "page": target }));
        cx.request_render();
    }

    /// Replace the filter text and return to the first page.
    pub fn set_filter(&mut self, cx: &mut Context<'_>, text: &str) {
        if self.filter == text {
            return;
        }
        self.filter = text.to_owned();
        self.page = 0;
        tracing::trace!(host = ?cx.host, filter = %self.filter, "grid filter changed");
        cx.request_render();
    }

    /// Apply a row click under the configured selection mode.
    pub fn select_row(&mut self, cx: &mut Context<'_>, index: usize) {
        let config = GridConfig::from_attributes(cx.attrs());
        if index >= config.rows.len() {
            return;
        }
        match config.selection {
            SelectionMode::None => return,
            SelectionMode::Single => {
                if self.selected.len() == 1 && self.selected.contains(&index) {
                    self.selected.clear();
                } else {
                    self.selected = BTreeSet::from([index]);
                }
            }
            SelectionMode::Multiple => {
                if !self.selected.remove(&index) {
                    self.selected.insert(index);
                }
            }
        }
        cx.emit("selection-change", json!({ "selected": self.selected() }));
        cx.request_render();
    }
}

impl AttributeBound for DataGrid {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["columns", "rows", "page-size", "selection", "filterable"]
    }
}

impl Renderable for DataGrid {
    fn render(&self, cx: &RenderContext<'_>) -> VNode {
        let config = GridConfig::from_attributes(cx.attrs());
        let visible = self.visible(&config);
        let pages = page_count(visible.len(), config.page_size);
        let page = clamp_page(self.page as i64, pages);
        let range = page_range(visible.len(), config.page_size, page);
        let selectable = config.selection != SelectionMode::None;

        let mut children: Vec<VNode> = vec![styles::style(styles::DATA_GRID).into()];
        if config.filterable {
            children.push(
                h("div")
                    .class(["toolbar"])
                    .child(
                        h("input")
                            .part("filter")
                            .attr("type", "search")
                            .attr("placeholder", "Filter…")
                            .attr("aria-label", "Filter rows")
                            .attr("value", self.filter.as_str()),
                    )
                    .into(),
            );
        }

        let header = h("tr").children(config.columns.iter().map(|column| {
            let aria = match &self.sort {
                Some((key, SortDirection::Asc)) if *key == column.key => "ascending",
                Some((key, SortDirection::Desc)) if *key == column.key => "descending",
                _ => "none",
            };
            let th = h("th").attr("role", "columnheader").text(column.label.as_str());
            if column.sortable {
                th.part(format!("sort-{}", column.key)).attr("aria-sort", aria)
            } else {
                th
            }
        }));

        let body = h("tbody").children(visible[range.clone()].iter().map(|&index| {
            let selected = self.selected.contains(&index);
            let row = &config.rows[index];
            h("tr")
                .part(format!("row-{index}"))
                .class([if selected { "selected" } else { "" }])
                .attr("role", "row")
                .attr_if(selectable, "aria-selected", aria_bool(selected))
                .children(
                    config
                        .columns
                        .iter()
                        .map(|c| h("td").attr("role", "gridcell").text(cell_text(row, &c.key))),
                )
        }));

        children.push(
            h("table")
                .part("grid")
                .class(["grid"])
                .attr("role", "grid")
                .attr_if(
                    config.selection == SelectionMode::Multiple,
                    "aria-multiselectable",
                    "true",
                )
                .child(h("thead").child(header))
                .child(body)
                .into(),
        );

        children.push(
            h("div")
                .part("pager")
                .class(["pager"])
                .child(
                    h("button")
                        .part("prev-page")
                        .attr("type", "button")
                        .flag("disabled", page == 0)
                        .text("Previous"),
                )
                .child(
                    h("span")
                        .part("summary")
                        .text(showing_label(visible.len(), &range)),
                )
                .child(
                    h("button")
                        .part("next-page")
                        .attr("type", "button")
                        .flag("disabled", page + 1 >= pages)
                        .text("Next"),
                )
                .into(),
        );
        VNode::Fragment(children)
    }
}

impl Component for DataGrid {
    fn attribute_changed(
        &mut self,
        cx: &mut Context<'_>,
        name: &str,
        _old: Option<&str>,
        _new: Option<&str>,
    ) {
        let config = GridConfig::from_attributes(cx.attrs());
        match name {
            "rows" => {
                let len = config.rows.len();
                self.selected.retain(|&i| i < len);
            }
            "columns" => {
                let keep = self
                    .sort
                    .as_ref()
                    .is_some_and(|(key, _)| config.columns.iter().any(|c| c.key == *key));
                if !keep {
                    self.sort = None;
                }
            }
            "selection" => match config.selection {
                SelectionMode::None => self.selected.clear(),
                SelectionMode::Single => {
                    let first = self.selected.first().copied();
                    self.selected = first.into_iter().collect();
                }
                SelectionMode::Multiple => {}
            },
            "filterable" if !config.filterable => {
                self.filter.clear();
            }
            _ => {}
        }
        self.clamp(&config);
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &mut Event) {
        let view = cx.view();
        let Some(part) = own_part(&view, event) else {
            return;
        };
        match event.name.as_str() {
            "input" if part == "filter" => {
                let text = event.data.clone().unwrap_or_default();
                self.set_filter(cx, &text);
            }
            "click" => {
                if part == "prev-page" {
                    self.go_to_page(cx, self.page as i64 - 1);
                } else if part == "next-page" {
                    self.go_to_page(cx, self.page as i64 + 1);
                } else if let Some(key) = part.strip_prefix("sort-") {
                    self.sort_by(cx, key);
                } else if let Some(i) = part.strip_prefix("row-").and_then(|n| n.parse().ok()) {
                    self.select_row(cx, i);
                }
            }
            _ => {}
        }
    }
}

pub fn factory() -> Box<dyn Component> {
    Box::new(DataGrid::new())
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeId;
    use crate::testing::Harness;

    const PEOPLE: &str = r#"[
        {"name":"Alice","role":"Engineer","age":34},
        {"name":"Bob","role":"Designer","age":28},
        {"name":"Carol","role":"Engineer","age":41},
        {"name":"Dan","role":"Manager","age":null}
    ]"#;

    fn mount(ui: &mut Harness, extra: &str) -> NodeId {
        let grid = ui.mount(&format!("<aui-data-grid {extra}></aui-data-grid>"));
        ui.set(grid, "columns", r#"["name","role","age"]"#);
        ui.set(grid, "rows", PEOPLE);
        grid
    }

    #[test]
    fn every_column_sortable_two_state() {
        let mut ui = Harness::new();
        let g = mount(&mut ui, "");
        ui.click_part(g, "sort-age");
        assert_eq!(ui.parts_with_prefix(g, "row-"), vec!["row-1", "row-0", "row-2", "row-3"]);
        ui.click_part(g, "sort-age");
        assert_eq!(ui.parts_with_prefix(g, "row-"), vec!["row-2", "row-0", "row-1", "row-3"]);
        ui.click_part(g, "sort-age");
        assert_eq!(ui.last_event("sort").unwrap()["direction"], json!("asc"));
        assert_eq!(ui.events("sort").len(), 3);
    }

    #[test]
    fn filter_narrows_and_resets_page() {
        let mut ui = Harness::new();
        let g = mount(&mut ui, r#"filterable page-size="2""#);
        ui.click_part(g, "next-page");
        assert_eq!(ui.last_event("page-change").unwrap()["page"], json!(1));
        ui.type_text(g, "filter", "ENGINEER");
        assert_eq!(ui.parts_with_prefix(g, "row-"), vec!["row-0", "row-2"]);
        assert_eq!(ui.part(g, "summary").unwrap().text_content(), "Showing 1 to 2 of 2");
        assert_eq!(ui.part(g, "filter").unwrap().get_attr("value"), Some("ENGINEER"));
        assert!(!ui.click_part(g, "next-page"));
    }

    #[test]
    fn filter_part_absent_unless_filterable() {
        let mut ui = Harness::new();
        let g = mount(&mut ui, "");
        assert!(!ui.has_part(g, "filter"));
    }

    #[test]
    fn single_selection_replaces() {
        let mut ui = Harness::new();
        let g = mount(&mut ui, r#"selection="single""#);
        ui.click_part(g, "row-0");
        ui.click_part(g, "row-2");
        assert_eq!(ui.last_event("selection-change").unwrap()["selected"], json!([2]));
        ui.click_part(g, "row-2");
        assert_eq!(ui.last_event("selection-change").unwrap()["selected"], json!([]));
    }

    #[test]
    fn multiple_selection_toggles() {
        let mut ui = Harness::new();
        let g = mount(&mut ui, r#"selection="multiple""#);
        ui.click_part(g, "row-3");
        ui.click_part(g, "row-1");
        assert_eq!(ui.last_event("selection-change").unwrap()["selected"], json!([1, 3]));
        assert_eq!(ui.part(g, "row-1").unwrap().get_attr("aria-selected"), Some("true"));
        ui.set(g, "selection", "single");
        ui.click_part(g, "row-0");
        assert_eq!(ui.last_event("selection-change").unwrap()["selected"], json!([0]));
    }

    #[test]
    fn no_selection_mode_ignores_clicks() {
        let mut ui = Harness::new();
        let g = mount(&mut ui, "");
        ui.click_part(g, "row-0");
        assert!(ui.events("selection-change").is_empty());
    }

    #[test]
    fn shrinking_rows_clamps_page() {
        let mut ui = Harness::new();
        let g = mount(&mut ui, r#"page-size="1""#);
        ui.click_part(g, "next-page");
        ui.click_part(g, "next-page");
        ui.set(g, "rows", r#"[{"name":"Zed"}]"#);
        assert_eq!(ui.part(g, "summary").unwrap().text_content(), "Showing 1 to 1 of 1");
        assert!(ui.part(g, "prev-page").unwrap().has_attr("disabled"));
    }
}
