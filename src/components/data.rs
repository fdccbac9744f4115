//! Tabular data helpers: column specs, stable sorting, pagination math.
//!
//! Used by the table and the data grid. Rows are JSON objects; a cell is the
//! value under a column's key. `null` and missing cells sort after every
//! defined value in both directions, and equal keys keep their relative
//! order.

use std::cmp::Ordering;
use std::ops::Range;

use serde_json::Value;

use crate::attr_enum;

attr_enum! {
    /// Direction of an active sort.
    pub enum SortDirection {
        Asc => "asc",
        Desc => "desc",
    }
}

/// One column of a table or grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: String,
    pub label: String,
    pub sortable: bool,
}

/// Parse column specs. Accepts objects (`{key, label, sortable}`) and bare
/// strings (used as both key and label). Entries without a key are skipped.
pub fn parse_columns(specs: Vec<Value>, sortable_by_default: bool) -> Vec<Column> {
    specs
        .into_iter()
        .filter_map(|spec| match spec {
            Value::String(key) => Some(Column {
                label: key.clone(),
                key,
                sortable: sortable_by_default,
            }),
            Value::Object(map) => {
                let key = map.get("key")?.as_str()?.to_owned();
                let label = map
                    .get("label")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
                    .unwrap_or_else(|| key.clone());
                let sortable = map
                    .get("sortable")
                    .and_then(Value::as_bool)
                    .unwrap_or(sortable_by_default);
                Some(Column {
                    key,
                    label,
                    sortable,
                })
            }
            _ => None,
        })
        .collect()
}

/// The defined (non-null) cell of `row` under `key`.
pub fn cell<'a>(row: &'a Value, key: &str) -> Option<&'a Value> {
    row.get(key).filter(|v| !v.is_null())
}

/// Display text of a cell; empty for null or missing cells.
pub fn cell_text(row: &Value, key: &str) -> String {
    match cell(row, key) {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Compare two defined cells: numbers numerically, strings lexicographically,
/// booleans `false < true`, anything else by display text.
pub fn compare_cells(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => display(a).cmp(&display(b)),
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Indices of `rows` in sorted order. The sort is stable and places null or
/// missing cells last regardless of direction.
pub fn sorted_indices(rows: &[Value], key: &str, direction: SortDirection) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&i, &j| match (cell(&rows[i], key), cell(&rows[j], key)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => compare_cells(a, b),
            SortDirection::Desc => compare_cells(a, b).reverse(),
        },
    });
    order
}

/// Whether any cell of `row` under `columns` contains `needle`
/// (case-insensitive). An empty needle matches everything.
pub fn row_matches(row: &Value, columns: &[Column], needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    columns
        .iter()
        .any(|c| cell_text(row, &c.key).to_lowercase().contains(&needle))
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Number of pages for `total` rows: `ceil(total / size)`, at least one.
pub fn page_count(total: usize, size: usize) -> usize {
    if size == 0 {
        return 1;
    }
    total.div_ceil(size).max(1)
}

/// Clamp a 0-indexed page into `[0, page_count - 1]`.
pub fn clamp_page(page: i64, count: usize) -> usize {
    let last = count.saturating_sub(1) as i64;
    page.clamp(0, last) as usize
}

/// Row positions shown on 0-indexed `page`.
pub fn page_range(total: usize, size: usize, page: usize) -> Range<usize> {
    let size = size.max(1);
    let start = page.saturating_mul(size).min(total);
    let end = start.saturating_add(size).min(total);
    start..end
}

/// Footer summary, e.g. `"Showing 11 to 20 of 25"`.
pub fn showing_label(total: usize, range: &Range<usize>) -> String {
    if total == 0 || range.is_empty() {
        return format!("Showing 0 to 0 of {total}");
    }
    format!("Showing {} to {} of {}", range.start + 1, range.end, total)
}
