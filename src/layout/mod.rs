//! Layout: taffy-backed measurement for derived indicator geometry.

pub mod row;

pub use row::{measure_row, RowItem};
