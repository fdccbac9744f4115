//! Row measurement: lay out a strip of children with taffy.
//!
//! Composite widgets that position an indicator under their selected child
//! (tabs) need each child's bounding box relative to the strip container.
//! [`measure_row`] builds a one-level flex row in a fresh [`TaffyTree`], runs
//! layout, and reports the children's boxes in container coordinates.

use taffy::prelude::{
    AvailableSpace, Dimension, Display, FlexDirection, FromLength, LengthPercentage, Style, TaffyAuto,
    TaffyTree, TaffyZero,
};

use crate::geometry::{Rect, Size};

/// Input for a single child of the row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowItem {
    /// Intrinsic (measured or estimated) size of the child.
    pub size: Size,
}

/// Lay out `items` left-to-right inside a container `container_width` wide,
/// separated by `gap`. Children never shrink; a row wider than the container
/// overflows to the right.
///
/// Returns one rect per item, relative to the container origin.
pub fn measure_row(items: &[RowItem], container_width: f32, gap: f32) -> Vec<Rect> {
    match taffy_row(items, container_width, gap) {
        Ok(rects) => rects,
        Err(err) => {
            tracing::debug!(%err, "taffy row layout failed; using sequential fallback");
            sequential_row(items, gap)
        }
    }
}

fn taffy_row(items: &[RowItem], container_width: f32, gap: f32) -> Result<Vec<Rect>, taffy::TaffyError> {
    let mut tree: TaffyTree<()> = TaffyTree::new();

    let mut leaves = Vec::with_capacity(items.len());
    for item in items {
        let style = Style {
            size: taffy::geometry::Size {
                width: Dimension::from_length(item.size.width.max(0.0)),
                height: Dimension::from_length(item.size.height.max(0.0)),
            },
            flex_shrink: 0.0,
            ..Default::default()
        };
        leaves.push(tree.new_leaf(style)?);
    }

    let container = Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Row,
        size: taffy::geometry::Size {
            width: Dimension::from_length(container_width.max(0.0)),
            height: Dimension::AUTO,
        },
        gap: taffy::geometry::Size {
            width: LengthPercentage::from_length(gap.max(0.0)),
            height: LengthPercentage::ZERO,
        },
        ..Default::default()
    };
    let root = tree.new_with_children(container, &leaves)?;

    tree.compute_layout(
        root,
        taffy::geometry::Size {
            width: AvailableSpace::Definite(container_width.max(0.0)),
            height: AvailableSpace::MaxContent,
        },
    )?;

    leaves
        .iter()
        .map(|&leaf| {
            let layout = tree.layout(leaf)?;
            Ok(Rect::new(
                layout.location.x,
                layout.location.y,
                layout.size.width,
                layout.size.height,
            ))
        })
        .collect()
}

fn sequential_row(items: &[RowItem], gap: f32) -> Vec<Rect> {
    let mut x = 0.0;
    items
        .iter()
        .map(|item| {
            let rect = Rect::new(x, 0.0, item.size.width, item.size.height);
            x += item.size.width + gap;
            rect
        })
        .collect()
}
