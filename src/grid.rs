//! Grid subdivision search and row-based placement.
//!
//! [`best_dimensions`] picks the row/column subdivision of a container that
//! maximizes total tile area under a height/width ratio range. The
//! crate-private row engine then assembles items into rows, fixes up rows
//! that run over or under the container width, and emits one positioned
//! box per item.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use num_traits::Float;

use serde::{Deserialize, Serialize};

use crate::layout::{AlignItems, Rect};

/// Chosen grid subdivision for a container.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Column count.
    pub cols: usize,
    /// Row count (`ceil(count / cols)`).
    pub rows: usize,
    /// Target cell width before row adjustment.
    pub cell_width: f64,
    /// Target cell height before row adjustment.
    pub cell_height: f64,
    /// Resulting cell height/width ratio.
    pub ratio: f64,
    /// Cell area summed across all items; the search's score.
    pub area: f64,
}

/// Find the subdivision of `container_width` x `container_height` into a
/// grid of `count` cells that maximizes total cell area, with the cell
/// height/width ratio clamped to `[min_ratio, max_ratio]`.
///
/// The search is exhaustive over the column count — `count` is the number
/// of simultaneous video participants, so it stays small — which handles
/// the ratio-clamping nonlinearity without a closed form. Ties keep the
/// earlier (smaller column count) candidate.
///
/// Returns `None` when `count` is zero.
pub fn best_dimensions(
    min_ratio: f64,
    max_ratio: f64,
    container_width: f64,
    container_height: f64,
    count: usize,
) -> Option<Dimensions> {
    let mut best: Option<Dimensions> = None;

    for cols in 1..=count {
        let rows = count.div_ceil(cols);

        // Try taking up the whole width and height, then clamp the cell
        // ratio by shrinking the offending dimension.
        let mut height = (container_height / rows as f64).floor();
        let mut width = (container_width / cols as f64).floor();

        let ratio = height / width;
        if ratio > max_ratio {
            height = width * max_ratio;
        } else if ratio < min_ratio {
            width = height / min_ratio;
        }

        let area = width * height * count as f64;
        if best.is_none_or(|b| area > b.area) {
            best = Some(Dimensions {
                cols,
                rows,
                cell_width: width,
                cell_height: height,
                ratio: height / width,
                area,
            });
        }
    }

    best
}

/// Parameters for laying out one region of the container.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Region {
    pub width: f64,
    pub height: f64,
    /// Added to every box's x; positions the region within the container.
    pub offset_left: f64,
    /// Added to every box's y.
    pub offset_top: f64,
    pub fixed_ratio: bool,
    pub min_ratio: f64,
    pub max_ratio: f64,
    pub align_items: AlignItems,
}

/// Accumulator for one row of items.
struct Row {
    /// Height/width ratios of the items assigned to this row.
    ratios: Vec<f64>,
    /// Accumulated width at target cell height.
    width: f64,
    height: f64,
}

fn align_offset(space: f64, content: f64, align: AlignItems) -> f64 {
    match align {
        AlignItems::Start => 0.0,
        AlignItems::End => space - content,
        AlignItems::Center => (space - content) / 2.0,
    }
}

/// Place items (given as height/width ratios, in order) inside a region,
/// one box per item.
///
/// Total over any well-formed input: degenerate ratios (0, non-finite)
/// propagate into the boxes rather than failing.
pub(crate) fn layout_rows(region: &Region, ratios: &[f64]) -> Vec<Rect> {
    if ratios.is_empty() {
        return Vec::new();
    }

    let dims = if region.fixed_ratio {
        // Approximate with the ratio of the first item.
        best_dimensions(ratios[0], ratios[0], region.width, region.height, ratios.len())
    } else {
        best_dimensions(
            region.min_ratio,
            region.max_ratio,
            region.width,
            region.height,
            ratios.len(),
        )
    };
    let Some(dims) = dims else {
        return Vec::new();
    };

    // Pass 1: assemble rows of `cols` items and accumulate each row's
    // width so we know which rows run over or under the container.
    let mut rows: Vec<Row> = ratios
        .chunks(dims.cols)
        .map(|chunk| {
            let mut width = 0.0;
            for &ratio in chunk {
                width += if region.fixed_ratio {
                    dims.cell_height / ratio
                } else {
                    dims.cell_width
                };
            }
            Row {
                ratios: chunk.to_vec(),
                width,
                height: dims.cell_height,
            }
        })
        .collect();

    // Pass 2: shrink rows that went over the width proportionally, then
    // hand any leftover vertical space to the short rows — capped so a
    // row's width growth never pushes it past the container width.
    let mut total_height = 0.0;
    let mut short_rows = 0usize;
    for row in &mut rows {
        if row.width > region.width {
            row.height = (row.height * (region.width / row.width)).floor();
            row.width = region.width;
        } else if row.width < region.width {
            short_rows += 1;
        }
        total_height += row.height;
    }
    if total_height < region.height && short_rows > 0 {
        let mut remaining = region.height - total_height;
        total_height = 0.0;
        for row in &mut rows {
            if row.width < region.width {
                let mut extra = remaining / short_rows as f64;
                if extra / row.height > (region.width - row.width) / row.width {
                    // Growing by the even share would go too wide.
                    extra = ((region.width - row.width) / row.width * row.height).floor();
                }
                row.width += (extra / row.height * row.width).floor();
                row.height += extra;
                remaining -= extra;
                short_rows -= 1;
            }
            total_height += row.height;
        }
    }

    // Pass 3: place rows top to bottom, items left to right, recomputing
    // each item's width from the row's final height.
    let mut boxes = Vec::with_capacity(ratios.len());
    let mut y = align_offset(region.height, total_height, region.align_items);
    for row in &rows {
        let mut x = align_offset(region.width, row.width, region.align_items);
        for &ratio in &row.ratios {
            let width = if region.fixed_ratio {
                (row.height / ratio).floor()
            } else if row.height != dims.cell_height {
                // The row grew or shrank; scale the width to keep the
                // grid's base cell ratio.
                (dims.cell_width / dims.cell_height * row.height).floor()
            } else {
                dims.cell_width
            };
            boxes.push(Rect {
                x: x + region.offset_left,
                y: y + region.offset_top,
                width,
                height: row.height,
            });
            x += width;
        }
        y += row.height;
    }
    boxes
}
