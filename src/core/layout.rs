//! Grid layout: how many marks fit in a container and where they go.
//!
//! The gap is derived per axis so that the candidate column (row) count
//! exactly fills the width (height), then the smaller of the two is used for
//! both axes so spacing stays square.

use egui::{pos2, Pos2, Vec2};
use tracing::{debug, warn};

/// Absorbs rounding when the gap was derived from the same width it is
/// divided back into (e.g. 3552/11 / 296/11 must floor to 12, not 11).
const COUNT_EPSILON: f32 = 1e-4;

/// Layouts that would need more marks than this are left empty
pub const MAX_MARKS: usize = 1_000_000;

/// Computed mark positions for one container size
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
    /// Realized gap between adjacent marks (edge to edge)
    pub gap: f32,
    /// Mark size the layout was computed for
    pub size: f32,
    /// Container size the layout was computed for
    pub container: Vec2,
    /// Mark centers, row-major, container-local
    pub points: Vec<Pos2>,
}

impl GridLayout {
    /// Lay out marks of `size` inside a `width` x `height` container with at
    /// least `min_gap` between them.
    ///
    /// Degenerate input (non-positive or non-finite dimensions, `size <= 0`)
    /// gives an empty layout, as does a grid of more than [`MAX_MARKS`].
    /// Negative `min_gap` is treated as zero.
    pub fn compute(width: f32, height: f32, size: f32, min_gap: f32) -> Self {
        let container = Vec2::new(width, height);
        if !(width.is_finite() && height.is_finite() && size.is_finite())
            || width <= 0.0
            || height <= 0.0
            || size <= 0.0
        {
            return Self {
                size,
                container,
                ..Default::default()
            };
        }
        let min_gap = if min_gap.is_finite() { min_gap.max(0.0) } else { 0.0 };

        let gap_x = axis_gap(width, size, min_gap);
        let gap_y = axis_gap(height, size, min_gap);
        let gap = gap_x.min(gap_y);

        let columns = fit_count(width, size, gap);
        let rows = fit_count(height, size, gap);

        let marks = match columns.checked_mul(rows) {
            Some(marks) if marks <= MAX_MARKS => marks,
            _ => {
                warn!(width, height, size, columns, rows, "Too many marks, grid left empty");
                return Self {
                    gap,
                    size,
                    container,
                    ..Default::default()
                };
            }
        };

        let step = size + gap;
        let offset_x = (width - extent(columns, size, gap)) / 2.0;
        let offset_y = (height - extent(rows, size, gap)) / 2.0;

        let mut points = Vec::with_capacity(marks);
        for row in 0..rows {
            for col in 0..columns {
                points.push(pos2(
                    offset_x + col as f32 * step + size / 2.0,
                    offset_y + row as f32 * step + size / 2.0,
                ));
            }
        }

        debug!(width, height, columns, rows, gap, "Grid layout computed");

        Self {
            columns,
            rows,
            gap,
            size,
            container,
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Distance from the container's left/top edge to the first mark's edge
    pub fn offset(&self) -> Vec2 {
        Vec2::new(
            (self.container.x - extent(self.columns, self.size, self.gap)) / 2.0,
            (self.container.y - extent(self.rows, self.size, self.gap)) / 2.0,
        )
    }
}

/// Gap that makes the candidate count exactly span `length`
fn axis_gap(length: f32, size: f32, min_gap: f32) -> f32 {
    let candidates = (length / (size + min_gap)).floor();
    if candidates > 1.0 {
        (length - candidates * size) / (candidates - 1.0)
    } else {
        min_gap
    }
}

fn fit_count(length: f32, size: f32, gap: f32) -> usize {
    let count = ((length + gap) / (size + gap) + COUNT_EPSILON).floor();
    (count as usize).max(1)
}

/// Total span of `count` marks and the gaps between them
fn extent(count: usize, size: f32, gap: f32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    count as f32 * size + (count - 1) as f32 * gap
}
