//! Greedy row packing for tag badges.

use crate::geometry::{BadgePosition, BadgeSize};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagLayout {
    pub positions: Vec<BadgePosition>,
    pub width: f64,
    pub height: f64,
    pub rows: usize,
}

impl TagLayout {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Places badges left to right, wrapping when the next badge would cross
/// `max_width`. A badge wider than `max_width` still gets a row of its own.
///
/// `width` is the largest cursor `x` seen, so it includes the trailing
/// spacing after the widest row.
pub fn layout_badges(sizes: &[BadgeSize], max_width: f64, spacing: f64) -> TagLayout {
    let mut positions = Vec::with_capacity(sizes.len());
    let mut x = 0.0_f64;
    let mut y = 0.0_f64;
    let mut row_height = 0.0_f64;
    let mut max_x = 0.0_f64;
    let mut rows = usize::from(!sizes.is_empty());

    for size in sizes {
        if x > 0.0 && x + size.width > max_width {
            x = 0.0;
            y += row_height + spacing;
            row_height = 0.0;
            rows += 1;
        }
        positions.push(BadgePosition::new(x, y));
        row_height = row_height.max(size.height);
        x += size.width + spacing;
        max_x = max_x.max(x);
    }

    TagLayout {
        positions,
        width: max_x,
        height: y + row_height,
        rows,
    }
}
