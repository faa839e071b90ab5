//! Geometry
//!
//! Plain rectangles and the insertion-index math. Geometry is captured by
//! the `dom` adapter; nothing here touches a display surface.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn sub(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }
}

/// Bounding rectangle in viewport coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn origin(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn contains(&self, p: Vector2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Centre line along `axis`
    pub fn center_on(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x + self.width / 2.0,
            Axis::Vertical => self.y + self.height / 2.0,
        }
    }

    pub fn from_dom(rect: &web_sys::DomRect) -> Self {
        Self::new(rect.x(), rect.y(), rect.width(), rect.height())
    }
}

/// Direction siblings are laid out in: lists run horizontally across a
/// board, items run vertically down a list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn pick(self, p: Vector2) -> f64 {
        match self {
            Axis::Horizontal => p.x,
            Axis::Vertical => p.y,
        }
    }
}

/// Insertion rank for a pointer among the visible siblings of a container.
///
/// `visible` holds the rendered siblings in display order; the dragged
/// entity is not among them when it comes from this container. The result
/// is a rank in full display space: when `exclude_index` names the dragged
/// entity's origin slot, that slot is counted back in for every position at
/// or past it.
pub fn compute_insertion_index(
    pointer: Vector2,
    visible: &[Rect],
    axis: Axis,
    exclude_index: Option<usize>,
) -> usize {
    let p = axis.pick(pointer);
    let visible_rank = visible
        .iter()
        .position(|rect| p < rect.center_on(axis))
        .unwrap_or(visible.len());

    match exclude_index {
        Some(excluded) if visible_rank >= excluded => visible_rank + 1,
        _ => visible_rank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stack of 40px rows starting at y=0 with 8px gaps
    fn column(count: usize) -> Vec<Rect> {
        (0..count)
            .map(|i| Rect::new(0.0, i as f64 * 48.0, 200.0, 40.0))
            .collect()
    }

    #[test]
    fn test_index_before_first() {
        let rows = column(3);
        assert_eq!(compute_insertion_index(Vector2::new(10.0, 5.0), &rows, Axis::Vertical, None), 0);
    }

    #[test]
    fn test_index_past_last_is_count() {
        let rows = column(3);
        assert_eq!(compute_insertion_index(Vector2::new(10.0, 500.0), &rows, Axis::Vertical, None), 3);
    }

    #[test]
    fn test_empty_container_yields_zero() {
        assert_eq!(compute_insertion_index(Vector2::new(0.0, 0.0), &[], Axis::Vertical, None), 0);
    }

    #[test]
    fn test_excluded_slot_is_counted_back() {
        // Five items, the one at full rank 1 is being dragged; four remain
        // visible: full ranks 0, 2, 3, 4. Pointer just above the visible
        // row holding full rank 3 (visible rank 2).
        let visible = column(4);
        let pointer = Vector2::new(10.0, visible[2].y + 2.0);
        assert_eq!(compute_insertion_index(pointer, &visible, Axis::Vertical, Some(1)), 3);
    }

    #[test]
    fn test_second_of_five_dropped_at_third_remaining_row() {
        // Dragging the second of five items. Whether "second" is origin
        // index 1 or 2, the third remaining row (visible rank 2) resolves
        // to full rank 3.
        let visible = column(4);
        let pointer = Vector2::new(10.0, visible[2].y + 2.0);
        assert_eq!(compute_insertion_index(pointer, &visible, Axis::Vertical, Some(1)), 3);
        assert_eq!(compute_insertion_index(pointer, &visible, Axis::Vertical, Some(2)), 3);
        // Without the exclusion the same row would be rank 2
        assert_eq!(compute_insertion_index(pointer, &visible, Axis::Vertical, None), 2);
    }

    #[test]
    fn test_before_excluded_slot_is_unchanged() {
        let visible = column(4);
        let pointer = Vector2::new(10.0, 2.0);
        assert_eq!(compute_insertion_index(pointer, &visible, Axis::Vertical, Some(2)), 0);
    }

    #[test]
    fn test_horizontal_axis() {
        let lists: Vec<Rect> = (0..3).map(|i| Rect::new(i as f64 * 300.0, 0.0, 280.0, 600.0)).collect();
        let pointer = Vector2::new(450.0, 100.0);
        assert_eq!(compute_insertion_index(pointer, &lists, Axis::Horizontal, None), 2);
    }
}
