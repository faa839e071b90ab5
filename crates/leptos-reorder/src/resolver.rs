//! Drag Target Resolver
//!
//! Maps the live pointer position onto an insertion point inside the drop
//! area under it.

use crate::geometry::{compute_insertion_index, Axis, Rect, Vector2};
use crate::session::{DragSession, DragTarget, EntityKind};

/// A container's drop area as measured by the view
#[derive(Clone, Debug, PartialEq)]
pub struct DropArea {
    /// Entity kind the area accepts
    pub accepts: EntityKind,
    pub container: u32,
    pub axis: Axis,
    /// Rendered siblings in display order; the dragged entity is never
    /// rendered while dragging, so it is absent here
    pub siblings: Vec<Rect>,
}

impl DropArea {
    pub fn for_kind(accepts: EntityKind, container: u32, siblings: Vec<Rect>) -> Self {
        let axis = match accepts {
            EntityKind::List => Axis::Horizontal,
            EntityKind::Item => Axis::Vertical,
        };
        Self { accepts, container, axis, siblings }
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }
}

/// Insertion point for `pointer` over `area`.
///
/// `None` when no drag is running or the area holds another kind of
/// entity; the caller keeps its previous target in that case.
pub fn resolve_target(pointer: Vector2, session: &DragSession, area: &DropArea) -> Option<DragTarget> {
    if !session.dragging || area.accepts != session.kind {
        return None;
    }
    let exclude = (area.container == session.origin_container).then_some(session.origin_index);
    Some(DragTarget {
        container: area.container,
        index: compute_insertion_index(pointer, &area.siblings, area.axis, exclude),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSource;

    fn session(kind: EntityKind, container: u32, index: usize) -> DragSession {
        DragSession {
            kind,
            id: 42,
            origin_container: container,
            origin_index: index,
            origin_order: index as f64,
            dragging: true,
            dialog_open: false,
            rect: Rect::new(0.0, 0.0, 200.0, 40.0),
            pointer_offset: Vector2::default(),
            press_position: Vector2::default(),
            source: InputSource::Pointer,
        }
    }

    fn rows(count: usize) -> Vec<Rect> {
        (0..count).map(|i| Rect::new(0.0, i as f64 * 50.0, 200.0, 40.0)).collect()
    }

    #[test]
    fn test_foreign_container_has_no_exclusion() {
        let area = DropArea::for_kind(EntityKind::Item, 2, rows(3));
        let target = resolve_target(Vector2::new(5.0, 60.0), &session(EntityKind::Item, 1, 0), &area);
        assert_eq!(target, Some(DragTarget { container: 2, index: 1 }));
    }

    #[test]
    fn test_origin_container_counts_own_slot() {
        // Dragging full rank 1 of 5; four siblings stay rendered
        let area = DropArea::for_kind(EntityKind::Item, 1, rows(4));
        let pointer = Vector2::new(5.0, 100.0 + 5.0);
        let target = resolve_target(pointer, &session(EntityKind::Item, 1, 1), &area);
        assert_eq!(target, Some(DragTarget { container: 1, index: 3 }));
    }

    #[test]
    fn test_empty_area_yields_zero() {
        let area = DropArea::for_kind(EntityKind::Item, 5, Vec::new());
        assert!(area.is_empty());
        let target = resolve_target(Vector2::new(5.0, 5.0), &session(EntityKind::Item, 1, 3), &area);
        assert_eq!(target, Some(DragTarget { container: 5, index: 0 }));
    }

    #[test]
    fn test_wrong_kind_or_not_dragging() {
        let area = DropArea::for_kind(EntityKind::List, 1, rows(2));
        assert_eq!(resolve_target(Vector2::default(), &session(EntityKind::Item, 1, 0), &area), None);

        let mut pressed = session(EntityKind::List, 1, 0);
        pressed.dragging = false;
        assert_eq!(resolve_target(Vector2::default(), &pressed, &area), None);
    }

    #[test]
    fn test_lists_resolve_horizontally() {
        let lists: Vec<Rect> = (0..3).map(|i| Rect::new(i as f64 * 300.0, 0.0, 280.0, 500.0)).collect();
        let area = DropArea::for_kind(EntityKind::List, 7, lists);
        let target = resolve_target(Vector2::new(950.0, 400.0), &session(EntityKind::List, 7, 3), &area);
        // Past every rendered list, and the dragged one sat at the end
        assert_eq!(target, Some(DragTarget { container: 7, index: 4 }));
    }
}
