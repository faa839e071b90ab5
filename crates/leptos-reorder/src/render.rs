//! Render Adapter contract
//!
//! Pure predicates the list and item views read to place the gap, hide the
//! lifted entity and style the ghost. Gap visibility is derived only from
//! the current target and the asking container, so moving between
//! containers can never leave two gaps open.

use crate::geometry::{Axis, Vector2};
use crate::session::{DragSession, DragTarget, EntityKind};

fn active_drag(session: Option<&DragSession>, kind: EntityKind) -> Option<&DragSession> {
    session.filter(|s| s.kind == kind && s.dragging && !s.dialog_open)
}

/// Target index as the view should paint it. In the origin container the
/// dragged entity's own slot is not rendered, so dropping "at origin"
/// shows the gap in front of the next sibling.
pub fn effective_index(session: &DragSession, target: DragTarget) -> usize {
    if target.container == session.origin_container && target.index == session.origin_index {
        session.origin_index + 1
    } else {
        target.index
    }
}

/// Whether the sibling at full display `rank` of `container` opens a gap in
/// front of itself
pub fn gap_before(
    session: Option<&DragSession>,
    target: Option<DragTarget>,
    kind: EntityKind,
    container: u32,
    rank: usize,
) -> bool {
    match (active_drag(session, kind), target) {
        (Some(s), Some(t)) if t.container == container => effective_index(s, t) == rank,
        _ => false,
    }
}

/// Whether `container` shows the gap after its last sibling. `count` is the
/// full number of non-archived siblings, the dragged one included.
pub fn trailing_gap(
    session: Option<&DragSession>,
    target: Option<DragTarget>,
    kind: EntityKind,
    container: u32,
    count: usize,
) -> bool {
    match (active_drag(session, kind), target) {
        (Some(s), Some(t)) if t.container == container => effective_index(s, t) >= count,
        _ => false,
    }
}

/// The entity is lifted and must not be rendered at its origin slot
pub fn is_dragged(session: Option<&DragSession>, kind: EntityKind, id: u32) -> bool {
    active_drag(session, kind).is_some_and(|s| s.id == id)
}

/// Pressed or lifted, but not opened for details
pub fn is_selected(session: Option<&DragSession>, kind: EntityKind, id: u32) -> bool {
    session.is_some_and(|s| s.is_entity(kind, id) && !s.dialog_open)
}

/// A dragged list takes its items with it; the column is not rendered
pub fn hides_container(session: Option<&DragSession>, list_id: u32) -> bool {
    is_dragged(session, EntityKind::List, list_id)
}

/// Inline style opening a gap the size of the lifted entity
pub fn gap_style(session: Option<&DragSession>, axis: Axis) -> String {
    let Some(s) = session else {
        return String::new();
    };
    match axis {
        Axis::Vertical => format!("margin-top: {}px;", s.rect.height),
        Axis::Horizontal => format!("margin-left: {}px;", s.rect.width),
    }
}

/// Inline style that pins the ghost under the pointer
pub fn ghost_style(session: &DragSession, pointer: Vector2) -> String {
    let at = session.ghost_origin(pointer);
    format!(
        "position: fixed; left: 0; top: 0; pointer-events: none; width: {}px; height: {}px; transform: translate({}px, {}px);",
        session.rect.width, session.rect.height, at.x, at.y
    )
}

/// Class flags of a container's drop area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContainerState {
    /// The pressed entity lives here
    pub origin: bool,
    /// Nothing left to render while dragging
    pub empty: bool,
    /// The current target is in this container
    pub dragging: bool,
    /// Gap is after the last sibling
    pub last: bool,
}

impl ContainerState {
    /// `count` is the full number of non-archived siblings in `container`
    pub fn derive(
        session: Option<&DragSession>,
        target: Option<DragTarget>,
        kind: EntityKind,
        container: u32,
        count: usize,
    ) -> Self {
        let Some(s) = session.filter(|s| s.kind == kind) else {
            return Self::default();
        };
        let origin = s.origin_container == container;
        if !s.dragging {
            return Self {
                origin,
                last: origin && !s.dialog_open && s.origin_index + 1 == count,
                ..Self::default()
            };
        }
        let empty = count == 0 || (origin && count == 1);
        let dragging = target.is_some_and(|t| t.container == container);
        Self {
            origin,
            empty,
            dragging,
            last: dragging && trailing_gap(session, target, kind, container, count),
        }
    }

    pub fn class_name(&self, base: &str) -> String {
        let mut class = base.to_string();
        for (on, name) in [
            (self.origin, "origin"),
            (self.empty, "empty"),
            (self.dragging, "dragging"),
            (self.last, "last"),
        ] {
            if on {
                class.push(' ');
                class.push_str(name);
            }
        }
        class
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::input::InputSource;

    fn session(dragging: bool) -> DragSession {
        DragSession {
            kind: EntityKind::Item,
            id: 7,
            origin_container: 1,
            origin_index: 1,
            origin_order: 2.0,
            dragging,
            dialog_open: false,
            rect: Rect::new(0.0, 0.0, 200.0, 36.0),
            pointer_offset: Vector2::new(10.0, 6.0),
            press_position: Vector2::default(),
            source: InputSource::Pointer,
        }
    }

    fn at(container: u32, index: usize) -> Option<DragTarget> {
        Some(DragTarget { container, index })
    }

    #[test]
    fn test_gap_follows_target_container_only() {
        let s = session(true);
        assert!(gap_before(Some(&s), at(2, 0), EntityKind::Item, 2, 0));
        assert!(!gap_before(Some(&s), at(2, 0), EntityKind::Item, 1, 0));
        assert!(!gap_before(Some(&s), at(2, 0), EntityKind::List, 2, 0));
    }

    #[test]
    fn test_gap_at_origin_slot_moves_to_next_sibling() {
        let s = session(true);
        for index in [1, 2] {
            assert!(gap_before(Some(&s), at(1, index), EntityKind::Item, 1, 2));
            assert!(!gap_before(Some(&s), at(1, index), EntityKind::Item, 1, 1));
        }
    }

    #[test]
    fn test_no_gap_before_drag_starts() {
        let s = session(false);
        assert!(!gap_before(Some(&s), at(1, 2), EntityKind::Item, 1, 2));
        assert!(!is_dragged(Some(&s), EntityKind::Item, 7));
        assert!(is_selected(Some(&s), EntityKind::Item, 7));
    }

    #[test]
    fn test_trailing_gap() {
        let s = session(true);
        assert!(trailing_gap(Some(&s), at(1, 3), EntityKind::Item, 1, 3));
        assert!(!trailing_gap(Some(&s), at(1, 2), EntityKind::Item, 1, 3));
        assert!(trailing_gap(Some(&s), at(4, 0), EntityKind::Item, 4, 0));
    }

    #[test]
    fn test_dialog_session_is_not_selected() {
        let mut s = session(false);
        s.dialog_open = true;
        assert!(!is_selected(Some(&s), EntityKind::Item, 7));
        assert_eq!(ContainerState::derive(Some(&s), None, EntityKind::Item, 1, 2), ContainerState {
            origin: true,
            ..Default::default()
        });
    }

    #[test]
    fn test_list_drag_hides_column() {
        let mut s = session(true);
        s.kind = EntityKind::List;
        assert!(hides_container(Some(&s), 7));
        assert!(!hides_container(Some(&s), 8));
        assert!(!hides_container(None, 7));
    }

    #[test]
    fn test_container_state_classes() {
        let s = session(true);
        let origin = ContainerState::derive(Some(&s), at(2, 0), EntityKind::Item, 1, 2);
        assert_eq!(origin.class_name("list-items"), "list-items origin");

        let empty = ContainerState::derive(Some(&s), at(2, 0), EntityKind::Item, 2, 0);
        assert_eq!(empty.class_name("list-items"), "list-items empty dragging last");

        let pressed_last = ContainerState::derive(Some(&session(false)), at(1, 2), EntityKind::Item, 1, 2);
        assert!(pressed_last.last);
    }

    #[test]
    fn test_styles() {
        let s = session(true);
        assert_eq!(gap_style(Some(&s), Axis::Vertical), "margin-top: 36px;");
        assert_eq!(gap_style(None, Axis::Vertical), "");
        assert!(ghost_style(&s, Vector2::new(110.0, 56.0)).contains("translate(100px, 50px)"));
    }
}
