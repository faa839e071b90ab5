//! Interaction Classifier
//!
//! Decides what a press or key event on a list or item means.

use crate::geometry::Vector2;
use crate::input::{InputEvent, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::session::DragPhase;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Classification {
    Ignore,
    /// Secondary-button press; never starts a drag
    ContextMenu { at: Vector2 },
    SelectForDetails,
    BeginDrag,
}

impl Classification {
    /// Whether the event's default browser action must be prevented
    pub fn suppresses_default(&self) -> bool {
        matches!(self, Classification::SelectForDetails)
    }
}

/// Classify an input event against the current phase.
///
/// `has_geometry` reports whether the element's bounding rectangle could be
/// captured; a drag press without it is ignored.
pub fn classify(event: &InputEvent, has_geometry: bool, phase: DragPhase) -> Classification {
    if phase == DragPhase::Dragging {
        return Classification::Ignore;
    }

    let class = match event {
        InputEvent::Pointer { buttons, .. } if *buttons == PRIMARY_BUTTON => Classification::BeginDrag,
        InputEvent::Pointer { buttons, position } if *buttons == SECONDARY_BUTTON => {
            Classification::ContextMenu { at: *position }
        }
        InputEvent::Pointer { .. } => Classification::Ignore,
        InputEvent::Touch { .. } => Classification::BeginDrag,
        InputEvent::Key { .. } if event.is_confirm_key() => Classification::SelectForDetails,
        InputEvent::Key { .. } => Classification::Ignore,
    };

    if class == Classification::BeginDrag && !has_geometry {
        return Classification::Ignore;
    }
    class
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pointer(buttons: u16) -> InputEvent {
        InputEvent::Pointer { buttons, position: Vector2::new(12.0, 30.0) }
    }

    #[test]
    fn test_primary_press_begins_drag() {
        assert_eq!(classify(&pointer(1), true, DragPhase::Idle), Classification::BeginDrag);
    }

    #[test]
    fn test_secondary_press_opens_context_menu() {
        assert_eq!(
            classify(&pointer(2), true, DragPhase::Idle),
            Classification::ContextMenu { at: Vector2::new(12.0, 30.0) }
        );
    }

    #[test]
    fn test_other_buttons_ignored() {
        assert_eq!(classify(&pointer(0), true, DragPhase::Idle), Classification::Ignore);
        assert_eq!(classify(&pointer(3), true, DragPhase::Idle), Classification::Ignore);
        assert_eq!(classify(&pointer(4), true, DragPhase::Idle), Classification::Ignore);
    }

    #[test]
    fn test_touch_begins_drag() {
        let ev = InputEvent::Touch { position: Vector2::new(1.0, 1.0) };
        assert_eq!(classify(&ev, true, DragPhase::Idle), Classification::BeginDrag);
    }

    #[test]
    fn test_keys() {
        let enter = InputEvent::Key { key: "Enter".into() };
        let space = InputEvent::Key { key: " ".into() };
        let tab = InputEvent::Key { key: "Tab".into() };
        assert_eq!(classify(&enter, false, DragPhase::Idle), Classification::SelectForDetails);
        assert!(classify(&space, false, DragPhase::Idle).suppresses_default());
        assert_eq!(classify(&tab, true, DragPhase::Idle), Classification::Ignore);
    }

    #[test]
    fn test_missing_geometry_ignored() {
        assert_eq!(classify(&pointer(1), false, DragPhase::Idle), Classification::Ignore);
    }

    #[test]
    fn test_no_second_session_while_dragging() {
        assert_eq!(classify(&pointer(1), true, DragPhase::Dragging), Classification::Ignore);
        let enter = InputEvent::Key { key: "Enter".into() };
        assert_eq!(classify(&enter, true, DragPhase::Dragging), Classification::Ignore);
    }
}
