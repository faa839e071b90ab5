//! Drag Session
//!
//! The single active press/drag/tap interaction and its state machine:
//! `Idle -> Pressed -> Dragging -> (commit | cancel) -> Idle`, with the tap
//! and keyboard paths ending in `Details` until the dialog closes.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::classify::{classify, Classification};
use crate::config::DndConfig;
use crate::geometry::{Rect, Vector2};
use crate::input::{InputEvent, InputSource};

/// What is being reordered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Container is a board
    List,
    /// Container is a list
    Item,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::List => "list",
            EntityKind::Item => "item",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pressed entity as the view sees it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: u32,
    pub container: u32,
    /// Rank among the container's non-archived siblings
    pub index: usize,
    pub order: f64,
}

/// Insertion point in full display rank space of `container`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragTarget {
    pub container: u32,
    pub index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub kind: EntityKind,
    pub id: u32,
    pub origin_container: u32,
    pub origin_index: usize,
    pub origin_order: f64,
    /// Crossed the movement threshold
    pub dragging: bool,
    /// Details view instead of a drag
    pub dialog_open: bool,
    /// Element bounds at press time, for placing the ghost
    pub rect: Rect,
    /// Press position relative to the element's top-left
    pub pointer_offset: Vector2,
    pub press_position: Vector2,
    /// Device that started the session; focus goes back to the entity on close
    pub source: InputSource,
}

impl DragSession {
    pub fn is_entity(&self, kind: EntityKind, id: u32) -> bool {
        self.kind == kind && self.id == id
    }

    /// Top-left of the ghost for a pointer at `pointer`
    pub fn ghost_origin(&self, pointer: Vector2) -> Vector2 {
        pointer.sub(self.pointer_offset)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Pressed,
    Dragging,
    Details,
}

/// Outcome of releasing the pointer
#[derive(Clone, Debug, PartialEq)]
pub enum Release {
    /// Nothing to release
    Idle,
    /// Press ended without movement; the session is now in `Details`
    Tap(DragSession),
    /// A real drag with a target. The session stays in place until
    /// [`DragEngine::finish`] so the optimistic update lands first.
    Commit { session: DragSession, target: DragTarget },
    /// Dragged but no valid target; session and target are cleared
    Cancel(DragSession),
}

/// Session + target pair and its transitions
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragEngine {
    session: Option<DragSession>,
    target: Option<DragTarget>,
    config: DndConfig,
}

impl DragEngine {
    pub fn new(config: DndConfig) -> Self {
        Self {
            session: None,
            target: None,
            config,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn target(&self) -> Option<DragTarget> {
        self.target
    }

    pub fn phase(&self) -> DragPhase {
        match &self.session {
            None => DragPhase::Idle,
            Some(s) if s.dialog_open => DragPhase::Details,
            Some(s) if s.dragging => DragPhase::Dragging,
            Some(_) => DragPhase::Pressed,
        }
    }

    /// Classify a press or key event and start a session if it calls for one
    pub fn begin_or_select(&mut self, event: &InputEvent, entity: EntityRef, rect: Option<Rect>) -> Classification {
        let class = classify(event, rect.is_some(), self.phase());
        match class {
            Classification::Ignore | Classification::ContextMenu { .. } => {}
            Classification::SelectForDetails => {
                debug!(kind = %entity.kind, id = entity.id, "select for details");
                self.session = Some(new_session(event, entity, rect.unwrap_or_default(), true));
                self.target = None;
            }
            Classification::BeginDrag => {
                let rect = rect.unwrap_or_default();
                debug!(kind = %entity.kind, id = entity.id, index = entity.index, "press");
                self.session = Some(new_session(event, entity, rect, false));
                // A mouse press that is released in place lands one slot past
                // the origin, which is a no-op target.
                self.target = match event.source() {
                    InputSource::Pointer => Some(DragTarget {
                        container: entity.container,
                        index: entity.index + 1,
                    }),
                    _ => None,
                };
            }
        }
        class
    }

    /// Pointer moved. Promotes `Pressed` to `Dragging` once the threshold is
    /// crossed while the primary button is held. Returns whether a drag is
    /// in progress afterwards.
    pub fn pointer_moved(&mut self, position: Vector2, primary_held: bool) -> bool {
        let threshold = self.config.move_threshold_px;
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.dialog_open || !primary_held {
            return session.dragging;
        }
        if !session.dragging {
            let delta = position.sub(session.press_position);
            let travelled = delta.x.abs().max(delta.y.abs());
            if threshold <= 0.0 || travelled > threshold {
                debug!(kind = %session.kind, id = session.id, "drag started");
                session.dragging = true;
            }
        }
        session.dragging
    }

    /// Record a freshly resolved target. `None` keeps the previous target.
    pub fn update_drag_target(&mut self, target: Option<DragTarget>) -> bool {
        let dragging = self.session.as_ref().is_some_and(|s| s.dragging);
        match target {
            Some(t) if dragging && self.target != Some(t) => {
                trace!(container = t.container, index = t.index, "drag target");
                self.target = Some(t);
                true
            }
            _ => false,
        }
    }

    pub fn release(&mut self) -> Release {
        let Some(session) = self.session.as_mut() else {
            return Release::Idle;
        };
        if session.dialog_open {
            return Release::Idle;
        }
        if !session.dragging {
            session.dialog_open = true;
            let tapped = session.clone();
            self.target = None;
            debug!(kind = %tapped.kind, id = tapped.id, "tap");
            return Release::Tap(tapped);
        }
        match self.target {
            Some(target) => Release::Commit {
                session: session.clone(),
                target,
            },
            None => {
                let cancelled = self.session.take();
                self.target = None;
                match cancelled {
                    Some(s) => Release::Cancel(s),
                    None => Release::Idle,
                }
            }
        }
    }

    /// Clear session and target after a commit has been staged
    pub fn finish(&mut self) {
        self.session = None;
        self.target = None;
    }

    /// Escape while pressed or dragging. Returns the discarded session.
    pub fn cancel(&mut self) -> Option<DragSession> {
        match self.phase() {
            DragPhase::Pressed | DragPhase::Dragging => {
                self.target = None;
                let session = self.session.take();
                if let Some(s) = &session {
                    debug!(kind = %s.kind, id = s.id, "drag cancelled");
                }
                session
            }
            _ => None,
        }
    }

    /// Close the details dialog. Returns the closed session.
    pub fn close_details(&mut self) -> Option<DragSession> {
        if self.phase() != DragPhase::Details {
            return None;
        }
        self.target = None;
        self.session.take()
    }
}

fn new_session(event: &InputEvent, entity: EntityRef, rect: Rect, dialog_open: bool) -> DragSession {
    let press_position = event.position().unwrap_or_else(|| rect.origin());
    DragSession {
        kind: entity.kind,
        id: entity.id,
        origin_container: entity.container,
        origin_index: entity.index,
        origin_order: entity.order,
        dragging: false,
        dialog_open,
        rect,
        pointer_offset: if dialog_open {
            Vector2::default()
        } else {
            press_position.sub(rect.origin())
        },
        press_position,
        source: event.source(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PRIMARY_BUTTON;

    fn item(id: u32, container: u32, index: usize) -> EntityRef {
        EntityRef {
            kind: EntityKind::Item,
            id,
            container,
            index,
            order: index as f64 + 1.0,
        }
    }

    fn press_at(x: f64, y: f64) -> InputEvent {
        InputEvent::Pointer { buttons: PRIMARY_BUTTON, position: Vector2::new(x, y) }
    }

    fn rect() -> Option<Rect> {
        Some(Rect::new(10.0, 100.0, 200.0, 40.0))
    }

    #[test]
    fn test_press_sets_pressed_and_no_op_target() {
        let mut engine = DragEngine::default();
        let class = engine.begin_or_select(&press_at(30.0, 110.0), item(7, 1, 2), rect());
        assert_eq!(class, Classification::BeginDrag);
        assert_eq!(engine.phase(), DragPhase::Pressed);
        assert_eq!(engine.target(), Some(DragTarget { container: 1, index: 3 }));

        let session = engine.session().unwrap();
        assert!(!session.dragging);
        assert!(!session.dialog_open);
        assert_eq!(session.pointer_offset, Vector2::new(20.0, 10.0));
        assert_eq!(session.origin_index, 2);
    }

    #[test]
    fn test_touch_press_has_no_initial_target() {
        let mut engine = DragEngine::default();
        let touch = InputEvent::Touch { position: Vector2::new(30.0, 110.0) };
        engine.begin_or_select(&touch, item(7, 1, 2), rect());
        assert_eq!(engine.phase(), DragPhase::Pressed);
        assert_eq!(engine.target(), None);
    }

    #[test]
    fn test_tap_opens_details() {
        let mut engine = DragEngine::default();
        engine.begin_or_select(&press_at(30.0, 110.0), item(7, 1, 0), rect());
        match engine.release() {
            Release::Tap(s) => assert!(s.dialog_open),
            other => panic!("expected tap, got {:?}", other),
        }
        assert_eq!(engine.phase(), DragPhase::Details);
        assert_eq!(engine.target(), None);
        assert!(engine.close_details().is_some());
        assert_eq!(engine.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_keyboard_confirm_goes_straight_to_details() {
        let mut engine = DragEngine::default();
        let enter = InputEvent::Key { key: "Enter".into() };
        engine.begin_or_select(&enter, item(7, 1, 0), None);
        assert_eq!(engine.phase(), DragPhase::Details);
        assert_eq!(engine.release(), Release::Idle);
    }

    #[test]
    fn test_any_move_promotes_to_dragging() {
        let mut engine = DragEngine::default();
        engine.begin_or_select(&press_at(30.0, 110.0), item(7, 1, 0), rect());
        assert!(engine.pointer_moved(Vector2::new(30.0, 111.0), true));
        assert_eq!(engine.phase(), DragPhase::Dragging);
    }

    #[test]
    fn test_move_without_button_does_not_promote() {
        let mut engine = DragEngine::default();
        engine.begin_or_select(&press_at(30.0, 110.0), item(7, 1, 0), rect());
        assert!(!engine.pointer_moved(Vector2::new(80.0, 180.0), false));
        assert_eq!(engine.phase(), DragPhase::Pressed);
    }

    #[test]
    fn test_threshold_respected() {
        let mut engine = DragEngine::new(DndConfig { move_threshold_px: 5.0, ..Default::default() });
        engine.begin_or_select(&press_at(30.0, 110.0), item(7, 1, 0), rect());
        assert!(!engine.pointer_moved(Vector2::new(33.0, 112.0), true));
        assert!(engine.pointer_moved(Vector2::new(40.0, 112.0), true));
    }

    #[test]
    fn test_release_after_drag_commits() {
        let mut engine = DragEngine::default();
        engine.begin_or_select(&press_at(30.0, 110.0), item(7, 1, 0), rect());
        engine.pointer_moved(Vector2::new(30.0, 200.0), true);
        engine.update_drag_target(Some(DragTarget { container: 2, index: 0 }));
        match engine.release() {
            Release::Commit { session, target } => {
                assert_eq!(session.id, 7);
                assert_eq!(target, DragTarget { container: 2, index: 0 });
            }
            other => panic!("expected commit, got {:?}", other),
        }
        // Still present until finish()
        assert_eq!(engine.phase(), DragPhase::Dragging);
        engine.finish();
        assert_eq!(engine.phase(), DragPhase::Idle);
        assert_eq!(engine.target(), None);
    }

    #[test]
    fn test_release_without_target_cancels() {
        let mut engine = DragEngine::default();
        let touch = InputEvent::Touch { position: Vector2::new(30.0, 110.0) };
        engine.begin_or_select(&touch, item(7, 1, 0), rect());
        engine.pointer_moved(Vector2::new(30.0, 200.0), true);
        assert!(matches!(engine.release(), Release::Cancel(_)));
        assert_eq!(engine.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_missing_target_is_sticky() {
        let mut engine = DragEngine::default();
        engine.begin_or_select(&press_at(30.0, 110.0), item(7, 1, 0), rect());
        engine.pointer_moved(Vector2::new(30.0, 200.0), true);
        engine.update_drag_target(Some(DragTarget { container: 3, index: 1 }));
        assert!(!engine.update_drag_target(None));
        assert_eq!(engine.target(), Some(DragTarget { container: 3, index: 1 }));
    }

    #[test]
    fn test_target_ignored_before_drag() {
        let mut engine = DragEngine::default();
        engine.begin_or_select(&press_at(30.0, 110.0), item(7, 1, 0), rect());
        assert!(!engine.update_drag_target(Some(DragTarget { container: 3, index: 1 })));
        assert_eq!(engine.target(), Some(DragTarget { container: 1, index: 1 }));
    }

    #[test]
    fn test_escape_cancels_and_returns_session() {
        let mut engine = DragEngine::default();
        engine.begin_or_select(&press_at(30.0, 110.0), item(7, 1, 0), rect());
        engine.pointer_moved(Vector2::new(30.0, 200.0), true);
        let cancelled = engine.cancel().unwrap();
        assert_eq!(cancelled.id, 7);
        assert_eq!(engine.phase(), DragPhase::Idle);
        assert_eq!(engine.cancel(), None);
    }

    #[test]
    fn test_second_press_refused_while_dragging() {
        let mut engine = DragEngine::default();
        engine.begin_or_select(&press_at(30.0, 110.0), item(7, 1, 0), rect());
        engine.pointer_moved(Vector2::new(30.0, 200.0), true);
        let class = engine.begin_or_select(&press_at(30.0, 300.0), item(8, 1, 1), rect());
        assert_eq!(class, Classification::Ignore);
        assert_eq!(engine.session().unwrap().id, 7);
    }
}
