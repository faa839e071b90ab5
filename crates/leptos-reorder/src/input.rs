//! Input events
//!
//! Pointer, touch and keyboard events are folded into one tagged variant at
//! the DOM boundary so the classifier never inspects runtime event types.

use serde::{Deserialize, Serialize};

use crate::geometry::Vector2;

/// Bitmask value of `PointerEvent.buttons` with only the primary button held
pub const PRIMARY_BUTTON: u16 = 1;
/// Bitmask value of `PointerEvent.buttons` with only the secondary button held
pub const SECONDARY_BUTTON: u16 = 2;

/// Device-agnostic input event
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Mouse or pen
    Pointer { buttons: u16, position: Vector2 },
    Touch { position: Vector2 },
    Key { key: String },
}

/// Which kind of device started a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputSource {
    Pointer,
    Touch,
    Keyboard,
}

impl InputEvent {
    pub fn source(&self) -> InputSource {
        match self {
            InputEvent::Pointer { .. } => InputSource::Pointer,
            InputEvent::Touch { .. } => InputSource::Touch,
            InputEvent::Key { .. } => InputSource::Keyboard,
        }
    }

    /// Viewport position of the event, if it has one
    pub fn position(&self) -> Option<Vector2> {
        match self {
            InputEvent::Pointer { position, .. } | InputEvent::Touch { position } => Some(*position),
            InputEvent::Key { .. } => None,
        }
    }

    /// Enter and Space confirm a focused list or item
    pub fn is_confirm_key(&self) -> bool {
        matches!(self, InputEvent::Key { key } if key == "Enter" || key == " ")
    }

    pub fn is_escape(&self) -> bool {
        matches!(self, InputEvent::Key { key } if key == "Escape")
    }

    /// Build from a DOM pointer event. Touch contacts become `Touch`.
    pub fn from_pointer_event(ev: &web_sys::PointerEvent) -> Self {
        let position = Vector2::new(ev.client_x() as f64, ev.client_y() as f64);
        if ev.pointer_type() == "touch" {
            InputEvent::Touch { position }
        } else {
            InputEvent::Pointer {
                buttons: ev.buttons(),
                position,
            }
        }
    }

    pub fn from_keyboard_event(ev: &web_sys::KeyboardEvent) -> Self {
        InputEvent::Key { key: ev.key() }
    }
}
