//! Press handlers shared by list headers and item cards

use leptos_reorder::dom::current_target_rect;
use leptos_reorder::{Classification, EntityKind, EntityRef, InputEvent, InputSource, InteractionContext};

use crate::context::AppContext;

/// Forward a pointer press to the drag engine
pub fn pointer_press(
    interaction: InteractionContext,
    app: AppContext,
    ev: &web_sys::PointerEvent,
    entity: EntityRef,
) {
    let event = InputEvent::from_pointer_event(ev);
    let rect = current_target_rect(ev);
    match interaction.begin_or_select(&event, entity, rect) {
        Classification::ContextMenu { at } => {
            ev.prevent_default();
            if entity.kind == EntityKind::Item {
                app.open_context_menu(entity.id, at);
            }
        }
        // Stops text selection while the pointer moves
        Classification::BeginDrag if event.source() == InputSource::Pointer => ev.prevent_default(),
        _ => {}
    }
}

/// Forward a key press to the drag engine; Enter and Space open details
pub fn key_press(interaction: InteractionContext, ev: &web_sys::KeyboardEvent, entity: EntityRef) {
    let event = InputEvent::from_keyboard_event(ev);
    if interaction.begin_or_select(&event, entity, None).suppresses_default() {
        ev.prevent_default();
    }
}
