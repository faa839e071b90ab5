//! DOM adapter
//!
//! Geometry acquisition, global listeners and focus restore. Markup
//! contract:
//!
//! - a drop area carries `data-drop-area="list"|"item"` and
//!   `data-container="<id>"`; its rendered siblings are direct children
//!   with `data-drag-index`
//! - every draggable element carries `data-drag-kind` and `data-id`

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use tracing::trace;

use crate::geometry::{Rect, Vector2};
use crate::input::PRIMARY_BUTTON;
use crate::resolver::DropArea;
use crate::session::EntityKind;
use crate::signals::InteractionContext;

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

pub fn element_rect(el: &web_sys::Element) -> Rect {
    Rect::from_dom(&el.get_bounding_client_rect())
}

/// Bounds of the element an event handler is attached to
pub fn current_target_rect(ev: &web_sys::Event) -> Option<Rect> {
    let el = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    Some(element_rect(&el))
}

/// Drop area for `kind` under `point`, measured now
pub fn drop_area_at(point: Vector2, kind: EntityKind) -> Option<DropArea> {
    let hit = document()?.element_from_point(point.x as f32, point.y as f32)?;
    let area = hit
        .closest(&format!("[data-drop-area=\"{}\"]", kind.as_str()))
        .ok()
        .flatten()?;
    let container = area.get_attribute("data-container")?.parse::<u32>().ok()?;

    let nodes = area.query_selector_all(":scope > [data-drag-index]").ok()?;
    let siblings = (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .map(|el| element_rect(&el))
        .collect();
    Some(DropArea::for_kind(kind, container, siblings))
}

/// Move keyboard focus back to a list or item element
pub fn focus_entity(kind: EntityKind, id: u32) {
    let selector = format!("[data-drag-kind=\"{}\"][data-id=\"{}\"]", kind.as_str(), id);
    let Some(el) = document().and_then(|doc| doc.query_selector(&selector).ok().flatten()) else {
        trace!(%kind, id, "nothing to focus");
        return;
    };
    if let Ok(el) = el.dyn_into::<web_sys::HtmlElement>() {
        let _ = el.focus();
    }
}

/// Bind document-level pointer and key listeners for the whole app.
/// Call once at the root; `on_release` runs on every pointer-up.
pub fn bind_global_listeners<F>(ctx: InteractionContext, on_release: F)
where
    F: Fn() + 'static,
{
    let Some(doc) = document() else {
        return;
    };

    let on_pointermove = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(move |ev: web_sys::PointerEvent| {
        let position = Vector2::new(ev.client_x() as f64, ev.client_y() as f64);
        let held = ev.buttons() & PRIMARY_BUTTON != 0;
        if !ctx.pointer_moved(position, held) {
            return;
        }
        if let Some(kind) = ctx.dragged_kind() {
            let area = drop_area_at(position, kind);
            ctx.update_drag_target(position, area.as_ref());
        }
    });

    let on_pointerup = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(move |_ev: web_sys::PointerEvent| {
        on_release();
    });

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && ctx.escape() {
            ev.prevent_default();
        }
    });

    let on_pointercancel = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(move |_ev: web_sys::PointerEvent| {
        ctx.cancel_drag();
    });

    let _ = doc.add_event_listener_with_callback("pointermove", on_pointermove.as_ref().unchecked_ref());
    let _ = doc.add_event_listener_with_callback("pointerup", on_pointerup.as_ref().unchecked_ref());
    let _ = doc.add_event_listener_with_callback("pointercancel", on_pointercancel.as_ref().unchecked_ref());
    let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    on_pointermove.forget();
    on_pointerup.forget();
    on_pointercancel.forget();
    on_keydown.forget();
}
