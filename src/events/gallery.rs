use crate::constants::{GALLERY_CLOSE_ID, GALLERY_ID};
use crate::dom;
use crate::AppShared;
use std::rc::Rc;
use tree_core::InteractionEvent;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Horizontal drags on the gallery scroll the carousel; the close button
/// queues a close request.
pub fn wire_gallery_handlers(document: &web::Document, shared: &Rc<AppShared>) {
    let Some(gallery) = document.get_element_by_id(GALLERY_ID) else {
        log::warn!("[gallery] missing #{GALLERY_ID}; gallery input disabled");
        return;
    };

    let s = shared.clone();
    let target = gallery.clone();
    let down = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if let Some(c) = s.scene.borrow_mut().carousel_mut() {
            c.begin_drag(ev.client_x() as f32);
            _ = target.set_pointer_capture(ev.pointer_id());
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = gallery.add_event_listener_with_callback("pointerdown", down.as_ref().unchecked_ref());
    down.forget();

    let s = shared.clone();
    let mv = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if let Some(c) = s.scene.borrow_mut().carousel_mut() {
            c.drag_to(ev.client_x() as f32);
        }
    }) as Box<dyn FnMut(_)>);
    _ = gallery.add_event_listener_with_callback("pointermove", mv.as_ref().unchecked_ref());
    mv.forget();

    let s = shared.clone();
    let up = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        if let Some(c) = s.scene.borrow_mut().carousel_mut() {
            c.end_drag();
        }
    }) as Box<dyn FnMut(_)>);
    for name in ["pointerup", "pointercancel"] {
        _ = gallery.add_event_listener_with_callback(name, up.as_ref().unchecked_ref());
    }
    up.forget();

    let s = shared.clone();
    dom::add_click_listener(document, GALLERY_CLOSE_ID, move || {
        s.queue(InteractionEvent::CloseOverlay);
    });
}
