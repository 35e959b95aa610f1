use crate::constants::CLICK_SLOP_PX;
use crate::input;
use crate::AppShared;
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;
use tree_core::InteractionEvent;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub shared: Rc<AppShared>,
    /// Client position of the press in progress on the canvas.
    pub press_at: Rc<Cell<Option<Vec2>>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_touchmove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        w.shared.hub.pointer_moved(input::pointer_vector(&ev));
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_touchmove(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        if let Some(v) = input::touch_vector(&ev) {
            w.shared.hub.pointer_moved(v);
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        w.press_at.set(Some(input::client_point(&ev)));
        w.shared.queue(InteractionEvent::PointerDown);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let Some(start) = w.press_at.take() else {
            return;
        };
        w.shared.queue(InteractionEvent::PointerUp);

        let moved = input::client_point(&ev).distance(start);
        if moved <= CLICK_SLOP_PX {
            let ndc = input::canvas_ndc(&ev, &w.canvas);
            let hit = w.shared.scene.borrow().hits_tree(ndc);
            if hit {
                log::info!("[click] tree at ({:.2}, {:.2})", ndc.x, ndc.y);
                w.shared.queue(InteractionEvent::TreeClicked);
            }
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
